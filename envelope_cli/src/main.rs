//! # envelope CLI
//!
//! Runs overhang beam scenarios through the factoring engine and prints the
//! governing envelopes, or lists the configured combinations and occupancies.
//!
//! ```text
//! envelope run demos/balcony.json --aliases demos/aliases.json
//! envelope run beam.json --combinations NBCC_vec_full.json --combination NBCC-2a
//! envelope combinations --preset lrfd
//! envelope occupancies
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use envelope_core::calculations::{calculate, combination_diagram, CombinationDiagram, OverhangBeamResult};
use envelope_core::loads::{CombinationPreset, LoadCategory};
use envelope_core::{load_scenario, save_report, Config, ConfigSources};

/// Factored moment, shear and reaction envelopes for overhang beams.
#[derive(Parser, Debug)]
#[command(name = "envelope", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute design envelopes for a beam scenario.
    Run(RunArgs),

    /// List the combination table with its equations.
    Combinations(SourceArgs),

    /// List the occupancy presets and their unit loads.
    Occupancies(SourceArgs),
}

/// Built-in combination tables
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Preset {
    #[default]
    Nbcc,
    Lrfd,
}

impl From<Preset> for CombinationPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Nbcc => CombinationPreset::Nbcc2015,
            Preset::Lrfd => CombinationPreset::Asce7Lrfd,
        }
    }
}

/// Where the combination table, occupancies and aliases come from
#[derive(Args, Debug)]
struct SourceArgs {
    /// Built-in combination table used when no file is given.
    #[arg(long, value_enum, default_value_t = Preset::Nbcc)]
    preset: Preset,

    /// Combination table JSON (`{"name": [D, L, S, W, E], ...}`).
    #[arg(long)]
    combinations: Option<PathBuf>,

    /// Occupancy presets JSON.
    #[arg(long)]
    occupancies: Option<PathBuf>,

    /// Alias lookup JSON (`{"alias": "D", ...}`).
    #[arg(long)]
    aliases: Option<PathBuf>,
}

impl SourceArgs {
    fn config(&self) -> anyhow::Result<Config> {
        let sources = ConfigSources {
            combinations: self.combinations.as_deref(),
            occupancies: self.occupancies.as_deref(),
            aliases: self.aliases.as_deref(),
        };
        Config::load(self.preset.into(), sources).context("loading configuration")
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario JSON describing the beam and its loads.
    scenario: PathBuf,

    #[command(flatten)]
    sources: SourceArgs,

    /// Also report the responses under this single combination.
    #[arg(long)]
    combination: Option<String>,

    /// Print the envelope at every sample position.
    #[arg(long)]
    stations: bool,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Save the full result as JSON to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Combinations(args) => list_combinations(&args),
        Commands::Occupancies(args) => list_occupancies(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = args.sources.config()?;
    let input = load_scenario(&args.scenario)
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    tracing::info!(label = %input.label, loads = input.loads.len(), "running scenario");

    let result = calculate(&input, &config).with_context(|| format!("calculating {}", input.label))?;

    let diagram = args
        .combination
        .as_deref()
        .map(|name| combination_diagram(&result.responses, &config.combinations, name))
        .transpose()?;

    if let Some(path) = &args.output {
        save_report(&result, path).with_context(|| format!("saving report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report saved");
    }

    if args.json {
        let json = match &diagram {
            Some(diagram) => serde_json::to_string_pretty(&serde_json::json!({
                "result": result,
                "combination": diagram,
            }))?,
            None => serde_json::to_string_pretty(&result)?,
        };
        println!("{}", json);
        return Ok(());
    }

    print_result(&result);
    if args.stations {
        print_stations(&result, &config);
    }
    if let Some(diagram) = &diagram {
        print_diagram(diagram, &result.positions);
    }
    Ok(())
}

fn print_result(result: &OverhangBeamResult) {
    println!("═══════════════════════════════════════");
    println!("  {} - DESIGN ENVELOPES", result.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Combinations: {}", result.combination_table);
    println!("Calculated:   {}", result.calculated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("Service loads:");
    for load in &result.loads {
        print!("  {:<10} {:<8}", load.label, &load.id.to_string()[..8]);
        for (category, value) in load.service.iter() {
            print!(" {}={:<8.2}", category.code(), value);
        }
        println!();
    }
    println!();
    println!("Moment:");
    for (label, extreme) in [("M_max", &result.max_moment), ("M_min", &result.min_moment)] {
        println!(
            "  {} = {:>10.2} at x = {:.2}  ({})",
            label, extreme.value, extreme.position, extreme.combination
        );
    }
    println!();
    println!("Shear:");
    for (label, extreme) in [("V_max", &result.max_shear), ("V_min", &result.min_shear)] {
        println!(
            "  {} = {:>10.2} at x = {:.2}  ({})",
            label, extreme.value, extreme.position, extreme.combination
        );
    }
    println!();
    println!("Reactions:");
    for reaction in &result.reactions {
        println!(
            "  {}: max {:>10.2} ({}), min {:>10.2} ({})",
            reaction.support, reaction.max, reaction.max_combination, reaction.min, reaction.min_combination
        );
    }
    println!();
}

fn print_stations(result: &OverhangBeamResult, config: &Config) {
    let moment = &result.envelopes.moment;
    let shear = &result.envelopes.shear;
    let max_names = moment.max_governing(&config.combinations);
    let min_names = moment.min_governing(&config.combinations);

    println!(
        "{:>8}  {:>10} {:<10} {:>10} {:<10} {:>10} {:>10}",
        "x", "M_max", "", "M_min", "", "V_max", "V_min"
    );
    let at = |values: &[f64], i: usize| values.get(i).copied().unwrap_or(f64::NAN);
    for (i, x) in result.positions.iter().enumerate() {
        println!(
            "{:>8.3}  {:>10.2} {:<10} {:>10.2} {:<10} {:>10.2} {:>10.2}",
            x,
            at(moment.max.values(), i),
            max_names.get(i).copied().unwrap_or(""),
            at(moment.min.values(), i),
            min_names.get(i).copied().unwrap_or(""),
            at(shear.max.values(), i),
            at(shear.min.values(), i),
        );
    }
    println!();
}

fn print_diagram(diagram: &CombinationDiagram, positions: &[f64]) {
    println!("Combination {}: {}", diagram.name, diagram.equation);
    let or_nan = |value: Option<f64>| value.unwrap_or(f64::NAN);
    println!(
        "  M: {:.2} .. {:.2}   V: {:.2} .. {:.2}   over {} positions",
        or_nan(diagram.moment.min_value()),
        or_nan(diagram.moment.max_value()),
        or_nan(diagram.shear.min_value()),
        or_nan(diagram.shear.max_value()),
        positions.len()
    );
    for (i, reaction) in diagram.reactions.iter().enumerate() {
        println!("  R{} = {:.2}", i + 1, reaction);
    }
    println!();
}

fn list_combinations(args: &SourceArgs) -> anyhow::Result<()> {
    let config = args.config()?;
    let table = &config.combinations;
    println!("{} ({} combinations)", table.name(), table.len());
    println!();
    print!("{:<12}", "Name");
    for category in LoadCategory::ALL {
        print!("{:>7}", category.code());
    }
    println!("  Equation");
    for combo in table {
        print!("{:<12}", combo.name);
        for factor in combo.factors.as_array() {
            print!("{:>7.2}", factor);
        }
        println!("  {}", combo.equation());
    }
    println!();
    for category in LoadCategory::ALL {
        println!("  {} = {}", category.code(), category.description());
    }
    Ok(())
}

fn list_occupancies(args: &SourceArgs) -> anyhow::Result<()> {
    let config = args.config()?;
    print!("{:<20}", "Occupancy");
    for category in LoadCategory::ALL {
        print!("{:>7}", category.code());
    }
    println!();
    for occupancy in config.occupancies.iter() {
        print!("{:<20}", occupancy.name);
        for (_, value) in occupancy.unit_loads.iter() {
            print!("{:>7.2}", value);
        }
        println!();
    }
    Ok(())
}
