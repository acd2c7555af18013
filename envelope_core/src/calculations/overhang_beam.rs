//! Overhang Beam Design Envelopes
//!
//! Ties the pieces together for a backspan + cantilever beam:
//!
//! 1. Each [`ServiceLoad`] is resolved to a service [`LoadVector`], either
//!    from an occupancy preset scaled by its tributary width/area or from
//!    named loads through the alias lookup.
//! 2. The beam is solved once per load category ([`analyze_by_category`]),
//!    giving moment and shear [`Series`] plus reactions per category.
//! 3. Every response is factored through the combination table
//!    ([`design_envelopes`]).
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::calculations::overhang_beam::{calculate, LoadSource, OverhangBeamInput, ServiceLoad};
//! use envelope_core::calculations::beam_analysis::LoadPlacement;
//! use envelope_core::config::Config;
//!
//! let input = OverhangBeamInput::new("B-1", 6.0, 2.0)
//!     .with_load(ServiceLoad::new(
//!         "W1",
//!         LoadSource::occupancy("Office", 3.0),
//!         LoadPlacement::Uniform { start: 0.0, end: 8.0 },
//!     ));
//!
//! let result = calculate(&input, &Config::default())?;
//! println!("Max moment {:.1} ({})", result.max_moment.value, result.max_moment.combination);
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::beam_analysis::{
    AppliedLoad, BeamResponse, BeamSolver, LoadPlacement, OverhangBeam, DEFAULT_SAMPLE_POINTS,
};
use crate::config::Config;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{
    alias_to_service_loads, envelope, CombinationTable, Envelope, LoadCategory, LoadVector, Series,
};

/// Where the magnitudes of a service load come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadSource {
    /// Occupancy preset unit loads times a tributary width or area
    Occupancy { occupancy: String, tributary: f64 },
    /// Named loads resolved through the alias lookup (`"roof_DL": 2.0`)
    Named { loads: BTreeMap<String, f64> },
}

impl LoadSource {
    pub fn occupancy(occupancy: impl Into<String>, tributary: f64) -> Self {
        LoadSource::Occupancy {
            occupancy: occupancy.into(),
            tributary,
        }
    }

    pub fn named<K: Into<String>>(loads: impl IntoIterator<Item = (K, f64)>) -> Self {
        LoadSource::Named {
            loads: loads.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Service magnitudes by category
    pub fn service_loads(&self, config: &Config) -> CalcResult<LoadVector<f64>> {
        match self {
            LoadSource::Occupancy { occupancy, tributary } => {
                config.occupancies.service_load(occupancy, *tributary)
            }
            LoadSource::Named { loads } => {
                alias_to_service_loads(loads.iter().map(|(k, v)| (k.as_str(), *v)), &config.aliases)
            }
        }
    }
}

/// One applied load in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLoad {
    /// Stable identifier, generated when the scenario omits it
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// User label (e.g. "W1", "P2")
    pub label: String,
    pub source: LoadSource,
    pub placement: LoadPlacement,
}

impl ServiceLoad {
    pub fn new(label: impl Into<String>, source: LoadSource, placement: LoadPlacement) -> Self {
        ServiceLoad {
            id: Uuid::new_v4(),
            label: label.into(),
            source,
            placement,
        }
    }

    /// Resolve the source into service magnitudes, keeping id and placement
    pub fn resolve(&self, config: &Config) -> CalcResult<ResolvedLoad> {
        Ok(ResolvedLoad {
            id: self.id,
            label: self.label.clone(),
            service: self.source.service_loads(config)?,
            placement: self.placement,
        })
    }
}

/// A scenario load with its magnitudes by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLoad {
    pub id: Uuid,
    pub label: String,
    pub service: LoadVector<f64>,
    pub placement: LoadPlacement,
}

impl ResolvedLoad {
    pub fn new(label: impl Into<String>, service: LoadVector<f64>, placement: LoadPlacement) -> Self {
        ResolvedLoad {
            id: Uuid::new_v4(),
            label: label.into(),
            service,
            placement,
        }
    }

    /// The part of this load in one category, as applied to the beam
    pub fn applied(&self, category: LoadCategory) -> AppliedLoad {
        AppliedLoad {
            id: self.id,
            magnitude: *self.service.get(category),
            placement: self.placement,
        }
    }
}

/// Responses of the beam, one load vector per response type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    /// Sample positions from support A
    pub positions: Vec<f64>,
    pub moment: LoadVector<Series>,
    pub shear: LoadVector<Series>,
    /// Reactions per support (A, B), each by category
    pub reactions: Vec<LoadVector<f64>>,
}

/// Solve the beam once per load category and regroup the results.
///
/// Each load keeps its id in every category, so a solver sees the same
/// load five times with different magnitudes.
pub fn analyze_by_category<S: BeamSolver>(solver: &S, loads: &[ResolvedLoad]) -> CalcResult<ResponseSet> {
    let responses = LoadCategory::ALL
        .iter()
        .map(|category| {
            let applied: Vec<AppliedLoad> = loads.iter().map(|load| load.applied(*category)).collect();
            solver.solve(&applied)
        })
        .collect::<CalcResult<Vec<BeamResponse>>>()?;

    let first = &responses[0];
    let points = first.positions.len();
    for (category, response) in LoadCategory::ALL.iter().zip(&responses) {
        if response.positions != first.positions {
            return Err(CalcError::shape_mismatch(
                format!("positions for {}", category),
                points,
                response.positions.len(),
            ));
        }
        if response.moment.len() != points {
            return Err(CalcError::shape_mismatch(
                format!("moment response for {}", category),
                points,
                response.moment.len(),
            ));
        }
        if response.shear.len() != points {
            return Err(CalcError::shape_mismatch(
                format!("shear response for {}", category),
                points,
                response.shear.len(),
            ));
        }
        if response.reactions.len() != first.reactions.len() {
            return Err(CalcError::shape_mismatch(
                format!("reactions for {}", category),
                first.reactions.len(),
                response.reactions.len(),
            ));
        }
    }

    let reactions = (0..first.reactions.len())
        .map(|support| LoadVector::from_fn(|category| responses[category.index()].reactions[support]))
        .collect();

    Ok(ResponseSet {
        positions: first.positions.clone(),
        moment: LoadVector::from_fn(|category| Series(responses[category.index()].moment.clone())),
        shear: LoadVector::from_fn(|category| Series(responses[category.index()].shear.clone())),
        reactions,
    })
}

/// Factored envelopes for every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignEnvelopes {
    pub moment: Envelope<Series>,
    pub shear: Envelope<Series>,
    /// One envelope per support (A, B)
    pub reactions: Vec<Envelope<f64>>,
}

/// Factor every response through `table`
pub fn design_envelopes(responses: &ResponseSet, table: &CombinationTable) -> CalcResult<DesignEnvelopes> {
    let moment = envelope(&responses.moment, table)?;
    let shear = envelope(&responses.shear, table)?;
    let reactions = responses
        .reactions
        .iter()
        .map(|r| envelope(r, table))
        .collect::<CalcResult<Vec<_>>>()?;

    debug!(table = table.name(), positions = responses.positions.len(), "computed design envelopes");
    Ok(DesignEnvelopes { moment, shear, reactions })
}

/// Responses under one selected combination, for plotting against the envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationDiagram {
    pub name: String,
    pub equation: String,
    pub moment: Series,
    pub shear: Series,
    pub reactions: Vec<f64>,
}

/// Factor every response with the single combination `name`
pub fn combination_diagram(
    responses: &ResponseSet,
    table: &CombinationTable,
    name: &str,
) -> CalcResult<CombinationDiagram> {
    let combo = table.get(name).ok_or_else(|| {
        CalcError::invalid_input(
            "combination",
            name,
            format!("Not found in combination table '{}'", table.name()),
        )
    })?;

    Ok(CombinationDiagram {
        name: combo.name.clone(),
        equation: combo.equation(),
        moment: responses.moment.factor(&combo.factors)?,
        shear: responses.shear.factor(&combo.factors)?,
        reactions: responses
            .reactions
            .iter()
            .map(|r| r.factor(&combo.factors))
            .collect::<CalcResult<Vec<_>>>()?,
    })
}

fn default_sample_points() -> usize {
    DEFAULT_SAMPLE_POINTS
}

/// Input for an overhang beam envelope calculation
///
/// # JSON Format
/// ```json
/// {
///   "label": "B-1",
///   "backspan": 6.0,
///   "cantilever": 2.0,
///   "loads": [
///     {
///       "label": "W1",
///       "source": { "kind": "occupancy", "occupancy": "Office", "tributary": 3.0 },
///       "placement": { "type": "Uniform", "start": 0.0, "end": 6.0 }
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhangBeamInput {
    /// User label for this beam
    pub label: String,
    /// Distance between supports
    pub backspan: f64,
    /// Overhang past the second support
    pub cantilever: f64,
    /// Number of sample positions along the beam
    #[serde(default = "default_sample_points")]
    pub sample_points: usize,
    /// Applied service loads
    #[serde(default)]
    pub loads: Vec<ServiceLoad>,
}

impl OverhangBeamInput {
    pub fn new(label: impl Into<String>, backspan: f64, cantilever: f64) -> Self {
        OverhangBeamInput {
            label: label.into(),
            backspan,
            cantilever,
            sample_points: DEFAULT_SAMPLE_POINTS,
            loads: Vec::new(),
        }
    }

    /// Add a load (builder pattern)
    pub fn with_load(mut self, load: ServiceLoad) -> Self {
        self.loads.push(load);
        self
    }

    /// Set the number of sample positions (builder pattern)
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points;
        self
    }

    /// The beam this input describes
    pub fn beam(&self) -> OverhangBeam {
        OverhangBeam::new(self.backspan, self.cantilever).with_sample_points(self.sample_points)
    }
}

/// An envelope extreme with where it occurs and what governs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    pub value: f64,
    pub position: f64,
    pub combination: String,
}

/// Factored reactions at one support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionResult {
    /// Support label ("R1", "R2")
    pub support: String,
    pub max: f64,
    pub max_combination: String,
    pub min: f64,
    pub min_combination: String,
}

/// Result of an overhang beam envelope calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhangBeamResult {
    pub label: String,
    /// Name of the combination table used
    pub combination_table: String,
    pub calculated_at: DateTime<Utc>,

    pub max_moment: Extreme,
    pub min_moment: Extreme,
    pub max_shear: Extreme,
    pub min_shear: Extreme,
    pub reactions: Vec<ReactionResult>,

    /// Sample positions shared by every diagram
    pub positions: Vec<f64>,
    pub envelopes: DesignEnvelopes,
    /// Service responses by category, for per-combination diagrams
    pub responses: ResponseSet,
    /// Scenario loads with their resolved service magnitudes
    pub loads: Vec<ResolvedLoad>,
}

fn extreme(
    values: &[f64],
    trace: &[usize],
    positions: &[f64],
    table: &CombinationTable,
    better: fn(f64, f64) -> bool,
) -> CalcResult<Extreme> {
    let mut best: Option<usize> = None;
    for (i, value) in values.iter().enumerate() {
        if best.map_or(true, |b| better(*value, values[b])) {
            best = Some(i);
        }
    }
    let index = best.ok_or_else(|| CalcError::invalid_input("positions", "0", "No sample positions"))?;
    Ok(Extreme {
        value: values[index],
        position: positions.get(index).copied().unwrap_or_default(),
        combination: trace
            .get(index)
            .and_then(|row| table.name_at(*row))
            .unwrap_or_default()
            .to_string(),
    })
}

/// Run an overhang beam envelope calculation
pub fn calculate(input: &OverhangBeamInput, config: &Config) -> CalcResult<OverhangBeamResult> {
    let table = &config.combinations;
    let beam = input.beam();
    beam.validate()?;

    let loads = input
        .loads
        .iter()
        .map(|load| load.resolve(config))
        .collect::<CalcResult<Vec<_>>>()?;

    let responses = analyze_by_category(&beam, &loads)?;
    let envelopes = design_envelopes(&responses, table)?;
    let positions = responses.positions.clone();

    let moment = &envelopes.moment;
    let shear = &envelopes.shear;
    let max_moment = extreme(moment.max.values(), &moment.max_trace, &positions, table, |a, b| a > b)?;
    let min_moment = extreme(moment.min.values(), &moment.min_trace, &positions, table, |a, b| a < b)?;
    let max_shear = extreme(shear.max.values(), &shear.max_trace, &positions, table, |a, b| a > b)?;
    let min_shear = extreme(shear.min.values(), &shear.min_trace, &positions, table, |a, b| a < b)?;

    let reactions = envelopes
        .reactions
        .iter()
        .enumerate()
        .map(|(i, env)| ReactionResult {
            support: format!("R{}", i + 1),
            max: env.max,
            max_combination: env.max_governing(table).concat(),
            min: env.min,
            min_combination: env.min_governing(table).concat(),
        })
        .collect();

    info!(
        label = %input.label,
        table = table.name(),
        max_moment = max_moment.value,
        min_moment = min_moment.value,
        "overhang beam envelopes calculated"
    );

    Ok(OverhangBeamResult {
        label: input.label.clone(),
        combination_table: table.name().to_string(),
        calculated_at: Utc::now(),
        max_moment,
        min_moment,
        max_shear,
        min_shear,
        reactions,
        positions,
        envelopes,
        responses,
        loads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::AliasLookup;
    use std::cell::RefCell;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    fn udl(start: f64, end: f64) -> LoadPlacement {
        LoadPlacement::Uniform { start, end }
    }

    #[test]
    fn test_analyze_by_category_keeps_categories_apart() {
        let beam = OverhangBeam::new(10.0, 0.0).with_sample_points(11);
        let loads = vec![ResolvedLoad::new("W1", LoadVector { d: 1.0, l: 2.0, ..Default::default() }, udl(0.0, 10.0))];
        let responses = analyze_by_category(&beam, &loads).unwrap();

        assert_eq!(responses.positions.len(), 11);
        assert_eq!(responses.moment.positions().unwrap(), Some(11));
        // wL²/8 at midspan per category
        assert!(approx_eq(responses.moment.d.values()[5], 12.5));
        assert!(approx_eq(responses.moment.l.values()[5], 25.0));
        assert!(responses.moment.s.values().iter().all(|m| *m == 0.0));

        assert_eq!(responses.reactions.len(), 2);
        assert!(approx_eq(responses.reactions[0].d, 5.0));
        assert!(approx_eq(responses.reactions[1].l, 10.0));
    }

    #[test]
    fn test_design_envelopes_simple_span() {
        let beam = OverhangBeam::new(10.0, 0.0).with_sample_points(11);
        let loads = vec![ResolvedLoad::new("W1", LoadVector { d: 10.0, l: 5.0, ..Default::default() }, udl(0.0, 10.0))];
        let responses = analyze_by_category(&beam, &loads).unwrap();
        let table = CombinationTable::new("demo")
            .with_combination("1.25D+1.5L", [1.25, 1.5, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("1.0D", [1.0, 0.0, 0.0, 0.0, 0.0]))
            .unwrap();

        let env = design_envelopes(&responses, &table).unwrap();
        // Factored line load 20 -> wL²/8 = 250, wL/2 = 100
        assert!(approx_eq(env.moment.max.values()[5], 250.0));
        assert!(approx_eq(env.moment.min.values()[5], 125.0));
        assert!(approx_eq(env.reactions[0].max, 100.0));
        assert_eq!(env.moment.max_trace[5], 0);
        assert_eq!(env.moment.min_trace[5], 1);
    }

    #[test]
    fn test_combination_diagram() {
        let beam = OverhangBeam::new(4.0, 1.0).with_sample_points(6);
        let loads = vec![ResolvedLoad::new(
            "P1",
            LoadVector { d: 2.0, ..Default::default() },
            LoadPlacement::Point { position: 5.0 },
        )];
        let responses = analyze_by_category(&beam, &loads).unwrap();
        let table = crate::loads::nbcc_2015_combinations();

        let diagram = combination_diagram(&responses, &table, "NBCC-1").unwrap();
        assert_eq!(diagram.equation, "1.4D");
        // Tip load 2.0 x 1.4, moment at B = -P·L2
        assert!(approx_eq(diagram.moment.values()[4], -2.8));
        assert_eq!(diagram.reactions.len(), 2);

        let err = combination_diagram(&responses, &table, "NBCC-99").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_calculate_with_occupancies() {
        // Office floor over the backspan, rooftop unit at the tip
        let input = OverhangBeamInput::new("B-1", 8.0, 2.0)
            .with_sample_points(11)
            .with_load(ServiceLoad::new("W1", LoadSource::occupancy("Office", 2.0), udl(0.0, 8.0)))
            .with_load(ServiceLoad::new(
                "P2",
                LoadSource::occupancy("Rooftop Mech", 1.0),
                LoadPlacement::Point { position: 10.0 },
            ));

        let result = calculate(&input, &Config::default()).unwrap();
        assert_eq!(result.combination_table, "NBCC 2015");
        assert_eq!(result.positions.len(), 11);
        assert_eq!(result.reactions.len(), 2);
        assert_eq!(result.reactions[0].support, "R1");

        // Hogging at the support is driven by the tip dead load
        assert!(result.min_moment.value < 0.0);
        assert!(approx_eq(result.min_moment.position, 8.0));
        assert!(result.max_moment.value > 0.0);
        assert!(result.max_moment.combination.starts_with("NBCC-2"));
        assert!(result.max_moment.value >= result.min_moment.value);

        // Support B carries the most load, under 1.25D + 1.5L
        let r2 = &result.reactions[1];
        assert!(r2.max > r2.min);
        assert_eq!(r2.max_combination, "NBCC-2a");
    }

    #[test]
    fn test_calculate_with_named_loads() {
        let config = Config::default().with_aliases(AliasLookup::new().with_alias("roof_DL", "D").with_alias("mech_DL", "D"));
        let input = OverhangBeamInput::new("B-2", 10.0, 0.0)
            .with_sample_points(11)
            .with_load(ServiceLoad::new(
                "W1",
                LoadSource::named([("roof_DL", 5.0), ("mech_DL", 3.0)]),
                udl(0.0, 10.0),
            ));

        let result = calculate(&input, &config).unwrap();
        // 1.4 x 8 = 11.2 line load -> wL/2 = 56
        assert!(approx_eq(result.reactions[0].max, 56.0));
        assert_eq!(result.reactions[0].max_combination, "NBCC-1");
        assert!(approx_eq(result.max_moment.value, 11.2 * 100.0 / 8.0));
    }

    #[test]
    fn test_calculate_errors() {
        let missing = OverhangBeamInput::new("B-3", 5.0, 1.0)
            .with_load(ServiceLoad::new("W1", LoadSource::occupancy("Hangar", 1.0), udl(0.0, 5.0)));
        let err = calculate(&missing, &Config::default()).unwrap_err();
        assert_eq!(err, CalcError::occupancy_not_found("Hangar"));

        let config = Config::default().with_combinations(CombinationTable::new("empty"));
        let err = calculate(&OverhangBeamInput::new("B-4", 5.0, 1.0), &config).unwrap_err();
        assert_eq!(err, CalcError::empty_table("empty"));

        let err = calculate(&OverhangBeamInput::new("B-5", -5.0, 1.0), &Config::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "label": "B-1",
            "backspan": 6.0,
            "cantilever": 2.0,
            "loads": [
                {
                    "label": "P1",
                    "source": { "kind": "named", "loads": { "D": 4.0, "L": 2.0 } },
                    "placement": { "type": "Point", "position": 3.0 }
                }
            ]
        }"#;
        let input: OverhangBeamInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.sample_points, DEFAULT_SAMPLE_POINTS);
        assert_eq!(input.loads.len(), 1);
        let service = input.loads[0].source.service_loads(&Config::default()).unwrap();
        assert_eq!(service, LoadVector::new(4.0, 2.0, 0.0, 0.0, 0.0));
    }

    struct RecordingSolver {
        beam: OverhangBeam,
        seen: RefCell<Vec<Vec<Uuid>>>,
    }

    impl BeamSolver for RecordingSolver {
        fn solve(&self, loads: &[AppliedLoad]) -> CalcResult<BeamResponse> {
            self.seen.borrow_mut().push(loads.iter().map(|l| l.id).collect());
            self.beam.solve(loads)
        }
    }

    #[test]
    fn test_load_ids_are_stable_across_categories() {
        let solver = RecordingSolver {
            beam: OverhangBeam::new(6.0, 2.0).with_sample_points(9),
            seen: RefCell::new(Vec::new()),
        };
        let loads = vec![
            ResolvedLoad::new("W1", LoadVector { d: 1.0, ..Default::default() }, udl(0.0, 6.0)),
            ResolvedLoad::new("P1", LoadVector { l: 3.0, ..Default::default() }, LoadPlacement::Point { position: 8.0 }),
        ];
        analyze_by_category(&solver, &loads).unwrap();

        let seen = solver.seen.borrow();
        assert_eq!(seen.len(), LoadCategory::ALL.len());
        let expected: Vec<Uuid> = loads.iter().map(|l| l.id).collect();
        for ids in seen.iter() {
            assert_eq!(ids, &expected);
        }
    }

    #[test]
    fn test_scenario_ids_reach_the_result() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{
                "label": "B-1",
                "backspan": 6.0,
                "cantilever": 2.0,
                "sample_points": 9,
                "loads": [
                    {{
                        "id": "{}",
                        "label": "P1",
                        "source": {{ "kind": "named", "loads": {{ "D": 4.0 }} }},
                        "placement": {{ "type": "Point", "position": 3.0 }}
                    }},
                    {{
                        "label": "W1",
                        "source": {{ "kind": "named", "loads": {{ "L": 1.0 }} }},
                        "placement": {{ "type": "Uniform", "start": 0.0, "end": 6.0 }}
                    }}
                ]
            }}"#,
            id
        );
        let input: OverhangBeamInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.loads[0].id, id);
        assert_ne!(input.loads[1].id, id);

        let result = calculate(&input, &Config::default()).unwrap();
        assert_eq!(result.loads.len(), 2);
        assert_eq!(result.loads[0].id, id);
        assert_eq!(result.loads[0].label, "P1");
        assert_eq!(result.loads[0].service, LoadVector::new(4.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(result.loads[1].id, input.loads[1].id);
    }

    struct ShortShearSolver(OverhangBeam);

    impl BeamSolver for ShortShearSolver {
        fn solve(&self, loads: &[AppliedLoad]) -> CalcResult<BeamResponse> {
            let mut response = self.0.solve(loads)?;
            response.shear.pop();
            Ok(response)
        }
    }

    #[test]
    fn test_short_shear_response_is_rejected() {
        let solver = ShortShearSolver(OverhangBeam::new(6.0, 2.0).with_sample_points(9));
        let loads = vec![ResolvedLoad::new("W1", LoadVector { d: 1.0, ..Default::default() }, udl(0.0, 6.0))];
        let err = analyze_by_category(&solver, &loads).unwrap_err();
        assert_eq!(err, CalcError::shape_mismatch("shear response for D", 9, 8));
    }
}
