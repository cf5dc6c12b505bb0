use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use log::{debug, info};

use crate::config::ControllerConfig;
use crate::compute::{SequentialBackend, UrgencyBackend};
use crate::fuzzy::{self, Inference, InferenceEngine, InputPolicy};

pub mod urgency;
pub mod extension;

pub use urgency::*;
pub use extension::*;

/// Approach direction. The declaration order is the tie-break precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// What the detectors report for one approach in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct DirectionSample {
    pub sum_of_waiting_cars: u32,
    pub waiting_time_seconds: f64,
    /// Left-turn lane.
    pub inner_lane_queue: u32,
    /// Straight-ahead and right-turn lane.
    pub outer_lane_queue: u32,
}

impl DirectionSample {
    pub fn new(sum_of_waiting_cars: u32, waiting_time_seconds: f64, inner_lane_queue: u32, outer_lane_queue: u32) -> Self {
        Self {
            sum_of_waiting_cars,
            waiting_time_seconds,
            inner_lane_queue,
            outer_lane_queue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct IntersectionSnapshot {
    pub north: DirectionSample,
    pub east: DirectionSample,
    pub south: DirectionSample,
    pub west: DirectionSample,
}

impl IntersectionSnapshot {
    pub fn sample(&self, direction: Direction) -> &DirectionSample {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &DirectionSample)> {
        Direction::ALL.into_iter().map(move |d| (d, self.sample(d)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionResult {
    pub selected_direction: Direction,
    pub urgency_scores: BTreeMap<Direction, f64>,
    pub extension_time_seconds: f64,
}

/// A decision with every inference that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTrace {
    pub result: DecisionResult,
    /// One per direction, in [`Direction::ALL`] order.
    pub urgency: Vec<Inference>,
    pub extension: Inference,
}

/// Highest urgency wins; on equal scores the earlier direction in
/// [`Direction::ALL`] keeps the phase.
pub fn select_direction(urgency: &[f64; 4]) -> Direction {
    let mut best = Direction::North;
    for direction in Direction::ALL.into_iter().skip(1) {
        if urgency[direction.index()] > urgency[best.index()] {
            best = direction;
        }
    }
    best
}

/// Both inference stages plus the selection policy between them.
#[derive(Debug, Clone)]
pub struct IntersectionController {
    urgency: InferenceEngine,
    extension: InferenceEngine,
}

impl IntersectionController {
    pub fn new(urgency: InferenceEngine, extension: InferenceEngine) -> Self {
        Self { urgency, extension }
    }

    /// Controller with the stock membership shapes at resolution 1.
    pub fn canonical() -> fuzzy::Result<Self> {
        Self::from_config(&ControllerConfig::default())
    }

    pub fn from_config(config: &ControllerConfig) -> fuzzy::Result<Self> {
        let vars = &config.variables;
        let policy = config.engine.input_policy;
        let build = |var: &crate::config::VariableConfig| var.to_variable(config.resolution_for(var));

        let lane_level = build(&vars.lane_level)?;
        let urgency = InferenceEngine::new(
            build(&vars.queue_level)?,
            build(&vars.wait_level)?,
            build(&vars.urgency_level)?,
            urgency_rules(),
            policy,
        )?;
        let extension = InferenceEngine::new(
            lane_level.clone(),
            lane_level,
            build(&vars.extension_level)?,
            extension_rules(),
            policy,
        )?;

        debug!(
            "Controller built: {} urgency rules, {} extension rules, {:?} inputs",
            urgency.rule_base().len(),
            extension.rule_base().len(),
            policy
        );

        Ok(Self::new(urgency, extension))
    }

    pub fn urgency_engine(&self) -> &InferenceEngine {
        &self.urgency
    }

    pub fn extension_engine(&self) -> &InferenceEngine {
        &self.extension
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.urgency.policy()
    }

    /// Stage one for a single approach.
    pub fn urgency(&self, sample: &DirectionSample) -> fuzzy::Result<Inference> {
        self.urgency
            .infer(f64::from(sample.sum_of_waiting_cars), sample.waiting_time_seconds)
    }

    /// Stage two for the approach that won the phase.
    pub fn extension(&self, sample: &DirectionSample) -> fuzzy::Result<Inference> {
        self.extension
            .infer(f64::from(sample.inner_lane_queue), f64::from(sample.outer_lane_queue))
    }

    fn check_lanes(&self, snapshot: &IntersectionSnapshot) -> fuzzy::Result<()> {
        let policy = self.extension.policy();
        for (_, sample) in snapshot.iter() {
            policy.apply(self.extension.first(), f64::from(sample.inner_lane_queue))?;
            policy.apply(self.extension.second(), f64::from(sample.outer_lane_queue))?;
        }
        Ok(())
    }

    pub fn decide(&self, snapshot: &IntersectionSnapshot) -> fuzzy::Result<DecisionResult> {
        Ok(self.decide_traced(snapshot)?.result)
    }

    pub fn decide_traced(&self, snapshot: &IntersectionSnapshot) -> fuzzy::Result<DecisionTrace> {
        self.decide_with(&SequentialBackend, snapshot)
    }

    pub fn decide_with<B: UrgencyBackend + ?Sized>(
        &self,
        backend: &B,
        snapshot: &IntersectionSnapshot,
    ) -> fuzzy::Result<DecisionTrace> {
        // Lane inputs of every approach face the policy, not only the winner's
        self.check_lanes(snapshot)?;
        let urgency = backend.evaluate(self, snapshot)?;

        let mut scores = [0.0; 4];
        for (score, inference) in scores.iter_mut().zip(&urgency) {
            *score = inference.crisp();
        }
        let selected_direction = select_direction(&scores);

        let extension = self.extension(snapshot.sample(selected_direction))?;

        let result = DecisionResult {
            selected_direction,
            urgency_scores: Direction::ALL.into_iter().zip(scores).collect(),
            extension_time_seconds: extension.crisp(),
        };
        info!(
            "Green to {} (urgency {:.3}), extend by {:.2}s",
            result.selected_direction,
            scores[selected_direction.index()],
            result.extension_time_seconds
        );

        Ok(DecisionTrace {
            result,
            urgency,
            extension,
        })
    }
}
