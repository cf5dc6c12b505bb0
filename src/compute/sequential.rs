use crate::fuzzy::{Inference, Result};
use crate::intersection::{Direction, IntersectionController, IntersectionSnapshot};
use super::UrgencyBackend;

/// Evaluates north, east, south, west one after another.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBackend;

impl UrgencyBackend for SequentialBackend {
    fn evaluate(
        &self,
        controller: &IntersectionController,
        snapshot: &IntersectionSnapshot,
    ) -> Result<Vec<Inference>> {
        Direction::ALL
            .iter()
            .map(|direction| controller.urgency(snapshot.sample(*direction)))
            .collect()
    }

    fn get_name(&self) -> &'static str {
        "sequential"
    }

    fn is_parallel(&self) -> bool {
        false
    }
}
