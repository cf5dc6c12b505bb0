use rayon::prelude::*;
use crate::fuzzy::{Inference, Result};
use crate::intersection::{Direction, IntersectionController, IntersectionSnapshot};
use super::UrgencyBackend;

/// Evaluates the four approaches on the global rayon pool.
///
/// Each approach is independent and the engine holds no mutable state, so
/// results match [`super::SequentialBackend`] exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelBackend;

impl UrgencyBackend for ParallelBackend {
    fn evaluate(
        &self,
        controller: &IntersectionController,
        snapshot: &IntersectionSnapshot,
    ) -> Result<Vec<Inference>> {
        Direction::ALL
            .par_iter()
            .map(|direction| controller.urgency(snapshot.sample(*direction)))
            .collect()
    }

    fn get_name(&self) -> &'static str {
        "parallel"
    }

    fn is_parallel(&self) -> bool {
        true
    }
}
