use crate::fuzzy::{Inference, Result};
use crate::intersection::{IntersectionController, IntersectionSnapshot};

#[cfg(feature = "parallel")]
pub mod parallel;

pub mod sequential;

pub use sequential::*;

#[cfg(feature = "parallel")]
pub use parallel::*;

/// Runs stage one for all four approaches of a snapshot.
pub trait UrgencyBackend {
    /// One inference per direction, in `Direction::ALL` order.
    fn evaluate(
        &self,
        controller: &IntersectionController,
        snapshot: &IntersectionSnapshot,
    ) -> Result<Vec<Inference>>;
    fn get_name(&self) -> &'static str;
    fn is_parallel(&self) -> bool;
}

pub enum ComputeBackend {
    Sequential(SequentialBackend),
    #[cfg(feature = "parallel")]
    Parallel(ParallelBackend),
}

impl ComputeBackend {
    pub fn new_sequential() -> Self {
        ComputeBackend::Sequential(SequentialBackend)
    }

    #[cfg(feature = "parallel")]
    pub fn new_parallel() -> anyhow::Result<Self> {
        Ok(ComputeBackend::Parallel(ParallelBackend))
    }

    #[cfg(not(feature = "parallel"))]
    pub fn new_parallel() -> anyhow::Result<Self> {
        anyhow::bail!("Parallel evaluation not compiled in. Enable 'parallel' feature.")
    }
}

impl UrgencyBackend for ComputeBackend {
    fn evaluate(
        &self,
        controller: &IntersectionController,
        snapshot: &IntersectionSnapshot,
    ) -> Result<Vec<Inference>> {
        match self {
            ComputeBackend::Sequential(backend) => backend.evaluate(controller, snapshot),
            #[cfg(feature = "parallel")]
            ComputeBackend::Parallel(backend) => backend.evaluate(controller, snapshot),
        }
    }

    fn get_name(&self) -> &'static str {
        match self {
            ComputeBackend::Sequential(backend) => backend.get_name(),
            #[cfg(feature = "parallel")]
            ComputeBackend::Parallel(backend) => backend.get_name(),
        }
    }

    fn is_parallel(&self) -> bool {
        match self {
            ComputeBackend::Sequential(backend) => backend.is_parallel(),
            #[cfg(feature = "parallel")]
            ComputeBackend::Parallel(backend) => backend.is_parallel(),
        }
    }
}
