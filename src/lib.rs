pub mod config;
pub mod fuzzy;
pub mod intersection;
pub mod compute;
pub mod report;
pub mod scenario;

pub use intersection::*;
pub use config::*;
