use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use crate::fuzzy::InputPolicy;
use super::Validate;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineParams {
    /// Overrides every variable's own resolution when set.
    pub resolution: Option<f64>,
    pub input_policy: InputPolicy,
}

impl Validate for EngineParams {
    fn validate(&self) -> Result<()> {
        if let Some(resolution) = self.resolution {
            if !resolution.is_finite() || resolution <= 0.0 {
                return Err(anyhow!("Engine resolution must be positive, got {}", resolution));
            }
        }

        Ok(())
    }
}
