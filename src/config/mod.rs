use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod engine;
pub mod variables;

pub use engine::*;
pub use variables::*;

/// Everything needed to build an `IntersectionController`.
///
/// Every section has a default, so a file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub engine: EngineParams,
    pub variables: VariablesConfig,
}

impl ControllerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read controller config '{}'", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid controller config '{}'", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ControllerConfig = toml::from_str(content)?;

        // Validate configurations
        config.engine.validate()?;
        config.variables.validate()?;

        Ok(config)
    }

    /// Resolution used for `variable`: the global override when set.
    pub fn resolution_for(&self, variable: &VariableConfig) -> f64 {
        self.engine.resolution.unwrap_or(variable.resolution)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
