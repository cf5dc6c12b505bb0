//! Mamdani fuzzy inference: membership shapes, linguistic variables,
//! two-input rule bases and centroid defuzzification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod membership;
pub mod variable;
pub mod rules;
pub mod inference;

pub use membership::*;
pub use variable::*;
pub use rules::*;
pub use inference::*;

/// Upper bound on grid samples per domain.
pub const MAX_SAMPLES: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("domain [{min}, {max}] is empty or reversed")]
    EmptyDomain { min: f64, max: f64 },

    #[error("resolution {0} must be finite and positive")]
    InvalidResolution(f64),

    #[error("domain [{min}, {max}] at resolution {resolution} yields too many samples")]
    TooManySamples { min: f64, max: f64, resolution: f64 },

    #[error("breakpoints {0:?} must be finite and non-decreasing")]
    UnorderedBreakpoints(Vec<f64>),

    #[error("label '{label}' is defined twice on variable '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("variable '{variable}' has no label '{label}'")]
    UnknownLabel { variable: String, label: String },

    #[error("variable '{0}' has no labels")]
    NoLabels(String),

    #[error("rule base '{0}' has no rules")]
    EmptyRuleBase(String),

    #[error("input {value} for '{variable}' is outside [{min}, {max}]")]
    InputOutOfRange { variable: String, value: f64, min: f64, max: f64 },

    #[error("input for '{variable}' is not a finite number")]
    NonFiniteInput { variable: String },
}

pub type Result<T> = std::result::Result<T, FuzzyError>;

/// How crisp inputs outside a variable's domain are handled before
/// fuzzification. Applied to every input of every inference stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Clamp into `[min, max]`.
    #[default]
    Clamp,
    /// Fail with [`FuzzyError::InputOutOfRange`].
    Reject,
}

impl InputPolicy {
    pub fn apply(self, variable: &LinguisticVariable, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                variable: variable.name().to_string(),
            });
        }

        let domain = variable.domain();
        if domain.contains(value) {
            return Ok(value);
        }

        match self {
            InputPolicy::Clamp => {
                let clamped = domain.clamp(value);
                log::debug!(
                    "Clamped {} input {} to {}",
                    variable.name(),
                    value,
                    clamped
                );
                Ok(clamped)
            }
            InputPolicy::Reject => Err(FuzzyError::InputOutOfRange {
                variable: variable.name().to_string(),
                value,
                min: domain.min(),
                max: domain.max(),
            }),
        }
    }
}
