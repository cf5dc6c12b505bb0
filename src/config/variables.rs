use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use crate::fuzzy::{self, Domain, LinguisticVariable, MembershipFunction};
use crate::intersection::{
    EXTENSION_LABELS, EXTENSION_LEVEL, LANE_LABELS, LANE_LEVEL, QUEUE_LABELS, QUEUE_LEVEL,
    URGENCY_LABELS, URGENCY_LEVEL, WAIT_LABELS, WAIT_LEVEL,
};
use super::Validate;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VariablesConfig {
    pub queue_level: VariableConfig,
    pub wait_level: VariableConfig,
    pub urgency_level: VariableConfig,
    /// Shared by the inner and outer lane inputs.
    pub lane_level: VariableConfig,
    pub extension_level: VariableConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VariableConfig {
    pub name: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    pub terms: Vec<TermConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermConfig {
    pub label: String,
    pub shape: MembershipFunction,
}

fn default_resolution() -> f64 {
    1.0
}

fn trap(a: f64, b: f64, c: f64, d: f64) -> MembershipFunction {
    MembershipFunction::Trapezoid([a, b, c, d])
}

fn tri(a: f64, b: f64, c: f64) -> MembershipFunction {
    MembershipFunction::Triangle([a, b, c])
}

impl VariableConfig {
    fn four(name: &str, max: f64, labels: [&str; 4], shapes: [MembershipFunction; 4]) -> Self {
        Self {
            name: name.to_string(),
            min: 0.0,
            max,
            resolution: default_resolution(),
            terms: labels
                .iter()
                .zip(shapes)
                .map(|(label, shape)| TermConfig {
                    label: label.to_string(),
                    shape,
                })
                .collect(),
        }
    }

    pub fn to_variable(&self, resolution: f64) -> fuzzy::Result<LinguisticVariable> {
        let domain = Domain::new(self.min, self.max, resolution)?;
        self.terms
            .iter()
            .fold(LinguisticVariable::builder(self.name.clone(), domain), |builder, term| {
                builder.term(term.label.clone(), term.shape)
            })
            .build()
    }

    fn check(&self, expected_name: &str, required: &[&str]) -> Result<()> {
        if self.name != expected_name {
            return Err(anyhow!(
                "Variable '{}' is configured under '{}'",
                self.name,
                expected_name
            ));
        }

        self.to_variable(self.resolution)
            .map_err(|e| anyhow!("Variable '{}': {}", self.name, e))?;

        for label in required {
            if !self.terms.iter().any(|t| t.label == *label) {
                return Err(anyhow!(
                    "Variable '{}' is missing label '{}' used by the rule tables",
                    self.name,
                    label
                ));
            }
        }

        for term in &self.terms {
            let (lo, hi) = term.shape.support();
            if hi < self.min || lo > self.max {
                return Err(anyhow!(
                    "Label '{}' of '{}' lies entirely outside [{}, {}]",
                    term.label,
                    self.name,
                    self.min,
                    self.max
                ));
            }
        }

        Ok(())
    }
}

impl Default for VariablesConfig {
    fn default() -> Self {
        Self {
            queue_level: VariableConfig::four(
                QUEUE_LEVEL,
                20.0,
                QUEUE_LABELS,
                [
                    trap(0.0, 0.0, 0.0, 1.0),
                    tri(0.0, 6.0, 12.0),
                    tri(6.0, 12.0, 18.0),
                    trap(12.0, 18.0, 20.0, 20.0),
                ],
            ),
            wait_level: VariableConfig::four(
                WAIT_LEVEL,
                150.0,
                WAIT_LABELS,
                [
                    trap(0.0, 0.0, 30.0, 60.0),
                    tri(30.0, 60.0, 90.0),
                    tri(60.0, 90.0, 120.0),
                    trap(90.0, 120.0, 150.0, 150.0),
                ],
            ),
            urgency_level: VariableConfig::four(
                URGENCY_LEVEL,
                10.0,
                URGENCY_LABELS,
                [
                    trap(0.0, 0.0, 2.0, 4.0),
                    tri(2.0, 4.0, 6.0),
                    tri(4.0, 6.0, 8.0),
                    trap(6.0, 8.0, 10.0, 10.0),
                ],
            ),
            lane_level: VariableConfig::four(
                LANE_LEVEL,
                10.0,
                LANE_LABELS,
                [
                    trap(0.0, 0.0, 2.0, 4.0),
                    tri(2.0, 4.0, 6.0),
                    tri(4.0, 6.0, 8.0),
                    trap(6.0, 8.0, 10.0, 10.0),
                ],
            ),
            extension_level: VariableConfig::four(
                EXTENSION_LEVEL,
                40.0,
                EXTENSION_LABELS,
                [
                    trap(0.0, 0.0, 0.0, 1.0),
                    tri(0.0, 10.0, 20.0),
                    tri(10.0, 20.0, 30.0),
                    trap(20.0, 30.0, 40.0, 40.0),
                ],
            ),
        }
    }
}

impl Validate for VariablesConfig {
    fn validate(&self) -> Result<()> {
        self.queue_level.check(QUEUE_LEVEL, &QUEUE_LABELS)?;
        self.wait_level.check(WAIT_LEVEL, &WAIT_LABELS)?;
        self.urgency_level.check(URGENCY_LEVEL, &URGENCY_LABELS)?;
        self.lane_level.check(LANE_LEVEL, &LANE_LABELS)?;
        self.extension_level.check(EXTENSION_LEVEL, &EXTENSION_LABELS)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_variables_validate() {
        VariablesConfig::default().validate().unwrap();
    }

    #[test]
    fn canonical_queue_level_builds() {
        let var = VariablesConfig::default().queue_level.to_variable(1.0).unwrap();
        assert_eq!(var.name(), QUEUE_LEVEL);
        assert_eq!(var.domain().len(), 21);
        assert_eq!(var.labels().collect::<Vec<_>>(), QUEUE_LABELS.to_vec());
    }

    #[test]
    fn missing_rule_label_is_rejected() {
        let mut config = VariablesConfig::default();
        config.lane_level.terms.retain(|t| t.label != "medium");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing label 'medium'"));
    }

    #[test]
    fn misplaced_variable_is_rejected() {
        let mut config = VariablesConfig::default();
        config.wait_level = config.queue_level.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reversed_domain_is_rejected() {
        let mut config = VariablesConfig::default();
        config.urgency_level.min = 10.0;
        config.urgency_level.max = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unordered_breakpoints_are_rejected() {
        let mut config = VariablesConfig::default();
        config.extension_level.terms[2].shape = tri(30.0, 20.0, 10.0);
        assert!(config.validate().is_err());
    }
}
