use log::{debug, trace};
use super::{and, or, Degrees, FuzzyError, InputPolicy, LinguisticVariable, Result, Rule, RuleBase};

#[derive(Debug, Clone, Copy)]
struct CompiledRule {
    first: usize,
    second: usize,
    consequent: usize,
}

/// Two-input Mamdani engine: min for AND and implication, max for
/// aggregation, centroid for defuzzification.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    first: LinguisticVariable,
    second: LinguisticVariable,
    output: LinguisticVariable,
    rule_base: RuleBase,
    compiled: Vec<CompiledRule>,
    grid: Vec<f64>,
    output_terms: Vec<Vec<f64>>,
    policy: InputPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Firing {
    pub rule: Rule,
    pub strength: f64,
}

/// Every intermediate of one inference, for reporting and plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    /// Crisp inputs after the input policy was applied.
    pub inputs: (f64, f64),
    pub first: Degrees,
    pub second: Degrees,
    pub firings: Vec<Firing>,
    /// Activated set per output label, in the output variable's label order.
    pub activated: Vec<(String, Vec<f64>)>,
    pub grid: Vec<f64>,
    pub aggregated: Vec<f64>,
    pub crisp: f64,
    /// Set when nothing fired and `crisp` is the output domain midpoint.
    pub fallback: bool,
}

impl Inference {
    pub fn crisp(&self) -> f64 {
        self.crisp
    }

    /// Firings with a non-zero strength.
    pub fn fired(&self) -> impl Iterator<Item = &Firing> {
        self.firings.iter().filter(|f| f.strength > 0.0)
    }

    /// Strongest firing; earlier rules win ties.
    pub fn dominant_rule(&self) -> Option<&Firing> {
        self.fired().fold(None, |best: Option<&Firing>, firing| match best {
            Some(top) if top.strength >= firing.strength => best,
            _ => Some(firing),
        })
    }
}

impl InferenceEngine {
    pub fn new(
        first: LinguisticVariable,
        second: LinguisticVariable,
        output: LinguisticVariable,
        rule_base: RuleBase,
        policy: InputPolicy,
    ) -> Result<Self> {
        if rule_base.is_empty() {
            return Err(FuzzyError::EmptyRuleBase(rule_base.name().to_string()));
        }

        let compiled = rule_base
            .rules()
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    first: first.index_of(&rule.antecedent.0)?,
                    second: second.index_of(&rule.antecedent.1)?,
                    consequent: output.index_of(&rule.consequent)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let grid = output.samples().collect();
        let output_terms = output.sampled_terms();

        Ok(Self {
            first,
            second,
            output,
            rule_base,
            compiled,
            grid,
            output_terms,
            policy,
        })
    }

    pub fn first(&self) -> &LinguisticVariable {
        &self.first
    }

    pub fn second(&self) -> &LinguisticVariable {
        &self.second
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Same variables and rules, every domain re-discretized.
    pub fn with_resolution(&self, resolution: f64) -> Result<Self> {
        Self::new(
            self.first.with_resolution(resolution)?,
            self.second.with_resolution(resolution)?,
            self.output.with_resolution(resolution)?,
            self.rule_base.clone(),
            self.policy,
        )
    }

    /// Firing strength of every rule, in rule order.
    pub fn fire(&self, first: &Degrees, second: &Degrees) -> Vec<f64> {
        let first: Vec<f64> = first.values().collect();
        let second: Vec<f64> = second.values().collect();
        self.compiled
            .iter()
            .map(|rule| and(first[rule.first], second[rule.second]))
            .collect()
    }

    /// Output set clipped at `strength` for one rule.
    fn clip(&self, rule: usize, strength: f64) -> impl Iterator<Item = f64> + '_ {
        let term = &self.output_terms[self.compiled[rule].consequent];
        term.iter().map(move |mu| and(strength, *mu))
    }

    /// Activated set per output label: max over the rules concluding it.
    pub fn aggregate_by_label(&self, strengths: &[f64]) -> Vec<Vec<f64>> {
        let mut sets = vec![vec![0.0; self.grid.len()]; self.output_terms.len()];
        for (index, strength) in strengths.iter().enumerate() {
            let set = &mut sets[self.compiled[index].consequent];
            for (acc, clipped) in set.iter_mut().zip(self.clip(index, *strength)) {
                *acc = or(*acc, clipped);
            }
        }
        sets
    }

    /// Max over every rule's clipped set, without grouping by label.
    pub fn aggregate_direct(&self, strengths: &[f64]) -> Vec<f64> {
        let mut aggregated = vec![0.0; self.grid.len()];
        for (index, strength) in strengths.iter().enumerate() {
            for (acc, clipped) in aggregated.iter_mut().zip(self.clip(index, *strength)) {
                *acc = or(*acc, clipped);
            }
        }
        aggregated
    }

    /// Centroid of `aggregated` over the output grid, falling back to the
    /// output domain midpoint when the set is empty.
    pub fn defuzzify(&self, aggregated: &[f64]) -> (f64, bool) {
        match centroid(&self.grid, aggregated) {
            Some(crisp) => (crisp, false),
            None => {
                let midpoint = self.output.domain().midpoint();
                debug!(
                    "{}: no rule fired, defuzzified to domain midpoint {}",
                    self.rule_base.name(),
                    midpoint
                );
                (midpoint, true)
            }
        }
    }

    pub fn infer(&self, first: f64, second: f64) -> Result<Inference> {
        let x1 = self.policy.apply(&self.first, first)?;
        let x2 = self.policy.apply(&self.second, second)?;

        let first_degrees = self.first.fuzzify(x1);
        let second_degrees = self.second.fuzzify(x2);
        debug!(
            "{}: {}={} {:?}, {}={} {:?}",
            self.rule_base.name(),
            self.first.name(),
            x1,
            first_degrees,
            self.second.name(),
            x2,
            second_degrees
        );

        let strengths = self.fire(&first_degrees, &second_degrees);
        let label_sets = self.aggregate_by_label(&strengths);

        let mut aggregated = vec![0.0; self.grid.len()];
        for set in &label_sets {
            for (acc, mu) in aggregated.iter_mut().zip(set) {
                *acc = or(*acc, *mu);
            }
        }
        trace!("{}: aggregated {:?}", self.rule_base.name(), aggregated);

        let (crisp, fallback) = self.defuzzify(&aggregated);

        let firings: Vec<Firing> = self
            .rule_base
            .rules()
            .iter()
            .zip(&strengths)
            .map(|(rule, strength)| Firing {
                rule: rule.clone(),
                strength: *strength,
            })
            .collect();
        for firing in firings.iter().filter(|f| f.strength > 0.0) {
            debug!("{}: {} fired at {:.3}", self.rule_base.name(), firing.rule, firing.strength);
        }

        let activated = self
            .output
            .labels()
            .map(str::to_string)
            .zip(label_sets)
            .collect();

        Ok(Inference {
            inputs: (x1, x2),
            first: first_degrees,
            second: second_degrees,
            firings,
            activated,
            grid: self.grid.clone(),
            aggregated,
            crisp,
            fallback,
        })
    }
}

/// `sum(y * mu(y)) / sum(mu(y))`, or `None` when the set has no mass.
pub fn centroid(grid: &[f64], membership: &[f64]) -> Option<f64> {
    let (moment, mass) = grid
        .iter()
        .zip(membership)
        .fold((0.0, 0.0), |(moment, mass), (y, mu)| (moment + y * mu, mass + mu));

    if mass > 0.0 {
        Some(moment / mass)
    } else {
        None
    }
}
