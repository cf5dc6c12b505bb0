use super::{FuzzyError, MembershipFunction, Result, MAX_SAMPLES};

/// Discretized numeric interval shared by a variable's terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
    resolution: f64,
    steps: usize,
}

impl Domain {
    pub fn new(min: f64, max: f64, resolution: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(FuzzyError::EmptyDomain { min, max });
        }
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(FuzzyError::InvalidResolution(resolution));
        }

        // Tolerate representation error so [0, 1] at 0.1 still reaches 1.0
        let span = (max - min) / resolution;
        let steps = (span + 1e-9).floor();
        if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
            return Err(FuzzyError::TooManySamples { min, max, resolution });
        }

        Ok(Self {
            min,
            max,
            resolution,
            steps: steps as usize,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Same bounds at a different resolution.
    pub fn with_resolution(&self, resolution: f64) -> Result<Self> {
        Domain::new(self.min, self.max, resolution)
    }

    pub fn len(&self) -> usize {
        self.steps + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Grid points `min + i * resolution`, in ascending order.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(move |i| (self.min + i as f64 * self.resolution).min(self.max))
    }
}

/// Degree of truth per label, in the variable's label order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Degrees(Vec<(String, f64)>);

impl Degrees {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, d)| *d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, d)| (l.as_str(), *d))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|(_, d)| *d)
    }

    /// Label with the highest degree; the first one wins on ties.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.iter().fold(None, |best, (label, degree)| match best {
            Some((_, top)) if top >= degree => best,
            _ => Some((label, degree)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    domain: Domain,
    terms: Vec<(String, MembershipFunction)>,
}

impl LinguisticVariable {
    pub fn builder(name: impl Into<String>, domain: Domain) -> VariableBuilder {
        VariableBuilder {
            name: name.into(),
            domain,
            terms: Vec::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn terms(&self) -> &[(String, MembershipFunction)] {
        &self.terms
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(label, _)| label.as_str())
    }

    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(l, _)| l == label).map(|(_, mf)| mf)
    }

    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.terms
            .iter()
            .position(|(l, _)| l == label)
            .ok_or_else(|| FuzzyError::UnknownLabel {
                variable: self.name.clone(),
                label: label.to_string(),
            })
    }

    /// Degree of every term at `x`.
    pub fn fuzzify(&self, x: f64) -> Degrees {
        Degrees(
            self.terms
                .iter()
                .map(|(label, mf)| (label.clone(), mf.evaluate(x)))
                .collect(),
        )
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.domain.samples()
    }

    /// Each term sampled across the domain grid.
    pub fn sampled_terms(&self) -> Vec<Vec<f64>> {
        self.terms
            .iter()
            .map(|(_, mf)| self.samples().map(|y| mf.evaluate(y)).collect())
            .collect()
    }

    /// Copy of this variable on a re-discretized domain.
    pub fn with_resolution(&self, resolution: f64) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            domain: self.domain.with_resolution(resolution)?,
            terms: self.terms.clone(),
        })
    }
}

pub struct VariableBuilder {
    name: String,
    domain: Domain,
    terms: Vec<(String, MembershipFunction)>,
    error: Option<FuzzyError>,
}

impl VariableBuilder {
    pub fn term(mut self, label: impl Into<String>, mf: MembershipFunction) -> Self {
        let label = label.into();
        if self.error.is_none() && self.terms.iter().any(|(l, _)| *l == label) {
            self.error = Some(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label: label.clone(),
            });
        }
        self.terms.push((label, mf));
        self
    }

    pub fn build(self) -> Result<LinguisticVariable> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.terms.is_empty() {
            return Err(FuzzyError::NoLabels(self.name));
        }
        for (_, mf) in &self.terms {
            mf.validate()?;
        }

        Ok(LinguisticVariable {
            name: self.name,
            domain: self.domain,
            terms: self.terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_level() -> LinguisticVariable {
        LinguisticVariable::builder("queue_level", Domain::new(0.0, 20.0, 1.0).unwrap())
            .term("zero", MembershipFunction::trapezoid(0.0, 0.0, 0.0, 1.0).unwrap())
            .term("few", MembershipFunction::triangle(0.0, 6.0, 12.0).unwrap())
            .term("medium", MembershipFunction::triangle(6.0, 12.0, 18.0).unwrap())
            .term("many", MembershipFunction::trapezoid(12.0, 18.0, 20.0, 20.0).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn domain_grid_includes_both_ends() {
        let domain = Domain::new(0.0, 20.0, 1.0).unwrap();
        let grid: Vec<f64> = domain.samples().collect();
        assert_eq!(grid.len(), 21);
        assert_eq!(domain.len(), 21);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[20], 20.0);

        let fine = Domain::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(fine.len(), 11);
        assert_eq!(fine.samples().last(), Some(1.0));
    }

    #[test]
    fn domain_off_grid_max_is_not_sampled() {
        let domain = Domain::new(0.0, 10.0, 3.0).unwrap();
        let grid: Vec<f64> = domain.samples().collect();
        assert_eq!(grid, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn invalid_domains_fail_fast() {
        assert!(matches!(Domain::new(5.0, 5.0, 1.0), Err(FuzzyError::EmptyDomain { .. })));
        assert!(matches!(Domain::new(6.0, 5.0, 1.0), Err(FuzzyError::EmptyDomain { .. })));
        assert!(matches!(Domain::new(0.0, 5.0, 0.0), Err(FuzzyError::InvalidResolution(_))));
        assert!(matches!(Domain::new(0.0, 5.0, -1.0), Err(FuzzyError::InvalidResolution(_))));
        assert!(matches!(
            Domain::new(0.0, 1e12, 1e-6),
            Err(FuzzyError::TooManySamples { .. })
        ));
    }

    #[test]
    fn fuzzify_reports_every_label_in_order() {
        let var = queue_level();
        let degrees = var.fuzzify(10.0);
        let labels: Vec<&str> = degrees.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["zero", "few", "medium", "many"]);
        assert_eq!(degrees.get("zero"), Some(0.0));
        assert!((degrees.get("few").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((degrees.get("medium").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(degrees.get("many"), Some(0.0));
        assert_eq!(degrees.dominant().map(|(l, _)| l), Some("medium"));
    }

    #[test]
    fn no_label_exceeds_one_and_overlaps_stay_pairwise() {
        let var = queue_level();
        for x in var.samples() {
            let degrees = var.fuzzify(x);
            assert!(degrees.values().all(|d| (0.0..=1.0).contains(&d)));
            let sum: f64 = degrees.values().sum();
            assert!(sum <= 2.0 + 1e-12, "degrees at {} sum to {}", x, sum);
            assert!(sum > 0.0, "no label covers {}", x);
        }
    }

    #[test]
    fn duplicate_and_missing_labels_are_errors() {
        let domain = Domain::new(0.0, 10.0, 1.0).unwrap();
        let tri = MembershipFunction::triangle(0.0, 5.0, 10.0).unwrap();
        let dup = LinguisticVariable::builder("lane_level", domain)
            .term("few", tri)
            .term("few", tri)
            .build();
        assert!(matches!(dup, Err(FuzzyError::DuplicateLabel { .. })));

        let empty = LinguisticVariable::builder("lane_level", domain).build();
        assert!(matches!(empty, Err(FuzzyError::NoLabels(_))));

        let var = LinguisticVariable::builder("lane_level", domain).term("few", tri).build().unwrap();
        assert!(matches!(var.index_of("many"), Err(FuzzyError::UnknownLabel { .. })));
    }

    #[test]
    fn resolution_change_keeps_terms() {
        let var = queue_level().with_resolution(0.5).unwrap();
        assert_eq!(var.domain().len(), 41);
        assert_eq!(var.labels().count(), 4);
        assert_eq!(var.sampled_terms()[1].len(), 41);
    }
}
