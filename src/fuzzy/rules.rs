use std::fmt;

/// `IF first IS antecedent.0 AND second IS antecedent.1 THEN output IS consequent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub antecedent: (String, String),
    pub consequent: String,
}

impl Rule {
    pub fn new(first: &str, second: &str, consequent: &str) -> Self {
        Self {
            antecedent: (first.to_string(), second.to_string()),
            consequent: consequent.to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> {}",
            self.antecedent.0, self.antecedent.1, self.consequent
        )
    }
}

/// Ordered rule table over two input variables and one output variable.
///
/// Rule order never changes the inferred set; it only fixes the order of
/// the per-rule trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBase {
    name: String,
    rules: Vec<Rule>,
}

impl RuleBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Builds a rule base from `(first, second) -> consequent` triples.
    pub fn from_table(name: impl Into<String>, table: &[(&str, &str, &str)]) -> Self {
        let mut base = Self::new(name);
        for (first, second, consequent) in table {
            base.push(Rule::new(first, second, consequent));
        }
        base
    }

    /// Builds the full cross product of `rows x columns`, where
    /// `grid[r][c]` is the consequent for `(rows[r], columns[c])`.
    pub fn from_grid<const R: usize, const C: usize>(
        name: impl Into<String>,
        rows: [&str; R],
        columns: [&str; C],
        grid: [[&str; C]; R],
    ) -> Self {
        let mut base = Self::new(name);
        for (row, consequents) in rows.iter().zip(grid.iter()) {
            for (column, consequent) in columns.iter().zip(consequents.iter()) {
                base.push(Rule::new(row, column, consequent));
            }
        }
        base
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Consequent for an antecedent pair, if the table defines one.
    pub fn lookup(&self, first: &str, second: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.antecedent.0 == first && r.antecedent.1 == second)
            .map(|r| r.consequent.as_str())
    }
}

/// Fuzzy AND.
pub fn and(a: f64, b: f64) -> f64 {
    a.min(b)
}

/// Fuzzy OR.
pub fn or(a: f64, b: f64) -> f64 {
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_expands_row_major() {
        let base = RuleBase::from_grid(
            "demo",
            ["lo", "hi"],
            ["small", "big"],
            [["a", "b"], ["c", "d"]],
        );
        assert_eq!(base.len(), 4);
        assert_eq!(base.rules()[1], Rule::new("lo", "big", "b"));
        assert_eq!(base.lookup("hi", "small"), Some("c"));
        assert_eq!(base.lookup("mid", "small"), None);
    }

    #[test]
    fn table_and_grid_agree() {
        let table = RuleBase::from_table(
            "demo",
            &[("lo", "small", "a"), ("lo", "big", "b"), ("hi", "small", "c"), ("hi", "big", "d")],
        );
        let grid = RuleBase::from_grid(
            "demo",
            ["lo", "hi"],
            ["small", "big"],
            [["a", "b"], ["c", "d"]],
        );
        assert_eq!(table, grid);
    }

    #[test]
    fn min_and_max_are_commutative() {
        let pairs = [(0.0, 1.0), (0.25, 0.75), (0.6, 0.6), (1.0, 0.3)];
        for (a, b) in pairs {
            assert_eq!(and(a, b), and(b, a));
            assert_eq!(or(a, b), or(b, a));
            assert!(and(a, b) <= or(a, b));
        }
    }

    #[test]
    fn rule_display() {
        assert_eq!(Rule::new("many", "few", "long").to_string(), "(many, few) -> long");
    }
}
