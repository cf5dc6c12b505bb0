use serde::{Deserialize, Serialize};
use super::{FuzzyError, Result};

/// Piecewise-linear membership shape.
///
/// Construct through [`MembershipFunction::triangle`] or
/// [`MembershipFunction::trapezoid`], which check breakpoint ordering.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum MembershipFunction {
    Triangle([f64; 3]),
    Trapezoid([f64; 4]),
}

impl MembershipFunction {
    pub fn triangle(a: f64, b: f64, c: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c])?;
        Ok(MembershipFunction::Triangle([a, b, c]))
    }

    pub fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c, d])?;
        Ok(MembershipFunction::Trapezoid([a, b, c, d]))
    }

    /// Re-checks ordering, for shapes that arrived through serde.
    pub fn validate(&self) -> Result<()> {
        check_breakpoints(self.breakpoints())
    }

    pub fn breakpoints(&self) -> &[f64] {
        match self {
            MembershipFunction::Triangle(points) => points,
            MembershipFunction::Trapezoid(points) => points,
        }
    }

    /// Outermost breakpoints; the degree is zero outside this interval.
    pub fn support(&self) -> (f64, f64) {
        let points = self.breakpoints();
        (points[0], points[points.len() - 1])
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangle([a, b, c]) => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoid([a, b, c, d]) => {
                // Plateau first: trap(0, 0, 0, 1) is fully true at 0.
                if x >= b && x <= c {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }
}

fn check_breakpoints(points: &[f64]) -> Result<()> {
    let finite = points.iter().all(|p| p.is_finite());
    let ordered = points.windows(2).all(|w| w[0] <= w[1]);
    if finite && ordered {
        Ok(())
    } else {
        Err(FuzzyError::UnorderedBreakpoints(points.to_vec()))
    }
}
