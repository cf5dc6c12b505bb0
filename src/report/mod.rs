//! Human-readable views over decisions. Reads engine output, never writes it.

use std::fmt;
use log::info;
use crate::fuzzy::{Degrees, Inference};
use crate::intersection::{DecisionTrace, Direction};

pub mod series;

pub use series::*;

pub struct DecisionReport<'a> {
    name: &'a str,
    trace: &'a DecisionTrace,
}

impl<'a> DecisionReport<'a> {
    pub fn new(name: &'a str, trace: &'a DecisionTrace) -> Self {
        Self { name, trace }
    }

    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{}", line);
        }
    }
}

fn write_degrees(f: &mut fmt::Formatter<'_>, degrees: &Degrees) -> fmt::Result {
    let mut first = true;
    for (label, degree) in degrees.iter().filter(|(_, d)| *d > 0.0) {
        if !first {
            write!(f, " ")?;
        }
        write!(f, "{}={:.2}", label, degree)?;
        first = false;
    }
    if first {
        write!(f, "-")?;
    }
    Ok(())
}

fn write_inference(f: &mut fmt::Formatter<'_>, inference: &Inference) -> fmt::Result {
    write!(f, "[")?;
    write_degrees(f, &inference.first)?;
    write!(f, " | ")?;
    write_degrees(f, &inference.second)?;
    write!(f, "]")?;
    if let Some(firing) = inference.dominant_rule() {
        write!(f, " {} @ {:.2}", firing.rule, firing.strength)?;
    }
    if inference.fallback {
        write!(f, " (no rule fired, domain midpoint)")?;
    }
    Ok(())
}

impl fmt::Display for DecisionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.trace.result;
        writeln!(
            f,
            "== {}: green to {}, extend by {:.2}s",
            self.name, result.selected_direction, result.extension_time_seconds
        )?;

        for (direction, inference) in Direction::ALL.iter().zip(&self.trace.urgency) {
            let marker = if *direction == result.selected_direction { '*' } else { ' ' };
            write!(
                f,
                "{} {:<5} urgency {:>6.3} ",
                marker,
                direction.to_string(),
                inference.crisp()
            )?;
            write_inference(f, inference)?;
            writeln!(f)?;
        }

        write!(
            f,
            "  lanes inner={} outer={} ",
            self.trace.extension.inputs.0, self.trace.extension.inputs.1
        )?;
        write_inference(f, &self.trace.extension)?;
        writeln!(f)
    }
}
