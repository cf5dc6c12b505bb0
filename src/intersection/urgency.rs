//! Stage one: how badly an approach needs the green phase.

use crate::fuzzy::RuleBase;

pub const QUEUE_LEVEL: &str = "queue_level";
pub const WAIT_LEVEL: &str = "wait_level";
pub const URGENCY_LEVEL: &str = "urgency_level";

pub const QUEUE_LABELS: [&str; 4] = ["zero", "few", "medium", "many"];
pub const WAIT_LABELS: [&str; 4] = ["negligible", "short", "medium", "long"];
pub const URGENCY_LABELS: [&str; 4] = ["zero", "low", "medium", "high"];

/// Queued cars (rows) against waiting time (columns).
pub fn urgency_rules() -> RuleBase {
    RuleBase::from_grid(
        "urgency",
        QUEUE_LABELS,
        WAIT_LABELS,
        [
            ["zero", "low", "medium", "high"],
            ["zero", "low", "medium", "high"],
            ["low", "medium", "medium", "high"],
            ["medium", "high", "high", "high"],
        ],
    )
}
