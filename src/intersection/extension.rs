//! Stage two: green extension for the selected approach.

use crate::fuzzy::RuleBase;

pub const LANE_LEVEL: &str = "lane_level";
pub const EXTENSION_LEVEL: &str = "extension_level";

pub const LANE_LABELS: [&str; 4] = ["negligible", "few", "medium", "many"];
pub const EXTENSION_LABELS: [&str; 4] = ["zero", "short", "medium", "long"];

/// Inner (turning) lane queue (rows) against outer (through) lane queue
/// (columns).
pub fn extension_rules() -> RuleBase {
    RuleBase::from_grid(
        "extension",
        LANE_LABELS,
        LANE_LABELS,
        [
            ["zero", "short", "medium", "long"],
            ["short", "short", "medium", "long"],
            ["medium", "medium", "medium", "long"],
            ["long", "long", "long", "long"],
        ],
    )
}
