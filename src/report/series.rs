//! Sampled curves for a plotting collaborator. Data only; nothing here
//! draws or feeds back into the engine.

use crate::fuzzy::{Inference, LinguisticVariable};

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best, point| match best {
                Some((_, top)) if top >= point.1 => best,
                _ => Some(point),
            })
    }
}

/// One series per label, sampled over the variable's grid.
pub fn variable_series(variable: &LinguisticVariable) -> Vec<Series> {
    let grid: Vec<f64> = variable.samples().collect();
    variable
        .terms()
        .iter()
        .map(|(label, mf)| Series {
            label: label.clone(),
            points: grid.iter().map(|x| (*x, mf.evaluate(*x))).collect(),
        })
        .collect()
}

/// Activated set of each output label.
pub fn activated_series(inference: &Inference) -> Vec<Series> {
    inference
        .activated
        .iter()
        .map(|(label, set)| Series {
            label: label.clone(),
            points: inference.grid.iter().copied().zip(set.iter().copied()).collect(),
        })
        .collect()
}

pub fn aggregated_series(inference: &Inference) -> Series {
    Series {
        label: "aggregated".to_string(),
        points: inference
            .grid
            .iter()
            .copied()
            .zip(inference.aggregated.iter().copied())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::{DirectionSample, IntersectionController};

    #[test]
    fn variable_series_cover_the_grid() {
        let controller = IntersectionController::canonical().unwrap();
        let series = variable_series(controller.urgency_engine().second());
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].label, "negligible");
        assert!(series.iter().all(|s| s.points.len() == 151));
        assert_eq!(series[3].peak(), Some((120.0, 1.0)));
    }

    #[test]
    fn aggregated_series_is_the_max_of_activated_sets() {
        let controller = IntersectionController::canonical().unwrap();
        let inference = controller.urgency(&DirectionSample::new(17, 90.0, 0, 0)).unwrap();
        let activated = activated_series(&inference);
        let aggregated = aggregated_series(&inference);
        for (i, (_, mu)) in aggregated.points.iter().enumerate() {
            let top = activated.iter().map(|s| s.points[i].1).fold(0.0, f64::max);
            assert_eq!(*mu, top);
        }
        assert_eq!(aggregated.peak().map(|(y, _)| y), Some(8.0));
    }
}
