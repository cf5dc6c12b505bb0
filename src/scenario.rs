use anyhow::{Context, Result, anyhow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson, Uniform};
use serde::{Deserialize, Serialize};
use crate::config::Validate;
use crate::intersection::IntersectionSnapshot;

/// A named snapshot to feed through the controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub snapshot: IntersectionSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScenarioSet {
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenarios '{}'", path))?;
        let set: ScenarioSet = toml::from_str(&content)
            .with_context(|| format!("Invalid scenarios '{}'", path))?;
        set.validate()?;
        Ok(set)
    }

    pub fn find(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

impl Validate for ScenarioSet {
    fn validate(&self) -> Result<()> {
        if self.scenarios.is_empty() {
            return Err(anyhow!("At least one scenario must be defined"));
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            if self.scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(anyhow!("Scenario '{}' is defined twice", scenario.name));
            }

            for (direction, sample) in scenario.snapshot.iter() {
                let wait = sample.waiting_time_seconds;
                if !wait.is_finite() || wait < 0.0 {
                    return Err(anyhow!(
                        "Scenario '{}': {} waiting time must be non-negative, got {}",
                        scenario.name,
                        direction,
                        wait
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Random but plausible snapshots: Poisson lane queues around a per-lane
/// mean, uniform waiting times over the canonical wait domain.
pub fn synthetic_snapshots(count: usize, seed: Option<u64>) -> Result<Vec<IntersectionSnapshot>> {
    let mut rng = if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let lane_mean = Uniform::new(0.5, 8.0);
    let wait = Uniform::new_inclusive(0.0, 150.0);

    let mut snapshots = Vec::with_capacity(count);
    for _ in 0..count {
        let mut snapshot = IntersectionSnapshot::default();
        for sample in [
            &mut snapshot.north,
            &mut snapshot.east,
            &mut snapshot.south,
            &mut snapshot.west,
        ] {
            let inner = Poisson::new(lane_mean.sample(&mut rng))
                .map_err(|e| anyhow!("Invalid lane mean: {}", e))?
                .sample(&mut rng) as u32;
            let outer = Poisson::new(lane_mean.sample(&mut rng))
                .map_err(|e| anyhow!("Invalid lane mean: {}", e))?
                .sample(&mut rng) as u32;

            sample.inner_lane_queue = inner;
            sample.outer_lane_queue = outer;
            sample.sum_of_waiting_cars = inner + outer;
            // Empty approaches have not been waiting on anyone
            sample.waiting_time_seconds = if inner + outer == 0 && rng.gen_bool(0.5) {
                0.0
            } else {
                wait.sample(&mut rng)
            };
        }
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::Direction;

    const SAMPLE: &str = r#"
        [[scenario]]
        name = "rush"
        description = "south backs up"

        [scenario.north]
        sum_of_waiting_cars = 10
        waiting_time_seconds = 0.0
        inner_lane_queue = 6
        outer_lane_queue = 4

        [scenario.east]
        sum_of_waiting_cars = 3
        waiting_time_seconds = 60.0
        inner_lane_queue = 1
        outer_lane_queue = 2

        [scenario.south]
        sum_of_waiting_cars = 17
        waiting_time_seconds = 90.0
        inner_lane_queue = 9
        outer_lane_queue = 8

        [scenario.west]
        sum_of_waiting_cars = 10
        waiting_time_seconds = 120.0
        inner_lane_queue = 6
        outer_lane_queue = 4
    "#;

    #[test]
    fn parses_flattened_directions() {
        let set: ScenarioSet = toml::from_str(SAMPLE).unwrap();
        set.validate().unwrap();
        let rush = set.find("rush").unwrap();
        assert_eq!(rush.description, "south backs up");
        assert_eq!(rush.snapshot.sample(Direction::South).sum_of_waiting_cars, 17);
        assert_eq!(rush.snapshot.sample(Direction::West).waiting_time_seconds, 120.0);
    }

    #[test]
    fn negative_wait_and_duplicates_are_rejected() {
        let mut set: ScenarioSet = toml::from_str(SAMPLE).unwrap();
        set.scenarios[0].snapshot.east.waiting_time_seconds = -5.0;
        assert!(set.validate().is_err());

        let mut set: ScenarioSet = toml::from_str(SAMPLE).unwrap();
        set.scenarios.push(set.scenarios[0].clone());
        assert!(set.validate().is_err());

        assert!(ScenarioSet::default().validate().is_err());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = synthetic_snapshots(25, Some(7)).unwrap();
        let b = synthetic_snapshots(25, Some(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 25);
        for snapshot in &a {
            for (_, sample) in snapshot.iter() {
                assert_eq!(sample.sum_of_waiting_cars, sample.inner_lane_queue + sample.outer_lane_queue);
                assert!((0.0..=150.0).contains(&sample.waiting_time_seconds));
            }
        }
    }
}
