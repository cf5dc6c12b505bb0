use anyhow::Result;
use log::{debug, info, warn};
use std::time::Instant;
use clap::{Parser, ValueEnum};

use fuzzy_signal::{
    config::ControllerConfig,
    compute::{ComputeBackend, UrgencyBackend},
    intersection::IntersectionController,
    report::{self, DecisionReport},
    scenario::{self, Scenario, ScenarioSet},
};

#[derive(Parser)]
#[command(name = "fuzzy-signal")]
#[command(about = "Fuzzy green-phase selection and extension for a four-way intersection")]
struct Args {
    /// Controller configuration file (canonical shapes when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Scenario file
    #[arg(short, long, default_value = "scenarios.toml")]
    scenarios: String,

    /// Grid resolution for every domain, overriding the configuration
    #[arg(short, long)]
    resolution: Option<f64>,

    /// Urgency evaluation backend
    #[arg(short, long, value_enum, default_value_t = Backend::Sequential)]
    backend: Backend,

    /// Run this many generated snapshots instead of the scenario file
    #[arg(long)]
    synthetic: Option<usize>,

    /// Random seed for generated snapshots
    #[arg(long)]
    seed: Option<u64>,

    /// Also log sampled membership curves and aggregated sets
    #[arg(long)]
    series: bool,

    /// Enable verbose logging of fuzzification and rule firing
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Backend {
    /// Evaluate approaches one after another
    Sequential,
    /// Evaluate approaches on the rayon pool
    Parallel,
}

fn log_series(label: &str, series: &[report::Series]) {
    for s in series {
        let points: Vec<String> = s.points.iter().map(|(x, mu)| format!("{}:{:.3}", x, mu)).collect();
        info!("{} {}: {}", label, s.label, points.join(" "));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting fuzzy signal controller");

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading controller configuration from: {}", path);
            ControllerConfig::load_from_file(path)?
        }
        None => ControllerConfig::default(),
    };
    if args.resolution.is_some() {
        config.engine.resolution = args.resolution;
    }

    let controller = IntersectionController::from_config(&config)?;
    info!(
        "Controller ready: {:?} inputs, urgency grid {} points, extension grid {} points",
        controller.input_policy(),
        controller.urgency_engine().grid().len(),
        controller.extension_engine().grid().len()
    );

    let backend = match args.backend {
        Backend::Sequential => ComputeBackend::new_sequential(),
        Backend::Parallel => match ComputeBackend::new_parallel() {
            Ok(backend) => backend,
            Err(e) => {
                warn!("✗ Parallel backend unavailable ({e})");
                info!("↳ Falling back to sequential backend");
                ComputeBackend::new_sequential()
            }
        },
    };
    info!("Urgency backend: {}", backend.get_name());

    if args.series {
        log_series("queue_level", &report::variable_series(controller.urgency_engine().first()));
        log_series("wait_level", &report::variable_series(controller.urgency_engine().second()));
        log_series("urgency_level", &report::variable_series(controller.urgency_engine().output()));
        log_series("lane_level", &report::variable_series(controller.extension_engine().first()));
        log_series("extension_level", &report::variable_series(controller.extension_engine().output()));
    }

    let scenarios: Vec<Scenario> = match args.synthetic {
        Some(count) => {
            info!("Generating {} synthetic snapshots (seed {:?})", count, args.seed);
            scenario::synthetic_snapshots(count, args.seed)?
                .into_iter()
                .enumerate()
                .map(|(i, snapshot)| Scenario {
                    name: format!("synthetic-{}", i + 1),
                    description: String::new(),
                    snapshot,
                })
                .collect()
        }
        None => {
            info!("Loading scenarios from: {}", args.scenarios);
            ScenarioSet::load_from_file(&args.scenarios)?.scenarios
        }
    };

    let start_time = Instant::now();
    let mut failures = 0;

    for scenario in &scenarios {
        if !scenario.description.is_empty() {
            debug!("{}: {}", scenario.name, scenario.description);
        }

        match controller.decide_with(&backend, &scenario.snapshot) {
            Ok(trace) => {
                DecisionReport::new(&scenario.name, &trace).log();
                if args.series {
                    log_series(
                        &format!("{} urgency", trace.result.selected_direction),
                        &[report::aggregated_series(&trace.urgency[trace.result.selected_direction.index()])],
                    );
                    log_series("extension", &[report::aggregated_series(&trace.extension)]);
                }
            }
            Err(e) => {
                failures += 1;
                log::error!("{}: {}", scenario.name, e);
            }
        }
    }

    // Final statistics
    let elapsed = start_time.elapsed();
    info!(
        "Decided {} of {} snapshots in {:.2}ms",
        scenarios.len() - failures,
        scenarios.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    if failures > 0 {
        anyhow::bail!("{} snapshot(s) were rejected", failures);
    }

    Ok(())
}
