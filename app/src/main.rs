//! filter-classify: sorts two-tap FIR filters into low pass, high pass or
//! pass-through with a nearest-neighbour classifier.

mod app;
mod classifier;
mod report;

use clap::Parser;
use std::process::ExitCode;

use classifier::{DistanceMetric, FilterClassifier};

#[derive(Parser)]
#[command(name = "filter-classify")]
#[command(about = "Classify two-tap FIR filters by their coefficients")]
#[command(version)]
struct Cli {
    /// Number of neighbours that vote (1 = plain nearest neighbour)
    #[arg(short, long, default_value = "1")]
    k: usize,

    /// Distance metric
    #[arg(short, long, value_enum, default_value = "l2")]
    metric: DistanceMetric,

    /// Number of steps in each decision-map sweep (0 disables the sweep)
    #[arg(long, default_value = "40")]
    sweep_steps: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let classifier = match FilterClassifier::new(cli.k, cli.metric) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Failed to train classifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reports = app::run(&classifier, &app::scenarios());
    for scenario in &reports {
        report::print_scenario(scenario);
    }

    if cli.sweep_steps > 0 {
        for b0 in [1.0, -1.0] {
            match report::sweep(&classifier, b0, -1.0, 1.0, cli.sweep_steps) {
                Ok(intervals) => report::print_sweep(b0, &intervals),
                Err(e) => eprintln!("Sweep with b0 = {} failed: {}", b0, e),
            }
        }
    }

    if report::print_summary(&classifier, &reports) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
