mod cli;
mod config;
mod report;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Args;
use config::Scenario;
use report::{Report, SweepTable};

/// Step of the impedance scan in Hz.
const IMPEDANCE_STEP: f64 = 0.5;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the report; logs go to stderr.
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn run(args: &Args) -> Result<Report> {
    let scenario = Scenario::from_args(args)?;

    let result = tuyau_core::compute_with(&scenario.geometry, &scenario.conditions, &scenario.options)
        .context("resonance calculation failed")?;

    let sweep = match args.sweep {
        Some(arg) => {
            let (default_from, default_to) = arg.default_range(&scenario.geometry);
            let from = args.from.unwrap_or(default_from);
            let to = args.to.unwrap_or(default_to);
            let points = tuyau_core::sweep::sweep(
                &scenario.geometry,
                &scenario.conditions,
                &scenario.options,
                arg.parameter(),
                arg.to_si(from, &scenario.geometry),
                arg.to_si(to, &scenario.geometry),
                args.steps,
            )
            .with_context(|| format!("sweep of {} failed", arg.label()))?;
            Some(SweepTable::new(arg, &scenario, points))
        }
        None => None,
    };

    let impedance_resonances = if args.impedance {
        let found = tuyau_core::impedance::scan(
            &scenario.geometry,
            &scenario.conditions,
            scenario.options.end_correction,
            args.max_frequency,
            IMPEDANCE_STEP,
        )
        .context("impedance scan failed")?;
        Some(found)
    } else {
        None
    };

    Ok(Report {
        scenario,
        result,
        sweep,
        impedance_resonances,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(?args, "starting");

    let report = run(&args)?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
