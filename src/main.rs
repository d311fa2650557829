mod repl;     // interactive query loop
mod report;   // startup coefficient report
mod settings; // dataset and degree from `config/default.toml`

use std::io;

use anyhow::Context;
use kinefit_kinematics::{KinematicModel, SampleSet};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the report on stdout.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let path = settings::config_path();
    let settings = settings::load_settings(&path)
        .with_context(|| format!("failed to load configuration from {}", path))?;

    let model = {
        let samples = SampleSet::new(settings.samples.times, settings.samples.values)
            .context("invalid acceleration samples")?;
        debug!(samples = samples.len(), degree = settings.degree, "Fitting acceleration samples.");
        KinematicModel::from_samples(&samples, settings.degree)
            .context("failed to fit acceleration samples")?
    };
    trace!(coefficients = ?model.acceleration().coefficients(), "Least-squares solution.");
    info!(
        degree = settings.degree,
        domain = %model.domain(),
        "Kinematic model ready."
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &model)?;
    repl::run(&model, io::stdin().lock(), &mut out)?;

    info!("kinefit finished.");
    Ok(())
}
