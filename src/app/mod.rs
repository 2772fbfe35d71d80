/// This module governs the command line driver of the calculation
mod configuration;
mod output;
mod styles;
mod telemetry;

pub use configuration::{
    Configuration, GridConfiguration, NumericsConfiguration, PhononConfiguration,
    PhysicsConfiguration,
};
pub use output::{RunSummary, TableSink};

use crate::{error::TransportError, sweep::SweepBuilder};
use clap::{ArgEnum, Parser};
use nalgebra::RealField;
use serde::de::DeserializeOwned;
use std::{fmt, path::PathBuf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A TOML file overriding the default configuration
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// The directory results and the log file are written to
    #[clap(short, long, default_value = "results")]
    output: PathBuf,
    /// The verbosity of the console and log file, overridden by `RUST_LOG`
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// The flux phase in radians
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    phi: Vec<f64>,
    /// The equilibrium thermal energy
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    temp: Vec<f64>,
    /// The Majorana on-site energy
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    em: Vec<f64>,
    /// Sets both dot-Majorana couplings
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    lambda: Vec<f64>,
    /// The dot-Majorana coupling `λ1` multiplying `cos(φ/2)`
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    lambda1: Vec<f64>,
    /// The dot-Majorana coupling `λ2` multiplying `sin(φ/2)`
    #[clap(long, multiple_occurrences(true), number_of_values = 1, allow_hyphen_values = true)]
    lambda2: Vec<f64>,
    /// Worker threads for the sweep, zero selects one per core
    #[clap(long)]
    threads: Option<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

impl App {
    /// Command line values take precedence over every configuration source
    ///
    /// A physics flag may be repeated, in which case the last occurrence is used.
    fn apply_overrides<T: Copy + RealField>(&self, configuration: &mut Configuration<T>) {
        let physics = &mut configuration.physics;
        if let Some(&phi) = self.phi.last() {
            physics.flux_phase = nalgebra::convert(phi);
        }
        if let Some(&temperature) = self.temp.last() {
            physics.temperature = nalgebra::convert(temperature);
        }
        if let Some(&energy) = self.em.last() {
            physics.majorana_energy = nalgebra::convert(energy);
        }
        if let Some(&lambda) = self.lambda.last() {
            physics.lambda1 = nalgebra::convert(lambda);
            physics.lambda2 = nalgebra::convert(lambda);
        }
        if let Some(&lambda1) = self.lambda1.last() {
            physics.lambda1 = nalgebra::convert(lambda1);
        }
        if let Some(&lambda2) = self.lambda2.last() {
            physics.lambda2 = nalgebra::convert(lambda2);
        }
        if let Some(threads) = self.threads {
            configuration.numerics.threads = threads;
        }
    }
}

/// Parse the command line, run the sweep and write the results
pub fn run<T>() -> color_eyre::Result<()>
where
    T: Copy + DeserializeOwned + RealField + fmt::LowerExp,
{
    let cli = App::parse();

    std::fs::create_dir_all(&cli.output)?;
    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &cli.output);
    telemetry::init_subscriber(subscriber);

    let mut configuration: Configuration<T> = Configuration::build(cli.config.as_deref())?;
    cli.apply_overrides(&mut configuration);
    tracing::debug!("{:?}", configuration);

    let parameters = configuration.to_parameters()?;
    let energy_space = parameters.energy_space(configuration.grid.integration_rule)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(configuration.numerics.threads)
        .build()
        .map_err(TransportError::from)?;
    tracing::info!("Running on {} threads", pool.current_num_threads());

    let sweep = SweepBuilder::new()
        .with_parameters(&parameters)
        .with_energy_space(&energy_space)
        .build();
    let progress = crate::sweep::progress_bar(energy_space.num_points());
    let result = pool.install(|| sweep.run_with_progress(progress));

    let mut sink = TableSink::create(&cli.output)?;
    result.emit(&mut sink)?;

    let summary = RunSummary::new(&parameters, &energy_space, &result);
    summary.write(&cli.output)?;
    println!("{}", summary.colorized(&styles::Styles::for_stdout()));

    Ok(())
}
