use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use gauss_solver::config::{SolverConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_TOLERANCE};
use gauss_solver::file_io::MessageStyle;
use gauss_solver::solver_pipeline::SolverPipeline;

/// Solves a linear system given as an augmented matrix.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Row count on the first line, then one row of coefficients and the
    /// right-hand side per line.
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Expected output to check the result against.
    #[arg(short, long)]
    pub golden: Option<PathBuf>,
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,
    /// Write "wrong imput" for malformed input, like older versions did.
    #[arg(long)]
    pub legacy_messages: bool,
}

impl Args {
    fn into_config(self) -> SolverConfig {
        let message_style = if self.legacy_messages {
            MessageStyle::Legacy
        } else {
            MessageStyle::Corrected
        };
        let config = SolverConfig::new(self.input, self.output)
            .with_tolerance(self.tolerance)
            .with_message_style(message_style);
        match self.golden {
            Some(golden) => config.with_golden(golden),
            None => config,
        }
    }
}

fn run_solver(config: SolverConfig) -> Result<()> {
    let outcome = SolverPipeline::new(config).run()?;
    log::debug!("finished with {outcome:?}");
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::debug!("Running with: {args:?}");
    if let Err(err) = run_solver(args.into_config()) {
        eprintln!("ran into solver error: {err:?}");
        process::exit(1)
    }
}
