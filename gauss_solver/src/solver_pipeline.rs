use anyhow::{ensure, Context, Result};

use crate::config::SolverConfig;
use crate::elimination::SolveOutcome;
use crate::file_io::{read_golden, read_input, solve_input, verify_against_golden, write_outcome, FileSink};

pub struct SolverPipeline {
    config: SolverConfig,
}

impl SolverPipeline {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl SolverPipeline {
    /// Reads the input file, solves it, writes the output file and, when a
    /// golden file is configured, checks what was written against it.
    pub fn run(self) -> Result<SolveOutcome> {
        ensure!(
            self.config.tolerance >= 0.0,
            "verification tolerance must not be negative, got {}",
            self.config.tolerance
        );
        let raw_input = read_input(&self.config.input)?;
        let outcome = solve_input(&raw_input);
        log::info!("{} -> {outcome}", self.config.input.display());

        let mut sink = FileSink::create(&self.config.output)?;
        let rendered = write_outcome(&outcome, &raw_input, &mut sink, self.config.message_style)
            .context("writing solver output")?;

        if let Some(golden_path) = &self.config.golden {
            let golden = read_golden(golden_path)?;
            verify_against_golden(&rendered, &golden, self.config.tolerance)
                .with_context(|| format!("verifying output against {}", golden_path.display()))?;
            log::info!("output matches {}", golden_path.display());
        }
        Ok(outcome)
    }
}
