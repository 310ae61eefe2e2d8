use std::path::PathBuf;

use crate::file_io::MessageStyle;

pub const DEFAULT_INPUT_PATH: &str = "input.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub golden: Option<PathBuf>,
    pub tolerance: f64,
    pub message_style: MessageStyle,
}

impl SolverConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            golden: None,
            tolerance: DEFAULT_TOLERANCE,
            message_style: MessageStyle::default(),
        }
    }

    pub fn with_golden(mut self, golden: impl Into<PathBuf>) -> Self {
        self.golden = Some(golden.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_message_style(mut self, message_style: MessageStyle) -> Self {
        self.message_style = message_style;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH)
    }
}
