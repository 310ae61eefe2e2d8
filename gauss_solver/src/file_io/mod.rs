pub mod golden;
pub mod input;
pub mod output;

pub use golden::{parse_golden, read_golden, verify_against_golden};
pub use input::{check_input, parse_augmented_matrix, read_input, solve_input};
pub use output::{write_outcome, FileSink, MessageStyle, OutputSink, RenderedOutcome};
