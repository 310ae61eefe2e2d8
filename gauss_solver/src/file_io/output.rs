use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::input::check_input;
use crate::elimination::SolveOutcome;

pub const NO_SOLUTION_TEXT: &str = "no solution";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageStyle {
    #[default]
    Corrected,
    /// Byte-for-byte what older consumers of the output file expect.
    Legacy,
}

impl MessageStyle {
    pub fn wrong_input_text(self) -> &'static str {
        match self {
            MessageStyle::Corrected => "wrong input",
            MessageStyle::Legacy => "wrong imput",
        }
    }
}

pub trait OutputSink {
    /// Replaces everything written so far with `text`.
    fn overwrite(&mut self, text: &str) -> Result<()>;

    fn append(&mut self, text: &str) -> Result<()>;
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    // truncates on open so appends never land after a previous run's output
    pub fn create(path: &Path) -> Result<Self> {
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl OutputSink for FileSink {
    fn overwrite(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text)
            .with_context(|| format!("writing to {}", self.path.display()))
    }

    fn append(&mut self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {} for append", self.path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("appending to {}", self.path.display()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedOutcome {
    Message(&'static str),
    Values(Vec<String>),
}

pub fn format_value(value: f64) -> String {
    // -0 would print as "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value} ")
}

/// Decides what the output file should say for `outcome`.
///
/// Malformed input takes precedence: a solved outcome is still reported as
/// wrong input if `raw_input` fails the shape check.
pub fn render_outcome(outcome: &SolveOutcome, raw_input: &str, style: MessageStyle) -> RenderedOutcome {
    match outcome {
        SolveOutcome::RejectedMalformed => RenderedOutcome::Message(style.wrong_input_text()),
        SolveOutcome::Solved(_) if !check_input(raw_input) => {
            RenderedOutcome::Message(style.wrong_input_text())
        }
        SolveOutcome::Solved(solution) => {
            RenderedOutcome::Values(solution.iter().copied().map(format_value).collect())
        }
        SolveOutcome::RejectedInconsistent | SolveOutcome::RejectedSingular => {
            RenderedOutcome::Message(NO_SOLUTION_TEXT)
        }
    }
}

/// Writes the rendered outcome to `sink` and hands it back for verification.
pub fn write_outcome<S: OutputSink>(
    outcome: &SolveOutcome,
    raw_input: &str,
    sink: &mut S,
    style: MessageStyle,
) -> Result<RenderedOutcome> {
    let rendered = render_outcome(outcome, raw_input, style);
    match &rendered {
        RenderedOutcome::Message(text) => {
            log::info!("writing {text:?} ({outcome})");
            sink.overwrite(text)?;
        }
        RenderedOutcome::Values(values) => {
            log::info!("writing {} solution values", values.len());
            for value in values {
                sink.append(value)?;
            }
        }
    }
    Ok(rendered)
}
