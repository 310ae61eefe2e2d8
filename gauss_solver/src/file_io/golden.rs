use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use itertools::Itertools;

use super::output::RenderedOutcome;

/// Raw tokens of the first line; no numeric parsing happens here.
pub fn parse_golden(text: &str) -> Vec<String> {
    text.lines()
        .next()
        .map(|line| line.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

pub fn read_golden(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading golden values from {}", path.display()))?;
    Ok(parse_golden(&text))
}

pub fn verify_solution(solution: &[f64], golden: &[String], tolerance: f64) -> Result<()> {
    ensure!(
        solution.len() == golden.len(),
        "solved {} unknowns but {} golden values were given",
        solution.len(),
        golden.len()
    );
    for (idx, (value, expected)) in solution.iter().zip(golden).enumerate() {
        let expected: f64 = expected
            .parse()
            .with_context(|| format!("golden value {idx} ({expected:?}) is not a number"))?;
        ensure!(
            (value - expected).abs() <= tolerance,
            "unknown {idx}: solved {value}, expected {expected} (tolerance {tolerance})"
        );
    }
    Ok(())
}

/// Compares what was written to the output with the golden line. Messages
/// such as `no solution` are compared token by token.
pub fn verify_against_golden(rendered: &RenderedOutcome, golden: &[String], tolerance: f64) -> Result<()> {
    match rendered {
        RenderedOutcome::Message(text) => {
            let expected = golden.iter().join(" ");
            if text.split_whitespace().join(" ") != expected {
                bail!("wrote {text:?}, golden expects {expected:?}");
            }
            Ok(())
        }
        RenderedOutcome::Values(values) => {
            let solution = values
                .iter()
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .with_context(|| format!("written value {value:?} is not a number"))
                })
                .collect::<Result<Vec<_>>>()?;
            verify_solution(&solution, golden, tolerance)
        }
    }
}
