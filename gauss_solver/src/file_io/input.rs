use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::augmented_matrix::{AugmentedMatrix, EliminationMatrix};
use crate::elimination::{solve, SolveOutcome};

/// Parses `R` on the first line followed by one row of numbers per line.
///
/// Blank lines are skipped. Rows are kept exactly as read, so a wrong number
/// of tokens or lines is reported by `exists_wrong_row` rather than here.
pub fn parse_augmented_matrix(text: &str) -> Result<AugmentedMatrix> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let (header_idx, header) = lines
        .next()
        .context("input is empty, expected a row count on the first line")?;
    let number_of_unknowns: usize = header.trim().parse().with_context(|| {
        format!(
            "line {}: expected a row count, found {:?}",
            header_idx + 1,
            header.trim()
        )
    })?;
    ensure!(
        number_of_unknowns.checked_add(1).is_some(),
        "line {}: row count {number_of_unknowns} leaves no room for a right-hand side column",
        header_idx + 1
    );
    let rows = lines
        .map(|(idx, line)| parse_row(line).with_context(|| format!("line {}", idx + 1)))
        .collect::<Result<Vec<_>>>()?;
    log::debug!(
        "parsed {} rows for a declared system of {number_of_unknowns} unknowns",
        rows.len()
    );
    Ok(AugmentedMatrix::from_declared_rows(number_of_unknowns, rows))
}

fn parse_row(line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| -> Result<f64> {
            let value: f64 = token
                .parse()
                .with_context(|| format!("{token:?} is not a number"))?;
            ensure!(value.is_finite(), "{token:?} is not a finite number");
            Ok(value)
        })
        .collect()
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading input from {}", path.display()))
}

/// Whether `text` describes a well-shaped augmented system.
pub fn check_input(text: &str) -> bool {
    match parse_augmented_matrix(text) {
        Ok(matrix) => !matrix.exists_wrong_row(),
        Err(_) => false,
    }
}

/// Parses and solves; text that cannot be parsed counts as malformed.
pub fn solve_input(text: &str) -> SolveOutcome {
    match parse_augmented_matrix(text) {
        Ok(mut matrix) => solve(&mut matrix),
        Err(err) => {
            log::warn!("input could not be parsed: {err:#}");
            SolveOutcome::RejectedMalformed
        }
    }
}
