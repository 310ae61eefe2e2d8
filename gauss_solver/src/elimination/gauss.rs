use std::fmt;

use crate::augmented_matrix::EliminationMatrix;

use super::backwards_substitution::backward_substitute;
use super::forward_elimination::{ForwardElimination, RowMagnitude};

#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Solved(Vec<f64>),
    /// The input does not have the `n x (n + 1)` augmented shape.
    RejectedMalformed,
    /// Some equation reduces to `0 = k` with `k != 0`.
    RejectedInconsistent,
    /// Elimination left a `0 = 0` equation behind: no unique solution.
    RejectedSingular,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&[f64]> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Solved(solution) => write!(f, "solved {} unknowns", solution.len()),
            SolveOutcome::RejectedMalformed => write!(f, "malformed input"),
            SolveOutcome::RejectedInconsistent => write!(f, "inconsistent system"),
            SolveOutcome::RejectedSingular => write!(f, "singular system"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolveState {
    Start,
    ShapeChecked,
    DegeneracyChecked,
    ForwardDone,
    BackwardDone,
    RejectedMalformed,
    RejectedInconsistent,
    RejectedSingular,
}

impl SolveState {
    fn terminal_for(outcome: &SolveOutcome) -> Self {
        match outcome {
            SolveOutcome::Solved(_) => SolveState::BackwardDone,
            SolveOutcome::RejectedMalformed => SolveState::RejectedMalformed,
            SolveOutcome::RejectedInconsistent => SolveState::RejectedInconsistent,
            SolveOutcome::RejectedSingular => SolveState::RejectedSingular,
        }
    }
}

fn advance(state: &mut SolveState, next: SolveState) {
    log::trace!("gauss: {state:?} -> {next:?}");
    *state = next;
}

fn finish(state: &mut SolveState, outcome: SolveOutcome) -> SolveOutcome {
    advance(state, SolveState::terminal_for(&outcome));
    outcome
}

/// Solves the augmented system in place.
///
/// The shape check runs before the inconsistency check, and both run before
/// the matrix is touched. After forward elimination the matrix is scanned
/// again, since elimination can expose `0 = k` and `0 = 0` rows that were
/// hidden in the input.
pub fn solve<M: EliminationMatrix>(matrix: &mut M) -> SolveOutcome {
    let mut state = SolveState::Start;
    if matrix.exists_wrong_row() {
        log::debug!("rejecting malformed system");
        return finish(&mut state, SolveOutcome::RejectedMalformed);
    }
    advance(&mut state, SolveState::ShapeChecked);

    if matrix.exists_zero_row() {
        log::debug!("rejecting inconsistent system before elimination");
        return finish(&mut state, SolveOutcome::RejectedInconsistent);
    }
    advance(&mut state, SolveState::DegeneracyChecked);

    let mut elimination = ForwardElimination::new(matrix);
    elimination.go_to_triangular_form();
    let combinations = elimination.row_combinations;
    let row_magnitudes = elimination.row_magnitudes;
    log::debug!("forward elimination applied {combinations} row combinations");
    advance(&mut state, SolveState::ForwardDone);

    if matrix.exists_zero_row() {
        log::debug!("rejecting inconsistent system after elimination");
        return finish(&mut state, SolveOutcome::RejectedInconsistent);
    }
    match find_degenerate_row(matrix, &row_magnitudes) {
        Some(Degeneracy::Inconsistent(row)) => {
            log::debug!("rejecting inconsistent system, row {row} reads 0 = k up to rounding");
            return finish(&mut state, SolveOutcome::RejectedInconsistent);
        }
        Some(Degeneracy::Singular(row)) => {
            log::debug!("rejecting singular system, no pivot in row {row}");
            return finish(&mut state, SolveOutcome::RejectedSingular);
        }
        None => {}
    }

    let solution = backward_substitute(matrix);
    finish(&mut state, SolveOutcome::Solved(solution))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Degeneracy {
    Inconsistent(usize),
    Singular(usize),
}

// each row is judged against the magnitudes that went into it, so a row that
// is small next to its neighbours keeps its pivot. An inconsistent row
// anywhere wins over a singular one.
fn find_degenerate_row<M: EliminationMatrix>(
    matrix: &M,
    row_magnitudes: &[RowMagnitude],
) -> Option<Degeneracy> {
    let n = matrix.rows();
    let rhs_column = matrix.cols() - 1;
    let mut singular = None;
    for (i, magnitude) in row_magnitudes.iter().enumerate() {
        let coefficient_noise = magnitude.coefficient_noise(n);
        let vanishes = |c: usize| matrix.get(i, c).abs() <= coefficient_noise;
        if (0..rhs_column).all(|c| vanishes(c)) {
            if matrix.get(i, rhs_column).abs() > magnitude.rhs_noise(n) {
                return Some(Degeneracy::Inconsistent(i));
            }
            singular.get_or_insert(i);
        } else if vanishes(i) {
            singular.get_or_insert(i);
        }
    }
    singular.map(Degeneracy::Singular)
}
