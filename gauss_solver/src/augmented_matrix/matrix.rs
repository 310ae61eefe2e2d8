use std::fmt;

use anyhow::{ensure, Result};
use itertools::Itertools;

/// Row-level access the elimination engine needs from an augmented system.
///
/// The last column holds the right-hand side, every other column a
/// coefficient. Only `combine_row` and `swap_with_nonzero_row` mutate.
pub trait EliminationMatrix {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Panics when `(r, c)` lies outside `rows() x cols()`.
    fn get(&self, r: usize, c: usize) -> f64;

    /// `target += factor * source`, across every column.
    fn combine_row(&mut self, target: usize, source: usize, factor: f64);

    /// Exchanges `row` with the first row below it that is nonzero at `col`
    /// and returns that row's index. Leaves the matrix untouched if there is
    /// none.
    fn swap_with_nonzero_row(&mut self, row: usize, col: usize) -> Option<usize>;

    /// Some row reads `0 = k` with `k != 0`.
    fn exists_zero_row(&self) -> bool;

    /// The stored shape does not describe a square augmented system.
    fn exists_wrong_row(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix {
    number_of_unknowns: usize,
    rows: Vec<Vec<f64>>,
}

impl AugmentedMatrix {
    pub fn zeroes(number_of_unknowns: usize) -> Self {
        Self {
            number_of_unknowns,
            rows: (0..number_of_unknowns)
                .map(|_| vec![0.0; number_of_unknowns.saturating_add(1)])
                .collect(),
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        ensure!(!rows.is_empty(), "an augmented system needs at least one row");
        let number_of_unknowns = rows.len();
        for (idx, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == number_of_unknowns + 1,
                "row {idx} has {} entries, expected {}",
                row.len(),
                number_of_unknowns + 1
            );
        }
        Ok(Self {
            number_of_unknowns,
            rows,
        })
    }

    // keeps whatever was read so that a bad token or line count stays visible
    // to `exists_wrong_row` instead of being lost at construction time.
    pub fn from_declared_rows(number_of_unknowns: usize, rows: Vec<Vec<f64>>) -> Self {
        Self {
            number_of_unknowns,
            rows,
        }
    }

    pub fn checked_get(&self, r: usize, c: usize) -> Option<f64> {
        if r >= self.rows() || c >= self.cols() {
            return None;
        }
        self.rows.get(r)?.get(c).copied()
    }

    pub fn set(&mut self, r: usize, c: usize, v: f64) {
        self.check_bounds(r, c);
        self.rows[r][c] = v;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.rows[r]
    }

    /// `A x - b` for every row, given a candidate solution `x`.
    pub fn residuals(&self, solution: &[f64]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| match row.split_last() {
                Some((rhs, coefficients)) => {
                    coefficients
                        .iter()
                        .zip(solution)
                        .map(|(a, x)| a * x)
                        .sum::<f64>()
                        - rhs
                }
                None => 0.0,
            })
            .collect()
    }

    fn check_bounds(&self, r: usize, c: usize) {
        if self.checked_get(r, c).is_none() {
            panic!(
                "index ({r}, {c}) out of range for a {}x{} augmented matrix",
                self.rows(),
                self.cols()
            );
        }
    }
}

impl EliminationMatrix for AugmentedMatrix {
    fn rows(&self) -> usize {
        self.number_of_unknowns
    }

    // saturates so a nonsense declared count still reads as a wrong row
    fn cols(&self) -> usize {
        self.number_of_unknowns.saturating_add(1)
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        match self.checked_get(r, c) {
            Some(value) => value,
            None => panic!(
                "index ({r}, {c}) out of range for a {}x{} augmented matrix",
                self.rows(),
                self.cols()
            ),
        }
    }

    fn combine_row(&mut self, target: usize, source: usize, factor: f64) {
        assert_ne!(target, source, "cannot combine row {target} with itself");
        self.check_bounds(target, 0);
        self.check_bounds(source, 0);
        let (target_row, source_row) = if target < source {
            let (head, tail) = self.rows.split_at_mut(source);
            (&mut head[target], &tail[0])
        } else {
            let (head, tail) = self.rows.split_at_mut(target);
            (&mut tail[0], &head[source])
        };
        for (t, s) in target_row.iter_mut().zip(source_row.iter()) {
            *t += factor * s;
        }
    }

    fn swap_with_nonzero_row(&mut self, row: usize, col: usize) -> Option<usize> {
        self.check_bounds(row, col);
        let candidate = (row + 1..self.rows.len()).find(|&candidate| {
            self.rows[candidate]
                .get(col)
                .is_some_and(|value| *value != 0.0)
        });
        if let Some(candidate) = candidate {
            log::trace!("swapping row {row} with row {candidate} for a pivot in column {col}");
            self.rows.swap(row, candidate);
        }
        candidate
    }

    fn exists_zero_row(&self) -> bool {
        self.rows.iter().any(|row| match row.split_last() {
            Some((rhs, coefficients)) => {
                *rhs != 0.0 && coefficients.iter().all(|coefficient| *coefficient == 0.0)
            }
            None => false,
        })
    }

    fn exists_wrong_row(&self) -> bool {
        let cols = self.cols();
        self.number_of_unknowns == 0
            || self.rows.len() != self.number_of_unknowns
            || self.rows.iter().any(|row| row.len() != cols)
    }
}

impl fmt::Display for AugmentedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .rows
            .iter()
            .map(|row| row.iter().map(|value| value.to_string()).join(" "))
            .join("\n");
        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_by_three() -> AugmentedMatrix {
        AugmentedMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn reports_dimensions_of_the_augmented_shape() {
        let matrix = two_by_three();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.get(1, 2), 6.0);
    }

    #[test]
    fn from_rows_rejects_non_augmented_shapes() {
        assert!(AugmentedMatrix::from_rows(vec![]).is_err());
        assert!(AugmentedMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_panics_outside_the_matrix() {
        two_by_three().get(0, 3);
    }

    #[test]
    fn checked_get_does_not_panic() {
        let matrix = two_by_three();
        assert_eq!(matrix.checked_get(2, 0), None);
        assert_eq!(matrix.checked_get(0, 1), Some(2.0));
    }

    #[test]
    fn combine_row_adds_a_multiple_of_the_source() {
        let mut matrix = two_by_three();
        matrix.combine_row(1, 0, -4.0);
        assert_eq!(matrix.row(1), &[0.0, -3.0, -6.0]);
        assert_eq!(matrix.row(0), &[1.0, 2.0, 3.0]);

        matrix.combine_row(0, 1, 1.0);
        assert_eq!(matrix.row(0), &[1.0, -1.0, -3.0]);
    }

    #[test]
    #[should_panic(expected = "with itself")]
    fn combine_row_refuses_the_same_row() {
        two_by_three().combine_row(1, 1, 2.0);
    }

    #[test]
    fn swap_picks_the_first_nonzero_row_below() {
        let mut matrix = AugmentedMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 2.0, 1.0, 2.0],
            vec![5.0, 0.0, 0.0, 3.0],
        ])
        .unwrap();
        assert_eq!(matrix.swap_with_nonzero_row(0, 0), Some(2));
        assert_eq!(matrix.row(0), &[5.0, 0.0, 0.0, 3.0]);
        assert_eq!(matrix.row(2), &[0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn swap_without_candidate_is_a_no_op() {
        let mut matrix = AugmentedMatrix::from_rows(vec![
            vec![1.0, 0.0, 1.0],
            vec![2.0, 0.0, 2.0],
        ])
        .unwrap();
        let before = matrix.clone();
        assert_eq!(matrix.swap_with_nonzero_row(1, 1), None);
        assert_eq!(matrix, before);
    }

    #[test]
    fn zero_row_needs_a_nonzero_right_hand_side() {
        let consistent =
            AugmentedMatrix::from_rows(vec![vec![1.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]]).unwrap();
        assert!(!consistent.exists_zero_row());

        let inconsistent =
            AugmentedMatrix::from_rows(vec![vec![1.0, 1.0, 2.0], vec![0.0, 0.0, 7.0]]).unwrap();
        assert!(inconsistent.exists_zero_row());
    }

    #[test]
    fn wrong_rows_come_from_the_declared_shape() {
        assert!(!two_by_three().exists_wrong_row());
        // short row
        let short = AugmentedMatrix::from_declared_rows(2, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
        assert!(short.exists_wrong_row());
        // missing row
        let missing = AugmentedMatrix::from_declared_rows(2, vec![vec![1.0, 2.0, 3.0]]);
        assert!(missing.exists_wrong_row());
        // nothing declared
        assert!(AugmentedMatrix::from_declared_rows(0, vec![]).exists_wrong_row());
    }

    #[test]
    fn huge_declared_count_is_a_wrong_row_not_an_overflow() {
        let matrix = AugmentedMatrix::from_declared_rows(usize::MAX, vec![vec![1.0, 2.0]]);
        assert_eq!(matrix.cols(), usize::MAX);
        assert!(matrix.exists_wrong_row());
        assert_eq!(matrix.checked_get(0, 0), Some(1.0));
    }

    #[test]
    fn residuals_vanish_for_the_solution() {
        let matrix = two_by_three();
        let residuals = matrix.residuals(&[-1.0, 2.0]);
        assert_eq!(residuals, vec![0.0, 0.0]);
    }

    #[test]
    fn display_renders_one_row_per_line() {
        let mut matrix = AugmentedMatrix::zeroes(2);
        matrix.set(0, 0, 1.5);
        matrix.set(1, 2, -2.0);
        assert_eq!(matrix.to_string(), "1.5 0 0\n0 0 -2");
    }
}
