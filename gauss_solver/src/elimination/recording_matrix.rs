use std::cell::Cell;

use crate::augmented_matrix::{AugmentedMatrix, EliminationMatrix};

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCall {
    Combine {
        target: usize,
        source: usize,
        factor: f64,
    },
    Swap {
        row: usize,
        col: usize,
    },
}

// in-memory matrix that remembers every mutation and can be told what the
// degeneracy scans should answer.
pub struct RecordingMatrix {
    pub inner: AugmentedMatrix,
    pub calls: Vec<MatrixCall>,
    pub wrong_row: Option<bool>,
    pub zero_row: Option<bool>,
    pub zero_row_scans: Cell<usize>,
    pub wrong_row_scans: Cell<usize>,
}

impl RecordingMatrix {
    pub fn new(inner: AugmentedMatrix) -> Self {
        Self {
            inner,
            calls: vec![],
            wrong_row: None,
            zero_row: None,
            zero_row_scans: Cell::new(0),
            wrong_row_scans: Cell::new(0),
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self::new(AugmentedMatrix::from_rows(rows).unwrap())
    }

    pub fn answering(mut self, wrong_row: bool, zero_row: bool) -> Self {
        self.wrong_row = Some(wrong_row);
        self.zero_row = Some(zero_row);
        self
    }
}

impl EliminationMatrix for RecordingMatrix {
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        self.inner.get(r, c)
    }

    fn combine_row(&mut self, target: usize, source: usize, factor: f64) {
        self.calls.push(MatrixCall::Combine {
            target,
            source,
            factor,
        });
        self.inner.combine_row(target, source, factor)
    }

    fn swap_with_nonzero_row(&mut self, row: usize, col: usize) -> Option<usize> {
        self.calls.push(MatrixCall::Swap { row, col });
        self.inner.swap_with_nonzero_row(row, col)
    }

    fn exists_zero_row(&self) -> bool {
        self.zero_row_scans.set(self.zero_row_scans.get() + 1);
        self.zero_row.unwrap_or_else(|| self.inner.exists_zero_row())
    }

    fn exists_wrong_row(&self) -> bool {
        self.wrong_row_scans.set(self.wrong_row_scans.get() + 1);
        self.wrong_row.unwrap_or_else(|| self.inner.exists_wrong_row())
    }
}
