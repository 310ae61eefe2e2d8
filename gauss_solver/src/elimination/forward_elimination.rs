use crate::augmented_matrix::EliminationMatrix;

/// Largest magnitudes that went into a row, split between the coefficient
/// columns and the right-hand side.
///
/// Starts from the row as given and grows with every `target += factor *
/// source` applied to it, so it follows the row through swaps and bounds the
/// rounding left behind by cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMagnitude {
    pub coefficients: f64,
    pub rhs: f64,
}

impl RowMagnitude {
    pub fn of_row<M: EliminationMatrix>(matrix: &M, r: usize) -> Self {
        let rhs_column = matrix.cols() - 1;
        Self {
            coefficients: (0..rhs_column)
                .map(|c| matrix.get(r, c).abs())
                .fold(0.0, f64::max),
            rhs: matrix.get(r, rhs_column).abs(),
        }
    }

    fn absorb(&mut self, source: RowMagnitude, factor: f64) {
        self.coefficients = self.coefficients.max(factor.abs() * source.coefficients);
        self.rhs = self.rhs.max(factor.abs() * source.rhs);
    }

    /// Coefficients at or below this are rounding noise.
    pub fn coefficient_noise(&self, number_of_rows: usize) -> f64 {
        f64::EPSILON * self.coefficients * number_of_rows as f64
    }

    pub fn rhs_noise(&self, number_of_rows: usize) -> f64 {
        f64::EPSILON * self.rhs * number_of_rows as f64
    }
}

// brings an augmented system to upper triangular form, one pivot column at a
// time, only ever touching the rows below the active pivot.
pub struct ForwardElimination<'a, M: EliminationMatrix> {
    matrix: &'a mut M,
    active_column: usize,
    last_pivot_column: usize,
    pub row_combinations: usize,
    pub row_magnitudes: Vec<RowMagnitude>,
}

impl<'a, M: EliminationMatrix> ForwardElimination<'a, M> {
    pub fn new(matrix: &'a mut M) -> Self {
        let last_pivot_column = matrix.rows().saturating_sub(1);
        let row_magnitudes = (0..matrix.rows())
            .map(|r| RowMagnitude::of_row(&*matrix, r))
            .collect();
        Self {
            matrix,
            active_column: 0,
            last_pivot_column,
            row_combinations: 0,
            row_magnitudes,
        }
    }

    pub fn go_to_triangular_form(&mut self) {
        while self.is_not_in_triangular_form() {
            self.repair_active_pivot();
            self.eliminate_below_active_pivot();
            self.go_to_next_column();
        }
    }

    fn is_not_in_triangular_form(&self) -> bool {
        self.active_column < self.last_pivot_column
    }

    fn repair_active_pivot(&mut self) {
        let pivot = self.active_column;
        if self.matrix.get(pivot, pivot) == 0.0 {
            if let Some(swapped) = self.matrix.swap_with_nonzero_row(pivot, pivot) {
                self.row_magnitudes.swap(pivot, swapped);
            }
        }
    }

    fn eliminate_below_active_pivot(&mut self) {
        let pivot_row = self.active_column;
        let pivot = self.matrix.get(pivot_row, pivot_row);
        if pivot == 0.0 {
            // the swap scan found nothing, so every entry below is zero already
            log::trace!("column {pivot_row} has no usable pivot");
            return;
        }
        let pivot_magnitude = self.row_magnitudes[pivot_row];
        for row in pivot_row + 1..self.matrix.rows() {
            let entry = self.matrix.get(row, pivot_row);
            if entry != 0.0 {
                let factor = -entry / pivot;
                self.matrix.combine_row(row, pivot_row, factor);
                self.row_magnitudes[row].absorb(pivot_magnitude, factor);
                self.row_combinations += 1;
            }
        }
    }

    fn go_to_next_column(&mut self) {
        self.active_column += 1;
    }
}

/// Runs forward elimination in place and returns how many row combinations
/// it applied.
pub fn forward_eliminate<M: EliminationMatrix>(matrix: &mut M) -> usize {
    let mut elimination = ForwardElimination::new(matrix);
    elimination.go_to_triangular_form();
    elimination.row_combinations
}
