use crate::augmented_matrix::EliminationMatrix;

// expects an upper triangular system with nonzero pivots; checking that is
// the caller's business.
pub struct BackwardsSubstitution {
    pub solution: Vec<f64>,
}

impl BackwardsSubstitution {
    pub fn zero(n: usize) -> Self {
        Self {
            solution: vec![0.0; n],
        }
    }

    pub fn solve<M: EliminationMatrix>(&mut self, u: &M) {
        debug_assert_eq!(u.rows(), self.solution.len());
        self.solution.fill(0.0);
        let n = self.solution.len();
        let rhs_column = u.cols() - 1;
        let mut i = n;
        while i > 0 {
            i -= 1;
            let mut tmp = u.get(i, rhs_column);
            for j in i + 1..n {
                tmp -= u.get(i, j) * self.solution[j];
            }
            self.solution[i] = tmp / u.get(i, i);
        }
    }
}

pub fn backward_substitute<M: EliminationMatrix>(u: &M) -> Vec<f64> {
    let mut substitution = BackwardsSubstitution::zero(u.rows());
    substitution.solve(u);
    substitution.solution
}
