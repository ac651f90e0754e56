use num_rational::BigRational;
use num_traits::Zero;

#[derive(Clone, PartialEq, Debug)]
pub enum Reduction {
    Unique(Vec<BigRational>),
    Inconsistent,
    /// `particular` solves the system with every free column set to zero.
    Underdetermined {
        rank: usize,
        particular: Vec<BigRational>,
    },
}

/// Augmented rows `[a_0 .. a_{n-1} | b]` of `A x = b`, reduced exactly.
#[derive(Clone, Debug)]
pub struct LinearSystem {
    columns: usize,
    rows: Vec<Vec<BigRational>>,
}

impl LinearSystem {
    pub fn new(columns: usize) -> Self {
        LinearSystem {
            columns,
            rows: Vec::new(),
        }
    }
    pub fn push_row(&mut self, mut coefficients: Vec<BigRational>, rhs: BigRational) {
        assert_eq!(coefficients.len(), self.columns, "row width must match column count");
        coefficients.push(rhs);
        self.rows.push(coefficients);
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gauss-Jordan elimination.
    pub fn reduce(mut self) -> Reduction {
        let n = self.columns;
        let mut rank = 0;
        let mut pivots = Vec::new();
        for col in 0..n {
            let Some(pivot) = (rank..self.rows.len()).find(|&r| !self.rows[r][col].is_zero()) else {
                continue;
            };
            self.rows.swap(rank, pivot);
            let pivot_val = self.rows[rank][col].clone();
            for x in self.rows[rank].iter_mut() {
                *x = &*x / &pivot_val;
            }
            let pivot_row = self.rows[rank].clone();
            for (r, row) in self.rows.iter_mut().enumerate() {
                if r == rank || row[col].is_zero() {
                    continue;
                }
                let factor = row[col].clone();
                for (x, p) in row.iter_mut().zip(&pivot_row) {
                    *x -= &factor * p;
                }
            }
            pivots.push(col);
            rank += 1;
        }
        if self.rows[rank..].iter().any(|row| !row[n].is_zero()) {
            return Reduction::Inconsistent;
        }
        if rank < n {
            let mut particular = vec![BigRational::zero(); n];
            for (row, &col) in self.rows.iter().zip(&pivots) {
                particular[col] = row[n].clone();
            }
            return Reduction::Underdetermined { rank, particular };
        }
        Reduction::Unique(self.rows[..n].iter().map(|row| row[n].clone()).collect())
    }
}
