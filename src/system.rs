use crate::boundary_cond::StencilRow;
use crate::error::{RichardsError, RichardsResult};
use nalgebra::DVector;

// Check that the diagonals and right hand side share one non-zero length
pub(crate) fn check_shape(
    upper: usize,
    main: usize,
    lower: usize,
    rhs: usize,
) -> RichardsResult<usize> {
    if main == 0 || upper != main || lower != main || rhs != main {
        return Err(RichardsError::InvalidSystemShape {
            upper,
            main,
            lower,
            rhs,
        });
    }
    Ok(main)
}

// Rows where |main| < |upper| + |lower|; lower[0] and upper[n-1] are skipped
pub(crate) fn dominance_violations(upper: &[f64], main: &[f64], lower: &[f64]) -> Vec<usize> {
    let n = main.len();
    (0..n)
        .filter(|&i| main[i].abs() < off_diagonal_sum(upper, lower, i, n))
        .collect()
}

// |lower[i]| + |upper[i]| counting only entries that exist in the matrix
pub(crate) fn off_diagonal_sum(upper: &[f64], lower: &[f64], i: usize, n: usize) -> f64 {
    let lower = if i > 0 { lower[i].abs() } else { 0.0 };
    let upper = if i + 1 < n { upper[i].abs() } else { 0.0 };
    lower + upper
}

/// Tridiagonal system `A * x = rhs` stored as three diagonals of equal length.
///
/// Row `i` reads `lower[i] * x[i-1] + main[i] * x[i] + upper[i] * x[i+1] = rhs[i]`.
/// `lower[0]` and `upper[n-1]` have no matrix entry and are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct TridiagonalSystem {
    upper: DVector<f64>,
    main: DVector<f64>,
    lower: DVector<f64>,
    rhs: DVector<f64>,
}

impl TridiagonalSystem {
    pub fn new(upper: &[f64], main: &[f64], lower: &[f64], rhs: &[f64]) -> RichardsResult<Self> {
        check_shape(upper.len(), main.len(), lower.len(), rhs.len())?;
        Ok(TridiagonalSystem {
            upper: DVector::from_column_slice(upper),
            main: DVector::from_column_slice(main),
            lower: DVector::from_column_slice(lower),
            rhs: DVector::from_column_slice(rhs),
        })
    }

    // All-zero n-row system to be filled row by row. With n = 0 it is only a
    // placeholder: the solver rejects it with `InvalidSystemShape`.
    pub fn zeros(n: usize) -> Self {
        TridiagonalSystem {
            upper: DVector::zeros(n),
            main: DVector::zeros(n),
            lower: DVector::zeros(n),
            rhs: DVector::zeros(n),
        }
    }

    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    pub fn set_row(&mut self, i: usize, row: StencilRow) {
        self.upper[i] = row.upper;
        self.main[i] = row.main;
        self.lower[i] = row.lower;
        self.rhs[i] = row.rhs;
    }

    pub fn row(&self, i: usize) -> StencilRow {
        StencilRow {
            upper: self.upper[i],
            main: self.main[i],
            lower: self.lower[i],
            rhs: self.rhs[i],
        }
    }

    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }

    pub fn main(&self) -> &DVector<f64> {
        &self.main
    }

    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    // Matrix-vector product A * x
    pub fn apply(&self, x: &DVector<f64>) -> RichardsResult<DVector<f64>> {
        let n = self.len();
        if x.len() != n {
            return Err(RichardsError::VectorLength {
                expected: n,
                found: x.len(),
            });
        }
        Ok(DVector::from_fn(n, |i, _| {
            let mut ax = self.main[i] * x[i];
            if i > 0 {
                ax += self.lower[i] * x[i - 1];
            }
            if i + 1 < n {
                ax += self.upper[i] * x[i + 1];
            }
            ax
        }))
    }

    // Max norm of A * x - rhs
    pub fn residual(&self, x: &DVector<f64>) -> RichardsResult<f64> {
        Ok((self.apply(x)? - &self.rhs).amax())
    }

    pub fn dominance_violations(&self) -> Vec<usize> {
        dominance_violations(
            self.upper.as_slice(),
            self.main.as_slice(),
            self.lower.as_slice(),
        )
    }

    // Vacuously true for the empty placeholder system
    pub fn is_diagonally_dominant(&self) -> bool {
        self.dominance_violations().is_empty()
    }
}
