/*!
Thomas algorithm for tridiagonal systems.

When the matrix A of a linear system is tridiagonal, Gaussian elimination
reduces to a forward sweep that normalises the super-diagonal and right hand
side, followed by back-substitution. The cost is O(n).

No pivoting is performed. The method is reliable for diagonally dominant
systems, which is what the implicit Richards discretization produces. A zero
pivot yields inf/NaN in the solution; this is a property of the input system
and is only turned into an error when `SolverConfig::strict` is set.
*/
use crate::config::SolverConfig;
use crate::error::{RichardsError, RichardsResult};
use crate::system::{TridiagonalSystem, check_shape, dominance_violations, off_diagonal_sum};
use nalgebra::DVector;
use std::io::{self, Write};

#[derive(Clone, Debug, Default)]
pub struct Thomas {
    upper: DVector<f64>, // Super-diagonal, upper[n-1] unused
    main: DVector<f64>,  // Main diagonal
    lower: DVector<f64>, // Sub-diagonal, lower[0] unused
    rhs: DVector<f64>,   // Right hand side
    solution: DVector<f64>,
    config: SolverConfig,
}

impl Thomas {
    pub fn new() -> Self {
        Thomas::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Thomas {
            config,
            ..Thomas::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /**
    Loads a system from its diagonals.

    # Arguments
    - `upper` - super-diagonal of A, length n
    - `main` - main diagonal of A, length n
    - `lower` - sub-diagonal of A, length n
    - `rhs` - right hand side, length n

    The slices are copied; the caller's data is never modified.

    # Errors
    `InvalidSystemShape` if the lengths differ or are zero. Any previously
    loaded system is dropped as well, so a following `solve` fails too.
    */
    pub fn set(
        &mut self,
        upper: &[f64],
        main: &[f64],
        lower: &[f64],
        rhs: &[f64],
    ) -> RichardsResult<()> {
        let n = match check_shape(upper.len(), main.len(), lower.len(), rhs.len()) {
            Ok(n) => n,
            Err(err) => {
                *self = Thomas::with_config(self.config);
                return Err(err);
            }
        };
        self.upper = DVector::from_column_slice(upper);
        self.main = DVector::from_column_slice(main);
        self.lower = DVector::from_column_slice(lower);
        self.rhs = DVector::from_column_slice(rhs);
        self.solution = DVector::zeros(n);
        Ok(())
    }

    pub fn set_system(&mut self, system: &TridiagonalSystem) -> RichardsResult<()> {
        self.set(
            system.upper().as_slice(),
            system.main().as_slice(),
            system.lower().as_slice(),
            system.rhs().as_slice(),
        )
    }

    /// Solves the loaded system and returns a fresh copy of the solution.
    ///
    /// The forward sweep runs on solve-local copies, so calling `solve` again
    /// gives the same result. A solution rejected in strict mode is not stored.
    pub fn solve(&mut self) -> RichardsResult<DVector<f64>> {
        let n = check_shape(
            self.upper.len(),
            self.main.len(),
            self.lower.len(),
            self.rhs.len(),
        )?;

        if self.config.check_dominance {
            self.warn_dominance();
        }
        log::debug!("Thomas solve: n={}", n);

        let mut upper = self.upper.clone();
        let mut rhs = self.rhs.clone();

        // Forward elimination
        upper[0] /= self.main[0];
        rhs[0] /= self.main[0];
        for i in 1..n {
            let gamma = 1.0 / (self.main[i] - upper[i - 1] * self.lower[i]);
            upper[i] *= gamma;
            rhs[i] = (rhs[i] - self.lower[i] * rhs[i - 1]) * gamma;
        }

        // Back substitution
        let mut x = DVector::zeros(n);
        x[n - 1] = rhs[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = rhs[i] - upper[i] * x[i + 1];
        }

        if self.config.strict {
            if let Some((row, &value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                log::warn!("Thomas solve produced {} at row {}", value, row);
                return Err(RichardsError::IllFormedSystem { row, value });
            }
        }

        self.solution = x.clone();
        Ok(x)
    }

    // Solution of the last accepted solve (zeros before any solve)
    pub fn solution(&self) -> &DVector<f64> {
        &self.solution
    }

    // Write the solution, one value per line
    pub fn write_solution<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "The solution computed with Thomas algorithm is:")?;
        for value in self.solution.iter() {
            writeln!(out, "{}", value)?;
        }
        Ok(())
    }

    pub fn print_solution(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_solution(&mut stdout.lock())
    }

    fn warn_dominance(&self) {
        let (upper, lower) = (self.upper.as_slice(), self.lower.as_slice());
        let n = self.main.len();
        for i in dominance_violations(upper, self.main.as_slice(), lower) {
            log::warn!(
                "Row {} is not diagonally dominant: |main|={:.3e}, |lower|+|upper|={:.3e}",
                i,
                self.main[i].abs(),
                off_diagonal_sum(upper, lower, i, n)
            );
        }
    }
}

/// Solves `A * x = rhs` in one call with the default configuration.
pub fn thomas_solve(
    upper: &[f64],
    main: &[f64],
    lower: &[f64],
    rhs: &[f64],
) -> RichardsResult<DVector<f64>> {
    let mut thomas = Thomas::new();
    thomas.set(upper, main, lower, rhs)?;
    thomas.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mismatched_lengths_fail_before_solving() {
        let mut thomas = Thomas::new();
        let err = thomas
            .set(&[0.0; 3], &[1.0; 3], &[0.0; 3], &[1.0; 2])
            .unwrap_err();
        assert!(matches!(
            err,
            RichardsError::InvalidSystemShape {
                upper: 3,
                main: 3,
                lower: 3,
                rhs: 2
            }
        ));
        // Nothing was loaded
        assert!(matches!(
            thomas.solve(),
            Err(RichardsError::InvalidSystemShape { main: 0, .. })
        ));
    }

    #[test]
    fn identity_system_returns_rhs() {
        let x = thomas_solve(&[0.0; 3], &[1.0; 3], &[0.0; 3], &[2.0, 5.0, -1.0]).unwrap();
        assert_eq!(x.as_slice(), &[2.0, 5.0, -1.0]);
    }

    #[test]
    fn known_three_by_three() {
        // [ 2 -1  0] [x0]   [1]
        // [-1  3 -1] [x1] = [0]
        // [ 0 -1  2] [x2]   [1]
        let x = thomas_solve(
            &[-1.0, -1.0, 0.0],
            &[2.0, 3.0, 2.0],
            &[0.0, -1.0, -1.0],
            &[1.0, 0.0, 1.0],
        )
        .unwrap();
        assert_relative_eq!(x, DVector::from_vec(vec![0.75, 0.5, 0.75]), epsilon = 1e-9);
    }

    #[test]
    fn single_row() {
        let x = thomas_solve(&[0.0], &[4.0], &[0.0], &[8.0]).unwrap();
        assert_eq!(x.as_slice(), &[2.0]);
    }

    #[test]
    fn caller_data_is_untouched_and_solve_repeats() {
        let upper = vec![-1.0, -1.0, -1.0, 0.0];
        let main = vec![4.0; 4];
        let lower = vec![0.0, -1.0, -1.0, -1.0];
        let rhs = vec![1.0, 2.0, 3.0, 4.0];

        let mut thomas = Thomas::new();
        thomas.set(&upper, &main, &lower, &rhs).unwrap();
        let first = thomas.solve().unwrap();
        let second = thomas.solve().unwrap();

        assert_eq!(first, second);
        assert_eq!(thomas.solution(), &first);
        assert_eq!(upper, vec![-1.0, -1.0, -1.0, 0.0]);
        assert_eq!(rhs, vec![1.0, 2.0, 3.0, 4.0]);

        let sys = TridiagonalSystem::new(&upper, &main, &lower, &rhs).unwrap();
        assert!(sys.residual(&first).unwrap() < 1e-12);
    }

    #[test]
    fn rejected_load_drops_previous_system() {
        let mut thomas = Thomas::with_config(SolverConfig::strict());
        thomas.set(&[0.0], &[4.0], &[0.0], &[8.0]).unwrap();
        assert_eq!(thomas.solve().unwrap().as_slice(), &[2.0]);

        let err = thomas
            .set(&[0.0; 3], &[1.0; 3], &[0.0; 3], &[1.0; 2])
            .unwrap_err();
        assert!(matches!(err, RichardsError::InvalidSystemShape { rhs: 2, .. }));
        assert!(matches!(
            thomas.solve(),
            Err(RichardsError::InvalidSystemShape { main: 0, .. })
        ));
        assert!(thomas.solution().is_empty());
        // Configuration survives the reset
        assert!(thomas.config().strict);
    }

    #[test]
    fn heat_equation_pattern() {
        let n = 10;
        let alpha = 0.4;
        let lower: Vec<f64> = (0..n).map(|i| if i > 0 { -alpha } else { 0.0 }).collect();
        let upper: Vec<f64> = (0..n).map(|i| if i < n - 1 { -alpha } else { 0.0 }).collect();
        let main = vec![1.0 + 2.0 * alpha; n];
        let sys = TridiagonalSystem::new(&upper, &main, &lower, &vec![1.0; n]).unwrap();

        let mut thomas = Thomas::with_config(SolverConfig::strict());
        thomas.set_system(&sys).unwrap();
        let x = thomas.solve().unwrap();
        for (i, &xi) in x.iter().enumerate() {
            assert!(xi > 0.0 && xi.is_finite(), "x[{i}] = {xi} should be positive finite");
        }
        // Symmetric system, symmetric solution
        assert_relative_eq!(x[0], x[n - 1], epsilon = 1e-12);
    }

    #[test]
    fn zero_pivot_propagates_by_default() {
        // Second pivot is 1 - 1 * 1 = 0
        let upper = [1.0, 0.0];
        let main = [1.0, 1.0];
        let lower = [0.0, 1.0];
        let rhs = [1.0, 1.0];

        let x = thomas_solve(&upper, &main, &lower, &rhs).unwrap();
        assert!(x.iter().any(|v| !v.is_finite()));

        let mut strict = Thomas::with_config(SolverConfig::strict());
        strict.set(&upper, &main, &lower, &rhs).unwrap();
        match strict.solve() {
            Err(RichardsError::IllFormedSystem { row, value }) => {
                assert_eq!(row, 0);
                assert!(!value.is_finite());
            }
            other => panic!("expected IllFormedSystem, got {other:?}"),
        }
        // The rejected inf/NaN vector is not kept as the solution
        assert!(strict.solution().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn dominance_check_does_not_change_result() {
        let upper = [-3.0, 0.5, 0.0];
        let main = [1.0, 4.0, 2.0];
        let lower = [0.0, 1.0, -1.0];
        let rhs = [1.0, 2.0, 3.0];

        let plain = thomas_solve(&upper, &main, &lower, &rhs).unwrap();
        let mut checked = Thomas::with_config(SolverConfig {
            strict: false,
            check_dominance: true,
        });
        checked.set(&upper, &main, &lower, &rhs).unwrap();
        assert_eq!(checked.solve().unwrap(), plain);
        // Only the first row is flagged: upper[2] has no matrix entry
        assert_eq!(dominance_violations(&upper, &main, &lower), vec![0]);
    }

    #[test]
    fn dump_writes_one_value_per_line() {
        let mut thomas = Thomas::new();
        thomas.set(&[0.0, 0.0], &[2.0, 4.0], &[0.0, 0.0], &[1.0, 2.0]).unwrap();
        thomas.solve().unwrap();

        let mut out = Vec::new();
        thomas.write_solution(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0.5");
        assert_eq!(lines[2], "0.5");
    }
}
