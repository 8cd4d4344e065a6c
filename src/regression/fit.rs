/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ::normeq_linalg::{self as linalg, CMatrix, NumericalError};

use crate::error::check_len;
use crate::score::{adjusted_r_squared, calculate_r_squared_with};
use crate::{Result, Settings, Solver};

/// Ordinary least squares coefficients, by solving the normal equations
/// `XᵀX·beta = XᵀY` with default settings.
///
/// `x` is `n x p` (one row per observation), `y` has length `n`, and the
/// output has length `p`.
pub fn fit_linear_model<S, T>(x: &ArrayBase<S, Ix2>, y: &ArrayBase<T, Ix1>) -> Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{ fit_linear_model_with(&Settings::default(), x, y) }

/// `fit_linear_model` with an explicit choice of solver and tolerances.
pub fn fit_linear_model_with<S, T>(settings: &Settings, x: &ArrayBase<S, Ix2>, y: &ArrayBase<T, Ix1>) -> Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    settings.validate()?;

    let (n, p) = x.dim();
    check_len("response length (rows of X)", n, y.len())?;
    if n < p {
        warn!("Underdetermined system: {} observations for {} predictors", n, p);
    }

    let xt = x.t();
    let xtx = xt.dot(x);
    let xty = xt.dot(y);
    trace!("normal equations: XtX is {:?}, XtY has length {}", xtx.dim(), xty.len());

    solve_normal_equations(settings, xtx, xty)
}

fn solve_normal_equations(settings: &Settings, xtx: Array2<f64>, xty: Array1<f64>) -> Result<Array1<f64>> {
    let p = xty.len();
    let rhs = CMatrix::column(xty.view());

    let solution: Array2<f64> = match settings.solver {
        Solver::Lu => {
            debug!("Solving {0}x{0} normal equations by LU", p);
            linalg::lapacke_linear_solve(xtx.into(), rhs, settings.min_rcond)?.into_inner()
        },
        Solver::Svd => {
            debug!("Solving {0}x{0} normal equations by SVD", p);
            let lsq = linalg::lapacke_least_squares_svd(xtx.into(), rhs, settings.svd_rank_tol)?;
            debug!("singular values of XtX: {}", lsq.singular_values);
            if lsq.rank < p {
                return Err(NumericalError::RankDeficient { rank: lsq.rank, cols: p }.into());
            }
            lsq.solution
        },
    };
    Ok(solution.column(0).to_owned())
}

/// `X·beta`.
pub fn fitted_values<S, T>(x: &ArrayBase<S, Ix2>, beta: &ArrayBase<T, Ix1>) -> Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    check_len("coefficient length (columns of X)", x.ncols(), beta.len())?;
    Ok(x.dot(beta))
}

/// `Y - fitted`.
pub fn residuals<S, T>(y: &ArrayBase<S, Ix1>, fitted: &ArrayBase<T, Ix1>) -> Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    check_len("fitted length", y.len(), fitted.len())?;
    Ok(y - fitted)
}

/// Everything about a single least squares fit, computed in one go.
#[derive(Debug, Clone)]
pub struct LinearFit {
    /// One weight per column of the design matrix.
    pub coefficients: Array1<f64>,
    pub fitted: Array1<f64>,
    pub residuals: Array1<f64>,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn new<S, T>(settings: &Settings, x: &ArrayBase<S, Ix2>, y: &ArrayBase<T, Ix1>) -> Result<Self>
    where
        S: Data<Elem = f64>,
        T: Data<Elem = f64>,
    {
        let coefficients = fit_linear_model_with(settings, x, y)?;
        let fitted = fitted_values(x, &coefficients)?;
        let residuals = residuals(y, &fitted)?;
        let r_squared = calculate_r_squared_with(settings, y, &fitted)?;
        Ok(LinearFit { coefficients, fitted, residuals, r_squared })
    }

    /// R² penalized for the number of coefficients (intercept included).
    pub fn adjusted_r_squared(&self) -> Result<f64> {
        adjusted_r_squared(self.r_squared, self.fitted.len(), self.coefficients.len())
    }
}
