/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::error::check_len;
use crate::{DegeneratePolicy, Error, Result, Settings};

/// Coefficient of determination, `1 - ss_residual / ss_total`.
///
/// Fails with `Error::DegenerateInput` when `y` is constant, because R² is
/// undefined there.
pub fn calculate_r_squared<S, T>(y: &ArrayBase<S, Ix1>, fitted: &ArrayBase<T, Ix1>) -> Result<f64>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{ calculate_r_squared_with(&Settings::default(), y, fitted) }

/// `calculate_r_squared`, with `settings.degenerate` deciding what happens
/// for a constant `y`.
pub fn calculate_r_squared_with<S, T>(settings: &Settings, y: &ArrayBase<S, Ix1>, fitted: &ArrayBase<T, Ix1>) -> Result<f64>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    settings.validate()?;
    check_len("fitted length", y.len(), fitted.len())?;

    let ss_residual = sum_of_squares(y - fitted);

    // Decided on the values themselves rather than on ss_total, which rounds
    // to a tiny nonzero for e.g. [0.1, 0.1, 0.1] and overflows near f64::MAX.
    // (an empty response has no variance to explain either)
    if y.iter().all(|&v| v == y[0]) {
        match settings.degenerate {
            DegeneratePolicy::Error => {
                return Err(Error::DegenerateInput("response is constant, so R² is undefined"));
            },
            DegeneratePolicy::Permissive => {
                let r_squared = 1.0 - ss_residual / 0.0;
                warn!("R² is undefined for a constant response; returning {}", r_squared);
                return Ok(r_squared);
            },
        }
    }

    let mean = y.mean().unwrap_or(0.0);
    let ss_total = sum_of_squares(y.mapv(|v| v - mean));
    trace!("R²: ss_total = {:e}, ss_residual = {:e}", ss_total, ss_residual);
    Ok(1.0 - ss_residual / ss_total)
}

// Both sums go through here so that a null model scores exactly zero.
fn sum_of_squares(diffs: Array1<f64>) -> f64 {
    diffs.mapv_into(|d| d * d).sum()
}

/// `1 - (1 - R²)(n - 1)/(n - p)`, where `p` counts every coefficient
/// (including an intercept column).
pub fn adjusted_r_squared(r_squared: f64, n: usize, p: usize) -> Result<f64> {
    if n <= p {
        return Err(Error::DegenerateInput("adjusted R² needs more observations than coefficients"));
    }
    let (n, p) = (n as f64, p as f64);
    Ok(1.0 - (1.0 - r_squared) * (n - 1.0) / (n - p))
}
