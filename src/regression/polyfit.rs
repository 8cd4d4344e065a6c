/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::ndarray::{Array, Array1};

use crate::{fit_linear_model_with, Result, Settings};

/// Fit a polynomial.
///
/// Order is the maximum fitted coefficient of x.
/// That is, it is one less than the size of the returned vector, and
/// element `k` is the coefficient of `x^k`.
pub fn polyfit(settings: &Settings, order: u32, data: &[(f64, f64)]) -> Result<Array1<f64>> {
    #![allow(bad_style)]

    // NOTE: Vandermonde matrices get ill-conditioned quickly, and the normal
    //       equations square the condition number. Expect the conditioning
    //       check to reject high orders over wide ranges of x.
    let X = Array::from_shape_fn([data.len(), order as usize + 1], |(i, k)| data[i].0.powi(k as _));
    let y: Array1<f64> = data.iter().map(|&(_, y)| y).collect();

    fit_linear_model_with(settings, &X, &y)
}
