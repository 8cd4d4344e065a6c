/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Ordinary least squares through the normal equations, and R².
//!
//! The normal equations `XᵀX·beta = XᵀY` are solved (never inverted) with
//! LAPACK. This squares the condition number of `X`, which is fine for a
//! handful of well-behaved predictors; singular and badly conditioned
//! systems are reported as errors rather than producing garbage.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate normeq_assert_close;

pub use crate::error::{Error, Result};
mod error;

pub use crate::settings::{Settings, Solver, DegeneratePolicy, YamlRead};
mod settings;

pub use crate::fit::{fit_linear_model, fit_linear_model_with, fitted_values, residuals, LinearFit};
mod fit;

pub use crate::score::{calculate_r_squared, calculate_r_squared_with, adjusted_r_squared};
mod score;

pub use crate::polyfit::polyfit;
mod polyfit;
