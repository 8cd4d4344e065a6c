/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Least squares regression coefficients and R², via the normal equations.
//!
//! ```no_run
//! use ndarray::{arr1, arr2};
//!
//! let x = arr2(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
//! let y = arr1(&[2.0, 4.0, 6.0]);
//!
//! let beta = normeq::fit_linear_model(&x, &y)?;
//! let fitted = normeq::fitted_values(&x, &beta)?;
//! let r_squared = normeq::calculate_r_squared(&y, &fitted)?;
//! # Ok::<(), normeq::Error>(())
//! ```

pub use normeq_regression::{
    fit_linear_model, fit_linear_model_with,
    calculate_r_squared, calculate_r_squared_with,
    fitted_values, residuals, adjusted_r_squared, polyfit,
    LinearFit, Settings, Solver, DegeneratePolicy, YamlRead,
    Error, Result,
};
pub use normeq_linalg::NumericalError;

pub mod version {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct VersionInfo {
        pub name: &'static str,
        pub version: &'static str,
    }

    pub fn get() -> VersionInfo {
        VersionInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
