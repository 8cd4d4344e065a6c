/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::normeq_linalg::NumericalError;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Which precondition of a fit or score was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input dimensions disagree.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The normal equations could not be solved.
    #[error(transparent)]
    Numerical(#[from] NumericalError),

    /// The requested statistic is undefined for this input.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    match expected == actual {
        true => Ok(()),
        false => Err(Error::ShapeMismatch { what, expected, actual }),
    }
}
