/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Knobs for the behavior that the least-squares contract leaves open.
//!
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! ```yaml
//! solver: lu          # or svd
//! min-rcond: 2.2e-16  # LU only; 0 disables the conditioning check
//! svd-rank-tol: 1e-12 # SVD only
//! degenerate: error   # or permissive
//! ```

use ::std::io::Read;
use crate::{Error, Result};

/// Provides an alternative to `serde_yaml::from_reader` that warns about
/// unrecognized keys instead of silently dropping them.
pub trait YamlRead: for<'de> ::serde::Deserialize<'de> {
    fn from_reader(r: impl Read) -> ::std::result::Result<Self, ::serde_yaml::Error> {
        Self::from_value(::serde_yaml::from_reader(r)?)
    }

    fn from_value(value: ::serde_yaml::Value) -> ::std::result::Result<Self, ::serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: ::serde_yaml::Value) -> ::std::result::Result<$Type, ::serde_yaml::Error> {
                ::serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub solver: Solver,

    /// Smallest acceptable reciprocal condition number of `XᵀX` for the LU
    /// solver. Zero disables the check.
    #[serde(default = "_settings__min_rcond")]
    pub min_rcond: f64,

    /// Singular values of `XᵀX` below this fraction of the largest one count
    /// as zero for the SVD solver.
    #[serde(default = "_settings__svd_rank_tol")]
    pub svd_rank_tol: f64,

    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}
derive_yaml_read!{Settings}

#[allow(non_snake_case)]
fn _settings__min_rcond() -> f64 { f64::EPSILON }
#[allow(non_snake_case)]
fn _settings__svd_rank_tol() -> f64 { 1e-12 }

impl Default for Settings {
    fn default() -> Self {
        Settings {
            solver: Solver::default(),
            min_rcond: _settings__min_rcond(),
            svd_rank_tol: _settings__svd_rank_tol(),
            degenerate: DegeneratePolicy::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let check_tol = |name: &str, value: f64| match value.is_finite() && value >= 0.0 {
            true => Ok(()),
            false => Err(Error::InvalidSettings(format!("{} must be finite and non-negative, got {}", name, value))),
        };
        check_tol("min-rcond", self.min_rcond)?;
        check_tol("svd-rank-tol", self.svd_rank_tol)?;
        // a reciprocal condition number never exceeds 1
        if self.min_rcond > 1.0 {
            return Err(Error::InvalidSettings(format!("min-rcond cannot exceed 1, got {}", self.min_rcond)));
        }
        Ok(())
    }
}

/// How the normal equations `XᵀX·beta = XᵀY` are solved.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Solver {
    /// LU factorization with partial pivoting (`dgesv`).
    Lu,
    /// SVD-based least squares (`dgelss`), with an explicit rank check.
    Svd,
}

impl Default for Solver {
    fn default() -> Self { Solver::Lu }
}

/// What R² does when every element of the response is the same.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Fail with `Error::DegenerateInput`.
    Error,
    /// Return whatever the division produces (`NaN` or `-inf`).
    Permissive,
}

impl Default for DegeneratePolicy {
    fn default() -> Self { DegeneratePolicy::Error }
}
