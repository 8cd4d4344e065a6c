/* ************************************************************************ **
** This file is part of normeq, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Checked wrappers around the handful of LAPACKe routines needed to solve
//! small dense systems.

#[macro_use]
extern crate log;
extern crate lapacke;
extern crate lapack_src;
#[cfg(test)]
#[macro_use]
extern crate normeq_assert_close;

use ::ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, ArrayBase, Ix2, Axis, Data};

/// Failure of a dense solve, as reported by LAPACK.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum NumericalError {
    #[error("matrix is singular (exactly zero pivot in row {pivot} of the LU factors)")]
    Singular { pivot: usize },

    #[error("matrix is too ill-conditioned to solve reliably (rcond = {rcond:e}, minimum is {min_rcond:e})")]
    IllConditioned { rcond: f64, min_rcond: f64 },

    #[error("matrix is rank-deficient (effective rank {rank} with {cols} columns)")]
    RankDeficient { rank: usize, cols: usize },

    #[error("SVD failed to converge ({count} off-diagonal elements did not converge to zero)")]
    SvdNoConvergence { count: usize },
}

pub use self::c_matrix::CMatrix;
mod c_matrix {
    use super::*;

    /// Owned, contiguous, C-order matrix data.
    ///
    /// Convenient for interfacing with LAPACKe, which tends to assume that
    /// one of the strides is equal to 1.
    #[derive(Debug, Clone)]
    pub struct CMatrix<A = f64>(
        // invariant: .strides[1] == 1
        // invariant: .strides[0] == .ncols()
        // invariant: .len() == product of dims
        Array2<A>
    );

    impl<A> CMatrix<A> {
        pub fn into_inner(self) -> Array2<A> { self.0 }
        pub fn c_order_data(&self) -> &[A] { self.0.as_slice().expect("(BUG) not c-order!!") }
        pub fn c_order_data_mut(&mut self) -> &mut [A] { self.0.as_slice_mut().expect("(BUG) not c-order!!") }
        pub fn stride(&self) -> usize { self.ncols() }
    }

    impl<A: Clone> CMatrix<A> {
        /// An `n x 1` matrix holding the vector, for use as a right-hand side.
        pub fn column(vec: ArrayView1<'_, A>) -> Self {
            let n = vec.len();
            CMatrix(Array::from_shape_vec((n, 1), vec.iter().cloned().collect()).expect("BUG"))
        }
    }

    impl<A> ::std::ops::Deref for CMatrix<A> {
        type Target = Array2<A>;

        fn deref(&self) -> &Self::Target { &self.0 }
    }

    impl<A: Clone> From<Array2<A>> for CMatrix<A> {
        fn from(arr: Array2<A>) -> Self {
            if arr.is_standard_layout() {
                CMatrix(arr)
            } else {
                arr.view().into()
            }
        }
    }

    impl<'a, A: Clone> From<ArrayView2<'a, A>> for CMatrix<A> {
        fn from(arr: ArrayView2<'a, A>) -> Self {
            let dim = arr.raw_dim();
            if let Some(data) = arr.as_slice() {
                CMatrix(Array::from_shape_vec(dim, data.to_vec()).expect("BUG"))
            } else {
                CMatrix(Array::from_shape_vec(dim, arr.iter().cloned().collect()).expect("BUG"))
            }
        }
    }

    impl<'a, A: Clone, S> From<&'a ArrayBase<S, Ix2>> for CMatrix<A>
    where S: Data<Elem = A>,
    {
        fn from(arr: &'a ArrayBase<S, Ix2>) -> Self {
            arr.view().into()
        }
    }

    #[test]
    fn test_into_c_matrix() {
        let check = |arr: Array2<i32>, expected: &[i32]| {
            let c_mat_ref = CMatrix::from(&arr);
            let c_mat_view = CMatrix::from(arr.view());
            let c_mat_own = CMatrix::from(arr);
            assert_eq!(c_mat_ref.c_order_data(), expected);
            assert_eq!(c_mat_view.c_order_data(), expected);
            assert_eq!(c_mat_own.c_order_data(), expected);
        };

        use ndarray::ShapeBuilder;

        // exercise the standard layout code paths
        let arr = Array::from_shape_vec((2, 3), vec![00, 01, 02, 10, 11, 12]).unwrap();
        assert!(arr.is_standard_layout());
        check(arr, &[00, 01, 02, 10, 11, 12]);

        // a transposed view of a design matrix is the common non-standard case
        let arr = Array::from_shape_vec((2, 3).f(), vec![00, 10, 01, 11, 02, 12]).unwrap();
        assert!(!arr.is_standard_layout());
        assert!(arr.as_slice().is_none());
        check(arr, &[00, 01, 02, 10, 11, 12]);

        // non-standard layout, non-contiguous
        let mut arr = Array::from_shape_vec((2, 4), vec![03, 00, 01, 02, 13, 10, 11, 12]).unwrap();
        arr.slice_axis_inplace(Axis(1), (1..).into());
        check(arr, &[00, 01, 02, 10, 11, 12]);
    }

    #[test]
    fn test_column() {
        let v = ndarray::arr1(&[1.0, 2.0, 3.0]);
        let col = CMatrix::column(v.view());
        assert_eq!(col.dim(), (3, 1));
        assert_eq!(col.stride(), 1);
        assert_eq!(col.c_order_data(), &[1.0, 2.0, 3.0]);
    }
}

/// Maximum absolute column sum.
fn one_norm<S: Data<Elem = f64>>(mat: &ArrayBase<S, Ix2>) -> f64 {
    mat.map(|x| x.abs())
        .sum_axis(Axis(0))
        .fold(0.0, |acc: f64, &x| acc.max(x))
}

/// Solves `square * output = rhs` using LAPACKe's dgesv.
///
/// After factorization, the reciprocal condition number of `square` is
/// estimated (1-norm, via dgecon) and compared against `min_rcond`.
/// A `min_rcond` of zero skips the estimate.
pub fn lapacke_linear_solve(mut square: CMatrix, mut rhs: CMatrix, min_rcond: f64) -> Result<CMatrix, NumericalError> {
    assert!(square.is_square());
    assert_eq!(square.ncols(), rhs.nrows());

    let layout = ::lapacke::Layout::RowMajor;

    let n = rhs.nrows() as i32;
    let nrhs = rhs.ncols() as i32;
    let lda = square.stride() as i32;
    let ldb = rhs.stride() as i32;

    // lapacke hates size-zero arrays.
    if square.len() == 0 || rhs.len() == 0 {
        return Ok(rhs); // trivial solution
    }

    let anorm = one_norm(&*square);
    {
        let a = square.c_order_data_mut();
        let b = rhs.c_order_data_mut();

        let mut ipiv = vec![0; n as usize];
        let ipiv = &mut ipiv;

        match unsafe { ::lapacke::dgesv(layout, n, nrhs, a, lda, ipiv, b, ldb) } {
            0 => { /* okey dokey */ },
            info if info < 0 => panic!("bad arg number {} to dgesv", -info),
            info => return Err(NumericalError::Singular { pivot: info as usize - 1 }),
        }
    } // end borrows

    if min_rcond > 0.0 {
        // `square` now holds the LU factors.
        let rcond = lu_rcond(&square, anorm);
        debug!("dgesv: n = {}, rcond = {:e}", n, rcond);
        if !(rcond >= min_rcond) {
            return Err(NumericalError::IllConditioned { rcond, min_rcond });
        }
    }

    Ok(rhs)
}

/// Reciprocal 1-norm condition number from the LU factors written by dgesv.
fn lu_rcond(lu: &CMatrix, anorm: f64) -> f64 {
    let layout = ::lapacke::Layout::RowMajor;
    let n = lu.nrows() as i32;
    let lda = lu.stride() as i32;

    let mut rcond = 0.0;
    match unsafe { ::lapacke::dgecon(layout, b'1', n, lu.c_order_data(), lda, anorm, &mut rcond) } {
        0 => rcond,
        info => panic!("bad arg number {} to dgecon", -info),
    }
}

/// Output of `lapacke_least_squares_svd`.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// `matrix.ncols() x rhs.ncols()`.
    pub solution: Array2<f64>,
    /// Effective rank of the matrix.
    pub rank: usize,
    /// In decreasing order.
    pub singular_values: Array1<f64>,
}

/// Minimizes 2-norm of `matrix * x - rhs` using LAPACKe's dgelss.
///
/// Singular values smaller than `rcond` times the largest one are treated
/// as zero when determining the effective rank. A negative `rcond` means
/// machine precision.
pub fn lapacke_least_squares_svd(mut matrix: CMatrix, rhs: CMatrix, rcond: f64) -> Result<LeastSquares, NumericalError> {
    assert_eq!(matrix.nrows(), rhs.nrows());

    let m = matrix.nrows();
    let n = matrix.ncols();
    let nrhs = rhs.ncols();

    // lapacke hates size-zero arrays.
    if matrix.len() == 0 || nrhs == 0 {
        return Ok(LeastSquares {
            solution: Array2::zeros((n, nrhs)),
            rank: 0,
            singular_values: Array1::zeros(usize::min(m, n)),
        });
    }

    // dgelss writes the solution into b, which must have room for max(m, n) rows.
    let mut rhs: CMatrix = {
        let mut padded = Array2::zeros((usize::max(m, n), nrhs));
        padded.slice_axis_mut(Axis(0), (..m).into()).assign(&*rhs);
        padded.into()
    };

    let layout = ::lapacke::Layout::RowMajor;
    let lda = matrix.stride() as i32;
    let ldb = rhs.stride() as i32;

    let mut s = vec![0f64; usize::min(m, n)];
    let mut rank = 0;
    {
        let a = matrix.c_order_data_mut();
        let b = rhs.c_order_data_mut();

        match unsafe {
            ::lapacke::dgelss(layout, m as i32, n as i32, nrhs as i32, a, lda, b, ldb, &mut s, rcond, &mut rank)
        } {
            0 => { /* okey dokey */ },
            info if info < 0 => panic!("bad arg number {} to dgelss", -info),
            info => return Err(NumericalError::SvdNoConvergence { count: info as usize }),
        }
    } // end borrows
    debug!("dgelss: {}x{}, rank = {}", m, n, rank);

    Ok(LeastSquares {
        solution: rhs.slice_axis(Axis(0), (..n).into()).to_owned(),
        rank: rank as usize,
        singular_values: Array1::from(s),
    })
}
