#[macro_use] extern crate normeq_assert_close;

use ::ndarray::{arr1, arr2, Array, Array1, Array2};
use ::normeq::{Error, NumericalError, Settings, Solver, DegeneratePolicy, LinearFit};
use ::rand::Rng;

mod shared;
use self::shared::init_logging;

#[test]
fn worked_example() {
    init_logging();
    let x = arr2(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
    let y = arr1(&[2.0, 4.0, 6.0]);

    let beta = ::normeq::fit_linear_model(&x, &y).unwrap();
    assert_close!(abs=1e-9, beta.clone(), arr1(&[0.0, 2.0]));

    let r_squared = ::normeq::calculate_r_squared(&y, &arr1(&[2.0, 4.0, 6.0])).unwrap();
    assert_eq!(r_squared, 1.0);

    let fitted = ::normeq::fitted_values(&x, &beta).unwrap();
    assert_close!(abs=1e-9, ::normeq::calculate_r_squared(&y, &fitted).unwrap(), 1.0);
}

#[test]
fn recovers_known_beta_with_intercept() {
    init_logging();
    let mut rng = ::rand::thread_rng();
    let n = 40;
    let known = arr1(&[3.0, -1.25, 0.5, 2.0]);

    // first column is the intercept
    let x = Array2::from_shape_fn((n, known.len()), |(_, j)| match j {
        0 => 1.0,
        _ => 4.0 * rng.gen::<f64>() - 2.0,
    });
    let y = x.dot(&known);

    for &solver in &[Solver::Lu, Solver::Svd] {
        let settings = Settings { solver, ..Settings::default() };
        let fit = LinearFit::new(&settings, &x, &y).unwrap();
        assert_close!(abs=1e-9, fit.coefficients.clone(), known.clone());
        assert_close!(abs=1e-9, fit.r_squared, 1.0);
        assert_close!(abs=1e-9, fit.residuals.mapv(f64::abs).sum(), 0.0);
    }
}

#[test]
fn noisy_fit_scores_between_zero_and_one() {
    init_logging();
    let mut rng = ::rand::thread_rng();
    let n = 200;
    let x: Array2<f64> = Array::from_shape_fn((n, 2), |(i, j)| match j {
        0 => 1.0,
        _ => i as f64 / n as f64,
    });
    let y: Array1<f64> = x.column(1).mapv(|t| 1.0 + 3.0 * t + (rng.gen::<f64>() - 0.5));

    let fit = LinearFit::new(&Settings::default(), &x, &y).unwrap();
    assert!(0.0 < fit.r_squared && fit.r_squared < 1.0, "{}", fit.r_squared);
    assert!(fit.adjusted_r_squared().unwrap() < fit.r_squared);

    // OLS residuals are orthogonal to every column of X
    let xt_resid = x.t().dot(&fit.residuals);
    assert_close!(abs=1e-9, xt_resid, arr1(&[0.0, 0.0]));
}

#[test]
fn null_model_scores_zero() {
    let y = arr1(&[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);
    let fitted = Array1::from_elem(y.len(), y.mean().unwrap());
    assert_eq!(::normeq::calculate_r_squared(&y, &fitted).unwrap(), 0.0);
}

#[test]
fn degenerate_response() {
    init_logging();
    let y = arr1(&[2.5; 4]);
    let fitted = arr1(&[2.5, 2.5, 2.5, 3.0]);
    assert!(matches!(::normeq::calculate_r_squared(&y, &fitted), Err(Error::DegenerateInput(_))));

    let permissive = Settings { degenerate: DegeneratePolicy::Permissive, ..Settings::default() };
    let r2 = ::normeq::calculate_r_squared_with(&permissive, &y, &fitted).unwrap();
    assert_eq!(r2, f64::NEG_INFINITY);
}

#[test]
fn constant_response_is_detected_exactly() {
    init_logging();
    let permissive = Settings { degenerate: DegeneratePolicy::Permissive, ..Settings::default() };

    // the mean of [0.1; 3] is not exactly 0.1
    let y = arr1(&[0.1, 0.1, 0.1]);
    let fitted = arr1(&[0.1, 0.1, 0.101]);
    assert!(matches!(::normeq::calculate_r_squared(&y, &fitted), Err(Error::DegenerateInput(_))));
    assert!(matches!(::normeq::calculate_r_squared(&y, &y), Err(Error::DegenerateInput(_))));
    assert_eq!(::normeq::calculate_r_squared_with(&permissive, &y, &fitted).unwrap(), f64::NEG_INFINITY);
    assert!(::normeq::calculate_r_squared_with(&permissive, &y, &y).unwrap().is_nan());

    // the sum overflows while computing the mean
    let y = arr1(&[1e308, 1e308]);
    assert!(matches!(::normeq::calculate_r_squared(&y, &y), Err(Error::DegenerateInput(_))));
    assert!(::normeq::calculate_r_squared_with(&permissive, &y, &y).unwrap().is_nan());
}

#[test]
fn rank_deficient_design() {
    init_logging();
    let x = arr2(&[[1.0, 2.0, 2.0], [1.0, 3.0, 3.0], [1.0, 5.0, 5.0], [1.0, 7.0, 7.0]]);
    let y = arr1(&[1.0, 2.0, 3.0, 4.0]);

    for &solver in &[Solver::Lu, Solver::Svd] {
        let settings = Settings { solver, ..Settings::default() };
        match ::normeq::fit_linear_model_with(&settings, &x, &y) {
            Err(Error::Numerical(e)) => {
                // message is meant for humans; just make sure it renders
                assert!(!e.to_string().is_empty());
            },
            other => panic!("{:?}: expected a numerical error, got {:?}", solver, other),
        }
    }
}

#[test]
fn numerical_error_converts() {
    let err: Error = NumericalError::Singular { pivot: 0 }.into();
    assert!(matches!(err, Error::Numerical(NumericalError::Singular { pivot: 0 })));
}

#[test]
fn shape_mismatch() {
    let x = arr2(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
    let y = arr1(&[2.0, 4.0]);
    assert!(matches!(::normeq::fit_linear_model(&x, &y), Err(Error::ShapeMismatch { expected: 3, actual: 2, .. })));
    assert!(matches!(::normeq::calculate_r_squared(&arr1(&[1.0, 2.0, 3.0]), &y), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn invalid_settings_are_rejected() {
    let x = arr2(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
    let y = arr1(&[2.0, 4.0, 6.0]);
    let settings = Settings { min_rcond: f64::INFINITY, ..Settings::default() };
    assert!(matches!(::normeq::fit_linear_model_with(&settings, &x, &y), Err(Error::InvalidSettings(_))));
    assert!(matches!(::normeq::calculate_r_squared_with(&settings, &y, &y), Err(Error::InvalidSettings(_))));

    // not a reciprocal condition number
    let settings = Settings { min_rcond: 1.5, ..Settings::default() };
    assert!(matches!(::normeq::fit_linear_model_with(&settings, &x, &y), Err(Error::InvalidSettings(_))));
}

#[test]
fn parallel_calls() {
    let handles: Vec<_> = (1..=4).map(|k| ::std::thread::spawn(move || {
        let slope = k as f64;
        let data: Vec<_> = (0..10).map(|i| (i as f64, 1.0 + slope * i as f64)).collect();
        ::normeq::polyfit(&Settings::default(), 1, &data).unwrap()
    })).collect();

    for (k, handle) in (1..=4).zip(handles) {
        let coeffs = handle.join().unwrap();
        assert_close!(abs=1e-9, coeffs, arr1(&[1.0, k as f64]));
    }
}

#[test]
fn version() {
    let info = ::normeq::version::get();
    assert_eq!(info.name, "normeq");
    assert!(!info.version.is_empty());
}
