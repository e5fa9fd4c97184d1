//! Scalar elementwise kernels.
//!
//! Every activation and stability kernel operates on one scalar and is lifted
//! onto matrices through [`Matrix::map`](crate::math::Matrix::map); there is
//! no per-activation specialized loop anywhere in the crate.

use crate::error::{Error, Result};
use crate::math::Scalar;

/// Clip bound used before taking logs of probabilities.
pub const CLIP_EPSILON: f64 = 1e-7;

/// Default `delu` hyperparameters.
pub const DELU_A: i32 = 1;
pub const DELU_B: i32 = 2;
pub const DELU_XC: f64 = 1.25643;

/// Logarithm of `num` with an arbitrary `base`, via the base-change rule.
pub fn log<T: Scalar>(base: T, num: T) -> T {
    num.ln() / base.ln()
}

/// tanh(x) = (e^x - e^-x) / (e^x + e^-x)
pub fn tanh<T: Scalar>(num: T) -> T {
    (num.exp() - (-num).exp()) / (num.exp() + (-num).exp())
}

/// Logistic sigmoid: 1 / (1 + e^-x)
pub fn sigmoid<T: Scalar>(num: T) -> T {
    T::one() / (T::one() + (-num).exp())
}

pub fn relu<T: Scalar>(num: T) -> T {
    num.max(T::zero())
}

/// softplus(x) = ln(1 + e^x), expressed through the generic `log` with base e.
pub fn softplus<T: Scalar>(num: T) -> T {
    log(T::from_f64(std::f64::consts::E), T::one() + num.exp())
}

/// mish(x) = x * tanh(softplus(x))
pub fn mish<T: Scalar>(num: T) -> T {
    num * tanh(softplus(num))
}

/// Identity; output-layer activation for regression.
pub fn linear<T: Scalar>(num: T) -> T {
    num
}

pub(crate) fn elu_raw<T: Scalar>(num: T, alpha: T) -> T {
    if num > T::zero() {
        num
    } else {
        alpha * (num.exp() - T::one())
    }
}

/// elu(x) = x if x > 0, else alpha * (e^x - 1). Fails for negative alpha.
pub fn elu<T: Scalar>(num: T, alpha: T) -> Result<T> {
    if alpha < T::zero() {
        return Err(Error::Domain(
            "invalid hyperparameter alpha for elu, has to be non-negative".into(),
        ));
    }

    Ok(elu_raw(num, alpha))
}

pub(crate) fn delu_raw<T: Scalar>(num: T, a: i32, b: i32, xc: f64) -> T {
    if num > T::from_f64(xc) {
        num
    } else {
        ((T::from_f64(f64::from(a)) * num).exp() - T::one()) / T::from_f64(f64::from(b))
    }
}

/// delu(x) = x if x > xc, else (e^(a*x) - 1) / b. Fails for b == 0.
///
/// See <https://en.wikipedia.org/wiki/Rectified_linear_unit#DELU>.
pub fn delu<T: Scalar>(num: T, a: i32, b: i32, xc: f64) -> Result<T> {
    if b == 0 {
        return Err(Error::Domain(
            "invalid hyperparameter b for delu, has to be unequal to 0".into(),
        ));
    }

    Ok(delu_raw(num, a, b, xc))
}

/// Confines `num` to `[epsilon, 1 - epsilon]`; identity within that range.
pub fn clip<T: Scalar>(num: T, epsilon: T) -> T {
    num.max(epsilon).min(T::one() - epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn log_base_change() {
        let e = std::f64::consts::E;
        assert_abs_diff_eq!(log(e, 1.0), 0.0, epsilon = 1e-15);
        assert_relative_eq!(log(e, e.powi(3)), 3.0, epsilon = 1e-12);
        assert_relative_eq!(log(10.0, 100.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(log(10.0f32, 1000.0f32), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn tanh_is_odd_and_matches_std() {
        for x in [-3.0, -1.0, -0.1, 0.0, 0.1, 1.0, 3.0] {
            assert_relative_eq!(tanh(x), f64::tanh(x), epsilon = 1e-12);
            assert_abs_diff_eq!(tanh(-x), -tanh(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn sigmoid_symmetry() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        for x in [0.1, 0.5, 1.0, 2.0] {
            assert_abs_diff_eq!(sigmoid(-x), 1.0 - sigmoid(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn relu_piecewise() {
        assert_eq!(relu(-3.5), 0.0);
        assert_eq!(relu(0.0), 0.0);
        assert_eq!(relu(2.25), 2.25);
        assert_eq!(relu(-1.0f32), 0.0f32);
    }

    #[test]
    fn softplus_matches_reference() {
        for x in [-20.0, -5.0, -1.0, 0.0, 1.0, 5.0, 20.0] {
            assert_relative_eq!(softplus(x), f64::exp(x).ln_1p(), epsilon = 1e-9);
        }
    }

    #[test]
    fn mish_matches_reference_formula() {
        for x in [-10.0, -3.0, 0.0, 0.5, 2.0, 6.0] {
            let reference = x * f64::tanh(f64::exp(x).ln_1p());
            assert_relative_eq!(mish(x), reference, epsilon = 1e-9);
        }
    }

    #[test]
    fn elu_rejects_negative_alpha() {
        assert!(elu(1.0, -0.1).is_err());
        assert_eq!(elu(2.0, 0.5).unwrap(), 2.0);
        assert_abs_diff_eq!(
            elu(-1.0, 0.5).unwrap(),
            0.5 * (f64::exp(-1.0) - 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn delu_rejects_zero_b() {
        assert!(delu(1.0, DELU_A, 0, DELU_XC).is_err());
        // Above the crossover the function is the identity.
        assert_eq!(delu(2.0, DELU_A, DELU_B, DELU_XC).unwrap(), 2.0);
        assert_abs_diff_eq!(
            delu(-1.0, DELU_A, DELU_B, DELU_XC).unwrap(),
            (f64::exp(-1.0) - 1.0) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn clip_confines_to_unit_interval() {
        let eps = CLIP_EPSILON;
        assert_eq!(clip(-5.0, eps), eps);
        assert_eq!(clip(7.0, eps), 1.0 - eps);
        assert_eq!(clip(0.3, eps), 0.3);
    }
}
