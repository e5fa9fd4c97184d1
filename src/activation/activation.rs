use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::functions::{DELU_A, DELU_B, DELU_XC};
use crate::math::{Matrix, Scalar};

/// Alpha used by the `Elu` variant; fixed at dispatch time.
const ELU_ALPHA: f64 = 0.5;

/// The nonlinearity applied after a layer's affine transform.
///
/// Forward evaluation, derivative and weight-initialization mode are all
/// selected from this one enum, so a missing case is a compile error rather
/// than a runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    ReLU,
    Sigmoid,
    Softplus,
    Delu,
    Elu,
    Tanh,
    Selu,
    LeakyReLU,
    Mish,
    Linear,
}

/// Standard-deviation formula used to randomly initialize layer weights,
/// derived from the layer's activation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitMode {
    He,
    Xavier,
    Lecun,
}

impl InitMode {
    pub fn for_activation(act: Activation) -> InitMode {
        match act {
            Activation::ReLU | Activation::LeakyReLU => InitMode::He,
            Activation::Sigmoid | Activation::Tanh => InitMode::Xavier,
            Activation::Selu => InitMode::Lecun,
            _ => InitMode::Xavier,
        }
    }

    /// Standard deviation of the zero-mean normal the weights are drawn
    /// from, as a function of the layer fan.
    pub fn std_dev(self, in_nodes: usize, out_nodes: usize) -> f64 {
        match self {
            InitMode::He => (2.0 / in_nodes as f64).sqrt(),
            InitMode::Xavier => (2.0 / (in_nodes + out_nodes) as f64).sqrt(),
            InitMode::Lecun => (1.0 / in_nodes as f64).sqrt(),
        }
    }
}

impl Activation {
    /// Evaluates the activation elementwise on a pre-activation matrix.
    pub fn apply<T: Scalar>(self, z: &Matrix<T>) -> Result<Matrix<T>> {
        match self {
            Activation::Tanh => Ok(z.tanh()),
            Activation::ReLU => Ok(z.relu()),
            Activation::Sigmoid => Ok(z.sigmoid()),
            Activation::Softplus => Ok(z.softplus()),
            Activation::Elu => z.elu(T::from_f64(ELU_ALPHA)),
            Activation::Delu => z.delu(DELU_A, DELU_B, DELU_XC),
            Activation::Mish => Ok(z.mish()),
            Activation::Linear => Ok(z.linear()),
            // No dedicated kernels yet; these evaluate tanh, matching the
            // reference dispatch.
            Activation::Selu | Activation::LeakyReLU => Ok(z.tanh()),
        }
    }

    /// Elementwise derivative, evaluated against the caches a layer stores
    /// during its forward pass: `z` is the pre-activation, `a` the
    /// post-activation output.
    pub fn derivative<T: Scalar>(self, z: &Matrix<T>, a: &Matrix<T>) -> Result<Matrix<T>> {
        match self {
            Activation::Linear => {
                let mut ones = Matrix::with_stride(a.rows(), a.cols(), a.stride())?;
                ones.fill(T::one());
                Ok(ones)
            }
            // A-based: 1 - A^2
            Activation::Tanh => {
                let mut ones = Matrix::with_stride(a.rows(), a.cols(), a.stride())?;
                ones.fill(T::one());
                ones.sub(&a.hadamard(a)?)
            }
            // A-based: A (1 - A)
            Activation::Sigmoid => {
                let mut ones = Matrix::with_stride(a.rows(), a.cols(), a.stride())?;
                ones.fill(T::one());
                a.hadamard(&ones.sub(a)?)
            }
            // Z-based
            Activation::ReLU => {
                Ok(z.map(|x| if x > T::zero() { T::one() } else { T::zero() }))
            }
            // Z-based
            Activation::Elu => {
                let alpha = T::from_f64(ELU_ALPHA);
                Ok(z.map(|x| if x > T::zero() { T::one() } else { alpha * x.exp() }))
            }
            // Z-based
            Activation::Softplus => Ok(z.sigmoid()),
            Activation::Mish
            | Activation::Delu
            | Activation::Selu
            | Activation::LeakyReLU => Err(Error::Unsupported(format!(
                "derivative of {self:?} is not implemented"
            ))),
        }
    }

    /// Initialization mode paired with this activation.
    pub fn init_mode(self) -> InitMode {
        InitMode::for_activation(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn init_mode_is_derived_from_activation() {
        assert_eq!(Activation::ReLU.init_mode(), InitMode::He);
        assert_eq!(Activation::LeakyReLU.init_mode(), InitMode::He);
        assert_eq!(Activation::Sigmoid.init_mode(), InitMode::Xavier);
        assert_eq!(Activation::Tanh.init_mode(), InitMode::Xavier);
        assert_eq!(Activation::Selu.init_mode(), InitMode::Lecun);
        assert_eq!(Activation::Mish.init_mode(), InitMode::Xavier);
        assert_eq!(Activation::Linear.init_mode(), InitMode::Xavier);
    }

    #[test]
    fn init_std_dev_formulas() {
        assert_abs_diff_eq!(InitMode::He.std_dev(8, 4), (2.0f64 / 8.0).sqrt());
        assert_abs_diff_eq!(InitMode::Xavier.std_dev(8, 4), (2.0f64 / 12.0).sqrt());
        assert_abs_diff_eq!(InitMode::Lecun.std_dev(8, 4), (1.0f64 / 8.0).sqrt());
    }

    #[test]
    fn selu_and_leaky_relu_forward_evaluate_tanh() {
        let z = Matrix::from_rows(vec![vec![-1.0, 0.0, 2.0]]).unwrap();
        let reference = z.tanh();
        for act in [Activation::Selu, Activation::LeakyReLU] {
            let a = act.apply(&z).unwrap();
            for c in 0..3 {
                assert_eq!(a.at(0, c).unwrap(), reference.at(0, c).unwrap());
            }
        }
    }

    #[test]
    fn unimplemented_derivatives_fail_explicitly() {
        let z = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        let a = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        for act in [
            Activation::Mish,
            Activation::Delu,
            Activation::Selu,
            Activation::LeakyReLU,
        ] {
            assert!(matches!(
                act.derivative(&z, &a),
                Err(Error::Unsupported(_))
            ));
        }
    }

    #[test]
    fn derivative_formulas_match_hand_computed_values() {
        let z = Matrix::from_rows(vec![vec![-1.0, 0.5]]).unwrap();
        let a = Activation::Sigmoid.apply(&z).unwrap();
        let d = Activation::Sigmoid.derivative(&z, &a).unwrap();
        for c in 0..2 {
            let s = a.at(0, c).unwrap();
            assert_abs_diff_eq!(d.at(0, c).unwrap(), s * (1.0 - s), epsilon = 1e-12);
        }

        let a = Activation::Tanh.apply(&z).unwrap();
        let d = Activation::Tanh.derivative(&z, &a).unwrap();
        for c in 0..2 {
            let t = a.at(0, c).unwrap();
            assert_abs_diff_eq!(d.at(0, c).unwrap(), 1.0 - t * t, epsilon = 1e-12);
        }

        let a = Activation::ReLU.apply(&z).unwrap();
        let d = Activation::ReLU.derivative(&z, &a).unwrap();
        assert_eq!(d.at(0, 0).unwrap(), 0.0);
        assert_eq!(d.at(0, 1).unwrap(), 1.0);

        let a = Activation::Elu.apply(&z).unwrap();
        let d = Activation::Elu.derivative(&z, &a).unwrap();
        assert_abs_diff_eq!(d.at(0, 0).unwrap(), 0.5 * f64::exp(-1.0), epsilon = 1e-12);
        assert_eq!(d.at(0, 1).unwrap(), 1.0);

        // Softplus derivative is the sigmoid of Z.
        let a = Activation::Softplus.apply(&z).unwrap();
        let d = Activation::Softplus.derivative(&z, &a).unwrap();
        assert_abs_diff_eq!(
            d.at(0, 1).unwrap(),
            1.0 / (1.0 + f64::exp(-0.5)),
            epsilon = 1e-12
        );
    }
}
