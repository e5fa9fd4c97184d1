use crate::error::Result;
use crate::math::functions::CLIP_EPSILON;
use crate::math::{Matrix, Scalar};

/// Binary cross-entropy in matrix form.
///
/// Predictions are clipped into `[1e-7, 1 - 1e-7]` before any log is taken.
pub struct BceLoss;

impl BceLoss {
    /// Scalar loss: -mean(Y ln(p) + (1 - Y) ln(1 - p)) with p = clip(Yhat).
    pub fn loss<T: Scalar>(y: &Matrix<T>, yhat: &Matrix<T>) -> Result<T> {
        let e = T::from_f64(std::f64::consts::E);
        let p = yhat.clip(T::from_f64(CLIP_EPSILON));

        let part1 = y.hadamard(&p.log(e))?;

        let mut ones_y = y.clone();
        ones_y.fill(T::one());
        let mut ones_p = p.clone();
        ones_p.fill(T::one());

        let part2 = ones_y.sub(y)?.hadamard(&ones_p.sub(&p)?.log(e))?;

        Ok(-(part1.add(&part2)?.mean()))
    }

    /// Output-layer gradient: -Y/p + (1 - Y)/(1 - p) with p = clip(Yhat).
    ///
    /// The training path for a Sigmoid output layer bypasses this in favor
    /// of the fused `A - Y` shortcut.
    pub fn output_gradient<T: Scalar>(y: &Matrix<T>, yhat: &Matrix<T>) -> Result<Matrix<T>> {
        let p = yhat.clip(T::from_f64(CLIP_EPSILON));

        let mut ones_y = y.clone();
        ones_y.fill(T::one());
        let mut ones_p = p.clone();
        ones_p.fill(T::one());

        let term1 = y.scalar_mul(-T::one()).divide(&p)?;
        let term2 = ones_y.sub(y)?.divide(&ones_p.sub(&p)?)?;

        term1.add(&term2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn perfect_predictions_have_near_zero_loss() {
        let y = Matrix::from_rows(vec![vec![0.0, 1.0, 1.0, 0.0]]).unwrap();
        let loss = BceLoss::loss(&y, &y).unwrap();
        // Clipping keeps the loss finite but tiny.
        assert!(loss >= 0.0);
        assert!(loss < 1e-5);
    }

    #[test]
    fn loss_matches_hand_computed_value() {
        let y = Matrix::from_rows(vec![vec![1.0, 0.0]]).unwrap();
        let yhat = Matrix::from_rows(vec![vec![0.8, 0.3]]).unwrap();
        let expected = -((0.8f64).ln() + (0.7f64).ln()) / 2.0;
        assert_relative_eq!(
            BceLoss::loss(&y, &yhat).unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn gradient_pushes_probabilities_toward_targets() {
        let y = Matrix::from_rows(vec![vec![1.0, 0.0]]).unwrap();
        let yhat = Matrix::from_rows(vec![vec![0.8, 0.3]]).unwrap();
        let g = BceLoss::output_gradient(&y, &yhat).unwrap();
        // -1/0.8 for the positive target, 1/0.7 for the negative one.
        assert_abs_diff_eq!(g.at(0, 0).unwrap(), -1.25, epsilon = 1e-9);
        assert_abs_diff_eq!(g.at(0, 1).unwrap(), 1.0 / 0.7, epsilon = 1e-9);
    }

    #[test]
    fn extreme_predictions_stay_finite() {
        let y: Matrix<f64> = Matrix::from_rows(vec![vec![1.0, 0.0]]).unwrap();
        let yhat = Matrix::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let loss = BceLoss::loss(&y, &yhat).unwrap();
        assert!(loss.is_finite());
        let g = BceLoss::output_gradient(&y, &yhat).unwrap();
        assert!(g.at(0, 0).unwrap().is_finite());
        assert!(g.at(0, 1).unwrap().is_finite());
    }
}
