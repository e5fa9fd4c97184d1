use crate::error::Result;
use crate::math::{Matrix, Scalar};

/// Mean-squared error in matrix form.
pub struct MseLoss;

impl MseLoss {
    /// Scalar loss: mean((Yhat - Y)^2).
    pub fn loss<T: Scalar>(y: &Matrix<T>, yhat: &Matrix<T>) -> Result<T> {
        let diff = yhat.sub(y)?;
        Ok(diff.hadamard(&diff)?.mean())
    }

    /// Output-layer gradient: 2 (Yhat - Y).
    ///
    /// Deliberately not divided by the batch size here; the layer's dW/db
    /// already divide by m, and dividing twice would scale by m^2.
    pub fn output_gradient<T: Scalar>(y: &Matrix<T>, yhat: &Matrix<T>) -> Result<Matrix<T>> {
        Ok(yhat.sub(y)?.scalar_mul(T::from_f64(2.0)))
    }
}
