use serde::{Deserialize, Serialize};

/// Selects the scalar objective the training loop minimizes.
///
/// - `Mse` — mean-squared error; pair with a Linear output layer (regression).
/// - `Bce` — binary cross-entropy; pair with a Sigmoid output layer (binary
///   classification). The backward pass then uses the fused `A - Y` gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    Mse,
    Bce,
}
