use serde::{Deserialize, Serialize};

/// Per-feature scaling strategies.
///
/// Only `ZScore` is implemented; the other two are declared for the API
/// surface and fail with an unsupported-operation error when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    ZScore,
    MinMax,
    Robust,
}
