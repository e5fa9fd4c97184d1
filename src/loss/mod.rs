pub mod bce;
pub mod loss_kind;
pub mod mse;

pub use bce::BceLoss;
pub use loss_kind::LossKind;
pub use mse::MseLoss;
