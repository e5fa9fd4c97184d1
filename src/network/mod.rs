pub mod network;
pub mod scaler;

pub use network::Network;
pub use scaler::ScalerKind;
