//! A from-scratch feed-forward neural network trainer.
//!
//! The crate is built around three tightly coupled pieces: a stride-padded
//! dense [`Matrix`], a fully-connected [`DenseLayer`] implementing forward
//! and backward propagation, and a [`Network`] container that chains layers
//! and drives full-batch gradient-descent training. Data is feature-major:
//! inputs are `(features x samples)`, targets `(targets x samples)`.
//!
//! ```no_run
//! use anvil_nn::{Activation, LossKind, Matrix, Network, TrainOptions};
//!
//! fn main() -> anvil_nn::Result<()> {
//!     let x = Matrix::from_rows(vec![
//!         vec![0.0, 0.0, 1.0, 1.0],
//!         vec![0.0, 1.0, 0.0, 1.0],
//!     ])?;
//!     let y = Matrix::from_rows(vec![vec![0.0, 1.0, 1.0, 0.0]])?;
//!
//!     let mut net = Network::<f64>::new(LossKind::Bce, 0.1, 5000, 4, 42);
//!     net.add_dense_layer(2, 8, Activation::ReLU)?;
//!     net.add_dense_layer(8, 1, Activation::Sigmoid)?;
//!
//!     let final_loss = net.train(&x, &y, &TrainOptions::verbose(500))?;
//!     println!("final loss: {final_loss}");
//!     Ok(())
//! }
//! ```

pub mod activation;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::{Activation, InitMode};
pub use error::{Error, Result};
pub use layers::DenseLayer;
pub use loss::{BceLoss, LossKind, MseLoss};
pub use math::{Matrix, Scalar};
pub use network::{Network, ScalerKind};
pub use train::{EpochStats, TrainOptions};
