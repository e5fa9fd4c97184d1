//! Ordered sequence of dense layers plus the full-batch training loop.

use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::DenseLayer;
use crate::loss::{BceLoss, LossKind, MseLoss};
use crate::math::{Matrix, Scalar};
use crate::network::ScalerKind;
use crate::train::epoch_stats::{save_loss_history, EpochStats};
use crate::train::TrainOptions;

/// Feed-forward network trained with full-batch gradient descent.
///
/// The network owns its layers, hyperparameters and the seeded generator
/// used for weight initialization; the caller owns the data and passes it
/// into every call. Inputs are `(features x samples)`, targets and
/// predictions `(targets x samples)`.
pub struct Network<T: Scalar> {
    layers: Vec<DenseLayer<T>>,
    loss: LossKind,
    learning_rate: f64,
    epochs: usize,
    /// Declared for the configuration surface; every training step is
    /// full-batch, no sub-batching occurs.
    batch_size: usize,
    rng: StdRng,
}

impl<T: Scalar> Network<T> {
    pub fn new(
        loss: LossKind,
        learning_rate: f64,
        epochs: usize,
        batch_size: usize,
        rng_seed: u64,
    ) -> Network<T> {
        Network {
            layers: Vec::new(),
            loss,
            learning_rate,
            epochs,
            batch_size,
            rng: StdRng::seed_from_u64(rng_seed),
        }
    }

    /// Appends a dense layer, initializing its weights from the network's
    /// generator. Fails when `in_nodes` does not chain with the previous
    /// layer's output width.
    pub fn add_dense_layer(
        &mut self,
        in_nodes: usize,
        out_nodes: usize,
        activation: Activation,
    ) -> Result<()> {
        self.add_dense_layer_with_init(in_nodes, out_nodes, activation, true)
    }

    /// Like [`Network::add_dense_layer`] but allows deferring weight
    /// initialization (the layer keeps zeroed weights until
    /// `DenseLayer::initialize` is called).
    pub fn add_dense_layer_with_init(
        &mut self,
        in_nodes: usize,
        out_nodes: usize,
        activation: Activation,
        initialize: bool,
    ) -> Result<()> {
        if let Some(last) = self.layers.last() {
            if in_nodes != last.out_nodes() {
                return Err(Error::Topology(format!(
                    "inNodes does not match outNodes of last layer ({} != {})",
                    in_nodes,
                    last.out_nodes()
                )));
            }
        }

        let layer = DenseLayer::new(in_nodes, out_nodes, activation, &mut self.rng, initialize)?;
        self.layers.push(layer);
        Ok(())
    }

    pub fn layers(&self) -> &[DenseLayer<T>] {
        &self.layers
    }

    pub fn loss_kind(&self) -> LossKind {
        self.loss
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Advisory only; training always runs full-batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Threads `x` through every layer in order; returns the last layer's
    /// output, shape `(out_nodes x samples)`.
    pub fn forward(&mut self, x: &Matrix<T>) -> Result<Matrix<T>> {
        if self.layers.is_empty() {
            return Err(Error::Topology("not enough layers in the network".into()));
        }

        if x.rows() != self.layers[0].in_nodes() {
            return Err(Error::Shape(
                "input data does not match first layer shape".into(),
            ));
        }

        let mut a = self.layers[0].forward(x)?;
        for layer in self.layers.iter_mut().skip(1) {
            a = layer.forward(&a)?;
        }

        Ok(a)
    }

    /// Scalar loss of `yhat` against `y` under the configured loss kind.
    pub fn compute_loss(&self, y: &Matrix<T>, yhat: &Matrix<T>) -> Result<T> {
        if y.rows() != yhat.rows() || y.cols() != yhat.cols() {
            return Err(Error::Shape("Y and Yhat shapes do not match".into()));
        }

        match self.loss {
            LossKind::Mse => MseLoss::loss(y, yhat),
            LossKind::Bce => BceLoss::loss(y, yhat),
        }
    }

    /// Runs the backward pass through all layers, filling each layer's
    /// gradient caches. Requires the caches of a directly preceding
    /// `forward` call over the same batch.
    pub fn backward(&mut self, y: &Matrix<T>, yhat: &Matrix<T>) -> Result<()> {
        if y.rows() != yhat.rows() || y.cols() != yhat.cols() {
            return Err(Error::Shape("Y and Yhat shapes are not matching".into()));
        }

        if self.layers.is_empty() {
            return Err(Error::Topology("layer count is zero".into()));
        }

        if y.cols() == 0 {
            return Err(Error::Shape("Y columns can't be zero".into()));
        }

        let last = self.layers.len() - 1;

        // Sigmoid + BCE: activation and loss derivatives cancel to A - Y,
        // which is both simpler and numerically safer than the generic path.
        let fused = self.loss == LossKind::Bce
            && self.layers[last].activation() == Activation::Sigmoid;

        let mut d_a = if fused {
            let d_z_last = self.layers[last].output().sub(y)?;
            self.layers[last].backward(&d_z_last, true)?
        } else {
            let d_a_last = match self.loss {
                LossKind::Mse => MseLoss::output_gradient(y, yhat)?,
                LossKind::Bce => BceLoss::output_gradient(y, yhat)?,
            };
            self.layers[last].backward(&d_a_last, false)?
        };

        for i in (0..last).rev() {
            d_a = self.layers[i].backward(&d_a, false)?;
        }

        Ok(())
    }

    /// Applies one SGD step to every layer.
    pub fn update(&mut self) -> Result<()> {
        let lr = T::from_f64(self.learning_rate);
        for layer in &mut self.layers {
            layer.update(lr)?;
        }
        Ok(())
    }

    /// Runs `epochs` full-batch steps of `forward -> backward -> update`
    /// and returns the loss after one extra post-training forward pass.
    ///
    /// `options` controls per-epoch loss logging, wall-clock timing and the
    /// JSON loss-history export.
    pub fn train(&mut self, x: &Matrix<T>, y: &Matrix<T>, options: &TrainOptions) -> Result<T> {
        let start = Instant::now();
        let mut history: Vec<EpochStats> = Vec::new();

        for epoch in 0..self.epochs {
            let yhat = self.forward(x)?;

            let log_this = options.print_loss && epoch % options.print_every.max(1) == 0;
            let record_this = options.export_loss && epoch % options.export_every.max(1) == 0;

            if log_this || record_this {
                let loss = self.compute_loss(y, &yhat)?;
                if log_this {
                    info!("epoch {epoch}: loss = {loss}");
                }
                if record_this {
                    history.push(EpochStats {
                        epoch,
                        loss: loss.into_f64(),
                        elapsed_ms: start.elapsed().as_millis() as u64,
                    });
                }
            }

            self.backward(y, &yhat)?;
            self.update()?;
        }

        if options.time_execution {
            info!("training took {} ms", start.elapsed().as_millis());
        }

        if options.export_loss {
            if let Some(path) = &options.export_path {
                save_loss_history(path, &history)?;
            }
        }

        let yhat = self.forward(x)?;
        self.compute_loss(y, &yhat)
    }

    /// Deterministic, order-preserving split along the sample axis.
    ///
    /// Training columns are `[0, floor(f N))`; test columns start at
    /// `floor(f N) + 1`, so one boundary sample is dropped (kept for parity
    /// with the reference behavior, likely an off-by-one).
    #[allow(clippy::type_complexity)]
    pub fn train_test_split(
        x: &Matrix<T>,
        y: &Matrix<T>,
        train_fraction: f32,
    ) -> Result<(Matrix<T>, Matrix<T>, Matrix<T>, Matrix<T>)> {
        if x.cols() != y.cols() {
            return Err(Error::Shape(
                "X and Y must have the same number of samples".into(),
            ));
        }

        let n = x.cols();
        let end_train = (train_fraction * n as f32).floor() as usize;
        let start_test = end_train + 1;
        let test_cols = n.saturating_sub(start_test);

        let mut x_train = Matrix::new(x.rows(), end_train)?;
        let mut y_train = Matrix::new(y.rows(), end_train)?;
        let mut x_test = Matrix::new(x.rows(), test_cols)?;
        let mut y_test = Matrix::new(y.rows(), test_cols)?;

        for i in 0..end_train {
            for j in 0..x.rows() {
                x_train.set(j, i, x.at(j, i)?)?;
            }
            for j in 0..y.rows() {
                y_train.set(j, i, y.at(j, i)?)?;
            }
        }

        for i in start_test..n {
            for j in 0..x.rows() {
                x_test.set(j, i - start_test, x.at(j, i)?)?;
            }
            for j in 0..y.rows() {
                y_test.set(j, i - start_test, y.at(j, i)?)?;
            }
        }

        Ok((x_train, y_train, x_test, y_test))
    }

    /// Scales one feature row of `x` in place. Only z-score scaling is
    /// implemented; min-max and robust fail as unsupported.
    pub fn scale_feature_inplace(
        feature_index: usize,
        x: &mut Matrix<T>,
        scaler: ScalerKind,
    ) -> Result<()> {
        if feature_index >= x.rows() {
            return Err(Error::Shape("feature index out of bounds".into()));
        }

        match scaler {
            ScalerKind::MinMax => Err(Error::Unsupported("min-max scaler is not implemented".into())),
            ScalerKind::Robust => Err(Error::Unsupported("robust scaler is not implemented".into())),
            ScalerKind::ZScore => {
                let mean = x.mean_of_row(feature_index)?;
                let std_dev = x.std_dev_of_row(feature_index)?;

                for i in 0..x.cols() {
                    let v = x.at(feature_index, i)?;
                    x.set(feature_index, i, (v - mean) / std_dev)?;
                }
                Ok(())
            }
        }
    }
}
