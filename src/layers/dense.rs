//! Fully-connected layer: affine transform plus elementwise activation.
//!
//! Data is feature-major: a batch of `m` samples with `n` features is an
//! `n x m` matrix. One training step cycles `forward -> backward -> update`;
//! `backward` is only valid against the caches populated by the immediately
//! preceding `forward` call on the same batch.

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::activation::{Activation, InitMode};
use crate::error::{Error, Result};
use crate::math::{Matrix, Scalar};

#[derive(Debug)]
pub struct DenseLayer<T: Scalar> {
    in_nodes: usize,
    out_nodes: usize,
    activation: Activation,
    init_mode: InitMode,

    /// Weights, shape (out_nodes x in_nodes).
    w: Matrix<T>,
    /// Biases, shape (out_nodes x 1).
    b: Matrix<T>,
    /// Pre-activation cache, shape (out_nodes x m); Z = W Aprev + b.
    z: Matrix<T>,
    /// Post-activation cache, shape (out_nodes x m); A = activation(Z).
    a: Matrix<T>,
    /// Input cache, shape (in_nodes x m).
    a_prev: Matrix<T>,
    /// Gradient caches filled by `backward`, consumed by `update`.
    dz: Matrix<T>,
    dw: Matrix<T>,
    db: Matrix<T>,
}

impl<T: Scalar> DenseLayer<T> {
    /// Creates a layer with zeroed parameters and, unless deferred, draws
    /// the initial weights from the network's generator.
    pub fn new(
        in_nodes: usize,
        out_nodes: usize,
        activation: Activation,
        rng: &mut StdRng,
        initialize: bool,
    ) -> Result<DenseLayer<T>> {
        let mut layer = DenseLayer {
            in_nodes,
            out_nodes,
            activation,
            init_mode: activation.init_mode(),
            w: Matrix::new(out_nodes, in_nodes)?,
            b: Matrix::new(out_nodes, 1)?,
            z: Matrix::default(),
            a: Matrix::default(),
            a_prev: Matrix::default(),
            dz: Matrix::default(),
            dw: Matrix::new(out_nodes, in_nodes)?,
            db: Matrix::new(out_nodes, 1)?,
        };

        if initialize {
            layer.initialize(rng)?;
        }

        Ok(layer)
    }

    /// Fills the weights from a zero-mean normal whose standard deviation is
    /// selected by the initialization mode; zero-fills the bias.
    pub fn initialize(&mut self, rng: &mut StdRng) -> Result<()> {
        let sigma = self.init_mode.std_dev(self.in_nodes, self.out_nodes);
        let norm = Normal::new(0.0, sigma)
            .map_err(|e| Error::Domain(format!("invalid init distribution: {e}")))?;

        self.w = self.w.map(|_| T::from_f64(norm.sample(rng)));
        self.b.fill(T::zero());
        Ok(())
    }

    /// Computes `Z = W Aprev + b` and `A = activation(Z)`, caching `Aprev`,
    /// `Z` and `A` for the following backward pass. Returns `A`.
    pub fn forward(&mut self, a_prev: &Matrix<T>) -> Result<Matrix<T>> {
        if a_prev.rows() != self.in_nodes {
            return Err(Error::Shape(format!(
                "Aprev has an unexpected amount of features ({} != {})",
                a_prev.rows(),
                self.in_nodes
            )));
        }

        if self.w.rows() != self.out_nodes || self.w.cols() != self.in_nodes {
            return Err(Error::Shape("W has an unexpected shape".into()));
        }

        if self.b.rows() != self.out_nodes || self.b.cols() != 1 {
            return Err(Error::Shape("b has an unexpected shape".into()));
        }

        self.z = self.w.mat_mul(a_prev)?.add_bias(&self.b)?;
        self.a_prev = a_prev.clone();
        self.a = self.activation.apply(&self.z)?;

        Ok(self.a.clone())
    }

    /// Consumes the loss gradient `dA` flowing in from the next layer and
    /// returns the gradient to propagate to the previous one (`W^T dZ`).
    /// Fills the `dW`/`db` caches, both divided by the batch size.
    ///
    /// With `treat_input_as_dz` the input is used directly as `dZ` — the
    /// closed-form shortcut for Sigmoid paired with binary cross-entropy,
    /// where the two derivatives cancel to `A - Y`.
    pub fn backward(&mut self, d_a: &Matrix<T>, treat_input_as_dz: bool) -> Result<Matrix<T>> {
        if d_a.rows() != self.out_nodes {
            return Err(Error::Shape(
                "dA shape is not matching features of the layer".into(),
            ));
        }

        if self.a_prev.rows() != self.in_nodes {
            return Err(Error::Shape(
                "Aprev shape is not matching features of the input layer".into(),
            ));
        }

        if self.a_prev.cols() == 0 || self.a_prev.cols() != self.z.cols() {
            return Err(Error::Shape(
                "Aprev columns are 0 or shape is not matching Z".into(),
            ));
        }

        if d_a.cols() != self.z.cols() {
            return Err(Error::Shape(
                "dA upstream does not match the Z batch size".into(),
            ));
        }

        let m = T::from_f64(self.a_prev.cols() as f64);

        self.dz = if treat_input_as_dz {
            d_a.clone()
        } else {
            d_a.hadamard(&self.activation.derivative(&self.z, &self.a)?)?
        };

        self.dw = self.dz.mat_mul(&self.a_prev.transpose())?.divide_scalar(m)?;
        self.db = self.dz.sum_over_columns().divide_scalar(m)?;

        self.w.transpose().mat_mul(&self.dz)
    }

    /// SGD step: `W -= lr dW`, `b -= lr db`.
    pub fn update(&mut self, lr: T) -> Result<()> {
        self.w = self.w.sub(&self.dw.scalar_mul(lr))?;
        self.b = self.b.sub(&self.db.scalar_mul(lr))?;
        Ok(())
    }

    pub fn in_nodes(&self) -> usize {
        self.in_nodes
    }

    pub fn out_nodes(&self) -> usize {
        self.out_nodes
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Post-activation output cached by the last `forward` call.
    pub fn output(&self) -> &Matrix<T> {
        &self.a
    }

    pub fn weights(&self) -> &Matrix<T> {
        &self.w
    }

    pub fn bias(&self) -> &Matrix<T> {
        &self.b
    }
}
