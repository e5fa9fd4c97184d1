pub mod functions;
pub mod matrix;

pub use matrix::Matrix;

use std::fmt;

use num_traits::Float;

/// Floating-point element types the matrix backend supports.
///
/// `LANE_WIDTH` is the SIMD lane count used to round row strides up to a
/// hardware-friendly multiple (8 for `f32`, 4 for `f64` on AVX2).
pub trait Scalar: Float + fmt::Debug + fmt::Display + Default + 'static {
    const LANE_WIDTH: usize;

    fn from_f64(v: f64) -> Self;
    fn into_f64(self) -> f64;
}

impl Scalar for f32 {
    const LANE_WIDTH: usize = 8;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn into_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for f64 {
    const LANE_WIDTH: usize = 4;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn into_f64(self) -> f64 {
        self
    }
}
