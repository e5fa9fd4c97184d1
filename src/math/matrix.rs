//! Dense 2-D matrix with a padded row stride.
//!
//! Storage is one flat buffer of `rows * stride` elements where
//! `stride >= cols`; logical element `(r, c)` lives at offset
//! `r * stride + c`. The padding columns `[cols, stride)` are allocated but
//! never read through the logical API. All offset arithmetic is centralized
//! in the private `idx` accessor.

use std::fmt;

use crate::error::{Error, Result};
use crate::math::{functions, Scalar};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<T: Scalar> Matrix<T> {
    /// Allocates a zero-initialized `rows x cols` matrix. The stride is
    /// rounded up to a SIMD-friendly multiple of the element type's lane
    /// width.
    ///
    /// Fails if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix<T>> {
        Matrix::with_stride(rows, cols, 0)
    }

    /// Like [`Matrix::new`] but with an explicit stride. A stride of `0`
    /// means "auto"; an explicit stride must be `>= cols`.
    pub fn with_stride(rows: usize, cols: usize, stride: usize) -> Result<Matrix<T>> {
        if rows == 0 || cols == 0 {
            return Err(Error::Shape(
                "invalid rows and columns provided, one of them is 0".into(),
            ));
        }

        if stride != 0 && stride < cols {
            return Err(Error::Shape(format!(
                "stride must be bigger or equal to columns ({stride} < {cols})"
            )));
        }

        Ok(Matrix::alloc(rows, cols, stride))
    }

    /// Builds a matrix from row vectors. All rows must have the same
    /// non-zero length; the stride is auto-computed.
    pub fn from_rows(rows_data: Vec<Vec<T>>) -> Result<Matrix<T>> {
        let rows = rows_data.len();
        let cols = rows_data.first().map_or(0, Vec::len);
        let mut res = Matrix::new(rows, cols)?;

        for (r, row) in rows_data.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::Shape(format!(
                    "row {r} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                res.data[r * res.stride + c] = value;
            }
        }

        Ok(res)
    }

    /// Internal constructor; callers have already validated the shape.
    fn alloc(rows: usize, cols: usize, stride: usize) -> Matrix<T> {
        let stride = if stride == 0 {
            let w = T::LANE_WIDTH;
            ((cols + w - 1) / w) * w
        } else {
            stride
        };

        Matrix {
            data: vec![T::zero(); rows * stride],
            rows,
            cols,
            stride,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `rows * stride`, the physical buffer length.
    pub fn buffer_size(&self) -> usize {
        self.rows * self.stride
    }

    /// `rows * cols`, the logical element count.
    pub fn element_count(&self) -> usize {
        self.rows * self.cols
    }

    /// The backing buffer including padding columns.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// True for the default-constructed `0x0` placeholder.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The single place that maps a logical index to a buffer offset.
    fn idx(&self, r: usize, c: usize) -> usize {
        r * self.stride + c
    }

    fn check_bounds(&self, r: usize, c: usize) -> Result<()> {
        if r >= self.rows || c >= self.cols {
            return Err(Error::Shape(format!(
                "index ({r}, {c}) out of bounds for {}x{} matrix",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Bounds-checked element read.
    pub fn at(&self, r: usize, c: usize) -> Result<T> {
        self.check_bounds(r, c)?;
        Ok(self.data[self.idx(r, c)])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, r: usize, c: usize, value: T) -> Result<()> {
        self.check_bounds(r, c)?;
        let i = self.idx(r, c);
        self.data[i] = value;
        Ok(())
    }

    /// Returns the transpose; the stride of the result is recomputed for the
    /// swapped shape, not carried over.
    pub fn transpose(&self) -> Matrix<T> {
        let mut res = Matrix::alloc(self.cols, self.rows, 0);

        for c in 0..self.cols {
            for r in 0..self.rows {
                res.data[c * res.stride + r] = self.data[self.idx(r, c)];
            }
        }

        res
    }

    /// Standard matrix product; requires `self.cols == other.rows`.
    ///
    /// Computed as the naive row-by-column triple loop. The ascending-k
    /// accumulation order is what keeps results reproducible, so it must not
    /// be reordered.
    pub fn mat_mul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.rows {
            return Err(Error::Shape(format!(
                "matMul: incompatible sizes {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut res = Matrix::alloc(self.rows, other.cols, 0);

        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut sum = T::zero();
                for k in 0..self.cols {
                    sum = sum + self.data[self.idx(r, k)] * other.data[other.idx(k, c)];
                }
                res.data[r * res.stride + c] = sum;
            }
        }

        Ok(res)
    }

    fn check_same_layout(&self, other: &Matrix<T>, op: &str) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols || self.stride != other.stride {
            return Err(Error::Shape(format!(
                "{op}: operands differ in rows/cols/stride ({}x{} stride {} vs {}x{} stride {})",
                self.rows, self.cols, self.stride, other.rows, other.cols, other.stride
            )));
        }
        Ok(())
    }

    /// Elementwise sum; requires a full rows/cols/stride match.
    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_layout(other, "add")?;

        let mut res = Matrix::alloc(self.rows, self.cols, self.stride);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = self.data[self.idx(r, c)] + other.data[other.idx(r, c)];
            }
        }
        Ok(res)
    }

    /// Elementwise difference; requires a full rows/cols/stride match.
    pub fn sub(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_layout(other, "sub")?;

        let mut res = Matrix::alloc(self.rows, self.cols, self.stride);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = self.data[self.idx(r, c)] - other.data[other.idx(r, c)];
            }
        }
        Ok(res)
    }

    pub fn add_inplace(&mut self, other: &Matrix<T>) -> Result<()> {
        self.check_same_layout(other, "addInplace")?;

        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = self.idx(r, c);
                self.data[i] = self.data[i] + other.data[other.idx(r, c)];
            }
        }
        Ok(())
    }

    pub fn sub_inplace(&mut self, other: &Matrix<T>) -> Result<()> {
        self.check_same_layout(other, "subInplace")?;

        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = self.idx(r, c);
                self.data[i] = self.data[i] - other.data[other.idx(r, c)];
            }
        }
        Ok(())
    }

    /// Elementwise (Hadamard) product; requires matching rows/cols, the
    /// stride of the result is recomputed.
    pub fn hadamard(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::Shape(format!(
                "hadamard: operands differ in shape ({}x{} vs {}x{})",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut res = Matrix::alloc(self.rows, self.cols, 0);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = self.data[self.idx(r, c)] * other.data[other.idx(r, c)];
            }
        }
        Ok(res)
    }

    /// Elementwise division by a scalar; fails on an exact-zero divisor.
    pub fn divide_scalar(&self, value: T) -> Result<Matrix<T>> {
        if value == T::zero() {
            return Err(Error::Domain("division by zero scalar".into()));
        }
        Ok(self.map(|x| x / value))
    }

    /// Elementwise division; requires a full rows/cols/stride match.
    pub fn divide(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_layout(other, "divide")?;

        let mut res = Matrix::alloc(self.rows, self.cols, self.stride);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = self.data[self.idx(r, c)] / other.data[other.idx(r, c)];
            }
        }
        Ok(res)
    }

    pub fn scalar_mul(&self, value: T) -> Matrix<T> {
        self.map(|x| x * value)
    }

    /// Applies `f` to every logical element, returning a new matrix of the
    /// same shape and stride. This is the one generic mechanism through
    /// which all activation kernels are realized.
    pub fn map<F>(&self, mut f: F) -> Matrix<T>
    where
        F: FnMut(T) -> T,
    {
        let mut res = Matrix::alloc(self.rows, self.cols, self.stride);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = f(self.data[self.idx(r, c)]);
            }
        }
        res
    }

    /// Row-wise reduction to a `(rows, 1)` column of per-row sums.
    pub fn sum_over_columns(&self) -> Matrix<T> {
        let mut res = Matrix::alloc(self.rows, 1, 0);
        for r in 0..self.rows {
            let mut sum = T::zero();
            for c in 0..self.cols {
                sum = sum + self.data[self.idx(r, c)];
            }
            res.data[r * res.stride] = sum;
        }
        res
    }

    /// Broadcast-adds a `(rows, 1)` column vector to every column.
    pub fn add_bias(&self, bias: &Matrix<T>) -> Result<Matrix<T>> {
        if bias.cols != 1 || bias.rows != self.rows {
            return Err(Error::Shape(format!(
                "addBias: bias must be {}x1, got {}x{}",
                self.rows, bias.rows, bias.cols
            )));
        }

        let mut res = Matrix::alloc(self.rows, self.cols, self.stride);
        for r in 0..self.rows {
            let b = bias.data[bias.idx(r, 0)];
            for c in 0..self.cols {
                let i = res.idx(r, c);
                res.data[i] = self.data[self.idx(r, c)] + b;
            }
        }
        Ok(res)
    }

    /// Arithmetic mean over all logical elements.
    pub fn mean(&self) -> T {
        let mut sum = T::zero();
        for r in 0..self.rows {
            for c in 0..self.cols {
                sum = sum + self.data[self.idx(r, c)];
            }
        }
        sum / T::from_f64(self.element_count() as f64)
    }

    /// Mean of one row's logical elements.
    pub fn mean_of_row(&self, r: usize) -> Result<T> {
        self.check_bounds(r, 0)?;
        let mut sum = T::zero();
        for c in 0..self.cols {
            sum = sum + self.data[self.idx(r, c)];
        }
        Ok(sum / T::from_f64(self.cols as f64))
    }

    /// Population standard deviation of one row's logical elements.
    pub fn std_dev_of_row(&self, r: usize) -> Result<T> {
        let mean = self.mean_of_row(r)?;
        let mut sum = T::zero();
        for c in 0..self.cols {
            let d = self.data[self.idx(r, c)] - mean;
            sum = sum + d * d;
        }
        Ok((sum / T::from_f64(self.cols as f64)).sqrt())
    }

    /// Overwrites every element with `value`, padding columns included.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Elementwise clamp into `[epsilon, 1 - epsilon]`; stability guard
    /// before taking logs of probabilities.
    pub fn clip(&self, epsilon: T) -> Matrix<T> {
        self.map(|x| functions::clip(x, epsilon))
    }

    // ── Activation wrappers ─────────────────────────────────────────────

    pub fn sigmoid(&self) -> Matrix<T> {
        self.map(functions::sigmoid)
    }

    pub fn tanh(&self) -> Matrix<T> {
        self.map(functions::tanh)
    }

    pub fn relu(&self) -> Matrix<T> {
        self.map(functions::relu)
    }

    pub fn softplus(&self) -> Matrix<T> {
        self.map(functions::softplus)
    }

    pub fn mish(&self) -> Matrix<T> {
        self.map(functions::mish)
    }

    pub fn linear(&self) -> Matrix<T> {
        self.map(functions::linear)
    }

    /// Elementwise `elu`; the alpha check happens once, up front.
    pub fn elu(&self, alpha: T) -> Result<Matrix<T>> {
        if alpha < T::zero() {
            return Err(Error::Domain(
                "invalid hyperparameter alpha for elu, has to be non-negative".into(),
            ));
        }
        Ok(self.map(|x| functions::elu_raw(x, alpha)))
    }

    /// Elementwise `delu`; the `b != 0` check happens once, up front.
    pub fn delu(&self, a: i32, b: i32, xc: f64) -> Result<Matrix<T>> {
        if b == 0 {
            return Err(Error::Domain(
                "invalid hyperparameter b for delu, has to be unequal to 0".into(),
            ));
        }
        Ok(self.map(|x| functions::delu_raw(x, a, b, xc)))
    }

    /// Elementwise logarithm with an arbitrary base.
    pub fn log(&self, base: T) -> Matrix<T> {
        self.map(|x| functions::log(base, x))
    }
}

/// Empty `0x0` placeholder, only valid to be reassigned later.
impl<T: Scalar> Default for Matrix<T> {
    fn default() -> Self {
        Matrix {
            data: vec![],
            rows: 0,
            cols: 0,
            stride: 0,
        }
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix({}x{})", self.rows, self.cols)?;
        for r in 0..self.rows {
            write!(f, "[ ")?;
            for c in 0..self.cols {
                write!(f, "{:10.6}", self.data[self.idx(r, c)])?;
                if c + 1 < self.cols {
                    write!(f, " ")?;
                }
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
