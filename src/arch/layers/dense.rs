use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{
    error::{MlErr, Result, ensure_len},
    initialization::ParamGen,
};

/// An affine layer, `out = W·x + b`.
///
/// The weights are stored row-major by output unit: row `i` holds the `dim.0` input weights of
/// output unit `i`. Parameters are updated in place by every `backward` call and never resized.
#[derive(Debug, Clone)]
pub struct Dense {
    dim: (usize, usize),
    weights: Array2<f32>,
    biases: Array1<f32>,
    learning_rate: f32,
}

impl Dense {
    /// Creates a new `Dense` layer from explicit parameters.
    ///
    /// # Arguments
    /// * `dim` - The `(input, output)` dimensions of the layer.
    /// * `weights` - `input * output` weights, row-major by output unit.
    /// * `biases` - `output` biases.
    /// * `learning_rate` - The step length used on every `backward` call.
    ///
    /// # Returns
    /// A new `Dense` or an error if the lengths don't match the dimensions or the learning rate
    /// is not a positive finite number.
    pub fn new(
        dim: (usize, usize),
        weights: Vec<f32>,
        biases: Vec<f32>,
        learning_rate: f32,
    ) -> Result<Self> {
        let (dim_in, dim_out) = dim;

        ensure_len("dense weights", weights.len(), dim_in * dim_out)?;
        ensure_len("dense biases", biases.len(), dim_out)?;

        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(MlErr::InvalidInput(
                "the learning rate must be a positive finite number",
            ));
        }

        let weights = Array2::from_shape_vec((dim_out, dim_in), weights)
            .map_err(|_| MlErr::InvalidInput("the dense weights don't fit their dimensions"))?;

        Ok(Self {
            dim,
            weights,
            biases: Array1::from(biases),
            learning_rate,
        })
    }

    /// Creates a new `Dense` layer drawing its weights, row by row, and then its biases from
    /// `param_gen`.
    ///
    /// # Returns
    /// A new `Dense` or an error if the learning rate is invalid.
    pub fn from_param_gen<G>(
        dim: (usize, usize),
        learning_rate: f32,
        param_gen: &mut G,
    ) -> Result<Self>
    where
        G: ParamGen + ?Sized,
    {
        let weights = param_gen.draw_n(dim.0 * dim.1);
        let biases = param_gen.draw_n(dim.1);
        Self::new(dim, weights, biases, learning_rate)
    }

    /// Returns the `(input, output)` dimensions of this layer.
    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        (self.dim.0 + 1) * self.dim.1
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn biases(&self) -> ArrayView1<'_, f32> {
        self.biases.view()
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Computes `out[i] = b[i] + Σ_j x[j] * W[i, j]`.
    ///
    /// # Arguments
    /// * `x` - The input vector, of length `dim.0`.
    ///
    /// # Returns
    /// The output vector, of length `dim.1`.
    pub fn forward(&self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("dense input", x.len(), self.dim.0)?;
        Ok(self.weights.dot(&x) + &self.biases)
    }

    /// Propagates `d` upstream and takes a gradient descent step.
    ///
    /// The upstream gradient `g[j] = Σ_i d[i] * W[i, j]` is computed with the weights as they were
    /// before the call. Then `W[i, j] -= lr * d[i] * g[j]` and `b[i] -= lr * d[i]`; note the weight
    /// step uses the upstream gradient `g`, not the forward input.
    ///
    /// # Arguments
    /// * `d` - The gradient with respect to this layer's output, of length `dim.1`.
    ///
    /// # Returns
    /// The gradient with respect to this layer's input, of length `dim.0`.
    pub fn backward(&mut self, d: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("dense gradient", d.len(), self.dim.1)?;

        let g = self.weights.t().dot(&d);
        let lr = self.learning_rate;

        for (mut row, &d) in self.weights.axis_iter_mut(Axis(0)).zip(&d) {
            row.scaled_add(-lr * d, &g);
        }
        self.biases.scaled_add(-lr, &d);

        Ok(g)
    }
}
