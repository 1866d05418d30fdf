use ndarray::{Array1, ArrayView1};

use super::layers::Layer;
use crate::error::{MlErr, Result, ensure_len};

/// A sequential model: information flows forward when computing an output and backward when
/// propagating the gradient of that output, updating every layer on the way.
///
/// The chain itself holds no trainable state, the layers do.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of, in forward order.
    ///
    /// # Returns
    /// A new `Sequential` instance, or an error if there are no layers or two adjacent layers
    /// don't chain (the output length of one must equal the input length of the next).
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        let layers: Vec<_> = layers.into_iter().collect();

        if layers.is_empty() {
            return Err(MlErr::InvalidInput(
                "a sequential model needs at least one layer",
            ));
        }

        for pair in layers.windows(2) {
            ensure_len("chained layer input", pair[1].in_dim(), pair[0].out_dim())?;
        }

        Ok(Self { layers })
    }

    /// Returns the input length of the first layer.
    pub fn in_dim(&self) -> usize {
        self.layers[0].in_dim()
    }

    /// Returns the output length of the last layer.
    pub fn out_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].out_dim()
    }

    /// Returns the amount of trainable parameters in the model.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Layer::size).sum()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input vector.
    ///
    /// # Returns
    /// The prediction for the given input or an error if occurred.
    pub fn forward(&mut self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("model input", x.len(), self.in_dim())?;

        let mut a = x.to_owned();
        for layer in self.layers.iter_mut() {
            a = layer.forward(a.view())?;
        }

        Ok(a)
    }

    /// Makes a backward pass through the network, last layer first.
    ///
    /// Every layer derives its gradient from its own state as left by the last `forward`, so this
    /// must be called after the forward pass it corresponds to. If any activation has no cached
    /// output yet the call fails before any parameter is touched.
    ///
    /// # Arguments
    /// * `d` - The gradient of the loss with respect to the model's output.
    ///
    /// # Returns
    /// The gradient with respect to the model's input.
    pub fn backward(&mut self, d: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("model gradient", d.len(), self.out_dim())?;

        if let Some(act) = self
            .layers
            .iter()
            .rev()
            .filter_map(Layer::as_activation)
            .find(|act| act.output().is_none())
        {
            return Err(MlErr::BackwardBeforeForward { dim: act.dim() });
        }

        let mut d = d.to_owned();
        for layer in self.layers.iter_mut().rev() {
            d = layer.backward(d.view())?;
        }

        Ok(d)
    }
}
