use ndarray::{Array1, ArrayView1};

use crate::{arch::activations::ActFn, error::Result, initialization::ParamGen};

/// A link of a `Sequential` chain.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(super::Dense),
    Activation(super::Activation),
}
use Layer::*;

impl Layer {
    /// Creates a new dense layer from explicit parameters, see `Dense::new`.
    pub fn dense(
        dim: (usize, usize),
        weights: Vec<f32>,
        biases: Vec<f32>,
        learning_rate: f32,
    ) -> Result<Self> {
        super::Dense::new(dim, weights, biases, learning_rate).map(Dense)
    }

    /// Creates a new dense layer with generated parameters, see `Dense::from_param_gen`.
    pub fn dense_with<G>(
        dim: (usize, usize),
        learning_rate: f32,
        param_gen: &mut G,
    ) -> Result<Self>
    where
        G: ParamGen + ?Sized,
    {
        super::Dense::from_param_gen(dim, learning_rate, param_gen).map(Dense)
    }

    pub fn activation(act_fn: ActFn, dim: usize) -> Self {
        Activation(super::Activation::new(act_fn, dim))
    }

    pub fn relu(dim: usize) -> Self {
        Self::activation(ActFn::Relu, dim)
    }

    pub fn sigmoid(dim: usize) -> Self {
        Self::activation(ActFn::Sigmoid, dim)
    }

    pub fn softmax(dim: usize) -> Self {
        Self::activation(ActFn::Softmax, dim)
    }

    /// Returns the expected input length.
    pub fn in_dim(&self) -> usize {
        match self {
            Dense(l) => l.dim().0,
            Activation(l) => l.dim(),
        }
    }

    /// Returns the produced output length.
    pub fn out_dim(&self) -> usize {
        match self {
            Dense(l) => l.dim().1,
            Activation(l) => l.dim(),
        }
    }

    /// Returns the amount of trainable parameters.
    pub fn size(&self) -> usize {
        match self {
            Dense(l) => l.size(),
            Activation(_) => 0,
        }
    }

    pub fn forward(&mut self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        match self {
            Dense(l) => l.forward(x),
            Activation(l) => l.forward(x),
        }
    }

    /// Propagates the gradient of this layer's output upstream, updating parameters in place.
    pub fn backward(&mut self, d: ArrayView1<f32>) -> Result<Array1<f32>> {
        match self {
            Dense(l) => l.backward(d),
            Activation(l) => l.backward(d),
        }
    }

    pub fn as_dense(&self) -> Option<&super::Dense> {
        match self {
            Dense(l) => Some(l),
            Activation(_) => None,
        }
    }

    pub fn as_activation(&self) -> Option<&super::Activation> {
        match self {
            Activation(l) => Some(l),
            Dense(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn dimensions_per_variant() {
        let dense = Layer::dense((3, 2), vec![0.; 6], vec![0.; 2], 0.1).unwrap();
        assert_eq!((dense.in_dim(), dense.out_dim(), dense.size()), (3, 2, 8));

        let relu = Layer::relu(4);
        assert_eq!((relu.in_dim(), relu.out_dim(), relu.size()), (4, 4, 0));
    }

    #[test]
    fn dispatches_to_the_inner_layer() {
        let mut layer = Layer::relu(2);
        let a = layer.forward(array![-1., 1.].view()).unwrap();
        assert_eq!(a, array![0., 1.]);
        assert!(layer.as_dense().is_none());
        assert!(layer.as_activation().unwrap().output().is_some());
    }
}
