use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{CrossEntropy, LossFn, Mae, Mse};
use crate::error::{Result, ensure_len};

/// The available loss functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    MeanSquared,
    MeanAbsolute,
    CrossEntropy,
}

impl LossKind {
    fn loss_fn(&self) -> &'static dyn LossFn {
        match self {
            LossKind::MeanSquared => &Mse,
            LossKind::MeanAbsolute => &Mae,
            LossKind::CrossEntropy => &CrossEntropy,
        }
    }
}

/// A loss function bound to the length of the vectors it compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loss {
    kind: LossKind,
    dim: usize,
}

impl Loss {
    pub fn new(kind: LossKind, dim: usize) -> Self {
        Self { kind, dim }
    }

    pub fn kind(&self) -> LossKind {
        self.kind
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Computes the scalar loss between a prediction and its target.
    ///
    /// # Arguments
    /// * `y_pred` - The produced vector.
    /// * `y` - The target vector.
    ///
    /// # Returns
    /// The loss, or a size mismatch if either vector isn't `dim` long.
    pub fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32> {
        self.check(y_pred, y)?;
        Ok(self.kind.loss_fn().loss(y_pred, y))
    }

    /// Computes the gradient of the loss with respect to each element of the prediction.
    ///
    /// # Arguments
    /// * `y_pred` - The produced vector.
    /// * `y` - The target vector.
    ///
    /// # Returns
    /// The gradient, or a size mismatch if either vector isn't `dim` long.
    pub fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<Array1<f32>> {
        self.check(y_pred, y)?;
        Ok(self.kind.loss_fn().loss_prime(y_pred, y))
    }

    fn check(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<()> {
        ensure_len("loss target", y.len(), y_pred.len())?;
        ensure_len("loss prediction", y_pred.len(), self.dim)
    }
}
