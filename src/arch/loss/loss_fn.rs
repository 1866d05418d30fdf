use ndarray::{Array1, ArrayView1};

/// A scalar distance between a produced vector and a target vector.
///
/// Implementations assume both vectors have the same length, `Loss` checks it before
/// delegating here.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32>;
}
