use ndarray::{Array1, ArrayView1, Zip};

use super::LossFn;

/// Binary cross entropy loss function.
///
/// Undefined when any prediction is exactly `0` or `1`: the result is non-finite and is returned
/// as is. Keeping predictions inside `(0, 1)` is up to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        let sum = Zip::from(&y_pred)
            .and(&y)
            .fold(0., |acc, &x, &y| acc + y * x.ln() + (1. - y) * (1. - x).ln());

        -sum / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        Zip::from(&y_pred).and(&y).map_collect(|&x, &y| -y / x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_of_a_confident_correct_prediction_is_small() {
        let (x, y) = (array![0.99, 0.01], array![1., 0.]);
        let loss = CrossEntropy.loss(x.view(), y.view());
        assert_abs_diff_eq!(loss, -(0.99f32.ln()), epsilon = 1e-6);
    }

    #[test]
    fn loss_at_one_half() {
        let (x, y) = (array![0.5], array![1.]);
        assert_abs_diff_eq!(CrossEntropy.loss(x.view(), y.view()), 2f32.ln(), epsilon = 1e-6);
    }

    #[test]
    fn gradient_is_negative_target_over_prediction() {
        let (x, y) = (array![0.5, 0.25], array![1., 0.5]);
        assert_eq!(CrossEntropy.loss_prime(x.view(), y.view()), array![-2., -2.]);
    }

    #[test]
    fn domain_boundary_is_not_guarded() {
        let (x, y) = (array![0., 1.], array![1., 0.]);
        assert!(!CrossEntropy.loss(x.view(), y.view()).is_finite());
        assert!(!CrossEntropy.loss_prime(x.view(), y.view())[0].is_finite());
    }
}
