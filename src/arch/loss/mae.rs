use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean absolute error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mae;

impl Mae {
    /// Returns a new `Mae`.
    pub fn new() -> Self {
        Self
    }
}

/// `f32::signum` maps zero to one, the gradient needs `sign(0) = 0`.
fn sign(x: f32) -> f32 {
    if x > 0. {
        1.
    } else if x < 0. {
        -1.
    } else {
        0.
    }
}

impl LossFn for Mae {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        (&y_pred - &y).mapv(f32::abs).mean().unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        let n = y_pred.len() as f32;
        (&y_pred - &y).mapv(|x| sign(x) / n)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_is_mean_absolute_difference() {
        let (x, y) = (array![1., -2., 0.5, 0.], array![0., 0., 0.5, 1.]);
        assert_abs_diff_eq!(Mae.loss(x.view(), y.view()), 1.);
    }

    #[test]
    fn gradient_follows_the_sign_of_the_difference() {
        let (x, y) = (array![3., -1., 2.], array![1., 1., 2.]);
        let d = Mae.loss_prime(x.view(), y.view());

        for ((d, x), y) in d.iter().zip(&x).zip(&y) {
            assert_eq!(sign(*d), sign(x - y));
        }
        assert_abs_diff_eq!(d[0], 1. / 3.);
        assert_abs_diff_eq!(d[1], -1. / 3.);
        assert_eq!(d[2], 0.);
    }
}
