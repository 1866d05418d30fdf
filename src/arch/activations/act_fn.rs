use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// The elementwise nonlinearities an `Activation` layer can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFn {
    Relu,
    Sigmoid,
    Softmax,
}
use ActFn::*;

impl ActFn {
    /// Applies the function to a whole vector.
    ///
    /// `Softmax` normalizes over the vector, so this can't be expressed per element. A degenerate
    /// input (all `-inf`, for instance) yields non-finite values instead of an error.
    ///
    /// # Arguments
    /// * `z` - The input vector.
    ///
    /// # Returns
    /// The activated vector, same length as `z`.
    pub fn f(&self, z: ArrayView1<f32>) -> Array1<f32> {
        match self {
            Relu => z.mapv(|z| z.max(0.)),
            Sigmoid => z.mapv(sigmoid),
            Softmax => softmax(z),
        }
    }

    /// Maps the gradient coming from the next layer through this function.
    ///
    /// Both `Sigmoid` and `Softmax` use the logistic derivative `a * (1 - a)`, elementwise.
    ///
    /// # Arguments
    /// * `d` - The gradient with respect to this function's output.
    /// * `a` - The output of the last forward pass.
    ///
    /// # Returns
    /// The gradient with respect to this function's input.
    pub fn df(&self, d: ArrayView1<f32>, a: ArrayView1<f32>) -> Array1<f32> {
        match self {
            Relu => Zip::from(&d)
                .and(&a)
                .map_collect(|&d, &a| if a > 0. { d } else { 0. }),
            Sigmoid | Softmax => Zip::from(&d)
                .and(&a)
                .map_collect(|&d, &a| d * a * (1. - a)),
        }
    }
}

/// Kept strictly inside `(0, 1)`: in `f32` the logistic rounds to `1` from around `17` and to
/// `0` below around `-88`.
fn sigmoid(z: f32) -> f32 {
    (1. / (1. + (-z).exp())).clamp(f32::MIN_POSITIVE, 1. - f32::EPSILON / 2.)
}

fn softmax(z: ArrayView1<f32>) -> Array1<f32> {
    let max = z.fold(f32::NEG_INFINITY, |acc, &z| acc.max(z));
    let mut e = z.mapv(|z| (z - max).exp());
    let sum = e.sum();
    e /= sum;
    e
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        let a = Relu.f(array![-2., 0., 3.5].view());
        assert_eq!(a, array![0., 0., 3.5]);
    }

    #[test]
    fn relu_blocks_gradient_where_output_is_zero() {
        let d = array![1., 2., 3.];
        let a = array![0., 0.5, 0.];
        assert_eq!(Relu.df(d.view(), a.view()), array![0., 2., 0.]);
    }

    #[test]
    fn sigmoid_at_zero_is_one_half() {
        let a = Sigmoid.f(array![0.].view());
        assert_abs_diff_eq!(a[0], 0.5);
    }

    #[test]
    fn sigmoid_never_saturates_to_the_bounds() {
        let a = Sigmoid.f(array![17., 20., 100., -20., -100., -1000.].view());
        assert!(a.iter().all(|&a| a > 0. && a < 1.));
    }

    #[test]
    fn softmax_sums_to_one_and_survives_large_inputs() {
        let a = Softmax.f(array![1000., 1001., 999., -5.].view());
        assert!(a.iter().all(|a| a.is_finite()));
        assert_abs_diff_eq!(a.sum(), 1., epsilon = 1e-6);
        assert!(a[1] > a[0] && a[0] > a[2]);
    }

    #[test]
    fn softmax_of_constant_vector_is_uniform() {
        let a = Softmax.f(array![2., 2., 2., 2.].view());
        for a in a {
            assert_abs_diff_eq!(a, 0.25);
        }
    }

    #[test]
    fn softmax_and_sigmoid_share_the_logistic_derivative() {
        let d = array![1., -2.];
        let a = array![0.25, 0.5];
        let expected = array![0.1875, -0.5];
        assert_eq!(Sigmoid.df(d.view(), a.view()), expected);
        assert_eq!(Softmax.df(d.view(), a.view()), expected);
    }

    #[test]
    fn deserializes_from_snake_case() {
        let act: ActFn = serde_json::from_str("\"softmax\"").unwrap();
        assert_eq!(act, Softmax);
    }
}
