use ndarray::{Array1, ArrayView1};

use crate::{
    arch::activations::ActFn,
    error::{MlErr, Result, ensure_len},
};

/// An elementwise nonlinearity layer.
///
/// The output of the last `forward` call is cached and `backward` derives the gradient from it,
/// so `backward` must follow the `forward` it corresponds to. Calling `forward` again in between
/// silently replaces the cache.
#[derive(Debug, Clone)]
pub struct Activation {
    act_fn: ActFn,
    dim: usize,
    a: Option<Array1<f32>>,
}

impl Activation {
    pub fn new(act_fn: ActFn, dim: usize) -> Self {
        Self {
            act_fn,
            dim,
            a: None,
        }
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the output of the last forward pass, if any.
    pub fn output(&self) -> Option<ArrayView1<'_, f32>> {
        self.a.as_ref().map(|a| a.view())
    }

    pub fn forward(&mut self, z: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("activation input", z.len(), self.dim)?;

        let a = self.act_fn.f(z);
        self.a = Some(a.clone());
        Ok(a)
    }

    pub fn backward(&mut self, d: ArrayView1<f32>) -> Result<Array1<f32>> {
        ensure_len("activation gradient", d.len(), self.dim)?;

        let a = self
            .a
            .as_ref()
            .ok_or(MlErr::BackwardBeforeForward { dim: self.dim })?;

        Ok(self.act_fn.df(d, a.view()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn sigmoid_forward_then_backward() {
        let mut act = Activation::new(ActFn::Sigmoid, 1);

        let a = act.forward(array![0.].view()).unwrap();
        assert_abs_diff_eq!(a[0], 0.5);

        let d = act.backward(array![1.].view()).unwrap();
        assert_abs_diff_eq!(d[0], 0.25);
    }

    #[test]
    fn forward_caches_its_output() {
        let mut act = Activation::new(ActFn::Relu, 3);
        assert!(act.output().is_none());

        let a = act.forward(array![-1., 2., 0.].view()).unwrap();
        assert_eq!(act.output().unwrap(), a);
    }

    #[test]
    fn relu_gradient_vanishes_where_output_is_zero() {
        let mut act = Activation::new(ActFn::Relu, 4);
        act.forward(array![-1., 2., 0., 5.].view()).unwrap();

        let d = act.backward(array![3., 3., 3., 3.].view()).unwrap();
        assert_eq!(d, array![0., 3., 0., 3.]);
    }

    #[test]
    fn backward_uses_the_most_recent_forward() {
        let mut act = Activation::new(ActFn::Relu, 2);
        act.forward(array![1., 1.].view()).unwrap();
        act.forward(array![-1., 1.].view()).unwrap();

        let d = act.backward(array![1., 1.].view()).unwrap();
        assert_eq!(d, array![0., 1.]);
    }

    #[test]
    fn sigmoid_output_stays_in_open_unit_interval() {
        let mut act = Activation::new(ActFn::Sigmoid, 9);
        let a = act
            .forward(array![-100., -20., -15., -1., 0., 1., 15., 20., 100.].view())
            .unwrap();
        assert!(a.iter().all(|&a| a > 0. && a < 1.));
    }

    #[test]
    fn backward_before_forward_fails() {
        let mut act = Activation::new(ActFn::Softmax, 2);
        assert_eq!(
            act.backward(array![1., 1.].view()).unwrap_err(),
            MlErr::BackwardBeforeForward { dim: 2 }
        );
    }

    #[test]
    fn rejects_wrong_lengths() {
        let mut act = Activation::new(ActFn::Relu, 2);
        assert!(act.forward(array![1.].view()).is_err());
        act.forward(array![1., 2.].view()).unwrap();
        assert!(act.backward(array![1., 2., 3.].view()).is_err());
    }
}
