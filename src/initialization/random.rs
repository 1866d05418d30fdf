use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::ParamGen;
use crate::error::Result;

/// Draws parameters from a probability distribution.
///
/// The rng is borrowed, so consecutive layers built from the same rng continue its stream and a
/// seeded model comes out the same every time.
pub struct RandParamGen<'a, R: Rng, D: Distribution<f32>> {
    rng: &'a mut R,
    distribution: D,
}

impl<'a, R: Rng, D: Distribution<f32>> RandParamGen<'a, R, D> {
    pub fn new(rng: &'a mut R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<'a, R: Rng> RandParamGen<'a, R, Uniform<f32>> {
    /// Samples uniformly over `[low, high)`, failing if `low >= high`.
    pub fn uniform(rng: &'a mut R, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?))
    }

    /// Xavier (Glorot) uniform initialization, `±sqrt(6 / (fan_in + fan_out))`.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to draw from.
    /// * `fan_in` - The input length of the layer.
    /// * `fan_out` - The output length of the layer.
    pub fn xavier_uniform(rng: &'a mut R, fan_in: usize, fan_out: usize) -> Result<Self> {
        let bound = (6. / (fan_in + fan_out) as f32).sqrt();
        Self::uniform(rng, -bound, bound)
    }
}

impl<'a, R: Rng> RandParamGen<'a, R, Normal<f32>> {
    /// Samples from `N(mean, std_dev²)`, failing if `std_dev` is not finite.
    pub fn normal(rng: &'a mut R, mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?))
    }

    /// Kaiming (He) normal initialization, `N(0, 2 / fan_in)`, meant for layers feeding a `Relu`.
    pub fn kaiming(rng: &'a mut R, fan_in: usize) -> Result<Self> {
        Self::normal(rng, 0., (2. / fan_in as f32).sqrt())
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<'_, R, D> {
    fn draw(&mut self) -> f32 {
        self.distribution.sample(&mut *self.rng)
    }
}
