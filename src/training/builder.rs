use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use super::Trainer;
use crate::{
    arch::{Sequential, layers::Layer},
    config::{DatasetSpec, LayerSpec, ModelSpec, ParamGenSpec, RunSpec, TrainerSpec},
    dataset::Dataset,
    error::{MlErr, Result},
    initialization::{ConstParamGen, ParamGen, RandParamGen},
};

/// Everything needed to train, resolved from a `RunSpec`.
#[derive(Debug)]
pub struct Run {
    pub model: Sequential,
    pub trainer: Trainer,
    pub dataset: Dataset,
    pub test_dataset: Option<Dataset>,
}

/// Builds models, trainers and datasets given their specification.
#[derive(Debug, Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a full training run following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the run.
    ///
    /// # Returns
    /// The resolved run or the first error found while building it.
    pub fn build(&self, spec: RunSpec) -> Result<Run> {
        let mut rng = self.generate_rng(spec.seed);

        let model = self.resolve_model(&spec.model, &mut rng)?;
        let trainer = self.resolve_trainer(&spec.trainer);
        let dataset = self.resolve_dataset(spec.dataset)?;
        let test_dataset = spec
            .test_dataset
            .map(|ds| self.resolve_dataset(ds))
            .transpose()?;

        Ok(Run {
            model,
            trainer,
            dataset,
            test_dataset,
        })
    }

    /// Builds a model following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the model.
    /// * `rng` - The random number generator every random initializer draws from, layer after
    ///   layer.
    pub fn resolve_model(&self, spec: &ModelSpec, rng: &mut StdRng) -> Result<Sequential> {
        match spec {
            ModelSpec::Sequential { layers } => {
                let layers = layers
                    .iter()
                    .map(|ls| self.resolve_layer(ls, rng))
                    .collect::<Result<Vec<_>>>()?;

                Sequential::new(layers)
            }
        }
    }

    pub fn resolve_trainer(&self, spec: &TrainerSpec) -> Trainer {
        Trainer::new(spec.loss, spec.epochs, spec.batch_size).with_remainder(spec.remainder)
    }

    pub fn resolve_dataset(&self, spec: DatasetSpec) -> Result<Dataset> {
        match spec {
            DatasetSpec::Inline {
                data,
                x_size,
                y_size,
            } => Dataset::from_interleaved(data, x_size, y_size),
        }
    }

    fn resolve_layer(&self, spec: &LayerSpec, rng: &mut StdRng) -> Result<Layer> {
        debug!("resolving layer {spec:?}");

        match spec {
            LayerSpec::Dense {
                dim,
                learning_rate,
                init,
            } => match init {
                ParamGenSpec::Explicit { weights, biases } => {
                    Layer::dense(*dim, weights.clone(), biases.clone(), *learning_rate)
                }
                _ => {
                    let mut param_gen = self.resolve_param_gen(init, *dim, rng)?;
                    Layer::dense_with(*dim, *learning_rate, param_gen.as_mut())
                }
            },
            LayerSpec::Activation { act_fn, dim } => Ok(Layer::activation(*act_fn, *dim)),
        }
    }

    fn resolve_param_gen<'a>(
        &self,
        spec: &ParamGenSpec,
        (fan_in, fan_out): (usize, usize),
        rng: &'a mut StdRng,
    ) -> Result<Box<dyn ParamGen + 'a>> {
        let param_gen: Box<dyn ParamGen + 'a> = match *spec {
            ParamGenSpec::Const { value } => Box::new(ConstParamGen::new(value)),
            ParamGenSpec::Uniform { low, high } => Box::new(RandParamGen::uniform(rng, low, high)?),
            ParamGenSpec::XavierUniform => {
                Box::new(RandParamGen::xavier_uniform(rng, fan_in, fan_out)?)
            }
            ParamGenSpec::Normal { mean, std_dev } => {
                Box::new(RandParamGen::normal(rng, mean, std_dev)?)
            }
            ParamGenSpec::Kaiming => Box::new(RandParamGen::kaiming(rng, fan_in)?),
            ParamGenSpec::Explicit { .. } => {
                return Err(MlErr::InvalidInput(
                    "explicit parameters are not generated",
                ));
            }
        };

        Ok(param_gen)
    }

    /// Generates a random number generator given (or not) a seed.
    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
