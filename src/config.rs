//! Serializable descriptions of a training run, resolved by `TrainerBuilder`.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{arch::activations::ActFn, arch::loss::LossKind, dataset::Remainder};

/// The specification for the initial parameters of a dense layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGenSpec {
    Explicit { weights: Vec<f32>, biases: Vec<f32> },
    Const { value: f32 },
    Uniform { low: f32, high: f32 },
    XavierUniform,
    Normal { mean: f32, std_dev: f32 },
    Kaiming,
}

/// The specification for the `Layer` enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSpec {
    Dense {
        dim: (usize, usize),
        learning_rate: f32,
        init: ParamGenSpec,
    },
    Activation {
        act_fn: ActFn,
        dim: usize,
    },
}

/// The specification for a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    Sequential { layers: Vec<LayerSpec> },
}

/// The specification for the `Dataset` struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSpec {
    /// Rows laid out as `[x.., y..]`.
    Inline {
        data: Vec<f32>,
        x_size: usize,
        y_size: usize,
    },
}

/// The specification for the `Trainer` struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerSpec {
    pub loss: LossKind,
    pub epochs: usize,
    pub batch_size: NonZeroUsize,
    #[serde(default)]
    pub remainder: Remainder,
}

/// A full training run: what to train, how, and on which data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    pub model: ModelSpec,
    pub trainer: TrainerSpec,
    pub dataset: DatasetSpec,
    /// Evaluated after training, the training dataset is used when missing.
    #[serde(default)]
    pub test_dataset: Option<DatasetSpec>,
    /// Seed for the random parameter initializers.
    #[serde(default)]
    pub seed: Option<u64>,
}
