mod builder;
mod trainer;

use std::num::NonZeroUsize;

pub use builder::{Run, TrainerBuilder};
pub use trainer::Trainer;

use crate::{
    arch::{Sequential, loss::LossKind},
    dataset::Dataset,
    error::Result,
};

/// Trains `model` on `dataset` with mini-batch gradient descent, dropping any trailing partial
/// batch.
///
/// # Returns
/// The averaged loss of the last batch of the last epoch, `0.0` if `epochs` is `0`.
pub fn train(
    model: &mut Sequential,
    dataset: &Dataset,
    epochs: usize,
    batch_size: NonZeroUsize,
    loss_kind: LossKind,
) -> Result<f32> {
    Trainer::new(loss_kind, epochs, batch_size).train(model, dataset)
}

/// Returns the mean loss of `model` over every sample of `dataset`, leaving it untouched.
pub fn test(model: &mut Sequential, dataset: &Dataset, loss_kind: LossKind) -> Result<f32> {
    Trainer::new(loss_kind, 0, NonZeroUsize::MIN).test(model, dataset)
}
