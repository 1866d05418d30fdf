use std::num::NonZeroUsize;

use log::{debug, info, warn};
use ndarray::Array1;

use crate::{
    arch::{
        Sequential,
        loss::{Loss, LossKind},
    },
    dataset::{Batch, Dataset, Remainder},
    error::{MlErr, Result, ensure_len},
};

/// Mini-batch gradient descent over a `Sequential` chain.
///
/// Per batch, every sample is forwarded and its loss gradient accumulated; the sums are averaged
/// by the batch length and a single backward pass updates the model. The loss of an epoch is the
/// averaged loss of its last batch.
#[derive(Debug, Clone)]
pub struct Trainer {
    loss_kind: LossKind,
    epochs: usize,
    batch_size: NonZeroUsize,
    remainder: Remainder,
}

impl Trainer {
    /// Creates a new `Trainer` that drops trailing partial batches.
    ///
    /// # Arguments
    /// * `loss_kind` - The loss function to minimize.
    /// * `epochs` - The amount of passes over the dataset, `0` trains nothing.
    /// * `batch_size` - The amount of samples averaged per parameter update.
    pub fn new(loss_kind: LossKind, epochs: usize, batch_size: NonZeroUsize) -> Self {
        Self {
            loss_kind,
            epochs,
            batch_size,
            remainder: Remainder::default(),
        }
    }

    /// Sets the policy for a trailing partial batch.
    pub fn with_remainder(mut self, remainder: Remainder) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn loss_kind(&self) -> LossKind {
        self.loss_kind
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    pub fn remainder(&self) -> Remainder {
        self.remainder
    }

    /// Trains `model` on `dataset`.
    ///
    /// # Returns
    /// The loss of the last epoch, `0.0` if there are no epochs.
    pub fn train(&self, model: &mut Sequential, dataset: &Dataset) -> Result<f32> {
        let losses = self.train_epochs(model, dataset)?;
        Ok(losses.last().copied().unwrap_or_default())
    }

    /// Trains `model` on `dataset`.
    ///
    /// The dataset must fit the model even with no epochs; the batch size is only checked
    /// against the dataset when there is something to train.
    ///
    /// # Returns
    /// The loss of every epoch, in order.
    pub fn train_epochs(&self, model: &mut Sequential, dataset: &Dataset) -> Result<Vec<f32>> {
        self.check(model, dataset)?;
        if self.epochs == 0 {
            return Ok(Vec::new());
        }

        let batch_size = self.batch_size.get();
        if batch_size > dataset.len() {
            return Err(MlErr::InvalidInput(
                "the batch size can't be larger than the dataset",
            ));
        }

        let dropped = dataset.len() % batch_size;
        if dropped > 0 && self.remainder == Remainder::Drop {
            warn!(
                dropped = dropped, batch_size = batch_size;
                "trailing samples don't fill a batch, skipping them"
            );
        }

        let mut losses = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            let mut epoch_loss = 0.0;

            for (i, batch) in dataset.batches(self.batch_size, self.remainder).enumerate() {
                let (loss, grad) = self.batch_gradient(model, &batch)?;
                model.backward(grad.view())?;

                debug!(epoch = epoch, batch = i, len = batch.len(), loss = loss; "batch finished");
                epoch_loss = loss;
            }

            info!(epoch = epoch, loss = epoch_loss; "epoch finished");
            losses.push(epoch_loss);
        }

        Ok(losses)
    }

    /// Forwards every sample of a batch and averages their losses and loss gradients.
    ///
    /// The model's parameters are left untouched, but its activation caches end up holding the
    /// last sample's forward pass.
    ///
    /// # Returns
    /// The mean loss and the mean gradient with respect to the model's output.
    pub fn batch_gradient(
        &self,
        model: &mut Sequential,
        batch: &Batch<'_>,
    ) -> Result<(f32, Array1<f32>)> {
        let loss_fn = Loss::new(self.loss_kind, model.out_dim());
        let mut loss = 0.0;
        let mut grad = Array1::zeros(model.out_dim());

        for (x, y) in batch.samples() {
            let y_pred = model.forward(x)?;
            loss += loss_fn.loss(y_pred.view(), y)?;
            grad += &loss_fn.loss_prime(y_pred.view(), y)?;
        }

        let n = batch.len() as f32;
        grad /= n;

        Ok((loss / n, grad))
    }

    /// Evaluates `model` on `dataset` without updating it.
    ///
    /// # Returns
    /// The mean loss over every sample.
    pub fn test(&self, model: &mut Sequential, dataset: &Dataset) -> Result<f32> {
        self.check(model, dataset)?;

        let loss_fn = Loss::new(self.loss_kind, model.out_dim());
        let mut loss = 0.0;

        for (x, y) in dataset.samples() {
            let y_pred = model.forward(x)?;
            loss += loss_fn.loss(y_pred.view(), y)?;
        }

        let loss = loss / dataset.len() as f32;
        info!(samples = dataset.len(), loss = loss; "test finished");
        Ok(loss)
    }

    fn check(&self, model: &Sequential, dataset: &Dataset) -> Result<()> {
        ensure_len("dataset samples", dataset.x_size(), model.in_dim())?;
        ensure_len("dataset labels", dataset.y_size(), model.out_dim())
    }
}
