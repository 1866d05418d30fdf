use std::num::NonZeroUsize;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{MlErr, Result, ensure_len};

/// What to do with the trailing samples that don't fill a whole batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remainder {
    /// Skip them.
    #[default]
    Drop,
    /// Process them as a shorter batch, averaged by its own length.
    Short,
}

/// An in-memory supervised dataset, one sample and one label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl Dataset {
    /// Creates a new `Dataset` from flat row-major buffers.
    ///
    /// # Arguments
    /// * `samples` - The input vectors, `x_size` values each.
    /// * `x_size` - The length of an input vector.
    /// * `labels` - The target vectors, `y_size` values each.
    /// * `y_size` - The length of a target vector.
    ///
    /// # Returns
    /// The dataset, or an error if the buffers are empty, aren't made of whole rows or hold a
    /// different amount of rows.
    pub fn new(samples: Vec<f32>, x_size: usize, labels: Vec<f32>, y_size: usize) -> Result<Self> {
        if x_size == 0 || y_size == 0 || samples.is_empty() {
            return Err(MlErr::InvalidInput("the dataset must be non-empty"));
        }

        let len = samples.len() / x_size;
        ensure_len("dataset samples", samples.len(), len * x_size)?;
        ensure_len("dataset labels", labels.len(), len * y_size)?;

        let x = Array2::from_shape_vec((len, x_size), samples)
            .map_err(|_| MlErr::InvalidInput("the samples don't fit their shape"))?;
        let y = Array2::from_shape_vec((len, y_size), labels)
            .map_err(|_| MlErr::InvalidInput("the labels don't fit their shape"))?;

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` from rows laid out as `[x_0, .., x_n, y_0, .., y_m]`.
    ///
    /// # Arguments
    /// * `data` - The interleaved rows.
    /// * `x_size` - The length of an input vector.
    /// * `y_size` - The length of a target vector.
    pub fn from_interleaved(data: Vec<f32>, x_size: usize, y_size: usize) -> Result<Self> {
        let row = x_size + y_size;
        if x_size == 0 || y_size == 0 || data.is_empty() {
            return Err(MlErr::InvalidInput("the dataset must be non-empty"));
        }

        let len = data.len() / row;
        ensure_len("dataset rows", data.len(), len * row)?;

        let rows = ArrayView2::from_shape((len, row), &data)
            .map_err(|_| MlErr::InvalidInput("the rows don't fit their shape"))?;
        let (x, y) = rows.split_at(Axis(1), x_size);

        Ok(Self {
            x: x.to_owned(),
            y: y.to_owned(),
        })
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x_size(&self) -> usize {
        self.x.ncols()
    }

    pub fn y_size(&self) -> usize {
        self.y.ncols()
    }

    /// Returns the `i`-th sample and its label, or `None` if out of bounds.
    pub fn sample(&self, i: usize) -> Option<(ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        if i >= self.len() {
            return None;
        }

        Some((self.x.row(i), self.y.row(i)))
    }

    /// Iterates every sample in order.
    pub fn samples(&self) -> impl Iterator<Item = (ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        self.x.outer_iter().zip(self.y.outer_iter())
    }

    /// Splits the dataset into contiguous batches.
    ///
    /// # Arguments
    /// * `batch_size` - The amount of samples per batch.
    /// * `remainder` - What to do with a trailing partial batch.
    pub fn batches(
        &self,
        batch_size: NonZeroUsize,
        remainder: Remainder,
    ) -> impl Iterator<Item = Batch<'_>> {
        let size = batch_size.get();

        self.x
            .axis_chunks_iter(Axis(0), size)
            .zip(self.y.axis_chunks_iter(Axis(0), size))
            .filter(move |(x, _)| remainder == Remainder::Short || x.nrows() == size)
            .map(|(x, y)| Batch { x, y })
    }
}

/// A borrowed run of contiguous samples.
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    x: ArrayView2<'a, f32>,
    y: ArrayView2<'a, f32>,
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn samples(&self) -> impl Iterator<Item = (ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        self.x.outer_iter().zip(self.y.outer_iter())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn five() -> Dataset {
        let samples = (0..10).map(|i| i as f32).collect();
        let labels = (0..5).map(|i| 100. + i as f32).collect();
        Dataset::new(samples, 2, labels, 1).unwrap()
    }

    #[test]
    fn rows_and_sizes() {
        let ds = five();
        assert_eq!((ds.len(), ds.x_size(), ds.y_size()), (5, 2, 1));

        let (x, y) = ds.sample(3).unwrap();
        assert_eq!(x, array![6., 7.]);
        assert_eq!(y, array![103.]);
        assert!(ds.sample(5).is_none());
    }

    #[test]
    fn interleaved_rows_are_split() {
        let ds = Dataset::from_interleaved(vec![0., 1., 1., 1., 0., 1.], 2, 1).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sample(1).unwrap().0, array![1., 0.]);
        assert_eq!(ds.sample(1).unwrap().1, array![1.]);
    }

    #[test]
    fn rejects_ragged_or_mismatched_buffers() {
        assert!(Dataset::new(vec![0.; 5], 2, vec![0.; 2], 1).is_err());
        assert!(Dataset::new(vec![0.; 4], 2, vec![0.; 3], 1).is_err());
        assert!(Dataset::from_interleaved(vec![0.; 7], 2, 1).is_err());
        assert!(matches!(
            Dataset::new(vec![], 2, vec![], 1),
            Err(MlErr::InvalidInput(_))
        ));
    }

    #[test]
    fn drop_skips_the_partial_batch() {
        let ds = five();
        let lens: Vec<_> = ds.batches(nz(2), Remainder::Drop).map(|b| b.len()).collect();
        assert_eq!(lens, [2, 2]);
    }

    #[test]
    fn short_keeps_the_partial_batch() {
        let ds = five();
        let batches: Vec<_> = ds.batches(nz(2), Remainder::Short).collect();
        assert_eq!(batches.iter().map(Batch::len).collect::<Vec<_>>(), [2, 2, 1]);

        let (x, y) = batches[2].samples().next().unwrap();
        assert_eq!(x, array![8., 9.]);
        assert_eq!(y, array![104.]);
    }

    #[test]
    fn batches_are_contiguous_and_ordered() {
        let ds = five();
        let firsts: Vec<_> = ds
            .batches(nz(2), Remainder::Drop)
            .map(|b| b.samples().next().unwrap().1[0])
            .collect();
        assert_eq!(firsts, [100., 102.]);
    }
}
