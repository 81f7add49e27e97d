//! Confusion matrix construction over an explicit label universe.

use crate::error::{Result, SentirError};
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// A square cross-tabulation of actual vs. predicted labels.
///
/// Both axes always range over the full label universe supplied at build
/// time, not just the labels observed in a fold: a small test fold that
/// omits a class still yields a matrix of the same shape, with zero
/// rows/columns, so metric math stays aligned across folds.
///
/// Rows are actual labels, columns are predicted labels.
///
/// # Examples
///
/// ```
/// use sentir::eval::ConfusionMatrix;
///
/// let actual = vec![-1, 0, 1, 1];
/// let predicted = vec![-1, 1, 1, 0];
/// let cm = ConfusionMatrix::from_labels(&actual, &predicted, &[-1, 0, 1]).unwrap();
/// assert_eq!(cm.n_classes(), 3);
/// assert_eq!(cm.trace(), 2);
/// assert_eq!(cm.total(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<Label>,
    counts: Vec<usize>,
}

impl ConfusionMatrix {
    /// Cross-tabulates actual against predicted labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequences differ in length or contain a
    /// label outside `universe`.
    pub fn from_labels(
        actual: &[Label],
        predicted: &[Label],
        universe: &[Label],
    ) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(SentirError::DimensionMismatch {
                expected: format!("{} actual labels", actual.len()),
                actual: format!("{} predicted labels", predicted.len()),
            });
        }

        let n = universe.len();
        let index_of = |label: Label| -> Result<usize> {
            universe
                .iter()
                .position(|&l| l == label)
                .ok_or(SentirError::LabelOutOfUniverse { label })
        };

        let mut counts = vec![0usize; n * n];
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            let row = index_of(a)?;
            let col = index_of(p)?;
            counts[row * n + col] += 1;
        }

        Ok(Self {
            labels: universe.to_vec(),
            counts,
        })
    }

    /// The ordered label universe indexing both axes.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of classes (rows and columns).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Count at (actual index, predicted index).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, actual_idx: usize, predicted_idx: usize) -> usize {
        self.counts[actual_idx * self.labels.len() + predicted_idx]
    }

    /// Sum of the diagonal (correct predictions).
    #[must_use]
    pub fn trace(&self) -> usize {
        (0..self.n_classes()).map(|i| self.get(i, i)).sum()
    }

    /// Total number of tabulated pairs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Sum of row `actual_idx` (support of the actual class).
    #[must_use]
    pub fn row_sum(&self, actual_idx: usize) -> usize {
        (0..self.n_classes()).map(|j| self.get(actual_idx, j)).sum()
    }

    /// Sum of column `predicted_idx` (times the class was predicted).
    #[must_use]
    pub fn col_sum(&self, predicted_idx: usize) -> usize {
        (0..self.n_classes()).map(|i| self.get(i, predicted_idx)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_over_full_universe() {
        // Only class 1 observed; matrix must still be 3x3.
        let cm = ConfusionMatrix::from_labels(&[1, 1], &[1, 1], &[-1, 0, 1]).unwrap();
        assert_eq!(cm.n_classes(), 3);
        assert_eq!(cm.labels(), &[-1, 0, 1]);
        assert_eq!(cm.get(2, 2), 2);
        assert_eq!(cm.row_sum(0), 0);
        assert_eq!(cm.col_sum(1), 0);
    }

    #[test]
    fn test_counts_placed_correctly() {
        let actual = vec![-1, -1, 0, 1];
        let predicted = vec![-1, 0, 0, -1];
        let cm = ConfusionMatrix::from_labels(&actual, &predicted, &[-1, 0, 1]).unwrap();
        assert_eq!(cm.get(0, 0), 1); // -1 -> -1
        assert_eq!(cm.get(0, 1), 1); // -1 -> 0
        assert_eq!(cm.get(1, 1), 1); // 0 -> 0
        assert_eq!(cm.get(2, 0), 1); // 1 -> -1
        assert_eq!(cm.total(), 4);
        assert_eq!(cm.trace(), 2);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = ConfusionMatrix::from_labels(&[1, 0], &[1], &[-1, 0, 1]).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[test]
    fn test_out_of_universe_actual_is_error() {
        assert!(ConfusionMatrix::from_labels(&[2], &[1], &[-1, 0, 1]).is_err());
    }

    #[test]
    fn test_out_of_universe_predicted_is_error() {
        assert!(ConfusionMatrix::from_labels(&[1], &[-2], &[-1, 0, 1]).is_err());
    }

    #[test]
    fn test_empty_sequences_yield_zero_matrix() {
        let cm = ConfusionMatrix::from_labels(&[], &[], &[-1, 0, 1]).unwrap();
        assert_eq!(cm.n_classes(), 3);
        assert_eq!(cm.total(), 0);
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let actual = vec![-2, -1, 0, 1, 2];
        let predicted = vec![-2, 0, 0, 2, 2];
        let universe = [-2, -1, 0, 1, 2];
        let a = ConfusionMatrix::from_labels(&actual, &predicted, &universe).unwrap();
        let b = ConfusionMatrix::from_labels(&actual, &predicted, &universe).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_and_col_sums() {
        let actual = vec![1, 1, 1, 0];
        let predicted = vec![1, 0, 1, 0];
        let cm = ConfusionMatrix::from_labels(&actual, &predicted, &[-1, 0, 1]).unwrap();
        assert_eq!(cm.row_sum(2), 3);
        assert_eq!(cm.col_sum(1), 2);
        assert_eq!(cm.row_sum(0), 0);
    }
}
