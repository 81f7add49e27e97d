//! Label-stratified k-fold partitioning.

use crate::error::{Result, SentirError};
use crate::label::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Stratified K-Fold partitioner.
///
/// Splits row indices into k disjoint folds whose union covers every index
/// exactly once, while approximating the overall class distribution in
/// each fold. Splitting is deterministic for a given (labels, k, seed).
///
/// # Examples
///
/// ```
/// use sentir::eval::StratifiedKFold;
///
/// let labels = vec![-1, -1, -1, 0, 0, 0, 1, 1, 1];
/// let folds = StratifiedKFold::new(3).with_seed(42).split(&labels).unwrap();
/// assert_eq!(folds.len(), 3);
/// assert_eq!(folds.iter().map(Vec::len).sum::<usize>(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    seed: u64,
}

impl StratifiedKFold {
    /// Creates a partitioner with `n_splits` folds and seed 0.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits, seed: 0 }
    }

    /// Sets the shuffle seed for reproducible splits.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of folds.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Partitions `0..labels.len()` into k folds, stratified by label.
    ///
    /// Indices of each class are shuffled, then dealt round-robin across
    /// folds with a cursor that carries over between classes, so per-class
    /// fold counts differ by at most one and small classes do not pile
    /// into the leading folds. Each returned fold is sorted ascending.
    ///
    /// # Errors
    ///
    /// A degenerate configuration is a fatal error reported before any
    /// evaluation: k < 2, k > sample count, or an assembly that leaves
    /// some fold empty.
    pub fn split(&self, labels: &[Label]) -> Result<Vec<Vec<usize>>> {
        let n_samples = labels.len();
        if self.n_splits < 2 {
            return Err(SentirError::invalid_config(
                "n_splits",
                self.n_splits,
                ">= 2",
            ));
        }
        if self.n_splits > n_samples {
            return Err(SentirError::invalid_config(
                "n_splits",
                self.n_splits,
                &format!("<= sample count ({n_samples})"),
            ));
        }

        // BTreeMap keeps class iteration order stable across runs.
        let mut class_indices: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            class_indices.entry(label).or_default().push(i);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut folds: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];

        let mut cursor = 0usize;
        for indices in class_indices.values_mut() {
            indices.shuffle(&mut rng);
            for &idx in indices.iter() {
                folds[cursor % self.n_splits].push(idx);
                cursor += 1;
            }
        }

        for fold in &mut folds {
            fold.sort_unstable();
        }

        if let Some(pos) = folds.iter().position(Vec::is_empty) {
            return Err(SentirError::invalid_config(
                "fold assembly",
                format!("fold {pos} is empty"),
                "every fold non-empty",
            ));
        }

        Ok(folds)
    }
}

/// Returns the complement of fold `fold_idx` as a sorted training index set.
#[must_use]
pub fn training_indices(folds: &[Vec<usize>], fold_idx: usize, n_samples: usize) -> Vec<usize> {
    let mut in_test = vec![false; n_samples];
    for &idx in &folds[fold_idx] {
        in_test[idx] = true;
    }
    (0..n_samples).filter(|&i| !in_test[i]).collect()
}
