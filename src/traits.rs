//! Core traits for sentiment method adapters.
//!
//! Every classification approach under comparison implements the same
//! train/test contract so the cross-validation driver can treat them
//! uniformly.

use crate::corpus::Record;
use crate::error::Result;
use crate::features::Dfm;
use crate::label::{Label, LabelScheme};

/// Shared immutable inputs for one cross-validation cell.
///
/// Built once per run; every (method, fold) evaluation reads it without
/// mutation, so fold evaluations can proceed in parallel.
#[derive(Debug, Clone, Copy)]
pub struct EvalInput<'a> {
    /// Full record set, index-aligned with the DFM rows.
    pub records: &'a [Record],
    /// Document-feature matrix over all records.
    pub dfm: &'a Dfm,
    /// Ground-truth label per record, index-aligned.
    pub labels: &'a [Label],
    /// Active label scheme.
    pub scheme: LabelScheme,
}

/// Contract shared by all sentiment method adapters.
///
/// Given training and test row indices into the shared input, produce one
/// predicted label per test row, in test order. Predictions must stay
/// inside the scheme's label universe regardless of which labels appeared
/// in training. Stateless methods (the lexicon scorer) accept the training
/// indices for interface symmetry and ignore them.
pub trait MethodAdapter: Send + Sync {
    /// Fits on the training rows (if applicable) and predicts the test rows.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting or prediction fails; the driver treats
    /// such an error as a failed (method, fold) cell, not a fatal condition.
    fn fit_predict(
        &self,
        train_idx: &[usize],
        test_idx: &[usize],
        input: &EvalInput<'_>,
    ) -> Result<Vec<Label>>;
}
