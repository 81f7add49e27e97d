//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sentir::prelude::*;
//! ```

pub use crate::classify::{LinearSvm, MultinomialNb};
pub use crate::corpus::{load_ground_truth, LoadReport, Record};
pub use crate::error::{Result, SentirError};
pub use crate::eval::{
    significance_report, ConfusionMatrix, CrossValidation, EvalOutcome, Method, MetricName,
    StratifiedKFold,
};
pub use crate::features::{build_dfm, Dfm, DfmBuilder};
pub use crate::label::{Label, LabelScheme};
pub use crate::lexicon::LexiconScorer;
pub use crate::primitives::SparseMatrix;
pub use crate::report::{save_metrics_tsv, save_significance_tsv};
pub use crate::traits::{EvalInput, MethodAdapter};
