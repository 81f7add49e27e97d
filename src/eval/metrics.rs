//! Classification metrics derived from a confusion matrix.
//!
//! Zero-denominator cases are not patched over: a precision with no
//! predictions for the class, or a recall with no support, is NaN, and
//! NaN flows through any macro average that touches it. Downstream
//! aggregation decides what to do with undefined values, not this module.

use crate::error::{Result, SentirError};
use crate::eval::confusion::ConfusionMatrix;
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a computed metric.
///
/// `Precision` and `Recall` are per-class; the other three summarize the
/// whole matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricName {
    Precision,
    Recall,
    Accuracy,
    BalancedAccuracy,
    MacroF1,
}

impl MetricName {
    /// Stable snake_case name used in report output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Precision => "precision",
            MetricName::Recall => "recall",
            MetricName::Accuracy => "accuracy",
            MetricName::BalancedAccuracy => "bal_accuracy",
            MetricName::MacroF1 => "macro_f1",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All metrics computed from one confusion matrix.
///
/// Per-class entries carry `Some(label)`; matrix-level entries carry
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    values: Vec<(Option<Label>, MetricName, f64)>,
}

impl MetricsSummary {
    /// Iterates over (class, metric, value) triples in a stable order:
    /// per-class precision then recall in universe order, then accuracy,
    /// balanced accuracy, and macro F1.
    pub fn iter(&self) -> impl Iterator<Item = &(Option<Label>, MetricName, f64)> {
        self.values.iter()
    }

    /// Looks up a single metric value.
    #[must_use]
    pub fn get(&self, class: Option<Label>, metric: MetricName) -> Option<f64> {
        self.values
            .iter()
            .find(|(c, m, _)| *c == class && *m == metric)
            .map(|&(_, _, v)| v)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes per-class precision and recall plus accuracy, balanced
/// accuracy, and macro F1 from a confusion matrix.
///
/// Undefined ratios (0/0) are NaN. Balanced accuracy is the mean of
/// per-class recall; macro F1 is the F1 of class-averaged precision and
/// recall. One undefined class makes both averages NaN.
///
/// # Errors
///
/// Returns an error if the matrix has no classes.
pub fn compute_metrics(cm: &ConfusionMatrix) -> Result<MetricsSummary> {
    let n = cm.n_classes();
    if n == 0 {
        return Err(SentirError::empty_input("confusion matrix"));
    }

    let mut values = Vec::with_capacity(2 * n + 3);
    let mut precisions = Vec::with_capacity(n);
    let mut recalls = Vec::with_capacity(n);

    for (i, &label) in cm.labels().iter().enumerate() {
        let tp = cm.get(i, i) as f64;
        let precision = tp / cm.col_sum(i) as f64;
        let recall = tp / cm.row_sum(i) as f64;

        values.push((Some(label), MetricName::Precision, precision));
        values.push((Some(label), MetricName::Recall, recall));
        precisions.push(precision);
        recalls.push(recall);
    }

    let accuracy = cm.trace() as f64 / cm.total() as f64;
    let mean_precision = precisions.iter().sum::<f64>() / n as f64;
    let mean_recall = recalls.iter().sum::<f64>() / n as f64;
    let bal_accuracy = mean_recall;
    // F1 of the class-averaged precision and recall, not an average of
    // per-class F1 scores.
    let macro_f1 = 2.0 * mean_precision * mean_recall / (mean_precision + mean_recall);

    values.push((None, MetricName::Accuracy, accuracy));
    values.push((None, MetricName::BalancedAccuracy, bal_accuracy));
    values.push((None, MetricName::MacroF1, macro_f1));

    Ok(MetricsSummary { values })
}
