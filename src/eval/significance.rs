//! Fold-matched significance testing over cross-validation output.
//!
//! For each (class, metric) pair the report carries a per-method summary
//! (mean, standard deviation, and a one-sample location test across
//! folds) and a paired t-test for every method pair. Pairing is by fold index: a fold contributes to a
//! comparison only when both methods produced a defined (non-NaN) value
//! for it, so failed cells and undefined metrics shrink the pairing
//! instead of poisoning it.

use crate::error::Result;
use crate::eval::driver::{EvalOutcome, Method};
use crate::eval::metrics::MetricName;
use crate::label::Label;
use crate::stats::{mean, sample_std, ttest_one_sample, ttest_paired};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Across-fold summary of one method on one (class, metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub method: Method,
    /// Folds with a defined value.
    pub n_folds: usize,
    pub mean: f64,
    pub std: f64,
    /// One-sample t-test of the fold values against zero; NaN with fewer
    /// than two defined folds.
    pub t_statistic: f64,
    pub p_value: f64,
}

/// Paired t-test between two methods on one (class, metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedComparison {
    pub method_a: Method,
    pub method_b: Method,
    /// Folds where both methods produced a defined value.
    pub n_pairs: usize,
    /// Mean of (a - b) over the paired folds.
    pub mean_diff: f64,
    pub t_statistic: f64,
    pub p_value: f64,
}

/// All summaries and comparisons for one (class, metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceRow {
    pub class: Option<Label>,
    pub metric: MetricName,
    pub summaries: Vec<MethodSummary>,
    pub comparisons: Vec<PairedComparison>,
}

/// Builds the significance report from a cross-validation outcome.
///
/// Rows are ordered by (class, metric); within a row, summaries follow
/// [`Method::ALL`] order and comparisons cover each method pair once.
///
/// # Errors
///
/// Propagates failures from the per-method location tests.
pub fn significance_report(outcome: &EvalOutcome) -> Result<Vec<SignificanceRow>> {
    // fold -> value maps keyed by (class, metric, method).
    type CellKey = (Option<Label>, MetricName);
    let mut grouped: BTreeMap<CellKey, BTreeMap<Method, BTreeMap<usize, f64>>> = BTreeMap::new();

    for row in &outcome.rows {
        grouped
            .entry((row.class, row.metric))
            .or_default()
            .entry(row.method)
            .or_default()
            .insert(row.fold, row.value);
    }

    let mut report = Vec::with_capacity(grouped.len());
    for ((class, metric), by_method) in &grouped {
        let mut summaries = Vec::new();
        for method in Method::ALL {
            let Some(folds) = by_method.get(&method) else {
                continue;
            };
            let defined: Vec<f64> = folds.values().copied().filter(|v| !v.is_nan()).collect();
            let (t_statistic, p_value) = if defined.len() < 2 {
                (f64::NAN, f64::NAN)
            } else {
                let test = ttest_one_sample(&defined, 0.0)?;
                (test.statistic, test.p_value)
            };
            summaries.push(MethodSummary {
                method,
                n_folds: defined.len(),
                mean: mean(&defined),
                std: sample_std(&defined),
                t_statistic,
                p_value,
            });
        }

        let mut comparisons = Vec::new();
        for (i, &method_a) in Method::ALL.iter().enumerate() {
            for &method_b in &Method::ALL[i + 1..] {
                let (Some(folds_a), Some(folds_b)) =
                    (by_method.get(&method_a), by_method.get(&method_b))
                else {
                    continue;
                };
                comparisons.push(compare_pair(method_a, folds_a, method_b, folds_b));
            }
        }

        debug!(
            "significance: class={class:?} metric={metric} with {} summaries",
            summaries.len()
        );
        report.push(SignificanceRow {
            class: *class,
            metric: *metric,
            summaries,
            comparisons,
        });
    }

    Ok(report)
}

/// Pairs two methods fold by fold and runs the paired t-test.
///
/// Fewer than two usable pairs leaves the test undefined (NaN) rather
/// than erroring, so a mostly-failed method still appears in the report.
fn compare_pair(
    method_a: Method,
    folds_a: &BTreeMap<usize, f64>,
    method_b: Method,
    folds_b: &BTreeMap<usize, f64>,
) -> PairedComparison {
    let mut values_a = Vec::new();
    let mut values_b = Vec::new();
    for (fold, &va) in folds_a {
        let Some(&vb) = folds_b.get(fold) else {
            continue;
        };
        if va.is_nan() || vb.is_nan() {
            continue;
        }
        values_a.push(va);
        values_b.push(vb);
    }

    let n_pairs = values_a.len();
    if n_pairs < 2 {
        return PairedComparison {
            method_a,
            method_b,
            n_pairs,
            mean_diff: f64::NAN,
            t_statistic: f64::NAN,
            p_value: f64::NAN,
        };
    }

    let diffs: Vec<f64> = values_a
        .iter()
        .zip(values_b.iter())
        .map(|(&a, &b)| a - b)
        .collect();

    match ttest_paired(&values_a, &values_b) {
        Ok(result) => PairedComparison {
            method_a,
            method_b,
            n_pairs,
            mean_diff: mean(&diffs),
            t_statistic: result.statistic,
            p_value: result.p_value,
        },
        Err(_) => PairedComparison {
            method_a,
            method_b,
            n_pairs,
            mean_diff: mean(&diffs),
            t_statistic: f64::NAN,
            p_value: f64::NAN,
        },
    }
}
