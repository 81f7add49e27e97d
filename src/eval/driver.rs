//! Cross-validation driver comparing sentiment methods fold by fold.
//!
//! One run evaluates every (method, fold) cell: fit on the training
//! complement, predict the held-out fold, tabulate a confusion matrix over
//! the full label universe, and compute metrics. A cell that fails is
//! recorded and skipped; the sweep continues, so one bad fit never costs
//! the whole comparison.

use crate::classify::{NbAdapter, SvmAdapter};
use crate::corpus::Record;
use crate::error::Result;
use crate::eval::confusion::ConfusionMatrix;
use crate::eval::folds::{training_indices, StratifiedKFold};
use crate::eval::metrics::{compute_metrics, MetricName};
use crate::features::{build_dfm, DfmBuilder};
use crate::label::{Label, LabelScheme};
use crate::lexicon::LexiconScorer;
use crate::traits::{EvalInput, MethodAdapter};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sentiment methods under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Dictionary and rule based scoring, no training step.
    Lexicon,
    /// Multinomial naive Bayes over the DFM.
    Bayes,
    /// One-vs-rest linear SVM over the DFM.
    Svm,
}

impl Method {
    /// All methods in report order.
    pub const ALL: [Method; 3] = [Method::Lexicon, Method::Bayes, Method::Svm];

    /// Stable snake_case name used in report output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Lexicon => "lexicon",
            Method::Bayes => "bayes",
            Method::Svm => "svm",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric value from one (method, fold) cell.
///
/// Per-class metrics carry `Some(class)`; matrix-level metrics carry
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub method: Method,
    pub fold: usize,
    pub class: Option<Label>,
    pub metric: MetricName,
    pub value: f64,
}

/// A (method, fold) cell whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCell {
    pub method: Method,
    pub fold: usize,
    pub error: String,
}

/// Everything a cross-validation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalOutcome {
    /// Metric rows from every successful cell, ordered by (method, fold).
    pub rows: Vec<MetricsRow>,
    /// Cells that errored, ordered by (method, fold).
    pub failures: Vec<FailedCell>,
}

impl EvalOutcome {
    /// Values of one (method, metric, class) triple across folds, in fold
    /// order. Folds whose cell failed are simply absent.
    #[must_use]
    pub fn fold_values(
        &self,
        method: Method,
        class: Option<Label>,
        metric: MetricName,
    ) -> Vec<(usize, f64)> {
        self.rows
            .iter()
            .filter(|r| r.method == method && r.class == class && r.metric == metric)
            .map(|r| (r.fold, r.value))
            .collect()
    }
}

/// Stratified cross-validation comparison of all sentiment methods.
///
/// # Examples
///
/// ```no_run
/// use sentir::corpus::load_ground_truth;
/// use sentir::eval::CrossValidation;
/// use sentir::label::LabelScheme;
///
/// # fn main() -> sentir::error::Result<()> {
/// let report = load_ground_truth("posts.tsv")?;
/// let outcome = CrossValidation::new(LabelScheme::Three)
///     .with_n_splits(10)
///     .with_seed(42)
///     .run(&report.records)?;
/// println!("{} rows, {} failed cells", outcome.rows.len(), outcome.failures.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidation {
    scheme: LabelScheme,
    n_splits: usize,
    seed: u64,
    min_doc_freq: usize,
}

impl CrossValidation {
    /// Creates a driver with 10 folds, seed 0, and the default DFM trim.
    #[must_use]
    pub fn new(scheme: LabelScheme) -> Self {
        Self {
            scheme,
            n_splits: 10,
            seed: 0,
            min_doc_freq: crate::features::DEFAULT_MIN_DOC_FREQ,
        }
    }

    /// Sets the number of folds.
    #[must_use]
    pub fn with_n_splits(mut self, n_splits: usize) -> Self {
        self.n_splits = n_splits;
        self
    }

    /// Sets the fold shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the minimum document frequency for DFM terms.
    #[must_use]
    pub fn with_min_doc_freq(mut self, min_doc_freq: usize) -> Self {
        self.min_doc_freq = min_doc_freq;
        self
    }

    /// Runs the full comparison sweep.
    ///
    /// # Errors
    ///
    /// Returns an error for run-level problems only: an empty corpus, an
    /// undefined ground-truth label, or a degenerate fold configuration.
    /// Per-cell failures are collected in the outcome instead.
    pub fn run(&self, records: &[Record]) -> Result<EvalOutcome> {
        let builder = DfmBuilder::new().with_min_doc_freq(self.min_doc_freq);
        let (dfm, labels) = build_dfm(records, self.scheme, &builder)?;
        let folds = StratifiedKFold::new(self.n_splits)
            .with_seed(self.seed)
            .split(&labels)?;

        info!(
            "cross-validation: {} records, {} terms, {} folds, scheme {:?}",
            records.len(),
            dfm.n_terms(),
            folds.len(),
            self.scheme
        );

        let input = EvalInput {
            records,
            dfm: &dfm,
            labels: &labels,
            scheme: self.scheme,
        };

        let lexicon = LexiconScorer::new();
        let bayes = NbAdapter::new();
        let svm = SvmAdapter::new();
        let adapters: Vec<(Method, &dyn MethodAdapter)> = vec![
            (Method::Lexicon, &lexicon),
            (Method::Bayes, &bayes),
            (Method::Svm, &svm),
        ];

        Ok(run_cells(&adapters, &folds, &input))
    }
}

/// Evaluates every (method, fold) cell over fixed folds and shared input.
///
/// Cells are independent, so they run in parallel; results are sorted back
/// into (method, fold) order for deterministic output.
fn run_cells(
    adapters: &[(Method, &dyn MethodAdapter)],
    folds: &[Vec<usize>],
    input: &EvalInput<'_>,
) -> EvalOutcome {
    let n_samples = input.labels.len();
    let universe = input.scheme.universe();

    let cells: Vec<(Method, &dyn MethodAdapter, usize)> = adapters
        .iter()
        .flat_map(|&(method, adapter)| {
            (0..folds.len()).map(move |fold| (method, adapter, fold))
        })
        .collect();

    let results: Vec<std::result::Result<Vec<MetricsRow>, FailedCell>> = cells
        .par_iter()
        .map(|&(method, adapter, fold)| {
            evaluate_cell(method, fold, adapter, folds, input, n_samples, universe).map_err(
                |err| FailedCell {
                    method,
                    fold,
                    error: err.to_string(),
                },
            )
        })
        .collect();

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(cell_rows) => rows.extend(cell_rows),
            Err(failure) => {
                warn!(
                    "cell failed: method={} fold={}: {}",
                    failure.method, failure.fold, failure.error
                );
                failures.push(failure);
            }
        }
    }

    rows.sort_by_key(|r| (r.method, r.fold));
    failures.sort_by_key(|f| (f.method, f.fold));
    EvalOutcome { rows, failures }
}

fn evaluate_cell(
    method: Method,
    fold: usize,
    adapter: &dyn MethodAdapter,
    folds: &[Vec<usize>],
    input: &EvalInput<'_>,
    n_samples: usize,
    universe: &[Label],
) -> Result<Vec<MetricsRow>> {
    let test_idx = &folds[fold];
    let train_idx = training_indices(folds, fold, n_samples);

    let predicted = adapter.fit_predict(&train_idx, test_idx, input)?;
    let actual: Vec<Label> = test_idx.iter().map(|&i| input.labels[i]).collect();

    let cm = ConfusionMatrix::from_labels(&actual, &predicted, universe)?;
    let summary = compute_metrics(&cm)?;

    Ok(summary
        .iter()
        .map(|&(class, metric, value)| MetricsRow {
            method,
            fold,
            class,
            metric,
            value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentirError;

    fn record(id: i64, sentiment: f64, text: &str) -> Record {
        Record {
            id,
            sentiment,
            text: text.to_string(),
        }
    }

    fn small_corpus() -> Vec<Record> {
        let mut records = Vec::new();
        let positive = [
            "what a great wonderful day",
            "this is excellent and amazing",
            "love the brilliant result",
            "superb fantastic work here",
        ];
        let negative = [
            "what a terrible awful day",
            "this is horrible and disgusting",
            "hate the dreadful result",
            "worst pathetic work here",
        ];
        let neutral = [
            "the chair is in the room",
            "a door and a window",
            "the report covers last week",
            "meeting starts at nine",
        ];
        for (i, text) in positive.iter().enumerate() {
            records.push(record(i as i64, 0.8, text));
        }
        for (i, text) in negative.iter().enumerate() {
            records.push(record(10 + i as i64, -0.8, text));
        }
        for (i, text) in neutral.iter().enumerate() {
            records.push(record(20 + i as i64, 0.0, text));
        }
        records
    }

    struct PerfectOracle;

    impl MethodAdapter for PerfectOracle {
        fn fit_predict(
            &self,
            _train_idx: &[usize],
            test_idx: &[usize],
            input: &EvalInput<'_>,
        ) -> Result<Vec<Label>> {
            Ok(test_idx.iter().map(|&i| input.labels[i]).collect())
        }
    }

    struct AlwaysFails;

    impl MethodAdapter for AlwaysFails {
        fn fit_predict(
            &self,
            _train_idx: &[usize],
            _test_idx: &[usize],
            _input: &EvalInput<'_>,
        ) -> Result<Vec<Label>> {
            Err(SentirError::Other("synthetic failure".into()))
        }
    }

    fn input_over<'a>(
        records: &'a [Record],
        dfm: &'a crate::features::Dfm,
        labels: &'a [Label],
    ) -> EvalInput<'a> {
        EvalInput {
            records,
            dfm,
            labels,
            scheme: LabelScheme::Three,
        }
    }

    #[test]
    fn test_run_produces_rows_for_all_cells() {
        let records = small_corpus();
        let outcome = CrossValidation::new(LabelScheme::Three)
            .with_n_splits(4)
            .with_min_doc_freq(1)
            .run(&records)
            .unwrap();

        assert!(outcome.failures.is_empty());
        // 3 methods x 4 folds x 9 rows (2 per class + 3 scalars).
        assert_eq!(outcome.rows.len(), 3 * 4 * 9);
    }

    #[test]
    fn test_run_is_deterministic() {
        let records = small_corpus();
        let driver = CrossValidation::new(LabelScheme::Three)
            .with_n_splits(3)
            .with_seed(7)
            .with_min_doc_freq(1);
        let a = driver.run(&records).unwrap();
        let b = driver.run(&records).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_perfect_oracle_scores_one() {
        let records = small_corpus();
        let builder = DfmBuilder::new().with_min_doc_freq(1);
        let (dfm, labels) = build_dfm(&records, LabelScheme::Three, &builder).unwrap();
        let input = input_over(&records, &dfm, &labels);
        let folds = StratifiedKFold::new(4).split(&labels).unwrap();

        let oracle = PerfectOracle;
        let adapters: Vec<(Method, &dyn MethodAdapter)> = vec![(Method::Lexicon, &oracle)];
        let outcome = run_cells(&adapters, &folds, &input);

        assert!(outcome.failures.is_empty());
        for (_, value) in outcome.fold_values(Method::Lexicon, None, MetricName::Accuracy) {
            assert_eq!(value, 1.0);
        }
        for (_, value) in outcome.fold_values(Method::Lexicon, None, MetricName::MacroF1) {
            assert_eq!(value, 1.0);
        }
    }

    #[test]
    fn test_failure_isolated_to_one_method() {
        let records = small_corpus();
        let builder = DfmBuilder::new().with_min_doc_freq(1);
        let (dfm, labels) = build_dfm(&records, LabelScheme::Three, &builder).unwrap();
        let input = input_over(&records, &dfm, &labels);
        let folds = StratifiedKFold::new(4).split(&labels).unwrap();

        let oracle = PerfectOracle;
        let broken = AlwaysFails;
        let adapters: Vec<(Method, &dyn MethodAdapter)> =
            vec![(Method::Lexicon, &oracle), (Method::Bayes, &broken)];
        let outcome = run_cells(&adapters, &folds, &input);

        // Every bayes cell failed; every lexicon cell survived.
        assert_eq!(outcome.failures.len(), 4);
        for failure in &outcome.failures {
            assert_eq!(failure.method, Method::Bayes);
            assert!(failure.error.contains("synthetic failure"));
        }
        assert_eq!(outcome.rows.len(), 4 * 9);
        assert!(outcome.rows.iter().all(|r| r.method == Method::Lexicon));
    }

    #[test]
    fn test_rows_sorted_by_method_then_fold() {
        let records = small_corpus();
        let outcome = CrossValidation::new(LabelScheme::Three)
            .with_n_splits(3)
            .with_min_doc_freq(1)
            .run(&records)
            .unwrap();

        let keys: Vec<(Method, usize)> = outcome.rows.iter().map(|r| (r.method, r.fold)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_fold_values_in_fold_order() {
        let records = small_corpus();
        let outcome = CrossValidation::new(LabelScheme::Three)
            .with_n_splits(4)
            .with_min_doc_freq(1)
            .run(&records)
            .unwrap();

        let values = outcome.fold_values(Method::Bayes, None, MetricName::Accuracy);
        let folds: Vec<usize> = values.iter().map(|&(f, _)| f).collect();
        assert_eq!(folds, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_undefined_ground_truth_is_fatal() {
        let mut records = small_corpus();
        records.push(record(99, f64::NAN, "unscorable"));
        let err = CrossValidation::new(LabelScheme::Three)
            .with_n_splits(3)
            .with_min_doc_freq(1)
            .run(&records)
            .unwrap_err();
        assert!(err.to_string().contains("classification undefined"));
    }

    #[test]
    fn test_method_names_stable() {
        assert_eq!(Method::Lexicon.as_str(), "lexicon");
        assert_eq!(Method::Bayes.as_str(), "bayes");
        assert_eq!(Method::Svm.to_string(), "svm");
    }
}
