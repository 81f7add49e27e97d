//! Trained classification methods.
//!
//! This module implements the two trained sentiment methods under
//! comparison:
//! - Multinomial Naive Bayes over bag-of-words term counts
//! - Linear Support Vector Machine with one-vs-rest decomposition
//!
//! Both are fitted against an explicit label universe so their
//! predictions remain square-tabulatable even when some class never
//! appears in a training partition.

use crate::error::{Result, SentirError};
use crate::label::Label;
use crate::primitives::SparseMatrix;
use crate::traits::{EvalInput, MethodAdapter};
use serde::{Deserialize, Serialize};

/// Log-prior assigned to classes absent from training. Low enough that an
/// absent class is never predicted unless every class is absent, without
/// poisoning score arithmetic the way -inf would.
const ABSENT_CLASS_LOG_PRIOR: f64 = -1e9;

/// Decision value for one-vs-rest problems with no positive examples.
const ABSENT_CLASS_MARGIN: f64 = -1e9;

/// Multinomial Naive Bayes classifier for term-count features.
///
/// Fits per-class log priors and Laplace-smoothed term log probabilities,
/// scoring in log space. The class set is pinned to the supplied label
/// universe: a class with no training documents gets a floor log-prior
/// (probability treated as zero) rather than crashing.
///
/// # Examples
///
/// ```
/// use sentir::classify::MultinomialNb;
/// use sentir::primitives::SparseMatrix;
///
/// let x = SparseMatrix::from_rows(2, vec![
///     vec![(0, 3.0)],
///     vec![(1, 2.0)],
/// ]).expect("valid rows");
/// let y = vec![-1, 1];
///
/// let mut model = MultinomialNb::new();
/// model.fit(&x, &y, &[-1, 0, 1]).expect("valid training data");
/// let preds = model.predict(&x).expect("model is fitted");
/// assert_eq!(preds, vec![-1, 1]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Laplace smoothing constant.
    alpha: f64,
    /// Class labels, pinned to the universe supplied at fit time.
    classes: Option<Vec<Label>>,
    /// Log prior per class.
    log_priors: Option<Vec<f64>>,
    /// Log term probability per class: `feature_log_prob[class][term]`.
    feature_log_prob: Option<Vec<Vec<f64>>>,
}

impl MultinomialNb {
    /// Creates a classifier with Laplace smoothing alpha = 1.0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            classes: None,
            log_priors: None,
            feature_log_prob: None,
        }
    }

    /// Sets the smoothing constant.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Fits the classifier on term counts and labels over a fixed universe.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, a row/label count mismatch, or a
    /// training label outside the universe.
    pub fn fit(&mut self, x: &SparseMatrix, y: &[Label], universe: &[Label]) -> Result<()> {
        let (n_samples, n_terms) = x.shape();
        if n_samples == 0 {
            return Err(SentirError::empty_input("training rows"));
        }
        if y.len() != n_samples {
            return Err(SentirError::dimension_mismatch(
                "training rows",
                n_samples,
                y.len(),
            ));
        }

        let n_classes = universe.len();
        let class_index = |label: Label| -> Result<usize> {
            universe
                .iter()
                .position(|&l| l == label)
                .ok_or(SentirError::LabelOutOfUniverse { label })
        };

        let mut doc_counts = vec![0usize; n_classes];
        let mut term_counts = vec![vec![0.0f64; n_terms]; n_classes];
        for (row, &label) in y.iter().enumerate() {
            let c = class_index(label)?;
            doc_counts[c] += 1;
            for (col, value) in x.row_iter(row) {
                term_counts[c][col] += value;
            }
        }

        let log_priors: Vec<f64> = doc_counts
            .iter()
            .map(|&n_c| {
                if n_c == 0 {
                    ABSENT_CLASS_LOG_PRIOR
                } else {
                    (n_c as f64 / n_samples as f64).ln()
                }
            })
            .collect();

        let feature_log_prob: Vec<Vec<f64>> = term_counts
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum();
                let denom = total + self.alpha * n_terms as f64;
                counts
                    .iter()
                    .map(|&c| ((c + self.alpha) / denom).ln())
                    .collect()
            })
            .collect();

        self.classes = Some(universe.to_vec());
        self.log_priors = Some(log_priors);
        self.feature_log_prob = Some(feature_log_prob);
        Ok(())
    }

    /// Predicts the most probable class per row.
    ///
    /// Ties break toward the earlier class in universe order, so output is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the term dimension
    /// differs from the one seen at fit time.
    pub fn predict(&self, x: &SparseMatrix) -> Result<Vec<Label>> {
        let classes = self.classes.as_deref().ok_or("Model not fitted")?;
        let log_priors = self.log_priors.as_deref().ok_or("Model not fitted")?;
        let feature_log_prob = self.feature_log_prob.as_deref().ok_or("Model not fitted")?;

        if let Some(first) = feature_log_prob.first() {
            if x.n_cols() != first.len() {
                return Err(SentirError::dimension_mismatch(
                    "terms",
                    first.len(),
                    x.n_cols(),
                ));
            }
        }

        let mut predictions = Vec::with_capacity(x.n_rows());
        for row in 0..x.n_rows() {
            let mut best_class = classes[0];
            let mut best_score = f64::NEG_INFINITY;
            for (c, &label) in classes.iter().enumerate() {
                let mut score = log_priors[c];
                for (col, value) in x.row_iter(row) {
                    score += value * feature_log_prob[c][col];
                }
                if score > best_score {
                    best_score = score;
                    best_class = label;
                }
            }
            predictions.push(best_class);
        }
        Ok(predictions)
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear Support Vector Machine with one-vs-rest decomposition.
///
/// Each class in the universe gets a binary hinge-loss problem trained by
/// subgradient descent with learning-rate decay; prediction takes the
/// class with the maximum decision value. A class with no positive
/// training examples is given a floor decision value instead of a trained
/// discriminant.
///
/// Minimizes, per binary problem:
///
/// ```text
/// min  lambda * ||w||^2 + (1/n) * sum_i max(0, 1 - y_i (w . x_i + b))
/// ```
///
/// with lambda = 1 / (2 n C).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvm {
    /// Regularization parameter; larger C fits training data more closely.
    c: f64,
    /// Initial learning rate for subgradient descent.
    learning_rate: f64,
    /// Maximum training epochs per binary problem.
    max_iter: usize,
    /// Convergence tolerance on the weight-change norm.
    tol: f64,
    classes: Option<Vec<Label>>,
    /// Per-class weight vectors; `None` entry means the class had no
    /// positive training examples.
    weights: Option<Vec<Option<Vec<f64>>>>,
    biases: Option<Vec<f64>>,
}

impl LinearSvm {
    /// Creates a Linear SVM with C = 1.0, learning rate 0.01, 200 epochs,
    /// tolerance 1e-4.
    #[must_use]
    pub fn new() -> Self {
        Self {
            c: 1.0,
            learning_rate: 0.01,
            max_iter: 200,
            tol: 1e-4,
            classes: None,
            weights: None,
            biases: None,
        }
    }

    /// Sets the regularization parameter C.
    #[must_use]
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Sets the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the maximum number of epochs.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Fits one binary discriminant per universe class.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, a row/label count mismatch, or a
    /// training label outside the universe.
    pub fn fit(&mut self, x: &SparseMatrix, y: &[Label], universe: &[Label]) -> Result<()> {
        let (n_samples, _) = x.shape();
        if n_samples == 0 {
            return Err(SentirError::empty_input("training rows"));
        }
        if y.len() != n_samples {
            return Err(SentirError::dimension_mismatch(
                "training rows",
                n_samples,
                y.len(),
            ));
        }
        for &label in y {
            if !universe.contains(&label) {
                return Err(SentirError::LabelOutOfUniverse { label });
            }
        }

        let mut weights = Vec::with_capacity(universe.len());
        let mut biases = Vec::with_capacity(universe.len());
        for &class in universe {
            let y_signed: Vec<f64> = y
                .iter()
                .map(|&label| if label == class { 1.0 } else { -1.0 })
                .collect();
            if y_signed.iter().all(|&v| v < 0.0) {
                weights.push(None);
                biases.push(ABSENT_CLASS_MARGIN);
                continue;
            }
            let (w, b) = self.fit_binary(x, &y_signed);
            weights.push(Some(w));
            biases.push(b);
        }

        self.classes = Some(universe.to_vec());
        self.weights = Some(weights);
        self.biases = Some(biases);
        Ok(())
    }

    /// Hinge-loss subgradient descent for one binary problem.
    fn fit_binary(&self, x: &SparseMatrix, y_signed: &[f64]) -> (Vec<f64>, f64) {
        let n_samples = x.n_rows();
        let n_features = x.n_cols();
        let mut w = vec![0.0; n_features];
        let mut b = 0.0;
        let lambda = 1.0 / (2.0 * n_samples as f64 * self.c);

        for epoch in 0..self.max_iter {
            let eta = self.learning_rate / (1.0 + epoch as f64 * 0.01);
            let prev_w = w.clone();
            let prev_b = b;

            for (i, &y_i) in y_signed.iter().enumerate() {
                let mut decision = b;
                for (col, value) in x.row_iter(i) {
                    decision += w[col] * value;
                }

                // Regularization shrinks every weight; the hinge term only
                // touches the sample's nonzero coordinates.
                let shrink = 1.0 - eta * 2.0 * lambda;
                for w_j in &mut w {
                    *w_j *= shrink;
                }
                if y_i * decision < 1.0 {
                    for (col, value) in x.row_iter(i) {
                        w[col] += eta * y_i * value;
                    }
                    b += eta * y_i;
                }
            }

            let mut weight_change = (b - prev_b).powi(2);
            for j in 0..n_features {
                weight_change += (w[j] - prev_w[j]).powi(2);
            }
            if weight_change.sqrt() < self.tol {
                break;
            }
        }

        (w, b)
    }

    /// Computes per-class decision values for each row.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the term dimension
    /// differs from the one seen at fit time.
    pub fn decision_function(&self, x: &SparseMatrix) -> Result<Vec<Vec<f64>>> {
        let weights = self.weights.as_deref().ok_or("Model not trained yet")?;
        let biases = self.biases.as_deref().ok_or("Model not trained yet")?;

        for w in weights.iter().flatten() {
            if w.len() != x.n_cols() {
                return Err(SentirError::dimension_mismatch(
                    "terms",
                    w.len(),
                    x.n_cols(),
                ));
            }
        }

        let mut decisions = Vec::with_capacity(x.n_rows());
        for row in 0..x.n_rows() {
            let row_scores: Vec<f64> = weights
                .iter()
                .zip(biases.iter())
                .map(|(w, &b)| match w {
                    Some(w) => {
                        let mut d = b;
                        for (col, value) in x.row_iter(row) {
                            d += w[col] * value;
                        }
                        d
                    }
                    None => ABSENT_CLASS_MARGIN,
                })
                .collect();
            decisions.push(row_scores);
        }
        Ok(decisions)
    }

    /// Predicts the class with the maximum decision value per row.
    ///
    /// Ties break toward the earlier class in universe order.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted.
    pub fn predict(&self, x: &SparseMatrix) -> Result<Vec<Label>> {
        let classes = self.classes.as_deref().ok_or("Model not trained yet")?;
        let decisions = self.decision_function(x)?;

        Ok(decisions
            .iter()
            .map(|scores| {
                let mut best = 0;
                for (c, &score) in scores.iter().enumerate() {
                    if score > scores[best] {
                        best = c;
                    }
                }
                classes[best]
            })
            .collect())
    }
}

impl Default for LinearSvm {
    fn default() -> Self {
        Self::new()
    }
}

/// Method adapter that trains a fresh [`MultinomialNb`] per fold.
#[derive(Debug, Clone, Default)]
pub struct NbAdapter {
    model: MultinomialNb,
}

impl NbAdapter {
    /// Creates an adapter with the default smoothing constant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: MultinomialNb::new(),
        }
    }
}

impl MethodAdapter for NbAdapter {
    fn fit_predict(
        &self,
        train_idx: &[usize],
        test_idx: &[usize],
        input: &EvalInput<'_>,
    ) -> Result<Vec<Label>> {
        let x_train = input
            .dfm
            .matrix()
            .select_rows(train_idx)
            .map_err(SentirError::from)?;
        let y_train: Vec<Label> = train_idx.iter().map(|&i| input.labels[i]).collect();
        let x_test = input
            .dfm
            .matrix()
            .select_rows(test_idx)
            .map_err(SentirError::from)?;

        let mut model = self.model.clone();
        model.fit(&x_train, &y_train, input.scheme.universe())?;
        model.predict(&x_test)
    }
}

/// Method adapter that trains a fresh [`LinearSvm`] per fold.
#[derive(Debug, Clone, Default)]
pub struct SvmAdapter {
    model: LinearSvm,
}

impl SvmAdapter {
    /// Creates an adapter with default SVM hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: LinearSvm::new(),
        }
    }
}

impl MethodAdapter for SvmAdapter {
    fn fit_predict(
        &self,
        train_idx: &[usize],
        test_idx: &[usize],
        input: &EvalInput<'_>,
    ) -> Result<Vec<Label>> {
        let x_train = input
            .dfm
            .matrix()
            .select_rows(train_idx)
            .map_err(SentirError::from)?;
        let y_train: Vec<Label> = train_idx.iter().map(|&i| input.labels[i]).collect();
        let x_test = input
            .dfm
            .matrix()
            .select_rows(test_idx)
            .map_err(SentirError::from)?;

        let mut model = self.model.clone();
        model.fit(&x_train, &y_train, input.scheme.universe())?;
        model.predict(&x_test)
    }
}
