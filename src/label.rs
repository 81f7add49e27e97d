//! Label schemes and score categorization.
//!
//! Maps continuous sentiment scores in [-1, 1] to discrete class labels
//! under a 3-class or 5-class thresholding scheme. Categorization is a
//! pure function; the full ordered label set of a scheme (its "universe")
//! is available independently of any observed data so that downstream
//! confusion matrices stay square even when a fold lacks some class.

use crate::error::{Result, SentirError};
use serde::{Deserialize, Serialize};

/// Discrete sentiment class label.
///
/// Values are drawn from {-1, 0, 1} under [`LabelScheme::Three`] or
/// {-2, -1, 0, 1, 2} under [`LabelScheme::Five`].
pub type Label = i8;

/// Thresholding scheme for mapping scores to class labels.
///
/// # Examples
///
/// ```
/// use sentir::label::LabelScheme;
///
/// let scheme = LabelScheme::Three;
/// assert_eq!(scheme.categorize(0.5).unwrap(), 1);
/// assert_eq!(scheme.categorize(0.05).unwrap(), 0); // boundary is neutral
/// assert_eq!(scheme.categorize(-0.3).unwrap(), -1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScheme {
    /// Negative / neutral / positive.
    Three,
    /// Strongly negative through strongly positive.
    Five,
}

impl LabelScheme {
    /// Returns the full ordered label set for this scheme.
    #[must_use]
    pub fn universe(&self) -> &'static [Label] {
        match self {
            LabelScheme::Three => &[-1, 0, 1],
            LabelScheme::Five => &[-2, -1, 0, 1, 2],
        }
    }

    /// Returns the number of classes in this scheme.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.universe().len()
    }

    /// Returns the position of `label` within the universe, if it belongs.
    #[must_use]
    pub fn index_of(&self, label: Label) -> Option<usize> {
        self.universe().iter().position(|&l| l == label)
    }

    /// Maps a continuous score to a class label.
    ///
    /// Boundary semantics (exact, load-bearing):
    ///
    /// - 3-class: score > 0.05 → 1; score < -0.05 → -1; else 0.
    ///   A score of exactly 0.05 or -0.05 is neutral.
    /// - 5-class: score > 0.45 → 2; (0.05, 0.45] → 1; [-0.05, 0.05] → 0;
    ///   [-0.45, -0.05) → -1; else -2.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::UndefinedClassification`] for NaN input;
    /// a NaN score is never silently assigned a bucket.
    pub fn categorize(&self, score: f64) -> Result<Label> {
        if score.is_nan() {
            return Err(SentirError::UndefinedClassification {
                score: format!("{score}"),
            });
        }
        let label = match self {
            LabelScheme::Three => {
                if score > 0.05 {
                    1
                } else if score < -0.05 {
                    -1
                } else {
                    0
                }
            }
            LabelScheme::Five => {
                if score > 0.45 {
                    2
                } else if score > 0.05 {
                    1
                } else if score >= -0.05 {
                    0
                } else if score >= -0.45 {
                    -1
                } else {
                    -2
                }
            }
        };
        Ok(label)
    }

    /// Categorizes a whole score sequence, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first NaN score encountered.
    pub fn categorize_all(&self, scores: &[f64]) -> Result<Vec<Label>> {
        scores.iter().map(|&s| self.categorize(s)).collect()
    }
}
