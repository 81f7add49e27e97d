//! Document-feature matrix construction.
//!
//! Converts raw record text into a sparse term-frequency matrix with
//! lowercasing, punctuation-aware tokenization, stopword removal, and
//! minimum document-frequency trimming. Matrix rows stay index-aligned
//! with the input record order so that fold-based row subsetting remains
//! valid downstream.

use crate::corpus::Record;
use crate::error::{Result, SentirError};
use crate::label::{Label, LabelScheme};
use crate::primitives::SparseMatrix;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default minimum document frequency for vocabulary terms.
pub const DEFAULT_MIN_DOC_FREQ: usize = 7;

/// Common English words removed before building the vocabulary.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself",
];

/// Splits text into lowercase alphanumeric tokens.
///
/// Punctuation separates tokens; apostrophes inside words are kept so
/// contractions survive ("don't" stays one token).
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A document-feature matrix with its vocabulary.
///
/// Row i corresponds to input record i; column j counts occurrences of
/// `vocabulary()[j]` in that record's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dfm {
    matrix: SparseMatrix,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
}

impl Dfm {
    /// The underlying sparse term-frequency matrix.
    #[must_use]
    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// Vocabulary terms in column order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of documents (rows).
    #[must_use]
    pub fn n_docs(&self) -> usize {
        self.matrix.n_rows()
    }

    /// Number of vocabulary terms (columns).
    #[must_use]
    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it survived trimming.
    #[must_use]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }
}

/// Builder for [`Dfm`] construction.
///
/// # Examples
///
/// ```
/// use sentir::features::DfmBuilder;
///
/// let texts = vec!["good good film", "good plot", "bad film"];
/// let dfm = DfmBuilder::new()
///     .with_min_doc_freq(2)
///     .build(&texts)
///     .expect("non-empty corpus");
/// assert_eq!(dfm.n_docs(), 3);
/// assert!(dfm.term_index("good").is_some());
/// assert!(dfm.term_index("plot").is_none()); // below min document frequency
/// ```
#[derive(Debug, Clone)]
pub struct DfmBuilder {
    min_doc_freq: usize,
    stop_words: HashSet<String>,
}

impl DfmBuilder {
    /// Creates a builder with the default English stopword set and a
    /// minimum document frequency of [`DEFAULT_MIN_DOC_FREQ`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_doc_freq: DEFAULT_MIN_DOC_FREQ,
            stop_words: ENGLISH_STOP_WORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Sets the minimum document frequency; terms appearing in fewer
    /// documents are trimmed from the vocabulary.
    #[must_use]
    pub fn with_min_doc_freq(mut self, min_doc_freq: usize) -> Self {
        self.min_doc_freq = min_doc_freq;
        self
    }

    /// Replaces the stopword set.
    #[must_use]
    pub fn with_stop_words(mut self, words: &[&str]) -> Self {
        self.stop_words = words.iter().map(|s| s.to_lowercase()).collect();
        self
    }

    /// Builds a document-feature matrix from texts, one row per text in
    /// input order.
    ///
    /// The vocabulary is sorted alphabetically for determinism. A corpus
    /// where no term survives trimming yields a zero-column matrix, which
    /// is valid (downstream classifiers then see only priors).
    ///
    /// # Errors
    ///
    /// Returns an error if `texts` is empty.
    pub fn build<S: AsRef<str>>(&self, texts: &[S]) -> Result<Dfm> {
        if texts.is_empty() {
            return Err(SentirError::empty_input("texts for DFM construction"));
        }

        let tokenized: Vec<Vec<String>> = texts
            .iter()
            .map(|t| {
                tokenize(t.as_ref())
                    .into_iter()
                    .filter(|tok| !self.stop_words.contains(tok))
                    .collect()
            })
            .collect();

        // Document frequency per term.
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary: Vec<String> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= self.min_doc_freq)
            .map(|(&term, _)| term.to_string())
            .collect();
        vocabulary.sort_unstable();

        let index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        let rows: Vec<Vec<(usize, f64)>> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for tok in tokens {
                    if let Some(&col) = index.get(tok) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                counts.into_iter().collect()
            })
            .collect();

        let matrix = SparseMatrix::from_rows(vocabulary.len(), rows)
            .map_err(|e| SentirError::Other(e.to_string()))?;

        Ok(Dfm {
            matrix,
            vocabulary,
            index,
        })
    }
}

impl Default for DfmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the document-feature matrix and the aligned label vector for a
/// record set under the given scheme.
///
/// Row i of the matrix and element i of the label vector both describe
/// `records[i]`.
///
/// # Errors
///
/// Returns an error if the record set is empty or any sentiment score is
/// NaN.
pub fn build_dfm(
    records: &[Record],
    scheme: LabelScheme,
    builder: &DfmBuilder,
) -> Result<(Dfm, Vec<Label>)> {
    if records.is_empty() {
        return Err(SentirError::empty_input("records for DFM construction"));
    }
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let dfm = builder.build(&texts)?;
    let scores: Vec<f64> = records.iter().map(|r| r.sentiment).collect();
    let labels = scheme.categorize_all(&scores)?;
    Ok((dfm, labels))
}
