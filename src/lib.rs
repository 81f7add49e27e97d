//! Sentir: sentiment-method comparison harness in pure Rust.
//!
//! Sentir loads a hand-scored ground-truth corpus, builds a sparse
//! document-feature matrix, and compares three sentiment classification
//! approaches (lexicon rules, multinomial naive Bayes, linear SVM) under
//! stratified k-fold cross-validation, finishing with fold-matched
//! significance tests between the methods.
//!
//! # Quick Start
//!
//! ```no_run
//! use sentir::prelude::*;
//!
//! # fn main() -> sentir::error::Result<()> {
//! let report = load_ground_truth("ground_truth.tsv")?;
//! println!("{} records loaded, {} rejected", report.records.len(), report.n_rejected());
//!
//! let outcome = CrossValidation::new(LabelScheme::Three)
//!     .with_n_splits(10)
//!     .with_seed(42)
//!     .run(&report.records)?;
//!
//! let significance = significance_report(&outcome)?;
//! save_metrics_tsv(&outcome, "metrics.tsv")?;
//! save_significance_tsv(&significance, "significance.tsv")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`corpus`]: Ground-truth TSV loading with per-row rejection tracking
//! - [`label`]: Label schemes and score categorization
//! - [`primitives`]: Sparse matrix storage (CSR)
//! - [`features`]: Tokenization and document-feature matrix construction
//! - [`lexicon`]: Dictionary and rule based sentiment scoring
//! - [`classify`]: Trained classifiers (naive Bayes, linear SVM)
//! - [`eval`]: Folds, confusion matrices, metrics, the CV driver, and
//!   significance testing
//! - [`stats`]: Descriptive statistics and t-tests
//! - [`report`]: TSV export of result tables
//! - [`download`]: Post-collection interface for building new corpora

pub mod classify;
pub mod corpus;
pub mod download;
pub mod error;
pub mod eval;
pub mod features;
pub mod label;
pub mod lexicon;
pub mod prelude;
pub mod primitives;
pub mod report;
pub mod stats;
pub mod traits;
