//! Cross-validation evaluation harness.
//!
//! Orchestrates fold partitioning, method adapters, confusion matrices,
//! metric calculation, and significance testing into one comparison sweep.

pub mod confusion;
pub mod driver;
pub mod folds;
pub mod metrics;
pub mod significance;

pub use confusion::ConfusionMatrix;
pub use driver::{CrossValidation, EvalOutcome, FailedCell, Method, MetricsRow};
pub use folds::StratifiedKFold;
pub use metrics::{compute_metrics, MetricName, MetricsSummary};
pub use significance::{significance_report, MethodSummary, PairedComparison, SignificanceRow};
