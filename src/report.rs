//! Tabular TSV export of evaluation output.
//!
//! Three tables: the long-form metrics table, the significance summary,
//! and the failed-cell list. All plain text; undefined values are written
//! as `NaN` so spreadsheets and dataframe loaders keep them visible.

use crate::error::Result;
use crate::eval::driver::EvalOutcome;
use crate::eval::significance::SignificanceRow;
use crate::label::Label;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Class column rendering: per-class rows print the label, scalar rows
/// print `all`.
fn class_cell(class: Option<Label>) -> String {
    match class {
        Some(label) => label.to_string(),
        None => "all".to_string(),
    }
}

/// Writes the long-form metrics table: one row per
/// (method, fold, class, metric) with a `value` column.
///
/// # Errors
///
/// Returns an error on write failure.
pub fn write_metrics_tsv<W: Write>(outcome: &EvalOutcome, mut w: W) -> Result<()> {
    writeln!(w, "method\tfold\tclass\tmetric\tvalue")?;
    for row in &outcome.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            row.method,
            row.fold,
            class_cell(row.class),
            row.metric,
            row.value
        )?;
    }
    Ok(())
}

/// Writes per-method descriptive summaries followed by paired
/// comparisons, in two labelled sections.
///
/// # Errors
///
/// Returns an error on write failure.
pub fn write_significance_tsv<W: Write>(report: &[SignificanceRow], mut w: W) -> Result<()> {
    writeln!(w, "table\tclass\tmetric\tmethod_a\tmethod_b\tn\tmean\tstd_or_diff\tt\tp")?;
    for row in report {
        for summary in &row.summaries {
            writeln!(
                w,
                "summary\t{}\t{}\t{}\t\t{}\t{}\t{}\t{}\t{}",
                class_cell(row.class),
                row.metric,
                summary.method,
                summary.n_folds,
                summary.mean,
                summary.std,
                summary.t_statistic,
                summary.p_value
            )?;
        }
        for cmp in &row.comparisons {
            writeln!(
                w,
                "comparison\t{}\t{}\t{}\t{}\t{}\t\t{}\t{}\t{}",
                class_cell(row.class),
                row.metric,
                cmp.method_a,
                cmp.method_b,
                cmp.n_pairs,
                cmp.mean_diff,
                cmp.t_statistic,
                cmp.p_value
            )?;
        }
    }
    Ok(())
}

/// Writes the failed-cell table so partial sweeps stay visible.
///
/// # Errors
///
/// Returns an error on write failure.
pub fn write_failures_tsv<W: Write>(outcome: &EvalOutcome, mut w: W) -> Result<()> {
    writeln!(w, "method\tfold\terror")?;
    for failure in &outcome.failures {
        writeln!(w, "{}\t{}\t{}", failure.method, failure.fold, failure.error)?;
    }
    Ok(())
}

/// Writes the metrics table to a file path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_metrics_tsv<P: AsRef<Path>>(outcome: &EvalOutcome, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_metrics_tsv(outcome, BufWriter::new(file))
}

/// Writes the significance table to a file path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_significance_tsv<P: AsRef<Path>>(report: &[SignificanceRow], path: P) -> Result<()> {
    let file = File::create(path)?;
    write_significance_tsv(report, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::driver::{FailedCell, Method, MetricsRow};
    use crate::eval::metrics::MetricName;
    use crate::eval::significance::significance_report;

    fn sample_outcome() -> EvalOutcome {
        EvalOutcome {
            rows: vec![
                MetricsRow {
                    method: Method::Lexicon,
                    fold: 0,
                    class: Some(1),
                    metric: MetricName::Precision,
                    value: 0.75,
                },
                MetricsRow {
                    method: Method::Lexicon,
                    fold: 0,
                    class: None,
                    metric: MetricName::Accuracy,
                    value: f64::NAN,
                },
            ],
            failures: vec![FailedCell {
                method: Method::Svm,
                fold: 2,
                error: "synthetic".into(),
            }],
        }
    }

    #[test]
    fn test_metrics_tsv_layout() {
        let mut buf = Vec::new();
        write_metrics_tsv(&sample_outcome(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "method\tfold\tclass\tmetric\tvalue");
        assert_eq!(lines[1], "lexicon\t0\t1\tprecision\t0.75");
        assert_eq!(lines[2], "lexicon\t0\tall\taccuracy\tNaN");
    }

    #[test]
    fn test_failures_tsv_layout() {
        let mut buf = Vec::new();
        write_failures_tsv(&sample_outcome(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("svm\t2\tsynthetic"));
    }

    #[test]
    fn test_significance_tsv_has_both_sections() {
        let outcome = EvalOutcome {
            rows: (0..3)
                .flat_map(|fold| {
                    [
                        MetricsRow {
                            method: Method::Lexicon,
                            fold,
                            class: None,
                            metric: MetricName::Accuracy,
                            value: 0.5 + fold as f64 * 0.1,
                        },
                        MetricsRow {
                            method: Method::Bayes,
                            fold,
                            class: None,
                            metric: MetricName::Accuracy,
                            value: 0.6 + fold as f64 * 0.05,
                        },
                    ]
                })
                .collect(),
            failures: Vec::new(),
        };
        let report = significance_report(&outcome).unwrap();

        let mut buf = Vec::new();
        write_significance_tsv(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let summary_line = text
            .lines()
            .find(|l| l.starts_with("summary\tall\taccuracy\tlexicon"))
            .unwrap();
        let fields: Vec<&str> = summary_line.split('\t').collect();
        assert_eq!(fields.len(), 10);
        // Location test columns are populated, not left blank.
        assert!(fields[8].parse::<f64>().is_ok());
        assert!(fields[9].parse::<f64>().is_ok());

        assert!(text
            .lines()
            .any(|l| l.starts_with("comparison\tall\taccuracy\tlexicon\tbayes")));
    }

    #[test]
    fn test_save_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.tsv");
        save_metrics_tsv(&sample_outcome(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("method\tfold"));
        assert_eq!(text.lines().count(), 3);
    }
}
