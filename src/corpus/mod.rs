//! Ground-truth corpus loading.
//!
//! Reads a tab-separated ground-truth file (integer id, sentiment score in
//! [-4, 4], text) into immutable records, normalizing the sentiment score
//! into [-1, 1]. Malformed rows are rejected and flagged with their line
//! number, never silently dropped and never fatal to the batch.

use crate::error::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Raw sentiment scores are bounded by ±4; normalization divides by this.
pub const SENTIMENT_SCALE: f64 = 4.0;

/// One labeled social-media post. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Post identifier.
    pub id: i64,
    /// Sentiment score normalized into [-1, 1].
    pub sentiment: f64,
    /// Post text.
    pub text: String,
}

/// A row that failed to parse, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// 1-based line number in the input.
    pub line: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// Result of loading a ground-truth file: parsed records plus an account
/// of every rejected row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Successfully parsed records, in input order.
    pub records: Vec<Record>,
    /// Rows rejected during parsing.
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    /// Number of rejected rows.
    #[must_use]
    pub fn n_rejected(&self) -> usize {
        self.rejected.len()
    }
}

/// Loads a tab-separated ground-truth file from disk.
///
/// # Errors
///
/// Returns an error only if the file cannot be opened or read; malformed
/// rows are collected in the returned [`LoadReport`] instead.
pub fn load_ground_truth<P: AsRef<Path>>(path: P) -> Result<LoadReport> {
    let file = File::open(path.as_ref())?;
    let report = parse_ground_truth(BufReader::new(file))?;
    info!(
        "loaded ground truth: {} records, {} rejected rows",
        report.records.len(),
        report.n_rejected()
    );
    Ok(report)
}

/// Parses tab-separated ground-truth rows from any buffered reader.
///
/// Each line must carry exactly three tab-separated columns: integer id,
/// finite sentiment score, and text. The score is normalized by
/// [`SENTIMENT_SCALE`]. Blank lines are skipped without being counted as
/// rejections.
///
/// # Errors
///
/// Returns an error only on underlying I/O failure.
pub fn parse_ground_truth<R: BufRead>(reader: R) -> Result<LoadReport> {
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.is_empty() {
            continue;
        }
        match parse_row(&line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!("rejected ground-truth row {line_no}: {reason}");
                rejected.push(RejectedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    Ok(LoadReport { records, rejected })
}

fn parse_row(line: &str) -> std::result::Result<Record, String> {
    let mut parts = line.splitn(3, '\t');
    let id_field = parts.next().unwrap_or_default();
    let score_field = parts
        .next()
        .ok_or_else(|| "missing sentiment column".to_string())?;
    let text = parts.next().ok_or_else(|| "missing text column".to_string())?;

    let id: i64 = id_field
        .trim()
        .parse()
        .map_err(|_| format!("invalid id: {id_field:?}"))?;

    let raw_score: f64 = score_field
        .trim()
        .parse()
        .map_err(|_| format!("invalid sentiment score: {score_field:?}"))?;
    if !raw_score.is_finite() {
        return Err(format!("non-finite sentiment score: {score_field:?}"));
    }

    Ok(Record {
        id,
        sentiment: raw_score / SENTIMENT_SCALE,
        text: text.to_string(),
    })
}
