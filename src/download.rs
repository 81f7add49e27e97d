//! Post-collection interface for building new ground-truth corpora.
//!
//! The evaluation core only ever reads the ground-truth TSV; the network
//! client that produces such files lives behind the [`PostSource`] trait
//! so collection logic (paging, rate-limit retries, the output file) can
//! be exercised without any live endpoint. No HTTP client ships here.

use crate::error::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// A collected social-media post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    /// Free-form source metadata (author, timestamp), already flattened.
    pub metadata: String,
}

/// A keyword query with a result cap.
///
/// A post matches when it contains any of the keywords; sources may
/// implement the match server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    pub keywords: Vec<String>,
    pub max_posts: usize,
}

/// One page of results from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPage {
    /// Posts from this page; an empty vector does not imply exhaustion.
    Posts(Vec<Post>),
    /// The source rejected the request for rate limiting; retry later.
    RateLimited,
    /// No further results exist for the query.
    Exhausted,
}

/// A paged producer of posts for a query.
pub trait PostSource {
    /// Fetches the next page for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-retryable source failures; rate limiting
    /// is signalled through [`FetchPage::RateLimited`] instead.
    fn fetch_page(&mut self, query: &PostQuery) -> Result<FetchPage>;
}

/// Exponential backoff schedule for rate-limited requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (zero-based).
    #[must_use]
    pub fn backoff(&self, attempt: usize) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        self.initial_backoff.mul_f64(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

/// Collects posts for a query, retrying on rate limits per `policy`.
///
/// Stops when the source is exhausted, `query.max_posts` is reached, or
/// the retry budget runs out; in the last case whatever was collected is
/// returned rather than discarded. Empty pages count against the retry
/// budget too, so a source that keeps answering with no posts cannot
/// stall collection forever. `sleep` is injected so tests run without
/// waiting.
///
/// # Errors
///
/// Returns an error only for non-retryable source failures.
pub fn collect_posts<S, F>(
    source: &mut S,
    query: &PostQuery,
    policy: &RetryPolicy,
    mut sleep: F,
) -> Result<Vec<Post>>
where
    S: PostSource + ?Sized,
    F: FnMut(Duration),
{
    let mut posts = Vec::new();
    let mut retries = 0usize;

    while posts.len() < query.max_posts {
        match source.fetch_page(query)? {
            FetchPage::Posts(page) if page.is_empty() => {
                if retries >= policy.max_retries {
                    warn!(
                        "retry budget exhausted on empty pages; keeping {} posts",
                        posts.len()
                    );
                    break;
                }
                retries += 1;
            }
            FetchPage::Posts(page) => {
                retries = 0;
                posts.extend(page);
            }
            FetchPage::RateLimited => {
                if retries >= policy.max_retries {
                    warn!(
                        "retry budget exhausted after {} attempts; keeping {} posts",
                        retries,
                        posts.len()
                    );
                    break;
                }
                sleep(policy.backoff(retries));
                retries += 1;
            }
            FetchPage::Exhausted => break,
        }
    }

    posts.truncate(query.max_posts);
    info!("collected {} posts", posts.len());
    Ok(posts)
}

/// Writes posts as a 3-column TSV (id, text, metadata).
///
/// Tabs and newlines inside fields are replaced with spaces so each post
/// stays one parseable line.
///
/// # Errors
///
/// Returns an error on write failure.
pub fn write_posts_tsv<W: Write>(posts: &[Post], mut w: W) -> Result<()> {
    for post in posts {
        writeln!(
            w,
            "{}\t{}\t{}",
            post.id,
            flatten(&post.text),
            flatten(&post.metadata)
        )?;
    }
    Ok(())
}

/// Writes posts to a TSV file path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_posts_tsv<P: AsRef<Path>>(posts: &[Post], path: P) -> Result<()> {
    let file = File::create(path)?;
    write_posts_tsv(posts, BufWriter::new(file))
}

fn flatten(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}
