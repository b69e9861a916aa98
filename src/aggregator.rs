//! Concurrent full-dataset retrieval
//!
//! The export path needs every record for a query. The aggregator learns the
//! total from the first page, plans the remaining offsets, fetches them all at
//! once and reassembles the batches in offset order. Completion order never
//! leaks into the output.
//!
//! Any failed batch fails the whole aggregation: outstanding fetches are
//! cancelled and no partial sequence is returned.

use crate::error::{Error, Result};
use crate::fetcher::PageSource;
use crate::planner::{offset_for_page, plan, total_pages};
use crate::types::{FilterKeys, Formasi, PageView};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Outcome of fetching one batch, keyed by its offset
#[derive(Debug)]
pub struct BatchResult {
    /// Offset the batch was fetched at; the sort key for reassembly
    pub offset: usize,

    /// Records of the batch, or why fetching it failed
    pub outcome: Result<Vec<Formasi>>,
}

/// Fans out page fetches for a whole query and merges them back in order
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn PageSource>,
    page_size: usize,
}

impl Aggregator {
    /// Create an aggregator over `source` whose pages hold `page_size` records
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero. [`crate::Config::validate`] rejects that
    /// setting for configurations loaded from the environment.
    pub fn new(source: Arc<dyn PageSource>, page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be greater than zero");
        Self { source, page_size }
    }

    /// Fetch a single 1-based page for the paginated view
    pub async fn page(&self, page: usize, filter: &FilterKeys) -> Result<PageView> {
        let page = page.max(1);
        let fetched = self
            .source
            .fetch_page(offset_for_page(page, self.page_size), filter)
            .await?;

        Ok(PageView {
            items: fetched.records,
            total: fetched.total,
            page,
            total_pages: total_pages(fetched.total, self.page_size),
        })
    }

    /// Fetch every record matching `filter`, in upstream order
    ///
    /// The first page is fetched alone to learn the total and doubles as the
    /// batch at offset 0. Every other offset of the plan gets its own task; all
    /// of them run concurrently and report through one channel.
    ///
    /// # Errors
    ///
    /// Returns the first failure reported by any batch. Records from batches
    /// that succeeded are discarded.
    pub async fn aggregate(&self, filter: &FilterKeys) -> Result<Vec<Formasi>> {
        let started = Instant::now();

        let first = self.source.fetch_page(0, filter).await?;
        let total = first.total;
        let offsets = plan(total, self.page_size);

        if offsets.is_empty() {
            tracing::info!(
                education_code = %filter.education_code,
                "No records to export"
            );
            return Ok(Vec::new());
        }

        tracing::debug!(
            education_code = %filter.education_code,
            total,
            batches = offsets.len(),
            "Dispatching batch fetches"
        );

        let cancel = CancellationToken::new();
        // Stops outstanding fetches on every return path, including fail-fast
        let _cancel_guard = cancel.clone().drop_guard();

        let (batch_tx, mut batch_rx) = mpsc::channel::<BatchResult>(offsets.len());

        for &offset in offsets.iter().skip(1) {
            let source = Arc::clone(&self.source);
            let filter = filter.clone();
            let batch_tx = batch_tx.clone();
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let outcome = tokio::select! {
                    _ = cancel.cancelled() => return,
                    result = source.fetch_page(offset, &filter) => result.map(|page| page.records),
                };
                // The receiver is gone once the aggregation has failed fast
                let _ = batch_tx.send(BatchResult { offset, outcome }).await;
            });
        }
        drop(batch_tx);

        let mut results = Vec::with_capacity(offsets.len());
        results.push(BatchResult {
            offset: 0,
            outcome: Ok(first.records),
        });

        while results.len() < offsets.len() {
            let Some(batch) = batch_rx.recv().await else {
                return Err(Error::TaskFailed(format!(
                    "{} of {} batches never reported",
                    offsets.len() - results.len(),
                    offsets.len()
                )));
            };

            match batch.outcome {
                Ok(records) => results.push(BatchResult {
                    offset: batch.offset,
                    outcome: Ok(records),
                }),
                Err(e) => {
                    tracing::warn!(
                        offset = batch.offset,
                        error = %e,
                        "Batch failed, abandoning export"
                    );
                    return Err(e);
                }
            }
        }

        let records = reassemble(total, results)?;

        tracing::info!(
            education_code = %filter.education_code,
            records = records.len(),
            batches = offsets.len(),
            elapsed = ?started.elapsed(),
            "Aggregation complete"
        );

        Ok(records)
    }
}

/// Merge a complete set of batch results into one offset-ordered sequence
///
/// Results may arrive in any order. The first failure in `results` wins;
/// otherwise batches are concatenated by ascending offset and the result must
/// hold exactly `total` records.
pub fn reassemble(total: usize, results: Vec<BatchResult>) -> Result<Vec<Formasi>> {
    let mut batches = Vec::with_capacity(results.len());
    for batch in results {
        match batch.outcome {
            Ok(records) => batches.push((batch.offset, records)),
            Err(e) => return Err(e),
        }
    }

    batches.sort_by_key(|(offset, _)| *offset);

    if let Some(pair) = batches.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(Error::TaskFailed(format!(
            "offset {} reported more than once",
            pair[0].0
        )));
    }

    let records: Vec<Formasi> = batches
        .into_iter()
        .flat_map(|(_, records)| records)
        .collect();

    if records.len() != total {
        return Err(Error::IncompleteExport {
            expected: total,
            actual: records.len(),
        });
    }

    Ok(records)
}
