use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rerank_tester_rerank::{ProviderError, RerankProvider, RerankRequest};
use tracing::{debug, info, warn};

use crate::error::{BatchError, RerankRequestError, RowFailure};
use crate::normalize::{normalize_documents, query_text};
use crate::ranking::sort_by_relevance;
use crate::record::OutputRecord;
use crate::table::{InputRow, InputTable};

/// A response item with its document text resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: String,
    pub relevance_score: f64,
    pub index: usize,
}

/// Asks the provider to score every document for `query`.
///
/// `top_n` is always the full document count. Items whose `index` does not
/// point into `documents` make the whole call fail.
pub async fn invoke_rerank(
    provider: &dyn RerankProvider,
    query: String,
    documents: Vec<String>,
) -> Result<Vec<ScoredDocument>, RerankRequestError> {
    let request = RerankRequest::all(query, documents.clone());
    let response = provider.rerank(request).await?;

    response
        .items
        .into_iter()
        .map(|item| -> Result<ScoredDocument, RerankRequestError> {
            let echoed = documents.get(item.index).ok_or_else(|| {
                ProviderError::InvalidResponse(format!(
                    "result index {} out of range for {} documents",
                    item.index,
                    documents.len()
                ))
            })?;
            Ok(ScoredDocument {
                document: item.document.unwrap_or_else(|| echoed.clone()),
                relevance_score: item.relevance_score,
                index: item.index,
            })
        })
        .collect()
}

/// What happened to one input row.
#[derive(Debug)]
pub struct RowOutcome {
    pub row: usize,
    pub result: Result<Vec<OutputRecord>, RerankRequestError>,
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Receives progress while a batch runs.
pub trait BatchObserver {
    /// Called once per row, after its rerank call settled. `completed`
    /// counts finished rows including this one.
    fn row_finished(&mut self, outcome: &RowOutcome, completed: usize, total: usize);
}

impl<F> BatchObserver for F
where
    F: FnMut(&RowOutcome, usize, usize),
{
    fn row_finished(&mut self, outcome: &RowOutcome, completed: usize, total: usize) {
        self(outcome, completed, total);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn row_finished(&mut self, _outcome: &RowOutcome, _completed: usize, _total: usize) {}
}

#[derive(Debug)]
pub struct BatchReport {
    /// All records from successful rows, highest score first.
    pub records: Vec<OutputRecord>,
    /// Failed rows in input order.
    pub failures: Vec<RowFailure>,
    pub total_rows: usize,
}

/// Splits per-row outcomes into the sorted output table and the failure
/// report. Fails with `EmptyResult` when no row produced a record.
pub fn partition_outcomes(
    mut outcomes: Vec<RowOutcome>,
    total_rows: usize,
) -> Result<BatchReport, BatchError> {
    outcomes.sort_by_key(|o| o.row);

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(mut rows) => records.append(&mut rows),
            Err(error) => failures.push(RowFailure {
                row: outcome.row,
                error,
            }),
        }
    }

    if records.is_empty() {
        return Err(BatchError::EmptyResult {
            failed: failures.len(),
            total: total_rows,
        });
    }

    Ok(BatchReport {
        records: sort_by_relevance(records),
        failures,
        total_rows,
    })
}

async fn process_row(provider: &dyn RerankProvider, row: usize, input: InputRow) -> RowOutcome {
    let query = query_text(&input.query);
    let documents = normalize_documents(&input.documents);
    debug!(row, documents = documents.len(), "reranking row");

    let result = invoke_rerank(provider, query.clone(), documents)
        .await
        .map(|scored| {
            scored
                .into_iter()
                .map(|doc| OutputRecord {
                    query: query.clone(),
                    document: doc.document,
                    relevance_score: doc.relevance_score,
                    index: doc.index,
                })
                .collect()
        });

    if let Err(err) = &result {
        warn!(row = row + 1, error = %err, "row failed, skipping");
    }
    RowOutcome { row, result }
}

/// Drives the rerank pipeline over an input table.
pub struct BatchReranker {
    provider: Arc<dyn RerankProvider>,
    concurrency: usize,
}

impl BatchReranker {
    pub fn new(provider: Arc<dyn RerankProvider>) -> Self {
        Self {
            provider,
            concurrency: 1,
        }
    }

    /// Allows up to `n` rows in flight. `1` keeps strict input order.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs every row through the provider.
    ///
    /// Column validation happens before any request is sent. A row whose
    /// call fails is reported in `BatchReport::failures` and the run goes on.
    pub async fn run(
        &self,
        table: &InputTable,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchReport, BatchError> {
        let rows = table.input_rows()?;
        let total = rows.len();
        info!(
            rows = total,
            provider = self.provider.name(),
            model = self.provider.model(),
            concurrency = self.concurrency,
            "starting rerank batch"
        );

        let provider = self.provider.as_ref();
        let mut pending = stream::iter(rows.into_iter().enumerate())
            .map(|(row, input)| process_row(provider, row, input))
            .buffer_unordered(self.concurrency);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = pending.next().await {
            observer.row_finished(&outcome, outcomes.len() + 1, total);
            outcomes.push(outcome);
        }

        let report = partition_outcomes(outcomes, total)?;
        info!(
            records = report.records.len(),
            failed_rows = report.failures.len(),
            "rerank batch finished"
        );
        Ok(report)
    }
}
