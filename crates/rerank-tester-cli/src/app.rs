use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Local;
use rerank_tester_core::{BatchError, BatchReranker};
use rerank_tester_io::{export_results, load_table, write_results_to_path};
use rerank_tester_rerank::CohereRerankProvider;
use tracing::info;

use crate::config::{OutputTarget, Settings};
use crate::progress::ProgressReporter;
use crate::render::{render_input_preview, render_results};

/// Runs one batch end to end and returns the path of the written CSV.
///
/// The provider (and with it the API key) lives only for this call.
pub async fn run(settings: Settings) -> anyhow::Result<PathBuf> {
    let table = load_table(&settings.input)
        .with_context(|| format!("failed to read {}", settings.input.display()))?;

    let mut stdout = io::stdout();
    if settings.preview_rows > 0 {
        writeln!(stdout, "Input preview ({} rows):", table.len())?;
        render_input_preview(&mut stdout, &table, settings.preview_rows)?;
        writeln!(stdout)?;
    }

    let provider = CohereRerankProvider::new(settings.rerank)
        .context("failed to initialize rerank client")?;
    let reranker = BatchReranker::new(Arc::new(provider)).with_concurrency(settings.concurrency);

    let mut progress = ProgressReporter::new(io::stderr());
    let report = match reranker.run(&table, &mut progress).await {
        Ok(report) => report,
        Err(BatchError::Schema(column)) => bail!(
            "input must contain 'query' and 'documents' columns (missing required column: {column})"
        ),
        Err(err @ BatchError::EmptyResult { .. }) => {
            bail!("no valid results were produced: {err}")
        }
    };

    for failure in &report.failures {
        writeln!(
            stdout,
            "warning: row {} failed: {}",
            failure.row + 1,
            failure.message()
        )?;
    }

    writeln!(
        stdout,
        "Rerank results ({} records from {} of {} rows):",
        report.records.len(),
        report.total_rows - report.failures.len(),
        report.total_rows
    )?;
    render_results(&mut stdout, &report.records, settings.show)?;

    let path = match &settings.output {
        OutputTarget::File(path) => {
            write_results_to_path(path, &report.records)?;
            path.clone()
        }
        OutputTarget::Dir(dir) => export_results(dir, &report.records, Local::now().naive_local())?,
    };
    writeln!(stdout, "Results written to {}", path.display())?;
    info!(path = %path.display(), "export complete");
    Ok(path)
}
