use std::io::Write;

use rerank_tester_core::{BatchObserver, RowOutcome};

/// Prints one status line per finished row.
pub struct ProgressReporter<W: Write> {
    out: W,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> BatchObserver for ProgressReporter<W> {
    fn row_finished(&mut self, outcome: &RowOutcome, completed: usize, total: usize) {
        let status = match &outcome.result {
            Ok(records) => format!("{} results", records.len()),
            Err(err) => format!("skipped: {err}"),
        };
        // Progress is best effort; a closed stderr must not stop the batch.
        let _ = writeln!(
            self.out,
            "[{completed}/{total}] row {}: {status}",
            outcome.row + 1
        );
    }
}
