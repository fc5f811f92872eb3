use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rerank_tester_core::OutputRecord;
use tracing::info;

use crate::TableError;

pub const RESULT_HEADER: [&str; 4] = ["query", "document", "relevance_score", "index"];

/// `rerank_results_YYYYMMDD_HHMMSS.csv` for the given moment.
pub fn results_file_name(at: NaiveDateTime) -> String {
    format!("rerank_results_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Writes the output table as CSV, header included even when empty.
pub fn write_results(writer: impl Write, records: &[OutputRecord]) -> Result<(), TableError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(RESULT_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parses a results CSV written by [`write_results`].
pub fn read_results(reader: impl Read) -> Result<Vec<OutputRecord>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        out.push(record?);
    }
    Ok(out)
}

pub fn write_results_to_path(path: &Path, records: &[OutputRecord]) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_results(fs::File::create(path)?, records)?;
    info!(path = %path.display(), records = records.len(), "wrote results");
    Ok(())
}

/// Writes the results into `dir` under a timestamped file name and returns
/// the path.
pub fn export_results(
    dir: &Path,
    records: &[OutputRecord],
    at: NaiveDateTime,
) -> Result<PathBuf, TableError> {
    let path = dir.join(results_file_name(at));
    write_results_to_path(&path, records)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn results_to_csv(records: &[OutputRecord]) -> Result<String, TableError> {
        let mut buf = Vec::new();
        write_results(&mut buf, records)?;
        Ok(String::from_utf8(buf).expect("utf8"))
    }

    fn rec(query: &str, document: &str, relevance_score: f64, index: usize) -> OutputRecord {
        OutputRecord {
            query: query.to_string(),
            document: document.to_string(),
            relevance_score,
            index,
        }
    }

    #[test]
    fn file_name_embeds_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 1))
            .expect("valid datetime");
        assert_eq!(results_file_name(at), "rerank_results_20240307_090501.csv");
    }

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let csv = results_to_csv(&[rec("cat", "cat", 0.9, 1), rec("cat", "dog", 0.2, 0)])
            .expect("csv");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "query,document,relevance_score,index");
        assert_eq!(lines[1], "cat,cat,0.9,1");
        assert_eq!(lines[2], "cat,dog,0.2,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_table_still_has_header() {
        let csv = results_to_csv(&[]).expect("csv");
        assert_eq!(csv.trim_end(), "query,document,relevance_score,index");
        assert!(read_results(csv.as_bytes()).expect("parse").is_empty());
    }

    #[test]
    fn export_then_parse_preserves_tuples() {
        let records = vec![
            rec("cat", "line one\nline two", 0.987_654_321, 3),
            rec("q, with comma", "say \"hi\"", 0.5, 0),
            rec("42", "", -1.25e-7, 1),
        ];
        let csv = results_to_csv(&records).expect("csv");
        let parsed = read_results(csv.as_bytes()).expect("parse");

        assert_eq!(parsed.len(), records.len());
        for (got, want) in parsed.iter().zip(&records) {
            assert_eq!(got.query, want.query);
            assert_eq!(got.document, want.document);
            assert_eq!(got.index, want.index);
            assert!((got.relevance_score - want.relevance_score).abs() < 1e-12);
        }
    }
}
