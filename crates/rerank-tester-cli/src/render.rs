use std::io::{self, Write};

use rerank_tester_core::{InputTable, OutputRecord};

const MAX_CELL_CHARS: usize = 48;

/// Flattens a cell for a one-line table: newlines shown as `\n`, long
/// values cut with an ellipsis.
fn clip(value: &str) -> String {
    let flat = value.replace('\r', "").replace('\n', "\\n");
    if flat.chars().count() <= MAX_CELL_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_CELL_CHARS - 1).collect();
    cut.push('…');
    cut
}

fn write_line(out: &mut dyn Write, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map_or("", String::as_str);
            format!("{cell:<w$}")
        })
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

fn render_table(out: &mut dyn Write, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    write_line(out, &widths, headers)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in rows {
        write_line(out, &widths, row)?;
    }
    Ok(())
}

/// Writes the first `limit` input rows, all columns.
pub fn render_input_preview(
    out: &mut dyn Write,
    table: &InputTable,
    limit: usize,
) -> io::Result<()> {
    let headers: Vec<String> = table.columns().iter().map(|c| clip(c)).collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|cell| clip(&cell.to_string())).collect())
        .collect();
    render_table(out, &headers, &rows)?;
    if table.len() > limit {
        writeln!(out, "… {} more rows", table.len() - limit)?;
    }
    Ok(())
}

/// Writes the first `limit` output records.
pub fn render_results(
    out: &mut dyn Write,
    records: &[OutputRecord],
    limit: usize,
) -> io::Result<()> {
    let headers: Vec<String> = ["query", "document", "relevance_score", "index"]
        .iter()
        .map(|h| (*h).to_string())
        .collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .take(limit)
        .map(|r| {
            vec![
                clip(&r.query),
                clip(&r.document),
                format!("{:.6}", r.relevance_score),
                r.index.to_string(),
            ]
        })
        .collect();
    render_table(out, &headers, &rows)?;
    if records.len() > limit {
        writeln!(out, "… {} more records", records.len() - limit)?;
    }
    Ok(())
}
