use crate::error::{ReportError, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Write `header` then `rows` as a CSV table, replacing any existing file
/// at `path`. The header is written even when there are no rows.
pub fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let csv_err = |source: csv::Error| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    wtr.write_record(header).map_err(csv_err)?;
    for r in rows {
        wtr.serialize(r).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn preview_table_rows<T, W>(out: &mut W, rows: &[T], max_rows: usize) -> io::Result<()>
where
    T: Tabled + Clone,
    W: Write,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return writeln!(out, "(no rows)\n");
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    writeln!(out, "{}\n", table_str)
}
