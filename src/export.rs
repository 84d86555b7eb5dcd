use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::{io_utils, mapping::CanonicalField, record::Record};

pub fn default_file_name(today: NaiveDate) -> String {
    format!("sigami_solicitacoes_{}.csv", today.format("%Y-%m-%d"))
}

/// Writes `records` as CSV. An empty subset writes nothing and returns 0.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let mut writer = io_utils::csv_writer(writer);
    writer
        .write_record(CanonicalField::ALL.iter().map(|field| field.as_str()))
        .context("Writing export headers")?;
    for (idx, record) in records.iter().enumerate() {
        writer
            .write_record(record.to_row())
            .with_context(|| format!("Writing export row {}", idx + 1))?;
    }
    writer.flush().context("Flushing export writer")?;
    Ok(records.len())
}
