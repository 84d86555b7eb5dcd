//! Source adapters turning files into raw rows.
//!
//! Spreadsheets (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) are read from their
//! first sheet through `calamine`, keeping numeric cells numeric so date
//! serials survive. Everything else is read as delimited text; CSV cells are
//! always text.
//!
//! In both cases the first row supplies the headers. Empty header cells are
//! named `__EMPTY`, `__EMPTY_1`, … and repeated headers get `_1`, `_2`, …
//! suffixes. Rows whose cells are all empty are skipped.

use std::{
    collections::{HashMap, HashSet},
    io::Read,
    path::Path,
};

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    data::{RawRow, RawValue},
    error::IngestError,
    io_utils,
};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: encoding_rs::UTF_8,
        }
    }
}

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

pub fn read_rows(path: &Path, options: &SourceOptions) -> Result<Vec<RawRow>, IngestError> {
    if is_spreadsheet(path) {
        read_spreadsheet(path)
    } else {
        let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
        let reader = io_utils::open_input(path)
            .map_err(|err| IngestError::malformed(format!("{err:#}")))?;
        read_delimited(reader, delimiter, options.encoding)
    }
}

pub fn read_delimited<R: Read>(
    reader: R,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = io_utils::open_csv_reader(reader, delimiter);
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .map_err(|err| IngestError::malformed(format!("Reading headers: {err:#}")))?;
    let headers = unique_headers(headers);

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record =
            record.map_err(|err| IngestError::malformed(format!("Reading row {}: {err}", idx + 2)))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .map_err(|err| IngestError::malformed(format!("Decoding row {}: {err:#}", idx + 2)))?;
        let row = headers
            .iter()
            .zip(decoded.into_iter().chain(std::iter::repeat(String::new())))
            .map(|(header, cell)| (header.as_str(), RawValue::text(cell)))
            .collect::<RawRow>();
        if !row.is_blank() {
            rows.push(row);
        }
    }
    debug!("Read {} delimited row(s) with {} column(s)", rows.len(), headers.len());
    Ok(rows)
}

pub fn read_spreadsheet(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let mut workbook = open_workbook_auto(path).map_err(IngestError::malformed)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::malformed("Workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(IngestError::malformed)?;
    info!("Reading sheet '{}' from {:?}", sheet, path);

    let mut cells = range.rows();
    let Some(header_cells) = cells.next() else {
        return Ok(Vec::new());
    };
    let headers = unique_headers(header_cells.iter().map(header_text));
    let rows = cells
        .map(|row| {
            headers
                .iter()
                .zip(row.iter().map(cell_value))
                .map(|(header, value)| (header.as_str(), value))
                .collect::<RawRow>()
        })
        .filter(|row| !row.is_blank())
        .collect::<Vec<_>>();
    debug!("Read {} spreadsheet row(s) with {} column(s)", rows.len(), headers.len());
    Ok(rows)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Float(f) => RawValue::Number(*f),
        Data::String(s) => RawValue::text(s.as_str()),
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(RawValue::Temporal)
            .unwrap_or_else(|_| RawValue::text(s.as_str())),
        Data::DurationIso(s) => RawValue::text(s.as_str()),
        Data::Error(_) | Data::Empty => RawValue::Absent,
    }
}

/// Names empty headers `__EMPTY…` and suffixes repeats with `_1`, `_2`, …,
/// skipping any name already taken by an earlier column.
pub fn unique_headers<I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|header| {
            let base = if header.is_empty() {
                "__EMPTY".to_string()
            } else {
                header
            };
            let mut name = base.clone();
            if taken.contains(&name) {
                let suffix = next_suffix.entry(base.clone()).or_insert(1);
                name = loop {
                    let candidate = format!("{base}_{suffix}");
                    *suffix += 1;
                    if !taken.contains(&candidate) {
                        break candidate;
                    }
                };
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}
