//! Full-replace ingestion of raw rows into the canonical record store.

use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::{
    aggregate::{self, DateBounds},
    config::HeaderAliases,
    data::RawRow,
    error::IngestError,
    mapping::{CanonicalField, ColumnMapper, ColumnMapping},
    record::Record,
};

/// Distinct status and subsecretaria values offered as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub subsecretarias: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            statuses: aggregate::unique_values(records, CanonicalField::Status),
            subsecretarias: aggregate::unique_values(records, CanonicalField::Subsecretaria),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub records: Arc<[Record]>,
    pub mapping: ColumnMapping,
    pub options: FilterOptions,
    pub bounds: Option<DateBounds>,
    pub dropped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    mapper: ColumnMapper,
}

impl Ingestor {
    pub fn new(mapper: ColumnMapper) -> Self {
        Self { mapper }
    }

    pub fn with_aliases(aliases: &HeaderAliases) -> Self {
        Self::new(ColumnMapper::with_aliases(aliases))
    }

    pub fn ingest(&self, rows: &[RawRow]) -> Result<IngestOutcome, IngestError> {
        let first = rows.first().ok_or(IngestError::EmptySource)?;
        let mapping = self.mapper.build(first.headers());
        let unmapped = mapping.unmapped();
        if !unmapped.is_empty() {
            debug!(
                "Unmapped column(s): {}",
                unmapped.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
            );
        }

        let records = rows
            .iter()
            .map(|row| Record::from_mapped(&mapping, row))
            .filter(Record::is_retained)
            .collect::<Vec<_>>();
        let dropped = rows.len() - records.len();

        let options = FilterOptions::from_records(&records);
        let bounds = aggregate::date_bounds(&records);
        info!(
            "Ingested {} record(s) from {} row(s) ({} dropped)",
            records.len(),
            rows.len(),
            dropped
        );

        Ok(IngestOutcome {
            records: records.into(),
            mapping,
            options,
            bounds,
            dropped,
        })
    }
}

pub fn ingest(rows: &[RawRow]) -> Result<IngestOutcome, IngestError> {
    Ingestor::default().ingest(rows)
}
