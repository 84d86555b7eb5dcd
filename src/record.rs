use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    data::{RawRow, RawValue},
    dates::{format_date, to_date},
    mapping::{CanonicalField, ColumnMapping},
};

/// Placeholder for empty geographic fields and empty distribution buckets.
pub const NOT_INFORMED: &str = "Não informado";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub protocolo: String,
    pub assunto: String,
    pub subsecretaria: String,
    pub status: String,
    pub abertura: Option<NaiveDate>,
    pub prazo: Option<NaiveDate>,
    pub analista: String,
    pub cidade: String,
    pub bairro: String,
    pub uf: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Date(Option<NaiveDate>),
}

impl FieldValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Date(d) => d.is_none(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Date(d) => format_date(*d),
        }
    }
}

impl Record {
    /// Builds a record from one source row through the load's column mapping.
    pub fn from_mapped(mapping: &ColumnMapping, row: &RawRow) -> Self {
        let raw = |field: CanonicalField| {
            mapping
                .source_header(field)
                .and_then(|header| row.get(header))
                .unwrap_or(&RawValue::Absent)
        };
        let text = |field: CanonicalField| raw(field).as_display().trim().to_string();
        let place = |field: CanonicalField| {
            let value = text(field);
            if value.is_empty() {
                NOT_INFORMED.to_string()
            } else {
                value
            }
        };

        Record {
            protocolo: text(CanonicalField::Protocolo),
            assunto: text(CanonicalField::Assunto),
            subsecretaria: text(CanonicalField::Subsecretaria),
            status: text(CanonicalField::Status),
            abertura: to_date(raw(CanonicalField::Abertura)),
            prazo: to_date(raw(CanonicalField::Prazo)),
            analista: text(CanonicalField::Analista),
            cidade: place(CanonicalField::Cidade),
            bairro: place(CanonicalField::Bairro),
            uf: text(CanonicalField::Uf),
        }
    }

    /// Rows without a protocol number and without a subject never enter the store.
    pub fn is_retained(&self) -> bool {
        !self.protocolo.is_empty() || !self.assunto.is_empty()
    }

    pub fn field(&self, field: CanonicalField) -> FieldValue<'_> {
        match field {
            CanonicalField::Protocolo => FieldValue::Text(&self.protocolo),
            CanonicalField::Assunto => FieldValue::Text(&self.assunto),
            CanonicalField::Subsecretaria => FieldValue::Text(&self.subsecretaria),
            CanonicalField::Status => FieldValue::Text(&self.status),
            CanonicalField::Abertura => FieldValue::Date(self.abertura),
            CanonicalField::Prazo => FieldValue::Date(self.prazo),
            CanonicalField::Analista => FieldValue::Text(&self.analista),
            CanonicalField::Cidade => FieldValue::Text(&self.cidade),
            CanonicalField::Bairro => FieldValue::Text(&self.bairro),
            CanonicalField::Uf => FieldValue::Text(&self.uf),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        CanonicalField::ALL
            .iter()
            .map(|field| self.field(*field).render())
            .collect()
    }

    pub(crate) fn search_blob(&self) -> String {
        format!("{} {} {}", self.protocolo, self.assunto, self.analista).to_lowercase()
    }
}
