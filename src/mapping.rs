//! Column mapping from operator-supplied headers to the canonical field set.
//!
//! A [`ColumnMapper`] holds, per [`CanonicalField`], an ordered list of
//! normalized candidate keys. [`ColumnMapper::build`] is run once per load
//! against the first row's headers; the resulting [`ColumnMapping`] is reused
//! for every row of that load and discarded with it.
//!
//! Unmatched fields are left unmapped rather than reported: the record
//! normalizer degrades them to empty or absent values.

use std::{collections::HashMap, fmt, str::FromStr};

use anyhow::{Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{config::HeaderAliases, key::normalize_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Protocolo,
    Assunto,
    Subsecretaria,
    Status,
    Abertura,
    Prazo,
    Analista,
    Cidade,
    Bairro,
    Uf,
}

impl CanonicalField {
    /// Canonical order, shared by the mapper and the CSV export.
    pub const ALL: [CanonicalField; 10] = [
        CanonicalField::Protocolo,
        CanonicalField::Assunto,
        CanonicalField::Subsecretaria,
        CanonicalField::Status,
        CanonicalField::Abertura,
        CanonicalField::Prazo,
        CanonicalField::Analista,
        CanonicalField::Cidade,
        CanonicalField::Bairro,
        CanonicalField::Uf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Protocolo => "protocolo",
            CanonicalField::Assunto => "assunto",
            CanonicalField::Subsecretaria => "subsecretaria",
            CanonicalField::Status => "status",
            CanonicalField::Abertura => "abertura",
            CanonicalField::Prazo => "prazo",
            CanonicalField::Analista => "analista",
            CanonicalField::Cidade => "cidade",
            CanonicalField::Bairro => "bairro",
            CanonicalField::Uf => "uf",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, CanonicalField::Abertura | CanonicalField::Prazo)
    }

    fn builtin_candidates(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Protocolo => &["protocolo", "nprotocolo", "numero", "id", "idprotocolo"],
            CanonicalField::Assunto => &["assunto", "tema", "titulo"],
            CanonicalField::Subsecretaria => &["subsecretaria", "secretaria", "orgao", "setor"],
            CanonicalField::Status => &["status", "situacao"],
            CanonicalField::Abertura => &["abertura", "dataabertura", "data", "datadeabertura"],
            CanonicalField::Prazo => &[
                "prazo",
                "dataprazo",
                "datafinal",
                "datafechamento",
                "conclusao",
                "dataconclusao",
            ],
            CanonicalField::Analista => &["analista", "responsavel", "responsaveltecnico"],
            CanonicalField::Cidade => &["cidade", "municipio", "localizacao", "cidadeuf"],
            CanonicalField::Bairro => &["bairro", "distrito", "regiao"],
            CanonicalField::Uf => &["uf", "estado", "sigla"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = normalize_key(value);
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| anyhow!("Unknown column '{value}'"))
    }
}

/// Canonical field → matched raw header, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    entries: Vec<(CanonicalField, Option<String>)>,
}

impl ColumnMapping {
    pub fn source_header(&self, field: CanonicalField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .and_then(|(_, header)| header.as_deref())
    }

    pub fn entries(&self) -> impl Iterator<Item = (CanonicalField, Option<&str>)> {
        self.entries
            .iter()
            .map(|(field, header)| (*field, header.as_deref()))
    }

    pub fn unmapped(&self) -> Vec<CanonicalField> {
        self.entries
            .iter()
            .filter(|(_, header)| header.is_none())
            .map(|(field, _)| *field)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ColumnMapper {
    candidates: Vec<(CanonicalField, Vec<String>)>,
}

impl Default for ColumnMapper {
    fn default() -> Self {
        let candidates = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let names = field
                    .builtin_candidates()
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                (field, names)
            })
            .collect();
        Self { candidates }
    }
}

impl ColumnMapper {
    /// Built-in candidates followed by the operator's extra aliases.
    pub fn with_aliases(aliases: &HeaderAliases) -> Self {
        let mut mapper = Self::default();
        for (field, names) in mapper.candidates.iter_mut() {
            for alias in aliases.for_field(*field) {
                let key = normalize_key(alias);
                if !key.is_empty() && !names.contains(&key) {
                    names.push(key);
                }
            }
        }
        mapper
    }

    pub fn candidates(&self, field: CanonicalField) -> &[String] {
        self.candidates
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    pub fn build<'a, I>(&self, headers: I) -> ColumnMapping
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut by_key: HashMap<String, &'a str> = HashMap::new();
        for header in headers {
            by_key.entry(normalize_key(header)).or_insert(header);
        }
        let pick = |names: &[String]| {
            names
                .iter()
                .find_map(|name| by_key.get(name.as_str()))
                .map(|header| header.to_string())
        };

        let mut entries = self
            .candidates
            .iter()
            .map(|(field, names)| (*field, pick(names)))
            .collect::<Vec<_>>();

        for (field, header) in entries.iter_mut() {
            if *field == CanonicalField::Abertura && header.is_none() {
                *header = pick(&["data".to_string()]);
            }
            debug!(
                "Column '{}' <- {}",
                field,
                header.as_deref().unwrap_or("<unmapped>")
            );
        }
        ColumnMapping { entries }
    }
}
