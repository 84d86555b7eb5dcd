//! Operator-supplied header aliases.
//!
//! An alias file is a YAML mapping from canonical field name to a list of
//! extra header spellings:
//!
//! ```yaml
//! protocolo: ["Num. Processo", "Processo SEI"]
//! abertura: ["Data de Entrada"]
//! ```
//!
//! Aliases are appended after the built-in candidates, so a built-in match
//! always takes priority.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mapping::CanonicalField;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderAliases {
    fields: BTreeMap<CanonicalField, Vec<String>>,
}

impl HeaderAliases {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening alias file {path:?}"))?;
        Self::parse(&raw).with_context(|| format!("Parsing alias file {path:?}"))
    }

    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn for_field(&self, field: CanonicalField) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }
}
