use std::{
    cmp::{Ordering, Reverse},
    fmt,
    str::FromStr,
};

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    collation::CollationKey,
    mapping::CanonicalField,
    record::{FieldValue, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Active table ordering. `None` keeps the filtered (source) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<CanonicalField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(column: CanonicalField, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Selecting the active column flips its direction; any other column starts ascending.
    pub fn toggled(self, column: CanonicalField) -> Self {
        if self.column == Some(column) {
            Self::by(column, self.direction.flipped())
        } else {
            Self::by(column, SortDirection::Asc)
        }
    }
}

impl FromStr for SortState {
    type Err = anyhow::Error;

    fn from_str(spec: &str) -> Result<Self> {
        let mut parts = spec.split(':');
        let column = parts
            .next()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Sort directive is missing a column"))?
            .parse::<CanonicalField>()?;
        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(other) => return Err(anyhow!("Unknown sort direction '{other}'")),
        };
        Ok(Self::by(column, direction))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Date(NaiveDate),
    Text(CollationKey),
}

impl SortKey {
    pub fn of(record: &Record, field: CanonicalField) -> Self {
        match record.field(field) {
            // Missing dates sort as the Unix epoch.
            FieldValue::Date(date) => SortKey::Date(date.unwrap_or_default()),
            FieldValue::Text(text) => SortKey::Text(CollationKey::new(text)),
        }
    }
}

pub fn compare(a: &Record, b: &Record, field: CanonicalField, direction: SortDirection) -> Ordering {
    let ordering = SortKey::of(a, field).cmp(&SortKey::of(b, field));
    if direction.is_ascending() {
        ordering
    } else {
        ordering.reverse()
    }
}

/// Stable sort; rows with equal keys keep their relative order in both directions.
pub fn sort_rows(mut rows: Vec<Record>, state: SortState) -> Vec<Record> {
    let Some(column) = state.column else {
        return rows;
    };
    if state.direction.is_ascending() {
        rows.sort_by_cached_key(|row| SortKey::of(row, column));
    } else {
        rows.sort_by_cached_key(|row| Reverse(SortKey::of(row, column)));
    }
    rows
}
