use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    collation::CollationKey,
    mapping::CanonicalField,
    record::{NOT_INFORMED, Record},
};

pub const STATUS_CONCLUDED: &str = "Concluída";
pub const STATUS_IN_PROGRESS: [&str; 2] = ["Em Atendimento", "Aguardando Solicitante"];
pub const STATUS_NOT_STARTED: &str = "Não Iniciado";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    entries: Vec<(String, usize)>,
}

impl Distribution {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == value)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent values, ties kept in first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        self.entries
            .iter()
            .cloned()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .take(n)
            .collect()
    }
}

pub fn distribution(records: &[Record], field: CanonicalField) -> Distribution {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();
    for record in records {
        let value = record.field(field);
        let label = if value.is_empty() {
            NOT_INFORMED.to_string()
        } else {
            value.render()
        };
        match positions.get(&label) {
            Some(&idx) => entries[idx].1 += 1,
            None => {
                positions.insert(label.clone(), entries.len());
                entries.push((label, 1));
            }
        }
    }
    Distribution { entries }
}

/// Distinct non-empty values of a field, in pt-BR collation order.
pub fn unique_values(records: &[Record], field: CanonicalField) -> Vec<String> {
    records
        .iter()
        .map(|record| record.field(field))
        .filter(|value| !value.is_empty())
        .map(|value| value.render())
        .unique()
        .sorted_by_cached_key(|value| CollationKey::new(value))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total: usize,
    pub concluded: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub completion_rate: f64,
}

impl Metrics {
    pub fn completion_rate_label(&self) -> String {
        format!("{}%", one_decimal(self.completion_rate))
    }
}

// `{:.1}` is exact but breaks ties to even. At one decimal the only exact
// ties are quarters (x.25, x.75); those round away from zero.
fn one_decimal(value: f64) -> String {
    if (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

pub fn metrics(records: &[Record]) -> Metrics {
    let total = records.len();
    let count = |pred: &dyn Fn(&str) -> bool| {
        records
            .iter()
            .filter(|record| pred(record.status.as_str()))
            .count()
    };
    let concluded = count(&|status| status == STATUS_CONCLUDED);
    let in_progress = count(&|status| STATUS_IN_PROGRESS.contains(&status));
    let not_started = count(&|status| status == STATUS_NOT_STARTED);
    let completion_rate = if total > 0 {
        concluded as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    Metrics {
        total,
        concluded,
        in_progress,
        not_started,
        completion_rate,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Earliest and latest `abertura` among records that have one.
pub fn date_bounds(records: &[Record]) -> Option<DateBounds> {
    let (min, max) = records
        .iter()
        .filter_map(|record| record.abertura)
        .minmax()
        .into_option()?;
    Some(DateBounds { min, max })
}
