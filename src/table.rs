use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    aggregate::{Distribution, Metrics},
    mapping::CanonicalField,
    record::Record,
};

const GAP: &str = "  ";

#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    numeric: Vec<usize>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn numeric(mut self, column: usize) -> Self {
        self.numeric.push(column);
        self
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths = self
            .headers
            .iter()
            .map(|h| cell_width(h).max(3))
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", self.line(&self.headers, &widths));
        let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
        let _ = writeln!(output, "{}", self.line(&rule, &widths));
        for row in &self.rows {
            let _ = writeln!(output, "{}", self.line(row, &widths));
        }
        output
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, width) in widths.iter().enumerate() {
            if idx > 0 {
                line.push_str(GAP);
            }
            let cell = cells.get(idx).map(|c| flatten(c)).unwrap_or_default();
            let padding = " ".repeat(width.saturating_sub(cell_width(&cell)));
            if self.numeric.contains(&idx) {
                line.push_str(&padding);
                line.push_str(&cell);
            } else {
                line.push_str(&cell);
                line.push_str(&padding);
            }
        }
        line.truncate(line.trim_end().len());
        line
    }
}

pub fn records_table(records: &[Record], limit: Option<usize>) -> Table {
    let mut table = Table::new(CanonicalField::ALL.iter().map(|f| f.as_str()));
    for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
        table.push(record.to_row());
    }
    table
}

pub fn distribution_table(label: &str, distribution: &Distribution) -> Table {
    count_table(label, distribution.entries())
}

pub fn count_table(label: &str, entries: &[(String, usize)]) -> Table {
    let mut table = Table::new([label, "count"]).numeric(1);
    for (value, count) in entries {
        table.push(vec![value.clone(), count.to_string()]);
    }
    table
}

pub fn metrics_table(metrics: &Metrics) -> Table {
    let mut table = Table::new(["metric", "value"]).numeric(1);
    for (name, value) in [
        ("total", metrics.total.to_string()),
        ("concluded", metrics.concluded.to_string()),
        ("in_progress", metrics.in_progress.to_string()),
        ("not_started", metrics.not_started.to_string()),
        ("completion_rate", metrics.completion_rate_label()),
    ] {
        table.push(vec![name.to_string(), value]);
    }
    table
}

fn cell_width(value: &str) -> usize {
    value.chars().count()
}

fn flatten(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
