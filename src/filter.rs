use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: Option<String>,
    pub subsecretaria: Option<String>,
    /// Always stored lowercased.
    pub search: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_empty(status.into());
        self
    }

    pub fn with_subsecretaria(mut self, subsecretaria: impl Into<String>) -> Self {
        self.subsecretaria = non_empty(subsecretaria.into());
        self
    }

    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        self.search = non_empty(search.as_ref().trim().to_lowercase());
        self
    }

    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Field-wise merge; populated fields of `other` win.
    pub fn combine(&self, other: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            status: other.status.clone().or_else(|| self.status.clone()),
            subsecretaria: other
                .subsecretaria
                .clone()
                .or_else(|| self.subsecretaria.clone()),
            search: other.search.clone().or_else(|| self.search.clone()),
            start: other.start.or(self.start),
            end: other.end.or(self.end),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(status) = &self.status
            && record.status != *status
        {
            return false;
        }
        if let Some(subsecretaria) = &self.subsecretaria
            && record.subsecretaria != *subsecretaria
        {
            return false;
        }
        if let Some(search) = &self.search
            && !record.search_blob().contains(search.as_str())
        {
            return false;
        }
        if let (Some(start), Some(abertura)) = (self.start, record.abertura)
            && abertura < start
        {
            return false;
        }
        if let (Some(end), Some(abertura)) = (self.end, record.abertura)
            && abertura > end
        {
            return false;
        }
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn apply(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NOT_INFORMED;

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 9, d)
    }

    fn record(protocolo: &str, status: &str, sub: &str, abertura: Option<NaiveDate>) -> Record {
        Record {
            protocolo: protocolo.into(),
            assunto: "Licenciamento Ambiental".into(),
            subsecretaria: sub.into(),
            status: status.into(),
            abertura,
            prazo: None,
            analista: "Analista 3".into(),
            cidade: NOT_INFORMED.into(),
            bairro: NOT_INFORMED.into(),
            uf: "RJ".into(),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("2025-0001", "Concluída", "SUBEXEC", date(10)),
            record("2025-0002", "Não Iniciado", "SUBCLAM", date(15)),
            record("2025-0003", "Concluída", "SUBCLAM", None),
            record("2025-0004", "Em Atendimento", "SUBEXEC", date(20)),
        ]
    }

    fn protocols(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.protocolo.as_str()).collect()
    }

    #[test]
    fn unconstrained_criteria_keep_everything() {
        let records = sample();
        assert!(FilterCriteria::default().is_unconstrained());
        assert_eq!(apply(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn exact_match_on_status_and_subsecretaria() {
        let records = sample();
        let criteria = FilterCriteria::default()
            .with_status("Concluída")
            .with_subsecretaria("SUBCLAM");
        assert_eq!(protocols(&apply(&records, &criteria)), vec!["2025-0003"]);

        let partial = FilterCriteria::default().with_status("Concluíd");
        assert!(apply(&records, &partial).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_protocol_subject_and_analyst() {
        let records = sample();
        let by_subject = FilterCriteria::default().with_search("  LICENCIAMENTO ");
        assert_eq!(by_subject.search.as_deref(), Some("licenciamento"));
        assert_eq!(apply(&records, &by_subject).len(), 4);

        let by_protocol = FilterCriteria::default().with_search("0004");
        assert_eq!(protocols(&apply(&records, &by_protocol)), vec!["2025-0004"]);

        let by_analyst = FilterCriteria::default().with_search("analista 3");
        assert_eq!(apply(&records, &by_analyst).len(), 4);
    }

    #[test]
    fn date_bounds_are_inclusive_and_admit_undated_records() {
        let records = sample();
        let criteria = FilterCriteria::default()
            .with_start(date(15))
            .with_end(date(20));
        assert_eq!(
            protocols(&apply(&records, &criteria)),
            vec!["2025-0002", "2025-0003", "2025-0004"]
        );

        let before_everything = FilterCriteria::default().with_end(date(1));
        assert_eq!(
            protocols(&apply(&records, &before_everything)),
            vec!["2025-0003"]
        );
    }

    #[test]
    fn empty_strings_clear_a_criterion() {
        let criteria = FilterCriteria::default().with_status("Concluída").with_status("");
        assert_eq!(criteria.status, None);
    }

    #[test]
    fn disjoint_criteria_compose() {
        let records = sample();
        let by_status = FilterCriteria::default().with_status("Concluída");
        let by_date = FilterCriteria::default().with_start(date(12));
        let chained = apply(&apply(&records, &by_status), &by_date);
        let combined = apply(&records, &by_status.combine(&by_date));
        assert_eq!(chained, combined);
        assert_eq!(protocols(&combined), vec!["2025-0003"]);
    }
}
