//! Immutable application state and its transition function.
//!
//! Every interaction is an [`Action`]; [`AppState::transition`] returns a new
//! state and never mutates the receiver. Loading goes through
//! [`AppState::load`], which either yields a fully replaced state or an
//! error, leaving the caller's current state untouched.
//!
//! Views ([`AppState::view`]) are recomputed from scratch on demand.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    aggregate::{self, DateBounds, Distribution, Metrics},
    data::RawRow,
    error::IngestError,
    filter::{self, FilterCriteria},
    ingest::{FilterOptions, IngestOutcome, Ingestor},
    mapping::{CanonicalField, ColumnMapping},
    record::Record,
    sort::{self, SortState},
};

/// Quick-filter sentinel that clears every criterion.
pub const QUICK_FILTER_ALL: &str = "all";

/// Number of subjects shown in the ranking.
pub const TOP_SUBJECTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoField {
    #[default]
    Cidade,
    Bairro,
}

impl GeoField {
    pub fn field(self) -> CanonicalField {
        match self {
            GeoField::Cidade => CanonicalField::Cidade,
            GeoField::Bairro => CanonicalField::Bairro,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loaded(IngestOutcome),
    SetStatus(String),
    SetSubsecretaria(String),
    SetSearch(String),
    SetStart(Option<chrono::NaiveDate>),
    SetEnd(Option<chrono::NaiveDate>),
    /// Status candidates from a summary card, or [`QUICK_FILTER_ALL`].
    QuickFilter(Vec<String>),
    ClearFilters,
    ToggleSort(CanonicalField),
    SetGeo(GeoField),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub records: Arc<[Record]>,
    pub mapping: ColumnMapping,
    pub options: FilterOptions,
    pub bounds: Option<DateBounds>,
    pub criteria: FilterCriteria,
    pub sort: SortState,
    pub geo: GeoField,
}

/// Everything a presentation layer renders for the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    pub rows: Vec<Record>,
    pub metrics: Metrics,
    pub by_status: Distribution,
    pub by_subsecretaria: Distribution,
    pub top_subjects: Vec<(String, usize)>,
    pub geo: GeoField,
    pub by_geo: Distribution,
    pub by_analyst: Distribution,
}

impl AppState {
    /// Ingests `rows` into a fresh state; on failure nothing is replaced.
    pub fn load(&self, ingestor: &Ingestor, rows: &[RawRow]) -> Result<AppState, IngestError> {
        let outcome = ingestor.ingest(rows)?;
        Ok(self.transition(Action::Loaded(outcome)))
    }

    pub fn transition(&self, action: Action) -> AppState {
        let mut next = self.clone();
        match action {
            Action::Loaded(outcome) => {
                next.records = outcome.records;
                next.mapping = outcome.mapping;
                next.options = outcome.options;
                next.bounds = outcome.bounds;
                next.criteria = next.default_criteria();
                next.sort = SortState::default();
            }
            Action::SetStatus(status) => {
                next.criteria = next.criteria.with_status(status);
            }
            Action::SetSubsecretaria(subsecretaria) => {
                next.criteria = next.criteria.with_subsecretaria(subsecretaria);
            }
            Action::SetSearch(search) => {
                next.criteria = next.criteria.with_search(search);
            }
            Action::SetStart(start) => {
                next.criteria = next.criteria.with_start(start);
            }
            Action::SetEnd(end) => {
                next.criteria = next.criteria.with_end(end);
            }
            Action::QuickFilter(candidates) => match candidates.as_slice() {
                [only] if only == QUICK_FILTER_ALL => {
                    next.criteria = next.default_criteria();
                }
                _ => {
                    if let Some(status) = next.pick_status(&candidates) {
                        next.criteria = next.criteria.with_status(status);
                    }
                }
            },
            Action::ClearFilters => {
                next.criteria = next.default_criteria();
            }
            Action::ToggleSort(column) => {
                next.sort = next.sort.toggled(column);
            }
            Action::SetGeo(geo) => {
                next.geo = geo;
            }
        }
        next
    }

    /// No text criteria; date range pinned to the loaded bounds.
    fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_start(self.bounds.map(|b| b.min))
            .with_end(self.bounds.map(|b| b.max))
    }

    /// First candidate offered as a status option, else the first candidate.
    fn pick_status(&self, candidates: &[String]) -> Option<String> {
        candidates
            .iter()
            .find(|c| self.options.statuses.contains(c))
            .or_else(|| candidates.first())
            .cloned()
    }

    pub fn filtered(&self) -> Vec<Record> {
        filter::apply(&self.records, &self.criteria)
    }

    pub fn view(&self) -> FilteredView {
        let filtered = self.filtered();
        let geo_field = self.geo.field();
        FilteredView {
            metrics: aggregate::metrics(&filtered),
            by_status: aggregate::distribution(&filtered, CanonicalField::Status),
            by_subsecretaria: aggregate::distribution(&filtered, CanonicalField::Subsecretaria),
            top_subjects: aggregate::distribution(&filtered, CanonicalField::Assunto)
                .top(TOP_SUBJECTS),
            geo: self.geo,
            by_geo: aggregate::distribution(&filtered, geo_field),
            by_analyst: aggregate::distribution(&filtered, CanonicalField::Analista),
            rows: sort::sort_rows(filtered, self.sort),
        }
    }
}
