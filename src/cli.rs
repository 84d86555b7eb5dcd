use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    dates,
    sort::SortState,
    state::{Action, GeoField},
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Normalize request ledgers and query them like the SIGAMI dashboard",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which source header feeds each canonical column
    Columns(ColumnsArgs),
    /// Print metrics and distributions for the filtered requests
    Summary(SummaryArgs),
    /// Print the filtered requests as a table
    Table(TableArgs),
    /// Export the filtered requests as CSV
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV/TSV or spreadsheet file ('-' reads CSV from stdin)
    #[arg(
        short = 'i',
        long = "input",
        required_unless_present = "sample",
        conflicts_with = "sample"
    )]
    pub input: Option<PathBuf>,
    /// Use the built-in demonstration dataset instead of a file
    #[arg(long)]
    pub sample: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file with extra header candidates per canonical column
    #[arg(long)]
    pub aliases: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Keep only requests with exactly this status
    #[arg(long)]
    pub status: Option<String>,
    /// Keep only requests from exactly this subsecretaria
    #[arg(long)]
    pub subsecretaria: Option<String>,
    /// Case-insensitive search over protocolo, assunto and analista
    #[arg(long)]
    pub search: Option<String>,
    /// Earliest opening date (DD/MM/YYYY or YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,
    /// Latest opening date (DD/MM/YYYY or YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
}

impl FilterArgs {
    /// State transitions for the flags given; unset flags keep the loaded defaults.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(status) = &self.status {
            actions.push(Action::SetStatus(status.clone()));
        }
        if let Some(subsecretaria) = &self.subsecretaria {
            actions.push(Action::SetSubsecretaria(subsecretaria.clone()));
        }
        if let Some(search) = &self.search {
            actions.push(Action::SetSearch(search.clone()));
        }
        if let Some(start) = self.start {
            actions.push(Action::SetStart(Some(start)));
        }
        if let Some(end) = self.end {
            actions.push(Action::SetEnd(Some(end)));
        }
        actions
    }
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Geographic breakdown to show
    #[arg(long, value_enum, default_value = "cidade")]
    pub geo: GeoArg,
    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Sort directive of the form `column[:asc|desc]`
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortState>,
    /// Limit number of rows displayed
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Sort directive of the form `column[:asc|desc]`
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortState>,
    /// Output CSV file ('-' for stdout; defaults to sigami_solicitacoes_<date>.csv)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum GeoArg {
    Cidade,
    Bairro,
}

impl From<GeoArg> for GeoField {
    fn from(value: GeoArg) -> Self {
        match value {
            GeoArg::Cidade => GeoField::Cidade,
            GeoArg::Bairro => GeoField::Bairro,
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    dates::parse_text(value).ok_or_else(|| format!("Unrecognized date '{value}'"))
}

pub fn parse_sort(value: &str) -> Result<SortState, String> {
    value.parse::<SortState>().map_err(|err| err.to_string())
}
