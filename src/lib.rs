pub mod aggregate;
pub mod cli;
pub mod collation;
pub mod config;
pub mod data;
pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod io_utils;
pub mod key;
pub mod mapping;
pub mod record;
pub mod sample;
pub mod sort;
pub mod source;
pub mod state;
pub mod table;

use std::{env, io::Write, path::PathBuf, sync::OnceLock};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    aggregate::{Distribution, Metrics},
    cli::{Cli, Commands, InputArgs},
    config::HeaderAliases,
    filter::FilterCriteria,
    ingest::Ingestor,
    sort::SortState,
    source::SourceOptions,
    state::{Action, AppState, GeoField},
};

pub use error::IngestError;
pub use ingest::{IngestOutcome, ingest};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sigami", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => handle_columns(&args),
        Commands::Summary(args) => handle_summary(&args),
        Commands::Table(args) => handle_table(&args),
        Commands::Export(args) => handle_export(&args),
    }
}

fn load_state(args: &InputArgs) -> Result<AppState> {
    let aliases = match &args.aliases {
        Some(path) => HeaderAliases::load(path)?,
        None => HeaderAliases::default(),
    };
    let ingestor = Ingestor::with_aliases(&aliases);
    let rows = match &args.input {
        Some(path) if !args.sample => {
            let options = SourceOptions {
                delimiter: args.delimiter,
                encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
            };
            info!(
                "Reading '{}' (delimiter '{}', encoding {})",
                path.display(),
                printable_delimiter(io_utils::resolve_input_delimiter(path, options.delimiter)),
                options.encoding.name()
            );
            source::read_rows(path, &options)
                .with_context(|| format!("Reading requests from {path:?}"))?
        }
        _ => {
            info!("Using the built-in sample dataset");
            sample::sample_rows()
        }
    };
    let state = AppState::default()
        .load(&ingestor, &rows)
        .context("Ingesting requests")?;
    match state.bounds {
        Some(bounds) => info!(
            "Loaded {} request(s) opened between {} and {}",
            state.records.len(),
            dates::format_date(Some(bounds.min)),
            dates::format_date(Some(bounds.max))
        ),
        None => info!("Loaded {} request(s) without opening dates", state.records.len()),
    }
    Ok(state)
}

fn apply_filters(state: AppState, filters: &cli::FilterArgs) -> AppState {
    let state = filters
        .actions()
        .into_iter()
        .fold(state, |state, action| state.transition(action));
    debug!("Active criteria: {:?}", state.criteria);
    state
}

/// Selecting a column sorts ascending; selecting it again flips to descending.
fn apply_sort(state: AppState, sort: Option<SortState>) -> AppState {
    let Some(SortState {
        column: Some(column),
        direction,
    }) = sort
    else {
        return state;
    };
    let state = state.transition(Action::ToggleSort(column));
    if direction.is_ascending() {
        state
    } else {
        state.transition(Action::ToggleSort(column))
    }
}

fn handle_columns(args: &cli::ColumnsArgs) -> Result<()> {
    let state = load_state(&args.input)?;
    let mut table = table::Table::new(["column", "source header"]);
    for (field, header) in state.mapping.entries() {
        table.push(vec![
            field.to_string(),
            header.unwrap_or("(unmapped)").to_string(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    loaded: usize,
    criteria: &'a FilterCriteria,
    metrics: &'a Metrics,
    by_status: &'a Distribution,
    by_subsecretaria: &'a Distribution,
    top_subjects: &'a [(String, usize)],
    geo: GeoField,
    by_geo: &'a Distribution,
    by_analyst: &'a Distribution,
}

fn handle_summary(args: &cli::SummaryArgs) -> Result<()> {
    let state = load_state(&args.input)?.transition(Action::SetGeo(args.geo.into()));
    let state = apply_filters(state, &args.filters);
    let view = state.view();
    info!(
        "{} of {} request(s) match the active filters",
        view.rows.len(),
        state.records.len()
    );

    if args.json {
        let report = SummaryReport {
            loaded: state.records.len(),
            criteria: &state.criteria,
            metrics: &view.metrics,
            by_status: &view.by_status,
            by_subsecretaria: &view.by_subsecretaria,
            top_subjects: &view.top_subjects,
            geo: view.geo,
            by_geo: &view.by_geo,
            by_analyst: &view.by_analyst,
        };
        let json = serde_json::to_string_pretty(&report).context("Serializing summary")?;
        println!("{json}");
        return Ok(());
    }

    let geo_label = view.geo.field().as_str();
    let sections = [
        ("Metrics", table::metrics_table(&view.metrics)),
        ("Status", table::distribution_table("status", &view.by_status)),
        (
            "Subsecretaria",
            table::distribution_table("subsecretaria", &view.by_subsecretaria),
        ),
        ("Top subjects", table::count_table("assunto", &view.top_subjects)),
        ("Geography", table::distribution_table(geo_label, &view.by_geo)),
        ("Analysts", table::distribution_table("analista", &view.by_analyst)),
    ];
    for (idx, (title, section)) in sections.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{title}");
        print!("{}", section.render());
    }
    Ok(())
}

fn handle_table(args: &cli::TableArgs) -> Result<()> {
    let state = apply_filters(load_state(&args.input)?, &args.filters);
    let state = apply_sort(state, args.sort);
    let view = state.view();
    let table = table::records_table(&view.rows, args.limit);
    print!("{}", table.render());
    info!(
        "Displayed {} of {} matching request(s)",
        table.len(),
        view.rows.len()
    );
    Ok(())
}

fn handle_export(args: &cli::ExportArgs) -> Result<()> {
    let state = apply_filters(load_state(&args.input)?, &args.filters);
    let state = apply_sort(state, args.sort);
    let rows = state.view().rows;
    if rows.is_empty() {
        info!("No requests match the active filters; nothing exported");
        return Ok(());
    }
    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(export::default_file_name(Local::now().date_naive()))
    });
    let mut output = io_utils::open_output(&path)?;
    let written = export::write_csv(&rows, &mut output)
        .with_context(|| format!("Exporting requests to {path:?}"))?;
    output.flush().context("Flushing export output")?;
    if !io_utils::is_dash(&path) {
        info!("Exported {written} request(s) to {path:?}");
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
