use crate::prelude::{eprintln, println, *};
use docfinder_core::filters::FilterState;
use docfinder_core::query::{apply_update, FilterUpdate, QueryParams};

use crate::render::{format_view_json, format_view_text};

#[derive(Debug, clap::Parser)]
#[command(name = "search")]
#[command(about = "Filter and sort the doctor list")]
pub struct App {
    /// Start from a saved query string (e.g., "?specialty=ENT&sort=fees")
    #[arg(short, long, env = "DOCFINDER_QUERY", default_value = "")]
    query: String,

    /// Case-insensitive substring of the doctor name
    #[arg(short, long)]
    search: Option<String>,

    /// Consultation mode: video, clinic (empty clears it)
    #[arg(short, long)]
    mode: Option<String>,

    /// Sort order: fees (lowest first), experience (most first)
    #[arg(long)]
    sort: Option<String>,

    /// Toggle a specialty; repeat to select several (any of them matches)
    #[arg(long = "specialty", value_name = "NAME")]
    specialties: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Turn the command flags into the query parameters they describe
///
/// The `--query` string is decoded first, then every flag is applied as the
/// same transition the interface would trigger.
fn build_params(app: &App) -> QueryParams {
    let mut updates = Vec::new();
    if let Some(search) = &app.search {
        updates.push(FilterUpdate::Search(search.clone()));
    }
    if let Some(mode) = &app.mode {
        updates.push(FilterUpdate::Mode(mode.clone()));
    }
    if let Some(sort) = &app.sort {
        updates.push(FilterUpdate::Sort(sort.clone()));
    }
    for specialty in &app.specialties {
        updates.push(FilterUpdate::ToggleSpecialty(specialty.clone()));
    }

    updates
        .iter()
        .fold(QueryParams::parse(&app.query), |params, update| {
            apply_update(&params, update)
        })
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let params = build_params(&app);
    let filters = FilterState::from_params(&params);

    if global.verbose {
        eprintln!("Filters: ?{}", filters.to_query_string());
    }

    let directory = crate::api::load_directory(&global).await?;
    let view = directory.view(&filters);

    if app.json {
        println!("{}", format_view_json(&view)?);
    } else {
        print!("{}", format_view_text(&view));
    }

    Ok(())
}
