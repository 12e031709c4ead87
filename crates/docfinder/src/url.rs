use crate::prelude::{eprintln, println, *};
use docfinder_core::filters::FilterState;
use docfinder_core::query::{apply_update, FilterUpdate, QueryParams};

#[derive(Debug, clap::Parser)]
#[command(name = "url")]
#[command(about = "Apply filter changes to a query string without fetching anything")]
pub struct App {
    /// Query string to start from (e.g., "?search=rao&specialty=ENT")
    #[arg(default_value = "")]
    query: String,

    /// Remove search, mode, sort and every specialty before other changes
    #[arg(long)]
    clear_all: bool,

    /// Set a field, as FIELD=VALUE (e.g., "mode=video"; "sort=" clears it)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,

    /// Toggle a specialty in or out of the selection
    #[arg(long = "toggle", value_name = "SPECIALTY")]
    toggles: Vec<String>,

    /// Print the decoded filters as JSON instead of the query string
    #[arg(long)]
    decode: bool,
}

fn parse_set(assignment: &str) -> Result<FilterUpdate> {
    let (field, value) = assignment
        .split_once('=')
        .ok_or_else(|| eyre!("Invalid --set '{}': expected FIELD=VALUE", assignment))?;

    FilterUpdate::parse(field, Some(value)).map_err(|e| eyre!("{}", e))
}

/// Every transition requested on the command line, in application order
fn collect_updates(app: &App) -> Result<Vec<FilterUpdate>> {
    let mut updates = Vec::new();

    if app.clear_all {
        updates.push(FilterUpdate::ClearAll);
    }
    for assignment in &app.sets {
        updates.push(parse_set(assignment)?);
    }
    for specialty in &app.toggles {
        updates.push(FilterUpdate::ToggleSpecialty(specialty.clone()));
    }

    Ok(updates)
}

fn transform(app: &App) -> Result<QueryParams> {
    let updates = collect_updates(app)?;

    Ok(updates
        .iter()
        .fold(QueryParams::parse(&app.query), |params, update| {
            apply_update(&params, update)
        }))
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let params = transform(&app)?;

    if global.verbose {
        eprintln!("{} -> ?{}", app.query, params);
    }

    if app.decode {
        let filters = FilterState::from_params(&params);
        println!("{}", serde_json::to_string_pretty(&filters)?);
    } else {
        println!("?{}", params);
    }

    Ok(())
}
