use crate::prelude::{println, *};
use docfinder_core::query::{QueryParams, SPECIALTY_PARAM};
use docfinder_core::suggest::filter_catalog;

#[derive(Debug, clap::Parser)]
#[command(name = "specialties")]
#[command(about = "List the specialties offered across the directory")]
pub struct App {
    /// Only show specialties containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    filter: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn build_table(specialties: &[&str]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.set_titles(prettytable::row!["#", "Specialty", "Query"]);

    for (index, specialty) in specialties.iter().enumerate() {
        let mut params = QueryParams::new();
        params.append(SPECIALTY_PARAM, specialty);
        let number = index + 1;
        let query = format!("?{}", params.to_query_string());
        table.add_row(prettytable::row![number, specialty, query]);
    }

    table
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let directory = crate::api::load_directory(&global).await?;
    let specialties = filter_catalog(directory.catalog(), &app.filter);

    if app.json {
        println!("{}", serde_json::to_string_pretty(&specialties)?);
        return Ok(());
    }

    if specialties.is_empty() {
        println!("No specialties match '{}'", app.filter);
        return Ok(());
    }

    build_table(&specialties).printstd();

    Ok(())
}
