use crate::prelude::{println, *};
use colored::Colorize;
use docfinder_core::doctor::Doctor;
use docfinder_core::query::{apply_update, QueryParams};
use docfinder_core::suggest::Autocomplete;

#[derive(Debug, clap::Parser)]
#[command(name = "suggest")]
#[command(about = "Suggest doctor names for partial input")]
pub struct App {
    /// Partial doctor name
    #[clap(env = "DOCFINDER_SUGGEST")]
    text: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct SuggestionOutput<'a> {
    id: &'a str,
    name: &'a str,
    specialty: Option<&'a str>,
    /// Query string that searches for exactly this doctor
    query: String,
}

fn to_output<'a>(autocomplete: &Autocomplete, doctor: &'a Doctor) -> SuggestionOutput<'a> {
    let update = autocomplete.clone().select(doctor);
    SuggestionOutput {
        id: &doctor.id,
        name: &doctor.name,
        specialty: doctor.primary_specialty(),
        query: apply_update(&QueryParams::new(), &update).to_query_string(),
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let directory = crate::api::load_directory(&global).await?;

    let mut autocomplete = Autocomplete::default();
    let matches = autocomplete.on_input(&app.text, directory.doctors());
    let outputs: Vec<SuggestionOutput> = matches
        .iter()
        .map(|doctor| to_output(&autocomplete, doctor))
        .collect();

    if app.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    if outputs.is_empty() {
        println!("{}", "No matching doctors".yellow());
        return Ok(());
    }

    for output in &outputs {
        println!(
            "{} {} {}",
            output.name.white().bold(),
            output.specialty.unwrap_or_default().bright_black(),
            format!("?{}", output.query).cyan()
        );
    }

    Ok(())
}
