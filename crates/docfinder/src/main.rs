use crate::prelude::*;
use clap::Parser;

mod api;
mod error;
mod prelude;
mod render;
mod search;
mod serve;
mod specialties;
mod suggest;
mod url;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search a doctor directory by name, specialty and consultation mode"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// URL of the JSON doctor list
    #[clap(
        long,
        env = "DOCFINDER_ENDPOINT",
        global = true,
        default_value = api::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// Whether to display additional information.
    #[clap(long, env = "DOCFINDER_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Filter and sort the doctor list
    Search(crate::search::App),

    /// List the specialties offered across the directory
    Specialties(crate::specialties::App),

    /// Suggest doctor names for partial input
    Suggest(crate::suggest::App),

    /// Apply filter changes to a query string without fetching anything
    Url(crate::url::App),

    /// Serve the directory over HTTP, driven by the request query string
    Serve(crate::serve::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(sub_app) => crate::search::run(sub_app, app.global).await,
        SubCommands::Specialties(sub_app) => crate::specialties::run(sub_app, app.global).await,
        SubCommands::Suggest(sub_app) => crate::suggest::run(sub_app, app.global).await,
        SubCommands::Url(sub_app) => crate::url::run(sub_app, app.global),
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
