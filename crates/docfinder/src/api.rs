use crate::prelude::{eprintln, *};
use docfinder_core::doctor::{normalize_doctors, Doctor, RawDoctor};
use docfinder_core::view::{Directory, LoadState};

pub const DEFAULT_ENDPOINT: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Fetch the doctor list and normalize every record
///
/// One GET, no retry. Every failure maps to [`Error::FetchFailed`].
pub async fn fetch_doctors(client: &reqwest::Client, url: &str) -> Result<Vec<Doctor>, Error> {
    log::debug!("GET {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::FetchFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::FetchFailed(format!("HTTP {}", response.status())));
    }

    let records: Vec<RawDoctor> = response
        .json()
        .await
        .map_err(|e| Error::FetchFailed(format!("invalid response body: {e}")))?;

    log::debug!("received {} doctor records", records.len());

    Ok(normalize_doctors(records))
}

/// Fetch the directory for a command, failing the command on error
pub async fn load_directory(global: &crate::Global) -> Result<Directory> {
    if global.verbose {
        eprintln!("Loading doctors from {}...", global.endpoint);
    }

    let client = reqwest::Client::new();
    let doctors = fetch_doctors(&client, &global.endpoint).await?;

    if global.verbose {
        eprintln!("Loaded {} doctors", doctors.len());
    }

    Ok(Directory::new(doctors))
}

/// Fetch the directory and settle it into a [`LoadState`]
///
/// Used by the server, which keeps running and reports the failure instead.
pub async fn load_state(global: &crate::Global) -> LoadState {
    let client = reqwest::Client::new();
    let result = fetch_doctors(&client, &global.endpoint).await;

    if let Err(err) = &result {
        log::error!("{err}");
    }

    LoadState::from_result(result)
}
