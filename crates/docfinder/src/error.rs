#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// Network failure, non-success status, or an undecodable body
    #[error("Failed to fetch doctors data: {0}")]
    FetchFailed(String),
}
