use crate::prelude::{eprintln, *};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use docfinder_core::filters::FilterState;
use docfinder_core::query::{update_filters, QueryParams};
use docfinder_core::suggest::{filter_catalog, suggestions};
use docfinder_core::view::{Directory, LoadState};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the directory over HTTP, driven by the request query string")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "DOCFINDER_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "DOCFINDER_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

type SharedState = Arc<LoadState>;

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", app.host, app.port);

    if global.verbose {
        eprintln!("Loading doctors from {}...", global.endpoint);
    }

    let state = crate::api::load_state(&global).await;

    if let Some(message) = state.error() {
        eprintln!("{message}; data routes will answer 503 until restart");
    }

    let app_router = router(Arc::new(state));

    if global.verbose {
        eprintln!("Listening on http://{}", addr);
        eprintln!("Doctors endpoint: http://{}/doctors?specialty=ENT&sort=fees", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/doctors", get(doctors_handler))
        .route("/specialties", get(specialties_handler))
        .route("/suggest", get(suggest_handler))
        .route("/update", post(update_handler))
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Borrow the directory, or produce the response that explains why not
fn ready(state: &LoadState) -> Result<&Directory, Response> {
    match state {
        LoadState::Ready(directory) => Ok(directory),
        LoadState::Failed(message) => Err(error_response(StatusCode::SERVICE_UNAVAILABLE, message)),
        LoadState::Loading => Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Loading doctors...",
        )),
    }
}

fn params_of(query: Option<String>) -> QueryParams {
    QueryParams::parse(query.as_deref().unwrap_or_default())
}

async fn doctors_handler(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    let directory = match ready(&state) {
        Ok(directory) => directory,
        Err(response) => return response,
    };

    let filters = FilterState::from_params(&params_of(query));
    log::debug!("GET /doctors ?{}", filters.to_query_string());

    Json(directory.view(&filters)).into_response()
}

async fn specialties_handler(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> Response {
    let directory = match ready(&state) {
        Ok(directory) => directory,
        Err(response) => return response,
    };

    let params = params_of(query);
    let needle = params.get("filter").unwrap_or_default();

    Json(filter_catalog(directory.catalog(), needle)).into_response()
}

async fn suggest_handler(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    let directory = match ready(&state) {
        Ok(directory) => directory,
        Err(response) => return response,
    };

    let params = params_of(query);
    let text = params.get("q").unwrap_or_default();

    Json(suggestions(text, directory.doctors())).into_response()
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    query: String,
    field: String,
    value: Option<String>,
}

/// Apply one filter transition to a query string
///
/// Needs no data, so it answers even when the fetch failed.
async fn update_handler(Json(request): Json<UpdateRequest>) -> Response {
    match update_filters(&request.query, &request.field, request.value.as_deref()) {
        Ok(query) => {
            let filters = FilterState::from_params(&QueryParams::parse(&query));
            Json(serde_json::json!({ "query": query, "filters": filters })).into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfinder_core::doctor::{ConsultationMode, Doctor};

    fn create_doctor(name: &str, fees: u64, specialty: &str, mode: ConsultationMode) -> Doctor {
        Doctor {
            id: name.to_lowercase(),
            name: name.to_string(),
            photo: None,
            specialties: vec![specialty.to_string()],
            qualifications: String::new(),
            experience: 1,
            experience_text: "1 Years of experience".to_string(),
            fees,
            fees_text: format!("₹ {fees}"),
            clinic: String::new(),
            location: String::new(),
            consultation_modes: vec![mode],
        }
    }

    fn ready_state() -> SharedState {
        Arc::new(LoadState::Ready(Directory::new(vec![
            create_doctor("Alice", 500, "Dentist", ConsultationMode::InClinic),
            create_doctor("Bob", 300, "ENT", ConsultationMode::VideoConsult),
        ])))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_doctors_handler_filters_by_query() {
        let response = doctors_handler(
            State(ready_state()),
            RawQuery(Some("mode=video".to_string())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["doctors"][0]["name"], "Bob");
        assert_eq!(json["query"], "mode=video");
    }

    #[tokio::test]
    async fn test_doctors_handler_sorts_without_query() {
        let response = doctors_handler(State(ready_state()), RawQuery(Some("sort=fees".to_string()))).await;
        let json = body_json(response).await;
        assert_eq!(json["doctors"][0]["name"], "Bob");
        assert_eq!(json["doctors"][1]["name"], "Alice");

        let response = doctors_handler(State(ready_state()), RawQuery(None)).await;
        let json = body_json(response).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["query"], "");
    }

    #[tokio::test]
    async fn test_doctors_handler_after_failed_fetch() {
        let state = Arc::new(LoadState::Failed("Failed to fetch doctors data".to_string()));
        let response = doctors_handler(State(state), RawQuery(None)).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to fetch doctors data");
    }

    #[tokio::test]
    async fn test_specialties_handler_filter() {
        let response =
            specialties_handler(State(ready_state()), RawQuery(Some("filter=den".to_string()))).await;
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!(["Dentist"]));
    }

    #[tokio::test]
    async fn test_suggest_handler() {
        let response = suggest_handler(State(ready_state()), RawQuery(Some("q=AL".to_string()))).await;
        let json = body_json(response).await;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_update_handler_toggles_specialty() {
        let request = UpdateRequest {
            query: "?specialty=ENT&specialty=Dentist".to_string(),
            field: "specialty".to_string(),
            value: Some("ENT".to_string()),
        };

        let response = update_handler(Json(request)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["query"], "specialty=Dentist");
        assert_eq!(json["filters"]["specialties"], serde_json::json!(["Dentist"]));
    }

    #[tokio::test]
    async fn test_update_handler_unknown_field() {
        let request = UpdateRequest {
            query: String::new(),
            field: "rating".to_string(),
            value: Some("5".to_string()),
        };

        let response = update_handler(Json(request)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
