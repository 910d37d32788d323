mod payload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::benefits::{BenefitsCache, load_table};
use crate::core::{BenefitsTable, Evaluator, ReportBundle, evaluate};

pub use payload::{CalculatePayload, InputError, build_snapshot, validate};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("invalid query string: {}", .0.body_text())]
    QueryString(#[from] QueryRejection),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Body(rejection) => rejection.status(),
            Self::QueryString(rejection) => rejection.status(),
            Self::InvalidInput(_) | Self::Payload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected calculation request");
        error_response(self.status(), &self.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cache_file: Option<PathBuf>,
    pub benefits_seed: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub benefits: Arc<BenefitsCache>,
    pub evaluator: Arc<Evaluator>,
}

impl AppState {
    pub fn new(benefits: BenefitsCache) -> Self {
        Self {
            benefits: Arc::new(benefits),
            evaluator: Arc::new(Evaluator::new()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/state-benefits", get(state_benefits_handler))
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let cache = BenefitsCache::new(config.cache_file.clone());
    if let Some(seed) = &config.benefits_seed {
        match load_table(seed) {
            Ok(table) => {
                if let Err(e) = cache.set(table) {
                    tracing::warn!(error = %e, "benefits seed loaded but not persisted");
                }
                tracing::info!(path = %seed.display(), "seeded first-home benefits");
            }
            Err(e) => tracing::warn!(error = %e, "ignoring benefits seed"),
        }
    }

    let app = router(AppState::new(cache));
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "affordability API listening");

    axum::serve(listener, app).await
}

/// Resolves a JSON payload (or the defaults when `None`) into a full report,
/// using `benefits` for any grant or concession the payload leaves out.
pub fn report_from_json(
    payload_json: Option<&str>,
    benefits: &BenefitsTable,
) -> Result<ReportBundle, AppError> {
    let payload = match payload_json {
        Some(raw) => serde_json::from_str::<CalculatePayload>(raw)?,
        None => CalculatePayload::default(),
    };
    let input = build_snapshot(payload, benefits)?;
    Ok(evaluate(&input))
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            timestamp: Utc::now().to_rfc3339(),
        },
    )
}

async fn state_benefits_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.benefits.get())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<CalculatePayload>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(payload) = payload?;
    calculate_handler_impl(&state, payload)
}

async fn calculate_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    calculate_handler_impl(&state, payload)
}

fn calculate_handler_impl(state: &AppState, payload: CalculatePayload) -> Result<Response, AppError> {
    let benefits = state.benefits.get();
    let input = build_snapshot(payload, &benefits.data)?;
    let bundle = state.evaluator.evaluate(&input);
    tracing::debug!(
        jurisdiction = %input.jurisdiction,
        price = input.purchase_price,
        "calculated report"
    );
    Ok(json_response(StatusCode::OK, &*bundle))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Benefits, Jurisdiction, default_benefits_table, default_snapshot};
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState::new(BenefitsCache::new(None)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Response) {
        let response = app.oneshot(request).await.expect("infallible");
        (response.status(), response)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, response) = send(test_app(), get_request("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn state_benefits_serves_defaults_then_live_data() {
        let state = AppState::new(BenefitsCache::new(None));

        let (_, response) = send(router(state.clone()), get_request("/api/state-benefits")).await;
        let body = body_json(response).await;
        assert_eq!(body["source"], "default");
        assert_eq!(body["data"]["NSW"]["stampDutyConcession"], 37800.0);

        let mut table = default_benefits_table();
        table.insert(
            Jurisdiction::Nsw,
            Benefits {
                grant: 5000.0,
                stamp_duty_concession: 1.0,
            },
        );
        state.benefits.set(table).expect("memory-only set");

        let (_, response) = send(router(state), get_request("/api/state-benefits")).await;
        let body = body_json(response).await;
        assert_eq!(body["source"], "live");
        assert_eq!(body["data"]["NSW"]["grant"], 5000.0);
    }

    #[tokio::test]
    async fn calculate_post_returns_report() {
        let (status, response) = send(
            test_app(),
            post_json("/api/calculate", r#"{"purchasePrice": 600000, "yourDeposit": 60000}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["costs"]["baseLoan"], 540000.0);
        assert_eq!(body["forecast"].as_array().map(Vec::len), Some(31));
        assert_eq!(body["scenarios"].as_array().map(Vec::len), Some(9));
        assert!(body["comparison"].is_null());
    }

    #[tokio::test]
    async fn calculate_get_accepts_query_string() {
        let (status, response) = send(
            test_app(),
            get_request("/api/calculate?state=QLD&purchasePrice=400000&transportMode=transit"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["inputs"]["jurisdiction"], "QLD");
        assert_eq!(body["inputs"]["firstHomeGrant"], 30000.0);
        assert_eq!(body["inputs"]["commute"]["mode"], "transit");
        assert_eq!(body["costs"]["purchasePrice"], 400000.0);
    }

    #[tokio::test]
    async fn calculate_rejects_invalid_input() {
        let (status, response) = send(
            test_app(),
            post_json("/api/calculate", r#"{"loanTerm": 0}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "loanTerm must be > 0");
    }

    #[tokio::test]
    async fn malformed_json_body_gets_json_error() {
        let (status, response) =
            send(test_app(), post_json("/api/calculate", "{\"purchasePrice\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let msg = body["error"].as_str().expect("error message");
        assert!(msg.starts_with("invalid request body"), "{msg}");
    }

    #[tokio::test]
    async fn wrongly_typed_body_field_gets_json_error() {
        let (status, response) =
            send(test_app(), post_json("/api/calculate", r#"{"purchasePrice": "lots"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|m| m.contains("purchasePrice")));
    }

    #[tokio::test]
    async fn malformed_query_string_gets_json_error() {
        let (status, response) =
            send(test_app(), get_request("/api/calculate?state=XYZ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let msg = body["error"].as_str().expect("error message");
        assert!(msg.starts_with("invalid query string"), "{msg}");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, response) = send(test_app(), get_request("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found");
    }

    #[test]
    fn report_from_json_defaults_when_no_payload() {
        let bundle = report_from_json(None, &default_benefits_table()).expect("defaults are valid");
        assert_eq!(bundle.inputs, default_snapshot());
    }

    #[test]
    fn report_from_json_surfaces_parse_errors() {
        let err = report_from_json(Some("{not json"), &default_benefits_table())
            .expect_err("malformed");
        assert!(matches!(err, AppError::Payload(_)));
        assert!(err.to_string().starts_with("invalid request payload"));
    }
}
