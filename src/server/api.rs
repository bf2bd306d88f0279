//! REST API handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::calendar::{export, BatchReport, CalendarRequest};
use crate::content::improve::{ImproveRequest, Improvement};
use crate::engine::ProfileInput;
use crate::error::{Error, ErrorCategory, PostcalErrorTrait};
use crate::llm::RosterStatus;
use crate::models::CalendarEntry;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error carried out of a handler: status + body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(message),
        }
    }

    /// Status from the error category, `message` as the headline
    pub fn from_error(message: &str, error: &Error) -> Self {
        let status = match error.category() {
            ErrorCategory::Input => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match error {
            Error::InvalidInput(reason) => ErrorResponse::new(reason.clone()),
            other => ErrorResponse::new(message).with_details(other.to_string()),
        };
        Self { status, body }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatusResponse {
    pub success: bool,
    #[serde(flatten)]
    pub status: RosterStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
    pub current_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub success: bool,
    #[serde(flatten)]
    pub improvement: Improvement,
}

// ============================================================================
// Generate request / response
// ============================================================================

/// Services may arrive as a list or as one newline-separated string
///
/// Any other JSON value is accepted and treated as no services.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServicesField {
    List(Vec<String>),
    Text(String),
    Other(serde_json::Value),
}

impl ServicesField {
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Text(text) => crate::utils::split_lines(&text),
            Self::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub country_code: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub services: Option<ServicesField>,
    pub hashtags: Option<Vec<String>>,
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub date_range: DateRange,
    pub country_code: String,
    pub total_posts: usize,
    pub calendar: Vec<CalendarEntry>,
    pub summary: BatchReport,
}

fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, ApiError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("startDate and endDate are required"))?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::bad_request(format!("Invalid {field}: {value}. Expected YYYY-MM-DD"))
    })
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api_index))
        .route("/api/health", get(health_check))
        .route("/api/countries", get(list_countries))
        .route("/api/holidays/{year}/{country}", get(list_holidays))
        .route("/api/model-status", get(model_status))
        .route("/api/reset-models", post(reset_models))
        .route("/api/generate", post(generate))
        .route("/api/improve-post", post(improve_post))
        .route("/metrics", get(metrics))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn api_index() -> impl IntoResponse {
    Json(json!({
        "message": "postcal calendar API",
        "endpoints": {
            "/api/generate": "POST - Generate a post calendar",
            "/api/improve-post": "POST - Improve an existing post",
            "/api/countries": "GET - Available countries",
            "/api/holidays/{year}/{country}": "GET - Holidays for a year and country",
            "/api/model-status": "GET - Model roster status",
            "/api/reset-models": "POST - Reset model failures",
            "/metrics": "GET - Prometheus metrics"
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.available_countries().await)
}

async fn list_holidays(
    State(state): State<AppState>,
    Path((year, country)): Path<(i32, String)>,
) -> impl IntoResponse {
    Json(state.engine.holidays(year, &country.to_uppercase()).await)
}

async fn model_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ModelStatusResponse {
        success: true,
        status: state.engine.model_status().await,
    })
}

async fn reset_models(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.engine.reset_model_failures().await;

    Json(ResetResponse {
        success: true,
        message: "Model failures reset successfully".to_string(),
        current_model: status.current_model,
    })
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    let start = parse_date("startDate", request.start_date.as_deref())?;
    let end = parse_date("endDate", request.end_date.as_deref())?;

    let country_code = request
        .country_code
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.engine.default_country().to_string());

    let as_text = match request.format.as_deref() {
        None | Some("json") => false,
        Some("text") => true,
        Some(other) => {
            return Err(ApiError::bad_request(format!(
                "Unknown format: {other}. Expected json or text"
            )))
        }
    };

    let calendar_request = CalendarRequest::new(start, end, country_code.clone());
    state
        .engine
        .check_request(&calendar_request)
        .map_err(|e| ApiError::from_error("Invalid date range", &e))?;

    let profile = state
        .engine
        .build_profile(ProfileInput {
            name: request.company_name.unwrap_or_default(),
            website: request.website.unwrap_or_default(),
            services: request.services.map(ServicesField::into_list).unwrap_or_default(),
            industry: request.industry.unwrap_or_default(),
            hashtags: request.hashtags.unwrap_or_default(),
        })
        .await;

    let batch = state.engine.run_batch(&profile, &calendar_request).await;

    if as_text {
        let body = export::to_text(&batch.entries);
        return Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response());
    }

    Ok(Json(GenerateResponse {
        success: true,
        date_range: DateRange {
            start_date: start,
            end_date: end,
        },
        country_code,
        total_posts: batch.entries.len(),
        calendar: batch.entries,
        summary: batch.report,
    })
    .into_response())
}

async fn improve_post(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, ApiError> {
    match state.engine.improve_post(&request).await {
        Ok(improvement) => Ok(Json(ImproveResponse {
            success: true,
            improvement,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Post improvement failed");
            Err(ApiError::from_error("Failed to improve post", &e))
        }
    }
}

async fn metrics() -> Response {
    match crate::metrics::gather_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to encode metrics").with_details(e.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Tests
// ============================================================================
