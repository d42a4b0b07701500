use crate::AppState;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cc_calendar::{render, to_svg, RenderedCalendar};
use cc_series::{AggregateError, Summary};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

/// `?users=a,b,c`
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub users: String,
}

/// Aggregation failure rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub AggregateError);

impl From<AggregateError> for ApiError {
    fn from(value: AggregateError) -> Self {
        ApiError(value)
    }
}

#[must_use]
pub(crate) fn api_error_status(error: &AggregateError) -> StatusCode {
    match error {
        AggregateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AggregateError::UpstreamFailure { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = api_error_status(&self.0);
        let body = Json(json!({
            "error": {
                "code": self.0.code(),
                "message": self.0.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn contributions(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Summary>, ApiError> {
    let summary = summarize_request(&state, &query).await?;
    Ok(Json(summary))
}

pub async fn calendar_json(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<RenderedCalendar>, ApiError> {
    let summary = summarize_request(&state, &query).await?;
    Ok(Json(render(&summary, &state.geometry)))
}

pub async fn calendar_svg(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Response, ApiError> {
    let summary = summarize_request(&state, &query).await?;
    let svg = to_svg(&render(&summary, &state.geometry), &state.palette);
    let max_age = format!("public, max-age={}", state.service.ttl().as_secs());
    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/svg+xml"))],
        svg,
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&max_age) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    Ok(response)
}

async fn summarize_request(state: &AppState, query: &UsersQuery) -> Result<Summary, ApiError> {
    match state.service.summary(&query.users).await {
        Ok(summary) => {
            info!(
                "Served {} ({} days, {} contributions)",
                query.users,
                summary.counts.len(),
                summary.total
            );
            Ok(summary)
        }
        Err(e) => {
            warn!("Rejected request for '{}': {}", query.users, e);
            Err(e.into())
        }
    }
}
