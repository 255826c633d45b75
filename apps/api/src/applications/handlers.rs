//! Axum handler for the application webhook.

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    Json,
};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::applications::models::{ApplicationRequest, ExtractedFields};
use crate::applications::processor::process_application;
use crate::errors::AppError;
use crate::state::AppState;

const APPLICATION_TEXT_FIELD: &str = "application_text";

#[derive(Debug, Serialize)]
pub struct ProcessApplicationResponse {
    pub success: bool,
    pub summary: String,
    pub fields: ExtractedFields,
    pub is_gold_star: bool,
    pub generated_at: DateTime<Utc>,
}

/// Checks method and body before anything touches the network.
///
/// Only `POST` is accepted. The body must be a JSON object with a non-empty
/// string `application_text`; any other shape counts as missing.
pub fn validate_request(method: &Method, body: &[u8]) -> Result<ApplicationRequest, AppError> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let missing = AppError::MissingField {
        field: APPLICATION_TEXT_FIELD,
    };
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(_) => return Err(missing),
    };

    match payload.get(APPLICATION_TEXT_FIELD).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Ok(ApplicationRequest {
            application_text: text.to_string(),
        }),
        _ => Err(missing),
    }
}

/// ANY / and /api/process-application
///
/// Summarizes an application via the LLM and, for gold star applicants,
/// notifies the intake team before responding.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_process_application(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<ProcessApplicationResponse>, AppError> {
    let request = validate_request(&method, &body)?;
    info!(
        "Processing application ({} chars)",
        request.application_text.len()
    );

    let today = Local::now().date_naive();
    let processed = process_application(&request, today, &state).await?;
    if let Some(outcome) = &processed.notification {
        info!("Gold star notification outcome: {outcome:?}");
    }

    let summary = processed.summary;
    Ok(Json(ProcessApplicationResponse {
        success: true,
        summary: summary.formatted_summary,
        fields: summary.extracted_fields,
        is_gold_star: summary.is_gold_star,
        generated_at: Utc::now(),
    }))
}
