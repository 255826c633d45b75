//! Summarizer — sends the rendered prompt to the LLM and returns a typed `ApplicantSummary`.

use chrono::NaiveDate;
use tracing::info;

use crate::applications::models::ApplicantSummary;
use crate::applications::prompts::{build_summary_prompt, PROMPT_VERSION};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, MODEL};

/// Summarizes one application. Exactly one LLM call; no retries.
pub async fn summarize_application(
    application_text: &str,
    today: NaiveDate,
    llm: &LlmClient,
) -> Result<ApplicantSummary, AppError> {
    let prompt = build_summary_prompt(application_text, today);
    info!(
        "Summarizing application (model: {MODEL}, prompt version: {PROMPT_VERSION}, {} chars)",
        application_text.len()
    );

    let summary = llm.call_json::<ApplicantSummary>(&prompt).await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::models::ExperienceLevel;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn llm_for(server: &MockServer) -> LlmClient {
        LlmClient::new(
            Some("test-key".into()),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    async fn mount_text(server: &MockServer, text: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": text}]
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn model_output() -> serde_json::Value {
        json!({
            "formatted_summary": "Name: Jane Doe\nAge: 31 | BMI: 23.4 | Texas | Married",
            "extracted_fields": {
                "age": 31,
                "bmi": 23.4,
                "state": "Texas",
                "experienced_surrogate": "Experienced",
                "has_medical_flags": false,
                "has_background_flags": false,
                "has_preterm_history": false
            },
            "is_gold_star": true
        })
    }

    #[tokio::test]
    async fn test_fenced_and_plain_output_parse_identically() {
        let plain = model_output().to_string();
        let fenced = format!("```json\n{plain}\n```");

        let server = MockServer::start().await;
        mount_text(&server, &plain).await;
        let from_plain = summarize_application("text", today(), &llm_for(&server))
            .await
            .unwrap();

        let server = MockServer::start().await;
        mount_text(&server, &fenced).await;
        let from_fenced = summarize_application("text", today(), &llm_for(&server))
            .await
            .unwrap();

        assert_eq!(from_plain, from_fenced);
        assert!(from_plain.is_gold_star);
        assert_eq!(
            from_plain.extracted_fields.experienced_surrogate,
            ExperienceLevel::Experienced
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_is_response_format_error() {
        let server = MockServer::start().await;
        mount_text(&server, r#"{"formatted_summary": 42}"#).await;

        let err = summarize_application("text", today(), &llm_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResponseFormat(_)));
    }

    #[tokio::test]
    async fn test_prose_output_is_response_format_error() {
        let server = MockServer::start().await;
        mount_text(&server, "I cannot help with that.").await;

        let err = summarize_application("text", today(), &llm_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResponseFormat(_)));
    }
}
