//! Gold star notifier — a best-effort side channel.
//!
//! `GoldStarNotifier::notify` never returns an error. Every attempt ends in a
//! `NotifyOutcome` that is logged here and observed by the caller, so an
//! email failure can never change the webhook response.

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::applications::models::ApplicantSummary;
use crate::config::Config;

const SENDER: &str = "Alcea Surrogacy <notifications@alceasurrogacy.com>";
const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";
const NOT_AVAILABLE: &str = "N/A";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Name:\s*([^\n(]+)").expect("valid name pattern"));
static AGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Age:\s*(\d+)").expect("valid age pattern"));
static BMI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"BMI:\s*([\d.]+)").expect("valid bmi pattern"));
static STATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*([A-Z][a-z]+)\s*\|").expect("valid state pattern"));

/// Result of one notification attempt. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent { recipient: String },
    Skipped { reason: String },
    Failed { reason: String },
}

/// Display data for the email. Name always comes from the summary prose;
/// the rest prefer the structured fields and fall back to the prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub candidate_name: String,
    pub age: String,
    pub bmi: String,
    pub state: String,
}

impl NotificationPayload {
    pub fn from_summary(summary: &ApplicantSummary) -> Self {
        let text = summary.formatted_summary.as_str();
        let fields = &summary.extracted_fields;

        let candidate_name = capture(&NAME_PATTERN, text)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string());
        let age = fields
            .age
            .map(format_age)
            .or_else(|| capture(&AGE_PATTERN, text))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let bmi = fields
            .bmi
            .map(|bmi| format!("{bmi:.1}"))
            .or_else(|| capture(&BMI_PATTERN, text))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let state = fields
            .state
            .clone()
            .filter(|state| !state.trim().is_empty())
            .or_else(|| capture(&STATE_PATTERN, text))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            candidate_name,
            age,
            bmi,
            state,
        }
    }

    pub fn subject(&self) -> String {
        format!("⭐ Gold Star Applicant: {}", self.candidate_name)
    }
}

/// Ages are shown without a fraction when they are whole.
fn format_age(age: f64) -> String {
    if age.is_finite() && age.fract() == 0.0 {
        format!("{}", age as i64)
    } else {
        age.to_string()
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends gold star emails through the Resend API.
#[derive(Clone)]
pub struct GoldStarNotifier {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    recipient: String,
}

impl GoldStarNotifier {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.upstream_timeout_secs))
                .build()?,
            api_key: config.resend_api_key.clone(),
            api_url: config.resend_api_url.clone(),
            recipient: config.intake_team_email.clone(),
        })
    }

    /// Sends one notification for `summary`. Failures are logged and returned
    /// as an outcome, never propagated.
    pub async fn notify(&self, summary: &ApplicantSummary) -> NotifyOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("RESEND_API_KEY not set - skipping gold star email notification");
            return NotifyOutcome::Skipped {
                reason: "RESEND_API_KEY not set".to_string(),
            };
        };

        let payload = NotificationPayload::from_summary(summary);
        let subject = payload.subject();
        let html = render_email_html(&payload, &summary.formatted_summary, Utc::now());

        let request = EmailRequest {
            from: SENDER,
            to: [self.recipient.as_str()],
            subject: &subject,
            html: &html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                info!("Gold star email sent successfully to: {}", self.recipient);
                NotifyOutcome::Sent {
                    recipient: self.recipient.clone(),
                }
            }
            Ok(r) => {
                let status = r.status().as_u16();
                let body = r.text().await.unwrap_or_default();
                error!("Failed to send gold star email (status {status}): {body}");
                NotifyOutcome::Failed {
                    reason: format!("status {status}: {body}"),
                }
            }
            Err(e) => {
                error!("Error sending gold star email: {e}");
                NotifyOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Escapes text for interpolation into HTML element content and attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the notification email body.
pub fn render_email_html(
    payload: &NotificationPayload,
    formatted_summary: &str,
    generated_at: DateTime<Utc>,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .header {{ background-color: #7d2431; color: white; padding: 20px; text-align: center; }}
    .content {{ padding: 20px; }}
    .highlight {{ background-color: #fff4e6; border-left: 4px solid #e1b321; padding: 15px; margin: 20px 0; }}
    .summary {{ background-color: #f5f5f5; padding: 15px; font-family: monospace; white-space: pre-wrap; font-size: 12px; }}
    .footer {{ color: #666; font-size: 12px; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; }}
  </style>
</head>
<body>
  <div class="header">
    <h1>⭐ Gold Star Applicant Received</h1>
  </div>

  <div class="content">
    <p>A new gold star surrogate applicant has been received and automatically processed:</p>

    <div class="highlight">
      <strong>{name}</strong><br>
      Age: {age} | BMI: {bmi} | State: {state}
    </div>

    <p><strong>Why this applicant is gold star:</strong></p>
    <ul>
      <li>Age 25-38 ✓</li>
      <li>BMI 19-28 ✓</li>
      <li>At least 1 successful pregnancy ✓</li>
      <li>Max 1 C-section ✓</li>
      <li>No preterm deliveries ✓</li>
      <li>No significant medical conditions ✓</li>
      <li>Non-smoker ✓</li>
      <li>Clean background ✓</li>
    </ul>

    <p><strong>Full AI-Generated Summary:</strong></p>
    <div class="summary">{summary}</div>

    <div class="footer">
      <p>This email was automatically generated by the Alcea Surrogacy Application Processor.</p>
      <p>Generated: {generated}</p>
    </div>
  </div>
</body>
</html>
"#,
        name = escape_html(&payload.candidate_name),
        age = escape_html(&payload.age),
        bmi = escape_html(&payload.bmi),
        state = escape_html(&payload.state),
        summary = escape_html(formatted_summary),
        generated = generated_at
            .with_timezone(&New_York)
            .format("%-m/%-d/%Y, %-I:%M:%S %p"),
    )
}
