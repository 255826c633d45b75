//! Application pipeline: prompt → LLM → optional gold star notification.
//!
//! Strictly linear. The notification, when it runs, is awaited before the
//! caller builds its response, and its outcome is only observed.

use chrono::NaiveDate;
use tracing::info;

use crate::applications::models::{ApplicantSummary, ApplicationRequest};
use crate::applications::notifier::NotifyOutcome;
use crate::applications::summarizer::summarize_application;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug)]
pub struct ProcessedApplication {
    pub summary: ApplicantSummary,
    /// `None` when no notification was due.
    pub notification: Option<NotifyOutcome>,
}

pub async fn process_application(
    request: &ApplicationRequest,
    today: NaiveDate,
    state: &AppState,
) -> Result<ProcessedApplication, AppError> {
    let summary = summarize_application(&request.application_text, today, &state.llm).await?;

    let notification = if summary.is_gold_star && state.config.send_gold_star_emails {
        info!("Gold star applicant detected, notifying intake team");
        Some(state.notifier.notify(&summary).await)
    } else {
        if summary.is_gold_star {
            info!("Gold star applicant detected, notifications disabled");
        }
        None
    };

    Ok(ProcessedApplication {
        summary,
        notification,
    })
}
