use anyhow::{Context, Result};

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_INTAKE_TEAM_EMAIL: &str = "intake@alceasurrogacy.com";
/// Matches the invocation ceiling of the hosting platform.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
///
/// Credentials are optional at startup: a missing Anthropic key fails each
/// request with a configuration error, a missing Resend key disables
/// gold star notifications.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub intake_team_email: String,
    pub send_gold_star_emails: bool,
    pub upstream_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_string()),
            resend_api_key: optional_env("RESEND_API_KEY"),
            resend_api_url: optional_env("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            intake_team_email: optional_env("INTAKE_TEAM_EMAIL")
                .unwrap_or_else(|| DEFAULT_INTAKE_TEAM_EMAIL.to_string()),
            send_gold_star_emails: optional_env("SEND_GOLD_STAR_EMAILS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            upstream_timeout_secs: optional_env("UPSTREAM_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            anthropic_api_url: DEFAULT_ANTHROPIC_API_URL.to_string(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            intake_team_email: DEFAULT_INTAKE_TEAM_EMAIL.to_string(),
            send_gold_star_emails: false,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Empty values are treated the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Only an explicit `true` turns a feature flag on.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_true_in_any_case() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" True "));
    }

    #[test]
    fn test_parse_flag_rejects_everything_else() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_default_config_disables_notifications() {
        let config = Config::default();
        assert!(!config.send_gold_star_emails);
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.intake_team_email, DEFAULT_INTAKE_TEAM_EMAIL);
        assert_eq!(config.upstream_timeout_secs, 30);
    }
}
