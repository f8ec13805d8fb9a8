// SMS transport configuration

use waitline_core::error::{AppError, Result};

const DEFAULT_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Credentials and endpoint for the messaging API
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_base: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl SmsConfig {
    /// Read configuration from the environment
    ///
    /// # Environment Variables
    ///
    /// - `WAITLINE_SMS_ACCOUNT_SID`: account identifier (required)
    /// - `WAITLINE_SMS_AUTH_TOKEN`: API auth token (required)
    /// - `WAITLINE_SMS_FROM_NUMBER`: sender number, E.164 (required)
    /// - `WAITLINE_SMS_API_BASE`: endpoint override (optional)
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base: std::env::var("WAITLINE_SMS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            account_sid: require_env("WAITLINE_SMS_ACCOUNT_SID")?,
            auth_token: require_env("WAITLINE_SMS_AUTH_TOKEN")?,
            from_number: require_env("WAITLINE_SMS_FROM_NUMBER")?,
        })
    }

    /// Message creation endpoint for this account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| AppError::Config(format!("{} is not set", name)))
}
