// SMS Notifier (Twilio-style HTTP messaging API)

use crate::SmsConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use waitline_core::domain::Contact;
use waitline_core::error::{AppError, Result};
use waitline_core::port::{Notifier, NotifyError};

/// Per-request timeout; the transport's concern, not the core's
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Notifier implementation over a Twilio-style `Messages.json` endpoint.
///
/// Fire-and-forget: an accepted POST counts as sent; delivery receipts are
/// out of scope.
pub struct SmsNotifier {
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsNotifier {
    pub fn new(config: SmsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    async fn send(&self, to: &Contact, message: &str) -> std::result::Result<(), NotifyError> {
        let params = [
            ("To", to.as_str()),
            ("From", self.config.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            // Provider echoes the message sid back on acceptance
            let sid = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("sid").and_then(|s| s.as_str()).map(String::from));
            debug!(to = %to, sid = ?sid, "SMS accepted by provider");
            return Ok(());
        }

        warn!(to = %to, status = %status, "SMS send rejected");
        if status.is_client_error() {
            Err(NotifyError::Rejected(format!("{}: {}", status, body)))
        } else {
            Err(NotifyError::Transport(format!("{}: {}", status, body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmsConfig {
        SmsConfig {
            api_base: "https://api.example.com/2010-04-01".to_string(),
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15555550000".to_string(),
        }
    }

    #[test]
    fn test_notifier_construction() {
        assert!(SmsNotifier::new(test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Reserved TLD, nothing listens here
        let config = SmsConfig {
            api_base: "http://sms.invalid/2010-04-01".to_string(),
            ..test_config()
        };
        let notifier = SmsNotifier::new(config).unwrap();

        let result = notifier
            .send(&Contact::new("+15555551111"), "You're next")
            .await;
        assert!(matches!(result, Err(NotifyError::Transport(_))));
    }
}
