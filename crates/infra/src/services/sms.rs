use crate::config::TwilioConfig;
use glucomate_domain::PhoneNumber;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS transport request failed: {0}")]
    Transport(String),
    #[error("SMS gateway rejected the message: {0}")]
    Rejected(String),
}

/// Outbound text-message transport. One attempt per call; retries are the
/// caller's decision (the delivery job never retries within a tick).
#[async_trait::async_trait]
pub trait ISmsGateway: Send + Sync {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsError>;
}

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Sends messages through the Twilio Messages REST API.
pub struct TwilioSmsGateway {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: PhoneNumber,
}

impl TwilioSmsGateway {
    pub fn new(config: &TwilioConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ISmsGateway for TwilioSmsGateway {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsError> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.account_sid
        );
        let params = [
            ("To", to.as_str()),
            ("From", self.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| SmsError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SmsError::Rejected(format!("{}: {}", status, error_text)));
        }

        debug!("SMS sent to {}", to);
        Ok(())
    }
}

/// Gateway double used in tests and in credential-less local runs. Every
/// send is recorded; `fail_when_body_contains` makes matching sends fail
/// so dispatch-failure paths can be exercised.
pub struct InMemorySmsGateway {
    sent: Mutex<Vec<(PhoneNumber, String)>>,
    fail_marker: Mutex<Option<String>>,
}

impl InMemorySmsGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail_marker: Mutex::new(None),
        }
    }

    pub fn fail_when_body_contains(&self, marker: &str) {
        *self.fail_marker.lock().unwrap() = Some(marker.to_string());
    }

    pub fn sent(&self) -> Vec<(PhoneNumber, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemorySmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISmsGateway for InMemorySmsGateway {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsError> {
        let should_fail = self
            .fail_marker
            .lock()
            .unwrap()
            .as_ref()
            .map(|marker| body.contains(marker))
            .unwrap_or(false);
        if should_fail {
            return Err(SmsError::Transport("simulated transport failure".into()));
        }
        self.sent.lock().unwrap().push((to.clone(), body.to_string()));
        Ok(())
    }
}
