//! TextBee gateway adapter
//!
//! `POST {base}/api/v1/gateway/devices/{device_id}/send-sms` with an
//! `x-api-key` header and `{"recipients": [...], "message": "..."}` body.

use crate::error::{TransportError, TransportResult};
use crate::transport::{SendOutcome, SmsTransport, TransportMode};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.textbee.dev";

/// Live transport settings
#[derive(Debug, Clone)]
pub struct TextBeeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub device_id: Option<String>,
    /// Prefix for numbers given without a leading `+`
    pub country_code: String,
    pub timeout: Duration,
}

impl Default for TextBeeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            device_id: None,
            country_code: "+91".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Live vendor transport
///
/// Missing credentials do not prevent construction; each send then fails
/// with [`TransportError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct TextBeeTransport {
    client: reqwest::Client,
    config: TextBeeConfig,
}

impl TextBeeTransport {
    pub fn new(config: TextBeeConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config: TextBeeConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    fn credentials(&self) -> TransportResult<(&str, &str)> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| TransportError::NotConfigured("SMS_API_KEY not set".into()))?;
        let device_id = self
            .config
            .device_id
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| TransportError::NotConfigured("SMS_DEVICE_ID not set".into()))?;
        Ok((api_key, device_id))
    }

    fn endpoint(&self, device_id: &str) -> String {
        format!(
            "{}/api/v1/gateway/devices/{}/send-sms",
            self.config.base_url, device_id
        )
    }
}

#[async_trait]
impl SmsTransport for TextBeeTransport {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn send(&self, phone: &str, text: &str) -> TransportResult<SendOutcome> {
        let (api_key, device_id) = self.credentials()?;
        let recipient = format_recipient(phone, &self.config.country_code)?;

        let resp = self
            .client
            .post(self.endpoint(device_id))
            .header("x-api-key", api_key)
            .json(&serde_json::json!({
                "recipients": [recipient],
                "message": text,
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(format!("TextBee request to {}", recipient))
                } else {
                    TransportError::Http(e)
                }
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let raw = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));

        interpret_response(status, raw)
    }

    fn mode(&self) -> TransportMode {
        TransportMode::Live
    }
}

/// Dialable form of a roster number.
///
/// Numbers already carrying `+` pass through; everything else is reduced to
/// digits and prefixed with `country_code`.
fn format_recipient(phone: &str, country_code: &str) -> TransportResult<String> {
    let trimmed = phone.trim();
    if trimmed.starts_with('+') {
        return Ok(trimmed.to_string());
    }
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(TransportError::InvalidRecipient(phone.to_string()));
    }
    Ok(format!("{}{}", country_code, digits))
}

/// Success when HTTP 200/201 or the body says `data.success == true`.
fn interpret_response(status: u16, raw: Value) -> TransportResult<SendOutcome> {
    let flagged = raw
        .pointer("/data/success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !(matches!(status, 200 | 201) || flagged) {
        warn!(status, response = %raw, "TextBee rejected message");
        return Err(TransportError::Rejected { status, raw });
    }

    let provider_message_id = ["/data/smsBatchId", "/data/_id", "/data/id"]
        .iter()
        .find_map(|p| raw.pointer(p).and_then(Value::as_str))
        .map(str::to_string);

    Ok(SendOutcome {
        accepted: true,
        provider_message_id,
        raw,
    })
}
