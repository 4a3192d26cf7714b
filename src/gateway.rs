// gateway.rs

use std::time::Duration;

use serde_json::Value;

use crate::character::Character;
use crate::consts::PAYLOAD_FIELD;
use crate::error::GatewayError;
use crate::settings::Settings;

/// Whole-roster transport. Fetch returns raw records for the normalizer;
/// push sends every character at once. No diffing, no retries.
pub trait RosterGateway {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Value>, GatewayError>> + Send;

    fn push(
        &self,
        roster: &[Character],
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GatewayError> {
        Self::new(settings.api_url.clone(), settings.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RosterGateway for HttpGateway {
    async fn fetch(&self) -> Result<Vec<Value>, GatewayError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }
        let payload: Value = response.json().await?;
        extract_records(payload)
    }

    async fn push(&self, roster: &[Character]) -> Result<(), GatewayError> {
        log::debug!("POST {} ({} characters)", self.url, roster.len());
        // `json` sets Content-Type: application/json. The response body is ignored.
        let response = self.client.post(&self.url).json(roster).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }
        Ok(())
    }
}

/// Pulls the character array out of a GET response object.
pub fn extract_records(payload: Value) -> Result<Vec<Value>, GatewayError> {
    let Value::Object(mut object) = payload else {
        return Err(GatewayError::MalformedPayload(format!(
            "expected an object, got {}",
            kind(&payload)
        )));
    };
    match object.remove(PAYLOAD_FIELD) {
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(GatewayError::MalformedPayload(format!(
            "`{PAYLOAD_FIELD}` is {}, not an array",
            kind(&other)
        ))),
        None => Err(GatewayError::MalformedPayload(format!(
            "missing `{PAYLOAD_FIELD}` field"
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
