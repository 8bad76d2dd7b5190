//! Auxiliary integration endpoints. The scoring pipeline does not use them.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::backend::{endpoints::*, BackendClient};
use crate::domain::TicketmasterSettings;
use crate::error::Result;

/// Envelope returned by the `/integrations/ticketmaster` family.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntegrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub settings: Option<TicketmasterSettings>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Merges caller options into a body object, the way the dashboard spreads them.
fn with_options(mut body: Map<String, Value>, options: Option<Value>) -> Value {
    if let Some(Value::Object(extra)) = options {
        body.extend(extra);
    }
    Value::Object(body)
}

impl BackendClient {
    pub async fn invoke_llm(&self, prompt: &str, options: Option<Value>) -> Result<Value> {
        let mut body = Map::new();
        body.insert("prompt".into(), json!(prompt));
        let request = self.http().post(self.url("llm/invoke")).json(&with_options(body, options));
        self.fetch_json(LLM_INVOKE, request).await
    }

    pub async fn send_email(&self, to: &str, subject: &str, text: &str, options: Option<Value>) -> Result<Value> {
        let mut body = Map::new();
        body.insert("to".into(), json!(to));
        body.insert("subject".into(), json!(subject));
        body.insert("body".into(), json!(text));
        let request = self.http().post(self.url("email/send")).json(&with_options(body, options));
        self.fetch_json(EMAIL_SEND, request).await
    }

    /// Multipart upload under the `file` field.
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<Value> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let request = self.http().post(self.url("upload")).multipart(form);
        self.fetch_json(FILE_UPLOAD, request).await
    }

    pub async fn generate_image(&self, prompt: &str, options: Option<Value>) -> Result<Value> {
        let mut body = Map::new();
        body.insert("prompt".into(), json!(prompt));
        let request = self.http().post(self.url("image/generate")).json(&with_options(body, options));
        self.fetch_json(IMAGE_GENERATE, request).await
    }

    pub async fn extract_data(&self, file_id: &str, options: Option<Value>) -> Result<Value> {
        let request = self
            .http()
            .post(self.url(&format!("extract/{}", file_id)))
            .json(&with_options(Map::new(), options));
        self.fetch_json(DATA_EXTRACT, request).await
    }

    pub async fn ticketmaster_settings(&self) -> Result<IntegrationResponse> {
        let request = self.http().get(self.url("integrations/ticketmaster"));
        self.fetch_json(TICKETMASTER_GET, request).await
    }

    pub async fn save_ticketmaster_settings(&self, settings: &TicketmasterSettings) -> Result<IntegrationResponse> {
        let request = self.http().post(self.url("integrations/ticketmaster")).json(settings);
        self.fetch_json(TICKETMASTER_SAVE, request).await
    }

    pub async fn toggle_ticketmaster(&self, enabled: bool) -> Result<IntegrationResponse> {
        let request = self
            .http()
            .post(self.url("integrations/ticketmaster/toggle"))
            .json(&json!({ "enabled": enabled }));
        self.fetch_json(TICKETMASTER_TOGGLE, request).await
    }
}
