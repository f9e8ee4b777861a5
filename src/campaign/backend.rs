//! Client for the campaign backend.
//!
//! `CampaignBackend` is the seam the orchestrator talks through; `HttpBackend`
//! is the production implementation over `reqwest`. Every response body is
//! decoded as generic JSON first and the consumed field pulled out by name,
//! so a missing field surfaces as [`BackendError::MissingField`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::campaign::types::{CustomerFile, ScriptResult, VoiceResult};
use crate::errors::BackendError;
use crate::voice::Voice;

/// Origin the panel has always talked to.
pub const DEFAULT_BACKEND_URL: &str = "https://voice-marketing-backend.onrender.com";

pub const UPLOAD_CUSTOMERS: &str = "/upload-customers";
pub const GENERATE_SCRIPT: &str = "/generate-script";
pub const GENERATE_VOICE: &str = "/generate-voice";
pub const START_CALL: &str = "/start-call";

/// Body of `/generate-script`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptRequest {
    pub character_name: String,
    pub character_description: String,
    pub prompt: String,
}

/// Body of `/generate-voice`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoiceRequest {
    pub text: String,
    pub voice: Voice,
}

/// Body of `/start-call`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallRequest {
    pub to_number: String,
    pub audio_url: String,
}

/// The four remote operations a campaign needs.
#[async_trait]
pub trait CampaignBackend: Send + Sync {
    /// Upload a customer list; returns the raw response body.
    async fn upload_customers(&self, file: CustomerFile) -> Result<Value, BackendError>;

    async fn generate_script(&self, request: &ScriptRequest) -> Result<ScriptResult, BackendError>;

    async fn generate_voice(&self, request: &VoiceRequest) -> Result<VoiceResult, BackendError>;

    /// Place one call; returns the remote status string.
    async fn start_call(&self, request: &CallRequest) -> Result<String, BackendError>;
}

/// [`CampaignBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url`. `timeout` applies per request; `None`
    /// waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BackendError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Value, BackendError> {
        debug!(endpoint, "POST json");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|source| BackendError::Transport { endpoint, source })?;
        read_json(endpoint, response).await
    }
}

#[async_trait]
impl CampaignBackend for HttpBackend {
    async fn upload_customers(&self, file: CustomerFile) -> Result<Value, BackendError> {
        let endpoint = UPLOAD_CUSTOMERS;
        debug!(endpoint, file = %file.file_name, bytes = file.bytes.len(), "POST multipart");
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|source| BackendError::BuildRequest { endpoint, source })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|source| BackendError::Transport { endpoint, source })?;
        read_json(endpoint, response).await
    }

    async fn generate_script(&self, request: &ScriptRequest) -> Result<ScriptResult, BackendError> {
        let body = self.post_json(GENERATE_SCRIPT, request).await?;
        let script = string_field(GENERATE_SCRIPT, &body, "script")?;
        Ok(ScriptResult { script })
    }

    async fn generate_voice(&self, request: &VoiceRequest) -> Result<VoiceResult, BackendError> {
        let body = self.post_json(GENERATE_VOICE, request).await?;
        let audio_path = string_field(GENERATE_VOICE, &body, "audio_path")?;
        Ok(VoiceResult { audio_path })
    }

    async fn start_call(&self, request: &CallRequest) -> Result<String, BackendError> {
        let body = self.post_json(START_CALL, request).await?;
        string_field(START_CALL, &body, "status")
    }
}

async fn read_json(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<Value, BackendError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| BackendError::Transport { endpoint, source })?;

    if !status.is_success() {
        return Err(BackendError::Status {
            endpoint,
            status: status.as_u16(),
            body: text.trim().to_string(),
        });
    }

    serde_json::from_str(&text).map_err(|e| BackendError::InvalidJson {
        endpoint,
        message: e.to_string(),
    })
}

fn string_field(
    endpoint: &'static str,
    body: &Value,
    field: &'static str,
) -> Result<String, BackendError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(BackendError::MissingField { endpoint, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&server.uri(), Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url(START_CALL), "http://localhost:8000/start-call");
    }

    #[test]
    fn test_voice_request_serializes_wire_names() {
        let request = VoiceRequest {
            text: "Hello".into(),
            voice: Voice::Clara,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"text": "Hello", "voice": "Clara"})
        );
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(UPLOAD_CUSTOMERS))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("name=\"file\"; filename=\"customers.csv\""))
            .and(body_string_contains("Ad,Telefon"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"customers": [{"Ad": "Ali"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = CustomerFile {
            file_name: "customers.csv".into(),
            mime_type: "text/csv".into(),
            bytes: b"Ad,Telefon\nAli,+905551112233\n".to_vec(),
        };
        let body = backend(&server).upload_customers(file).await.unwrap();
        assert_eq!(body["customers"][0]["Ad"], "Ali");
    }

    #[tokio::test]
    async fn test_upload_with_bad_mime_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let file = CustomerFile {
            file_name: "customers.csv".into(),
            mime_type: "not a mime".into(),
            bytes: b"Ad,Telefon\n".to_vec(),
        };
        let err = backend(&server).upload_customers(file).await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::BuildRequest {
                endpoint: UPLOAD_CUSTOMERS,
                ..
            }
        ));
        assert!(err.to_string().starts_with("could not build request for /upload-customers"));
    }

    #[tokio::test]
    async fn test_generate_script_posts_persona_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_SCRIPT))
            .and(body_json(json!({
                "character_name": "Burcu",
                "character_description": "warm",
                "prompt": "greet"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"script": "Hello"})))
            .mount(&server)
            .await;

        let result = backend(&server)
            .generate_script(&ScriptRequest {
                character_name: "Burcu".into(),
                character_description: "warm".into(),
                prompt: "greet".into(),
            })
            .await
            .unwrap();
        assert_eq!(result.script, "Hello");
    }

    #[tokio::test]
    async fn test_generate_voice_missing_audio_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_VOICE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"audio": "x"})))
            .mount(&server)
            .await;

        let err = backend(&server)
            .generate_voice(&VoiceRequest {
                text: "Hello".into(),
                voice: Voice::Bella,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::MissingField {
                field: "audio_path",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_start_call_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(START_CALL))
            .respond_with(ResponseTemplate::new(500).set_body_string("twilio down"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .start_call(&CallRequest {
                to_number: "+1".into(),
                audio_url: "/a.mp3".into(),
            })
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "twilio down");
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(START_CALL))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .start_call(&CallRequest {
                to_number: "+1".into(),
                audio_url: "/a.mp3".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let backend = HttpBackend::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = backend
            .generate_script(&ScriptRequest {
                character_name: String::new(),
                character_description: String::new(),
                prompt: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
    }
}
