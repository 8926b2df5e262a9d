//! Steganography Online Codec Web API client
//!
//! This module provides the async HTTP client that talks to the codec
//! service. Every public operation returns a `CodecResponse`: failures are
//! reported through its error code, never as a Rust error, so callers
//! handle service errors and local errors the same way.

use crate::core::config::Config;
use crate::core::constants::field;
use crate::models::error_code::ErrorCode;
use crate::models::request::CodecRequest;
use crate::models::response::CodecResponse;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{Instrument, debug, info, info_span, warn};

/// Error types that can occur during a Web API call
///
/// These never leave the client; `code()` folds each one into the error
/// code the caller sees.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Input image {0} does not exist or is not a regular file")]
    MissingInput(PathBuf),

    #[error("Cannot read input image {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Web API returned status {0}")]
    Status(u16),

    #[error("Malformed Web API reply: {0}")]
    MalformedReply(String),

    #[error("Cannot write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Error code reported for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::MissingInput(_) | CodecError::ReadInput { .. } => ErrorCode::InvalidInput,
            CodecError::Http(_) | CodecError::Status(_) | CodecError::MalformedReply(_) => {
                ErrorCode::WebApiConnection
            }
            CodecError::WriteOutput { .. } => ErrorCode::OutputFile,
        }
    }
}

/// Client for the Steganography Online Codec Web API
#[derive(Debug, Clone)]
pub struct SteganographyOnlineCodec {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SteganographyOnlineCodec {
    /// Create a client for the public endpoint
    ///
    /// # Arguments
    ///
    /// * `api_key` - Activation key; `None` or an empty key runs in demo mode
    pub fn new(api_key: Option<String>) -> Result<Self, CodecError> {
        let config = Config {
            api_key,
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, CodecError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            endpoint: config.endpoint.clone(),
        })
    }

    /// Web API endpoint requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_demo(&self) -> bool {
        self.api_key.is_none()
    }

    /// Fetch license information and the limits in force for the key
    pub async fn login(&self) -> CodecResponse {
        self.post_request(&CodecRequest::login()).await
    }

    /// Encrypt a message and hide it inside an image
    ///
    /// The encoded PNG is written to `output_image`, replacing any existing
    /// file. If it cannot be written the reply is replaced by one carrying
    /// only `ErrorCode::OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `input_image` - Cover image (PNG, JPG, GIF, BMP, WEBP, ...)
    /// * `message` - Message to hide; fails if too long for the image
    /// * `password` - Encryption password
    /// * `output_image` - Where to write the encoded PNG
    pub async fn encode<P, Q>(
        &self,
        input_image: P,
        message: &str,
        password: &str,
        output_image: Q,
    ) -> CodecResponse
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let response = self
            .post_request(&CodecRequest::encode(input_image, message, password))
            .await;

        if !response.is_success() {
            return response;
        }

        let output_image = output_image.as_ref();
        match save_encoded_image(&response, output_image).await {
            Ok(written) => {
                info!(
                    "Encoded image saved to {} ({} bytes)",
                    output_image.display(),
                    written
                );
                response
            }
            Err(e) => {
                warn!("Encode failed after a successful reply: {}", e);
                CodecResponse::from_error(e.code())
            }
        }
    }

    /// Extract the hidden message from an encoded PNG image
    ///
    /// The recovered text is in `CodecResponse::message`.
    pub async fn decode<P: AsRef<Path>>(&self, input_image: P, password: &str) -> CodecResponse {
        self.post_request(&CodecRequest::decode(input_image, password))
            .await
    }

    /// Extract the hidden message and also write it to `output`
    ///
    /// A write failure replaces the reply with `ErrorCode::OutputFile`.
    pub async fn decode_to_file<P, Q>(&self, input_image: P, password: &str, output: Q) -> CodecResponse
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let response = self.decode(input_image, password).await;
        if !response.is_success() {
            return response;
        }

        let output = output.as_ref();
        let message = response.message.as_deref().unwrap_or_default();
        match tokio::fs::write(output, message.as_bytes()).await {
            Ok(()) => response,
            Err(source) => {
                let e = CodecError::WriteOutput {
                    path: output.to_path_buf(),
                    source,
                };
                warn!("{}", e);
                CodecResponse::from_error(e.code())
            }
        }
    }

    /// Send a request and decode the reply
    ///
    /// Requests with an image are checked locally first: a missing input
    /// file yields `InvalidInput` without touching the network. Transport
    /// failures, non-2xx statuses and replies that are not a JSON object
    /// yield `WebApiConnection`.
    pub async fn post_request(&self, request: &CodecRequest) -> CodecResponse {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = info_span!(
            "codec_request",
            request_id = %request_id,
            command = request.command.as_str()
        );

        async move {
            match self.send(request).await {
                Ok(response) => {
                    debug!("Web API replied: {}", response.error);
                    response
                }
                Err(e) => {
                    warn!("Web API request failed: {}", e);
                    CodecResponse::from_error(e.code())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Internal method to send the request
    async fn send(&self, request: &CodecRequest) -> Result<CodecResponse, CodecError> {
        let fields = request.form_fields(self.api_key.as_deref());

        let req_builder = self.client.post(&self.endpoint);
        let req_builder = match request.image {
            Some(ref path) => req_builder.multipart(build_multipart(path, fields).await?),
            None => req_builder.form(&fields),
        };

        debug!(
            "Posting '{}' to {} (demo mode: {})",
            request.command.as_str(),
            self.endpoint,
            self.is_demo()
        );

        let response = req_builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CodecError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_reply(&body)
    }
}

/// Build the multipart body: text fields plus the image file part
async fn build_multipart(
    path: &Path,
    fields: Vec<(&'static str, String)>,
) -> Result<Form, CodecError> {
    let is_file = tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(CodecError::MissingInput(path.to_path_buf()));
    }

    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CodecError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| field::IMAGE.to_string());

    debug!("Uploading {} ({} bytes)", file_name, data.len());

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    Ok(form.part(field::IMAGE, Part::bytes(data).file_name(file_name)))
}

/// Decode the reply body, which must be a JSON object
fn parse_reply(body: &[u8]) -> Result<CodecResponse, CodecError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CodecError::MalformedReply(format!("invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(CodecError::MalformedReply(
            "reply is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| CodecError::MalformedReply(e.to_string()))
}

/// Write the base64 `encodedImage` of a successful reply to disk
async fn save_encoded_image(response: &CodecResponse, path: &Path) -> Result<usize, CodecError> {
    let payload = response.encoded_image.as_deref().ok_or_else(|| {
        CodecError::MalformedReply("success reply without encodedImage".to_string())
    })?;

    // line-wrapped payloads are accepted
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let data = BASE64
        .decode(payload)
        .map_err(|e| CodecError::MalformedReply(format!("encodedImage is not base64: {}", e)))?;

    tokio::fs::write(path, &data)
        .await
        .map_err(|source| CodecError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(data.len())
}
