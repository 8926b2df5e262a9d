//! Web API reply model
//!
//! The service answers every command with one flat JSON object. Fields this
//! client does not know about are kept in `extra` so nothing is lost.

use crate::core::constants::UNLIMITED;
use crate::models::error_code::ErrorCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn default_error() -> ErrorCode {
    ErrorCode::Unknown
}

/// Nested block that decodes to `None` when its shape is unexpected
fn lenient_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Integer that may also arrive as a numeric string
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decoded reply of a Web API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecResponse {
    #[serde(default = "default_error")]
    pub error: ErrorCode,

    /// Recovered message (decode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Base64 encoded PNG carrying the hidden message (encode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_image: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_block",
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<License>,

    #[serde(
        default,
        deserialize_with = "lenient_block",
        skip_serializing_if = "Option::is_none"
    )]
    pub limits: Option<Limits>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CodecResponse {
    /// A reply that carries nothing but an error code
    pub fn from_error(error: ErrorCode) -> Self {
        Self {
            error,
            message: None,
            encoded_image: None,
            license: None,
            limits: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_success()
    }

    /// Whether the reply says the activation key is valid
    pub fn is_activated(&self) -> bool {
        self.license.as_ref().is_some_and(License::is_activated)
    }
}

/// License details attached to replies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(default)]
    pub activation_status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// 0 for a personal license, anything else for a company license
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_type: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub usages_total: Option<i64>,
    /// Remaining usage credits
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub usages_count: Option<i64>,
}

impl License {
    pub fn is_activated(&self) -> bool {
        self.activation_status
    }

    pub fn type_name(&self) -> &'static str {
        match self.license_type {
            Some(0) | None => "personal",
            Some(_) => "company",
        }
    }
}

/// Limits in force for the current key (demo limits without one)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    #[serde(default)]
    pub max_password_len: i64,
    /// -1 means unlimited
    #[serde(default)]
    pub max_message_len: i64,
    /// Maximum input image size in bytes
    #[serde(default)]
    pub max_file_size: u64,
}

impl Limits {
    /// Maximum message length, `None` when unlimited
    pub fn message_len_limit(&self) -> Option<u64> {
        if self.max_message_len == UNLIMITED {
            None
        } else {
            u64::try_from(self.max_message_len).ok()
        }
    }
}
