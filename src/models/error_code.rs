//! Error codes returned by the Web API
//!
//! The service reports every outcome as an integer in the `error` field of
//! its JSON reply. Two codes never come from the service:
//! `WebApiConnection` and `OutputFile` are produced by this client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a Web API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorCode {
    /// Cannot connect to the Web API, or its reply was unusable
    WebApiConnection,
    Success,
    Unknown,
    /// Message is too long for the selected image file
    MessageTooLong,
    /// Image file is too big (10 MB full version, 50 kB demo)
    ImageTooBig,
    /// Input image is invalid or does not exist
    InvalidInput,
    InvalidImageFormat,
    /// Image is malformed and the message cannot be written or read
    ImageMalformed,
    InvalidPassword,
    /// Message exceeds the license limit
    LimitMessage,
    /// Password exceeds the license limit
    LimitPassword,
    /// Writing the output file failed
    OutputFile,
    /// Activation key is invalid or has no usage credits left
    InvalidLicense,
    /// Code not known to this client
    Other(i32),
}

impl ErrorCode {
    /// Integer value as used on the wire
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::WebApiConnection => -1,
            ErrorCode::Success => 0,
            ErrorCode::Unknown => 1,
            ErrorCode::MessageTooLong => 2,
            ErrorCode::ImageTooBig => 3,
            ErrorCode::InvalidInput => 4,
            ErrorCode::InvalidImageFormat => 5,
            ErrorCode::ImageMalformed => 6,
            ErrorCode::InvalidPassword => 7,
            ErrorCode::LimitMessage => 9,
            ErrorCode::LimitPassword => 10,
            ErrorCode::OutputFile => 99,
            ErrorCode::InvalidLicense => 100,
            ErrorCode::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }

    /// Short human readable explanation
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::WebApiConnection => "cannot connect to the Web API interface",
            ErrorCode::Success => "success",
            ErrorCode::Unknown => "unknown error",
            ErrorCode::MessageTooLong => "message is too long for the selected image file",
            ErrorCode::ImageTooBig => "image file is too big",
            ErrorCode::InvalidInput => "image file is invalid or does not exist",
            ErrorCode::InvalidImageFormat => "image file format is not supported",
            ErrorCode::ImageMalformed => {
                "image file is malformed and cannot hold or yield the encoded message"
            }
            ErrorCode::InvalidPassword => "provided password is invalid",
            ErrorCode::LimitMessage => "provided message exceeds the current limit",
            ErrorCode::LimitPassword => "provided password exceeds the current limit",
            ErrorCode::OutputFile => "error while writing output file",
            ErrorCode::InvalidLicense => "license key is invalid or expired",
            ErrorCode::Other(_) => "unrecognized error code",
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            -1 => ErrorCode::WebApiConnection,
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::MessageTooLong,
            3 => ErrorCode::ImageTooBig,
            4 => ErrorCode::InvalidInput,
            5 => ErrorCode::InvalidImageFormat,
            6 => ErrorCode::ImageMalformed,
            7 => ErrorCode::InvalidPassword,
            9 => ErrorCode::LimitMessage,
            10 => ErrorCode::LimitPassword,
            99 => ErrorCode::OutputFile,
            100 => ErrorCode::InvalidLicense,
            other => ErrorCode::Other(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.code())
    }
}
