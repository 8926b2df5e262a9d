//! Constants for the Web API wire format
//!
//! This module defines the endpoint, command names, form field names and
//! response keys used when talking to the codec service.

/// Default Steganography Online Codec Web API endpoint
pub const DEFAULT_API_URL: &str = "https://www.pelock.com/api/steganography-online-codec/v1";

/// Command names sent in the `command` field
pub mod command {
    /// Fetch license information and current limits
    pub const LOGIN: &str = "login";

    /// Hide an encrypted message inside an image
    pub const ENCODE: &str = "encode";

    /// Extract a hidden message from an image
    pub const DECODE: &str = "decode";
}

/// Form field names
pub mod field {
    pub const COMMAND: &str = "command";
    pub const KEY: &str = "key";
    pub const MESSAGE: &str = "message";
    pub const PASSWORD: &str = "password";

    /// Multipart file part carrying the input image
    pub const IMAGE: &str = "image";
}

/// Units used by `convert_size`, 1024 apart
pub const SIZE_UNITS: [&str; 9] = ["bytes", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Value of `limits.maxMessageLen` meaning no limit
pub const UNLIMITED: i64 = -1;
