//! Steganography Online Codec client
//!
//! Hides a password encrypted message inside an image, and recovers it, by
//! calling the Steganography Online Codec Web API. Encryption (AES-256 with a
//! PBKDF2 derived key) and the steganographic embedding run on the service;
//! this crate packages the request and maps the JSON reply.

pub mod core;
pub mod models;

pub use crate::core::client::SteganographyOnlineCodec;
pub use crate::core::config::Config;
pub use crate::core::size::convert_size;
pub use crate::models::error_code::ErrorCode;
pub use crate::models::request::{CodecRequest, Command};
pub use crate::models::response::{CodecResponse, License, Limits};
