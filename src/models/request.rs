//! Web API request parameters

use crate::core::constants::{command, field};
use std::path::{Path, PathBuf};

/// Command understood by the Web API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Login,
    Encode,
    Decode,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Login => command::LOGIN,
            Command::Encode => command::ENCODE,
            Command::Decode => command::DECODE,
        }
    }
}

/// Parameters of a single Web API call
///
/// The activation key is not part of the request; the client adds it when
/// the form is built.
#[derive(Debug, Clone)]
pub struct CodecRequest {
    pub command: Command,
    pub message: Option<String>,
    pub password: Option<String>,
    /// Input image, uploaded as a multipart file part
    pub image: Option<PathBuf>,
}

impl CodecRequest {
    pub fn login() -> Self {
        Self {
            command: Command::Login,
            message: None,
            password: None,
            image: None,
        }
    }

    pub fn encode<P: AsRef<Path>>(image: P, message: &str, password: &str) -> Self {
        Self {
            command: Command::Encode,
            message: Some(message.to_string()),
            password: Some(password.to_string()),
            image: Some(image.as_ref().to_path_buf()),
        }
    }

    pub fn decode<P: AsRef<Path>>(image: P, password: &str) -> Self {
        Self {
            command: Command::Decode,
            message: None,
            password: Some(password.to_string()),
            image: Some(image.as_ref().to_path_buf()),
        }
    }

    /// Text fields in wire order
    ///
    /// An empty key means demo mode and is left out entirely.
    pub fn form_fields(&self, key: Option<&str>) -> Vec<(&'static str, String)> {
        let mut fields = vec![(field::COMMAND, self.command.as_str().to_string())];

        if let Some(key) = key.filter(|k| !k.is_empty()) {
            fields.push((field::KEY, key.to_string()));
        }
        if let Some(ref message) = self.message {
            fields.push((field::MESSAGE, message.clone()));
        }
        if let Some(ref password) = self.password {
            fields.push((field::PASSWORD, password.clone()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_fields_with_key() {
        let fields = CodecRequest::login().form_fields(Some("ABC-123"));
        assert_eq!(
            fields,
            vec![("command", "login".to_string()), ("key", "ABC-123".to_string())]
        );
    }

    #[test]
    fn test_empty_key_is_omitted() {
        let fields = CodecRequest::login().form_fields(Some(""));
        assert_eq!(fields, vec![("command", "login".to_string())]);

        let fields = CodecRequest::login().form_fields(None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_encode_fields_exclude_image() {
        let request = CodecRequest::encode("input.png", "Secret message", "Pa$$word");
        let fields = request.form_fields(None);
        assert_eq!(
            fields,
            vec![
                ("command", "encode".to_string()),
                ("message", "Secret message".to_string()),
                ("password", "Pa$$word".to_string()),
            ]
        );
        assert_eq!(request.image.as_deref(), Some(Path::new("input.png")));
    }

    #[test]
    fn test_decode_has_no_message() {
        let request = CodecRequest::decode("out.png", "pw");
        assert_eq!(request.command, Command::Decode);
        assert!(request.message.is_none());
        assert!(!request.form_fields(None).iter().any(|(name, _)| *name == "message"));
    }
}
