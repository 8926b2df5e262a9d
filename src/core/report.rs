//! Human readable reports for Web API replies
//!
//! Used by the command line front end. Each function returns lines instead
//! of printing so the wording can be tested.

use crate::core::size::convert_size;
use crate::models::error_code::ErrorCode;
use crate::models::request::Command;
use crate::models::response::{CodecResponse, Limits};
use std::path::Path;

/// Paths involved in the command being reported
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportContext<'a> {
    pub input: Option<&'a Path>,
    pub output: Option<&'a Path>,
}

pub fn edition_line(response: &CodecResponse) -> String {
    let edition = if response.is_activated() { "full" } else { "demo" };
    format!("You are running in {} version", edition)
}

/// Edition line, plus license details for an activated key
pub fn license_lines(response: &CodecResponse) -> Vec<String> {
    let mut lines = vec![edition_line(response)];

    if let Some(license) = response.license.as_ref().filter(|l| l.is_activated()) {
        lines.push(format!(
            "Registered for - {}",
            license.user_name.as_deref().unwrap_or("-")
        ));
        lines.push(format!("License type - {}", license.type_name()));
        lines.push(format!(
            "Total number of purchased usage credits - {}",
            display_count(license.usages_total)
        ));
        lines.push(format!(
            "Remaining number of usage credits - {}",
            display_count(license.usages_count)
        ));
    }

    lines
}

pub fn limit_lines(limits: &Limits) -> Vec<String> {
    let message_len = match limits.message_len_limit() {
        Some(len) => len.to_string(),
        None => "unlimited".to_string(),
    };

    vec![
        format!("Max. password length - {}", limits.max_password_len),
        format!("Max. message length - {}", message_len),
        format!(
            "Max. input image file size - {}",
            convert_size(limits.max_file_size)
        ),
    ]
}

/// Remaining credits, when the reply carries them
pub fn credits_line(response: &CodecResponse) -> Option<String> {
    response
        .license
        .as_ref()
        .and_then(|l| l.usages_count)
        .map(|count| format!("Remaining number of usage credits - {}", count))
}

/// One line describing the outcome of `command`
pub fn outcome_line(command: Command, response: &CodecResponse, context: &ReportContext) -> String {
    let limits = response.limits.as_ref();

    match response.error {
        ErrorCode::Success => match command {
            Command::Login => "Logged in to the Web API".to_string(),
            Command::Encode => match context.output {
                Some(path) => format!("Secret message encoded and saved to {}", path.display()),
                None => "Secret message encoded".to_string(),
            },
            Command::Decode => format!(
                "Secret message is \"{}\"",
                response.message.as_deref().unwrap_or_default()
            ),
        },
        ErrorCode::InvalidInput => match context.input {
            Some(path) => format!(
                "Invalid input file {} or file doesn't exist",
                path.display()
            ),
            None => "Invalid input file or file doesn't exist".to_string(),
        },
        ErrorCode::MessageTooLong => {
            "Message is too long for the provided image file, use larger file".to_string()
        }
        ErrorCode::ImageTooBig => match limits {
            Some(limits) => format!(
                "Image file is too big, current limit is set to {}",
                convert_size(limits.max_file_size)
            ),
            None => "Image file is too big".to_string(),
        },
        ErrorCode::LimitMessage => {
            let subject = if command == Command::Decode {
                "Extracted message"
            } else {
                "Message"
            };
            match limits {
                Some(limits) => format!(
                    "{} is too long, current limit is set to {}",
                    subject, limits.max_message_len
                ),
                None => format!("{} is too long", subject),
            }
        }
        ErrorCode::LimitPassword => match limits {
            Some(limits) => format!(
                "Password is too long, current limit is set to {}",
                limits.max_password_len
            ),
            None => "Password is too long".to_string(),
        },
        ErrorCode::InvalidPassword => "Invalid password".to_string(),
        ErrorCode::OutputFile => match context.output {
            Some(path) => format!("Cannot write output file {}", path.display()),
            None => "Cannot write output file".to_string(),
        },
        ErrorCode::WebApiConnection => "Cannot connect to the Web API interface".to_string(),
        ErrorCode::InvalidLicense => {
            "Activation key is invalid or expired (no usage credits left)".to_string()
        }
        ErrorCode::InvalidImageFormat => "Image file format is not supported".to_string(),
        ErrorCode::ImageMalformed => {
            "Image file is malformed, cannot write or read the encoded message".to_string()
        }
        ErrorCode::Unknown | ErrorCode::Other(_) => format!(
            "An unknown error occurred, error code: {}",
            response.error.code()
        ),
    }
}

fn display_count(count: Option<i64>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::License;

    fn activated_response() -> CodecResponse {
        let mut response = CodecResponse::from_error(ErrorCode::Success);
        response.license = Some(License {
            activation_status: true,
            user_name: Some("Jane".to_string()),
            license_type: Some(1),
            usages_total: Some(500),
            usages_count: Some(420),
        });
        response.limits = Some(Limits {
            max_password_len: 128,
            max_message_len: -1,
            max_file_size: 10 * 1024 * 1024,
        });
        response
    }

    #[test]
    fn test_license_lines_full() {
        let lines = license_lines(&activated_response());
        assert_eq!(
            lines,
            vec![
                "You are running in full version",
                "Registered for - Jane",
                "License type - company",
                "Total number of purchased usage credits - 500",
                "Remaining number of usage credits - 420",
            ]
        );
    }

    #[test]
    fn test_license_lines_demo() {
        let response = CodecResponse::from_error(ErrorCode::Success);
        assert_eq!(license_lines(&response), vec!["You are running in demo version"]);
        assert_eq!(credits_line(&response), None);
    }

    #[test]
    fn test_limit_lines() {
        let response = activated_response();
        let lines = limit_lines(response.limits.as_ref().unwrap());
        assert_eq!(
            lines,
            vec![
                "Max. password length - 128",
                "Max. message length - unlimited",
                "Max. input image file size - 10.0 MB",
            ]
        );
    }

    #[test]
    fn test_success_outcomes() {
        let mut response = activated_response();
        let output = Path::new("out.png");
        let context = ReportContext {
            input: None,
            output: Some(output),
        };
        assert_eq!(
            outcome_line(Command::Encode, &response, &context),
            "Secret message encoded and saved to out.png"
        );

        response.message = Some("Secret message".to_string());
        assert_eq!(
            outcome_line(Command::Decode, &response, &ReportContext::default()),
            "Secret message is \"Secret message\""
        );
    }

    #[test]
    fn test_limit_outcomes_use_reply_limits() {
        let mut response = CodecResponse::from_error(ErrorCode::ImageTooBig);
        response.limits = Some(Limits {
            max_password_len: 8,
            max_message_len: 16,
            max_file_size: 51200,
        });
        let context = ReportContext::default();

        assert_eq!(
            outcome_line(Command::Encode, &response, &context),
            "Image file is too big, current limit is set to 50.0 kB"
        );

        response.error = ErrorCode::LimitMessage;
        assert_eq!(
            outcome_line(Command::Decode, &response, &context),
            "Extracted message is too long, current limit is set to 16"
        );

        response.error = ErrorCode::LimitPassword;
        assert_eq!(
            outcome_line(Command::Encode, &response, &context),
            "Password is too long, current limit is set to 8"
        );
    }

    #[test]
    fn test_invalid_input_names_file() {
        let response = CodecResponse::from_error(ErrorCode::InvalidInput);
        let input = Path::new("input_file.webp");
        let context = ReportContext {
            input: Some(input),
            output: None,
        };
        assert_eq!(
            outcome_line(Command::Encode, &response, &context),
            "Invalid input file input_file.webp or file doesn't exist"
        );
    }

    #[test]
    fn test_unknown_code() {
        let response = CodecResponse::from_error(ErrorCode::Other(42));
        assert_eq!(
            outcome_line(Command::Decode, &response, &ReportContext::default()),
            "An unknown error occurred, error code: 42"
        );
    }
}
