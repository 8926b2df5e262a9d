//! API data models
//!
//! This module contains the request parameters, the reply structure and the
//! error-code table of the Web API.

pub mod error_code;
pub mod request;
pub mod response;
