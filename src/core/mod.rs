//! Core application modules
//!
//! This module contains configuration, constants, logging, the Web API
//! client and the report helpers used by the command line.

pub mod client;
pub mod config;
pub mod constants;
pub mod logging;
pub mod report;
pub mod size;
