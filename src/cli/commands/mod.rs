//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod redact;
pub mod rules;
pub mod validate;
pub mod visits;
