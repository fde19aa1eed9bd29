// Adapter Manager - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the Adapter Manager core.

use thiserror::Error;

/// Result type alias for Adapter Manager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Adapter Manager operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Report Errors
    // ========================================
    #[error("Malformed report: {0}")]
    Parse(String),

    // ========================================
    // Validation Errors
    // ========================================
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // ========================================
    // Command Errors
    // ========================================
    #[error("No administrator permissions")]
    PermissionDenied,

    #[error("Invalid network adapter index")]
    TargetNotFound,

    #[error("Command failed: {0}")]
    Unclassified(String),

    #[error("Failed to run {program}: {reason}")]
    CommandFailed { program: String, reason: String },

    // ========================================
    // Scan Errors
    // ========================================
    #[error("0 hosts up")]
    NoHostsUp,

    #[error("No information")]
    EmptyOutput,

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new parse error.
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Create a new validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::ValidationFailed(reason.into())
    }

    /// Create a new command failed error.
    pub fn command_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is an authorization error.
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }

    /// Check if this error is a caller-side validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationFailed(_))
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}
