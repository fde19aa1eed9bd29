// Adapter Manager - Command Outcomes
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Typed outcome of a configuration command.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Result of a single adapter mutation.
///
/// Mutations never return `Err` for command failures; the raw diagnostic text
/// of the external command is folded into one of these variants instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command produced no diagnostic text.
    Success,
    /// The command was refused for lack of privilege.
    PermissionDenied,
    /// The targeted adapter or object does not exist.
    TargetNotFound,
    /// A caller-supplied value was rejected before any command ran.
    ValidationFailed(String),
    /// Any other diagnostic text, preserved verbatim.
    UnclassifiedFailure(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Success, or a target that was already absent.
    pub fn is_success_or_not_found(&self) -> bool {
        matches!(self, Self::Success | Self::TargetNotFound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::PermissionDenied => "permission_denied",
            Self::TargetNotFound => "target_not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::UnclassifiedFailure(_) => "unclassified_failure",
        }
    }

    /// Lift the outcome into the crate error taxonomy.
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Success => Ok(()),
            Self::PermissionDenied => Err(Error::PermissionDenied),
            Self::TargetNotFound => Err(Error::TargetNotFound),
            Self::ValidationFailed(reason) => Err(Error::ValidationFailed(reason)),
            Self::UnclassifiedFailure(raw) => Err(Error::Unclassified(raw)),
        }
    }
}

impl std::fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::PermissionDenied => write!(f, "No administrator permissions"),
            Self::TargetNotFound => write!(f, "Invalid network adapter index"),
            Self::ValidationFailed(reason) => write!(f, "Invalid configuration: {}", reason),
            Self::UnclassifiedFailure(raw) => write!(f, "Unexpected error: {}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(CommandOutcome::Success.is_success());
        assert!(CommandOutcome::TargetNotFound.is_success_or_not_found());
        assert!(!CommandOutcome::PermissionDenied.is_success_or_not_found());
    }

    #[test]
    fn test_into_result_preserves_raw_message() {
        let outcome = CommandOutcome::UnclassifiedFailure("boom".to_string());
        match outcome.into_result() {
            Err(Error::Unclassified(raw)) => assert_eq!(raw, "boom"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(CommandOutcome::Success.into_result().is_ok());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&CommandOutcome::ValidationFailed("ip".into()))
            .expect("outcome should serialize");
        assert_eq!(json, r#"{"outcome":"validation_failed","detail":"ip"}"#);
    }
}
