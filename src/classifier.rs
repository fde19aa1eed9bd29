// Adapter Manager - Command Result Classifier
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Maps the diagnostic text of a configuration command to a [`CommandOutcome`].

use crate::models::CommandOutcome;

const PERMISSION_DENIED_MARKER: &str = "PermissionDenied";
const NOT_FOUND_MARKER: &str = "ObjectNotFound";
const ADDRESS_CONFLICT_MARKER: &str = "MSFT_NetIPAddress already exists";

/// Classify the stderr text of a finished command.
///
/// The first matching rule wins: missing privilege, missing target (which
/// includes an already existing address), any other text, no text.
pub fn classify(stderr: &str) -> CommandOutcome {
    if stderr.contains(PERMISSION_DENIED_MARKER) {
        CommandOutcome::PermissionDenied
    } else if stderr.contains(NOT_FOUND_MARKER) || stderr.contains(ADDRESS_CONFLICT_MARKER) {
        CommandOutcome::TargetNotFound
    } else if !stderr.trim().is_empty() {
        CommandOutcome::UnclassifiedFailure(stderr.trim().to_string())
    } else {
        CommandOutcome::Success
    }
}

/// Whether a `TargetNotFound` came from an address that already exists.
pub fn is_address_conflict(stderr: &str) -> bool {
    stderr.contains(ADDRESS_CONFLICT_MARKER)
        && !stderr.contains(PERMISSION_DENIED_MARKER)
        && !stderr.contains(NOT_FOUND_MARKER)
}
