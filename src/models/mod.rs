// Adapter Manager - Data Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Adapter Manager Data Models
//!
//! Types shared by the parsers, the mutator and the presentation layer:
//!
//! - **Adapter**: Reconciled per-adapter records
//! - **Neighbor**: ARP table entries
//! - **Scan**: Port scan results split by protocol
//! - **Profile**: Saved static configurations
//! - **Outcome**: Typed result of a configuration command
//! - **Error**: Shared error types

pub mod adapter;
pub mod config;
pub mod error;
pub mod neighbor;
pub mod outcome;
pub mod profile;
pub mod scan;
pub mod validation;

// Re-export main types for convenience
pub use adapter::{AdapterIndex, AdapterRecord, AdapterStatus, FieldMap, PrefixOrigin, SuffixOrigin};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use neighbor::ArpEntry;
pub use outcome::CommandOutcome;
pub use profile::{ConfigurationProfile, ProfileDraft, ProfileMap};
pub use scan::{HostScanResult, PortResult, Protocol, ScanReport};

/// Crate version.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "adapter-manager";
