// Adapter Manager - Report Parsers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parsers for the text printed by external utilities.
//!
//! - **Records**: `Format-List` records and their left-biased merge
//! - **Reports**: The four adapter report readers
//! - **ARP**: Neighbor tables from `arp -a`
//! - **Scan**: Port scanner output

pub mod arp;
pub mod records;
pub mod reports;
pub mod scan;

pub use arp::{parse_arp_table, ArpQuery};
pub use records::{merge_left, parse_records, FieldValue, PartialRecord, PartialReport, RecordLayout};
pub use reports::ReportKind;
pub use scan::{parse_nmap_version, parse_scan, ScanRequest};
