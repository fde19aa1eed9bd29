// Adapter Manager - ARP Neighbors
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! ARP table entries.

use serde::{Deserialize, Serialize};

/// One row of the ARP cache of an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArpEntry {
    /// Neighbor IPv4 address.
    pub ip: String,
    /// Neighbor hardware address, uppercase and dash separated.
    pub mac: String,
    /// Entry type label as printed by the platform (e.g., "dynamic", "static").
    pub kind: String,
}

impl ArpEntry {
    pub fn is_dynamic(&self) -> bool {
        self.kind.eq_ignore_ascii_case("dynamic")
    }

    /// Broadcast and multicast rows carry no real neighbor.
    pub fn is_broadcast(&self) -> bool {
        self.mac == "FF-FF-FF-FF-FF-FF" || self.mac.starts_with("01-00-5E")
    }
}
