// Adapter Manager - ARP Table Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parser for `arp -a` output and the commands that produce it.

use crate::models::validation::is_valid_ipv4;
use crate::models::{AppConfig, ArpEntry};
use crate::runner::CommandSpec;

/// Marker that separates the ARP table header from its rows.
const TABLE_BOUNDARY: &str = "---";

/// Parse the neighbor table printed by `arp -a -N <ip>`.
///
/// Returns an empty table when the output has no table header. Rows are kept
/// only when they have exactly three columns starting with an IPv4 address,
/// which drops the interface banner and the column header.
pub fn parse_arp_table(raw: &str) -> Vec<ArpEntry> {
    if !raw.contains(TABLE_BOUNDARY) {
        return Vec::new();
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [ip, mac, kind] if is_valid_ipv4(ip) => Some(ArpEntry {
                    ip: ip.to_string(),
                    mac: mac.to_uppercase(),
                    kind: kind.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Request for the neighbor table of one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpQuery {
    /// Address of the adapter whose table is read.
    pub adapter_ip: String,
    /// Host pinged first so it shows up in the cache.
    pub ping_target: Option<String>,
}

impl ArpQuery {
    pub fn new(adapter_ip: impl Into<String>) -> Self {
        Self {
            adapter_ip: adapter_ip.into(),
            ping_target: None,
        }
    }

    pub fn with_ping(mut self, target: impl Into<String>) -> Self {
        self.ping_target = Some(target.into());
        self
    }

    /// Command reading the adapter's ARP table.
    pub fn arp_command(&self, config: &AppConfig) -> CommandSpec {
        CommandSpec::new(&config.arp_program).args(["-a", "-N", self.adapter_ip.as_str()])
    }

    /// Command populating the cache, when a ping target is set.
    pub fn ping_command(&self, config: &AppConfig) -> Option<CommandSpec> {
        self.ping_target.as_ref().map(|target| {
            CommandSpec::new(&config.ping_program).args([
                "-n".to_string(),
                config.ping_count.to_string(),
                target.clone(),
            ])
        })
    }
}
