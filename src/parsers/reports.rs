// Adapter Manager - Adapter Report Readers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Readers for the four adapter reports.
//!
//! Each reader turns one captured report into partial records keyed by
//! adapter index, renaming report fields to canonical field names. A field
//! the report does not carry is simply absent from the partial record.

use std::collections::BTreeMap;

use super::records::{parse_record_list, parse_records, FieldValue, PartialRecord, PartialReport, RecordLayout};
use crate::models::adapter::fields;
use crate::models::{Error, FieldMap, Result};
use crate::network_utils::prefix_to_mask;

/// Route next hop meaning "on-link", never a usable gateway.
const ON_LINK_HOP: &str = "0.0.0.0";

pub const IDENTITY_LAYOUT: RecordLayout = RecordLayout::new("ifIndex", "Name");
pub const IP_LAYOUT: RecordLayout = RecordLayout::new("InterfaceIndex", "IPAddress");
pub const DNS_LAYOUT: RecordLayout = RecordLayout::new("InterfaceIndex", "ServerAddresses");
pub const ROUTE_LAYOUT: RecordLayout = RecordLayout::new("ifIndex", "NextHop");

/// The four reports that make up an inventory, in merge precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Identity,
    Ip,
    Dns,
    Route,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [Self::Identity, Self::Ip, Self::Dns, Self::Route];

    /// PowerShell pipeline producing the report.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Identity => {
                "Get-NetAdapter | Format-List -Property ifIndex,Name,InterfaceDescription,Status,MacAddress"
            }
            Self::Ip => {
                "Get-NetIPAddress -AddressFamily IPv4 | Format-List -Property InterfaceIndex,IPAddress,PrefixLength,PrefixOrigin,SuffixOrigin"
            }
            Self::Dns => {
                "Get-DnsClientServerAddress -AddressFamily IPv4 | Format-List -Property InterfaceIndex,ServerAddresses"
            }
            Self::Route => {
                "Get-NetRoute -AddressFamily IPv4 -DestinationPrefix 0.0.0.0/0 | Format-List -Property ifIndex,NextHop"
            }
        }
    }

    /// Parse a captured report of this kind.
    pub fn read(&self, raw: &str) -> Result<PartialReport> {
        match self {
            Self::Identity => read_identity(raw),
            Self::Ip => read_ip(raw),
            Self::Dns => read_dns(raw),
            Self::Route => read_route(raw),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Ip => "ip",
            Self::Dns => "dns",
            Self::Route => "route",
        }
    }
}

/// Copy `source` fields into a partial record under canonical names.
fn rename(record: &FieldMap, mapping: &[(&str, &str)]) -> PartialRecord {
    mapping
        .iter()
        .filter_map(|(source, target)| {
            record
                .get(*source)
                .map(|value| (target.to_string(), FieldValue::text(value.as_str())))
        })
        .collect()
}

/// Read the adapter identity report (`Get-NetAdapter`).
pub fn read_identity(raw: &str) -> Result<PartialReport> {
    const MAPPING: [(&str, &str); 4] = [
        ("Name", fields::NAME),
        ("InterfaceDescription", fields::DESCRIPTION),
        ("Status", fields::STATUS),
        ("MacAddress", fields::MAC),
    ];

    Ok(parse_records(raw, IDENTITY_LAYOUT)?
        .into_iter()
        .map(|(index, record)| (index, rename(&record, &MAPPING)))
        .collect())
}

/// Read the IPv4 address report (`Get-NetIPAddress`).
///
/// The subnet mask is derived from the prefix length. A blank prefix
/// length leaves the mask out.
pub fn read_ip(raw: &str) -> Result<PartialReport> {
    const MAPPING: [(&str, &str); 4] = [
        ("IPAddress", fields::IP),
        ("PrefixLength", fields::PREFIX_LENGTH),
        ("PrefixOrigin", fields::PREFIX_ORIGIN),
        ("SuffixOrigin", fields::SUFFIX_ORIGIN),
    ];

    let mut report = PartialReport::new();

    for (index, record) in parse_records(raw, IP_LAYOUT)? {
        let mut partial = rename(&record, &MAPPING);

        if let Some(prefix) = record.get("PrefixLength").map(|p| p.trim()).filter(|p| !p.is_empty()) {
            let bits: u32 = prefix
                .parse()
                .map_err(|_| Error::parse(format!("non-numeric PrefixLength: {:?}", prefix)))?;
            partial.insert(fields::MASK.to_string(), FieldValue::text(prefix_to_mask(bits)?));
        }

        report.insert(index, partial);
    }

    Ok(report)
}

/// Split a `{a, b}` server list into its entries.
fn parse_server_list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .map(|server| server.trim().to_string())
        .filter(|server| !server.is_empty())
        .collect()
}

/// Read the DNS server report (`Get-DnsClientServerAddress`).
///
/// Only the first two servers are kept: preferred and alternate.
pub fn read_dns(raw: &str) -> Result<PartialReport> {
    let mut report = PartialReport::new();

    for (index, record) in parse_records(raw, DNS_LAYOUT)? {
        let mut partial = PartialRecord::new();

        if let Some(value) = record.get("ServerAddresses") {
            let mut servers = parse_server_list(value).into_iter();
            partial.insert(
                fields::PREFERRED_DNS.to_string(),
                FieldValue::text(servers.next().unwrap_or_default()),
            );
            partial.insert(
                fields::ALTERNATE_DNS.to_string(),
                FieldValue::text(servers.next().unwrap_or_default()),
            );
        }

        report.insert(index, partial);
    }

    Ok(report)
}

/// Read the default route report (`Get-NetRoute`).
///
/// An adapter can carry several default routes; the first next hop that is
/// not on-link becomes the gateway.
pub fn read_route(raw: &str) -> Result<PartialReport> {
    let mut gateways: BTreeMap<_, String> = BTreeMap::new();

    for (index, record) in parse_record_list(raw, ROUTE_LAYOUT)? {
        let Some(hop) = record.get("NextHop") else {
            continue;
        };
        if hop.is_empty() || hop == ON_LINK_HOP {
            continue;
        }
        gateways.entry(index).or_insert_with(|| hop.clone());
    }

    Ok(gateways
        .into_iter()
        .map(|(index, gateway)| {
            let partial = [(fields::GATEWAY.to_string(), FieldValue::text(gateway))]
                .into_iter()
                .collect();
            (index, partial)
        })
        .collect())
}
