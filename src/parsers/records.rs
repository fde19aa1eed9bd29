// Adapter Manager - Record Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parser for `Format-List` style reports and the left-biased deep merge
//! used to combine them.
//!
//! A report is a sequence of records, each a run of `Field : value` lines
//! starting with the index field:
//!
//! ```text
//! ifIndex              : 12
//! Name                 : Ethernet
//! Status               : Up
//!
//! ifIndex              : 7
//! Name                 : Wi-Fi
//! Status               : Disconnected
//! ```

use std::collections::BTreeMap;

use crate::models::{AdapterIndex, Error, FieldMap, Result};

/// How records are delimited in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Field that opens every record and carries the adapter index.
    pub start_field: &'static str,
    /// Field a chunk must contain to count as a record at all.
    pub required_field: &'static str,
}

impl RecordLayout {
    pub const fn new(start_field: &'static str, required_field: &'static str) -> Self {
        Self {
            start_field,
            required_field,
        }
    }
}

/// Parse a report into `(index, fields)` pairs in report order.
///
/// Chunks without the layout's required field are skipped as preamble or
/// noise. Within a kept chunk every non-blank line must hold a colon and the
/// index field must be an integer.
pub fn parse_record_list(raw: &str, layout: RecordLayout) -> Result<Vec<(AdapterIndex, FieldMap)>> {
    let mut records = Vec::new();

    for shard in raw.split(layout.start_field).skip(1) {
        if !shard.contains(layout.required_field) {
            continue;
        }

        let chunk = format!("{}{}", layout.start_field, shard);
        let mut fields = FieldMap::new();

        for line in chunk.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (name, value) = line.split_once(':').ok_or_else(|| {
                Error::parse(format!("line without field separator: {:?}", line))
            })?;
            fields.insert(name.trim().to_string(), value.trim().to_string());
        }

        let index = fields
            .get(layout.start_field)
            .ok_or_else(|| Error::parse(format!("record without {}", layout.start_field)))?
            .parse::<AdapterIndex>()
            .map_err(|_| {
                Error::parse(format!(
                    "non-numeric {}: {:?}",
                    layout.start_field, fields[layout.start_field]
                ))
            })?;

        records.push((index, fields));
    }

    Ok(records)
}

/// Parse a report into a map keyed by adapter index.
///
/// When an index occurs more than once the last record wins.
pub fn parse_records(raw: &str, layout: RecordLayout) -> Result<BTreeMap<AdapterIndex, FieldMap>> {
    Ok(parse_record_list(raw, layout)?.into_iter().collect())
}

/// A value in a partial record: a scalar or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Map(_) => None,
        }
    }
}

/// Field subset of one adapter as produced by a single report reader.
pub type PartialRecord = BTreeMap<String, FieldValue>;

/// Partial records of one report, keyed by adapter index.
pub type PartialReport = BTreeMap<AdapterIndex, PartialRecord>;

/// Merge two maps, keeping `left`'s leaf when both sides define a key.
///
/// Nested maps present on both sides are merged key by key. Neither input is
/// modified.
pub fn merge_left<K>(left: &BTreeMap<K, FieldValue>, right: &BTreeMap<K, FieldValue>) -> BTreeMap<K, FieldValue>
where
    K: Ord + Clone,
{
    let mut merged = right.clone();

    for (key, value) in left {
        let combined = match (value, right.get(key)) {
            (FieldValue::Map(l), Some(FieldValue::Map(r))) => FieldValue::Map(merge_left(l, r)),
            _ => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }

    merged
}

/// Merge two reports adapter by adapter, `left` taking precedence.
pub fn merge_reports(left: &PartialReport, right: &PartialReport) -> PartialReport {
    let wrap = |report: &PartialReport| -> BTreeMap<AdapterIndex, FieldValue> {
        report
            .iter()
            .map(|(index, record)| (*index, FieldValue::Map(record.clone())))
            .collect()
    };

    merge_left(&wrap(left), &wrap(right))
        .into_iter()
        .filter_map(|(index, value)| match value {
            FieldValue::Map(record) => Some((index, record)),
            FieldValue::Text(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: RecordLayout = RecordLayout::new("ifIndex", "Name");

    #[test]
    fn test_parse_records_with_preamble_and_blank_lines() {
        let raw = "\r\n\r\nifIndex : 12\r\nName    : Ethernet\r\nStatus  : Up\r\n\r\n\r\nifIndex : 7\r\nName    : Wi-Fi\r\nStatus  : Disconnected\r\n\r\n";
        let records = parse_records(raw, LAYOUT).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[&12]["Name"], "Ethernet");
        assert_eq!(records[&7]["Status"], "Disconnected");
        assert_eq!(records[&7]["ifIndex"], "7");
    }

    #[test]
    fn test_value_keeps_text_after_first_colon() {
        let raw = "ifIndex : 3\nName : Lab\nNote : a:b:c\n";
        let records = parse_records(raw, LAYOUT).unwrap();
        assert_eq!(records[&3]["Note"], "a:b:c");
    }

    #[test]
    fn test_chunks_without_required_field_are_skipped() {
        let raw = "ifIndex : 1\nStatus : Up\n\nifIndex : 2\nName : Kept\n";
        let records = parse_records(raw, LAYOUT).unwrap();
        assert_eq!(records.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_line_without_colon_is_an_error() {
        let raw = "ifIndex : 1\nName : Eth\ncontinued description\n";
        assert!(matches!(parse_records(raw, LAYOUT), Err(Error::Parse(_))));
    }

    #[test]
    fn test_non_numeric_index_is_an_error() {
        let raw = "ifIndex : abc\nName : Eth\n";
        assert!(matches!(parse_records(raw, LAYOUT), Err(Error::Parse(_))));
    }

    #[test]
    fn test_record_list_keeps_duplicates_in_order() {
        let layout = RecordLayout::new("ifIndex", "NextHop");
        let raw = "ifIndex : 4\nNextHop : 0.0.0.0\n\nifIndex : 4\nNextHop : 10.0.0.1\n";
        let list = parse_record_list(raw, layout).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].1["NextHop"], "10.0.0.1");
    }

    #[test]
    fn test_empty_report_has_no_records() {
        assert!(parse_records("", LAYOUT).unwrap().is_empty());
    }

    #[test]
    fn test_merge_left_prefers_left_leaves() {
        let left: BTreeMap<String, FieldValue> =
            [("name".to_string(), FieldValue::text("Eth"))].into_iter().collect();
        let right: BTreeMap<String, FieldValue> = [
            ("name".to_string(), FieldValue::text("Other")),
            ("ip".to_string(), FieldValue::text("10.0.0.1")),
        ]
        .into_iter()
        .collect();

        let merged = merge_left(&left, &right);
        assert_eq!(merged["name"], FieldValue::text("Eth"));
        assert_eq!(merged["ip"], FieldValue::text("10.0.0.1"));
        // inputs untouched
        assert_eq!(left.len(), 1);
        assert_eq!(right["name"], FieldValue::text("Other"));
    }

    #[test]
    fn test_merge_left_recurses_into_nested_maps() {
        let nested = |pairs: &[(&str, &str)]| {
            FieldValue::Map(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), FieldValue::text(*v)))
                    .collect(),
            )
        };
        let left: BTreeMap<u32, FieldValue> = [(1, nested(&[("a", "1")]))].into_iter().collect();
        let right: BTreeMap<u32, FieldValue> =
            [(1, nested(&[("a", "x"), ("b", "2")])), (2, nested(&[("c", "3")]))]
                .into_iter()
                .collect();

        let merged = merge_left(&left, &right);
        assert_eq!(merged[&1], nested(&[("a", "1"), ("b", "2")]));
        assert_eq!(merged[&2], nested(&[("c", "3")]));
    }

    #[test]
    fn test_merge_left_scalar_beats_map() {
        let left: BTreeMap<String, FieldValue> =
            [("k".to_string(), FieldValue::text("v"))].into_iter().collect();
        let right: BTreeMap<String, FieldValue> =
            [("k".to_string(), FieldValue::Map(BTreeMap::new()))].into_iter().collect();
        assert_eq!(merge_left(&left, &right)["k"], FieldValue::text("v"));
    }
}
