// Adapter Manager - Adapter Inventory
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Builds the adapter list from the four adapter reports.
//!
//! The reports are fetched concurrently and merged per adapter index with
//! identity data taking precedence over address, DNS and route data. A
//! report that cannot be fetched or parsed only leaves its fields empty.

use std::collections::BTreeMap;
use std::thread;
use tracing::{debug, info, warn};

use crate::models::adapter::fields;
use crate::models::{AdapterIndex, AdapterRecord, FieldMap};
use crate::parsers::records::{merge_reports, FieldValue, PartialReport};
use crate::parsers::reports::ReportKind;
use crate::runner::{CommandRunner, CommandSpec};

/// Merge partial reports (highest precedence first) into flat field maps.
///
/// Adapters without a name are dropped and every canonical field is
/// present in the result, empty when no report supplied it.
pub fn reconcile_partials(reports: &[PartialReport]) -> BTreeMap<AdapterIndex, FieldMap> {
    let merged = reports
        .iter()
        .fold(PartialReport::new(), |acc, report| merge_reports(&acc, report));

    merged
        .into_iter()
        .filter(|(_, record)| record.contains_key(fields::NAME))
        .map(|(index, record)| {
            let mut flat: FieldMap = record
                .into_iter()
                .filter_map(|(key, value)| match value {
                    FieldValue::Text(text) => Some((key, text)),
                    FieldValue::Map(_) => None,
                })
                .collect();
            for field in fields::CANONICAL {
                flat.entry(field.to_string()).or_default();
            }
            (index, flat)
        })
        .collect()
}

/// Merge partial reports into adapter records sorted by index.
pub fn reconcile(reports: &[PartialReport]) -> Vec<AdapterRecord> {
    reconcile_partials(reports)
        .iter()
        .map(|(index, values)| AdapterRecord::from_fields(*index, values))
        .collect()
}

/// Reads adapter reports through a command runner.
pub struct Inventory<'a> {
    runner: &'a dyn CommandRunner,
    shell_program: &'a str,
}

impl<'a> Inventory<'a> {
    pub fn new(runner: &'a dyn CommandRunner, shell_program: &'a str) -> Self {
        Self {
            runner,
            shell_program,
        }
    }

    /// Fetch and parse one report, degrading to an empty report on failure.
    fn fetch(&self, kind: ReportKind) -> PartialReport {
        let spec = CommandSpec::shell(self.shell_program, kind.command());

        let output = match self.runner.run(&spec) {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to read {} report: {}", kind.as_str(), e);
                return PartialReport::new();
            }
        };

        if output.has_diagnostics() && output.stdout.trim().is_empty() {
            warn!(
                "{} report failed: {}",
                kind.as_str(),
                output.stderr.lines().next().unwrap_or_default()
            );
            return PartialReport::new();
        }

        match kind.read(&output.stdout) {
            Ok(report) => {
                debug!("{} report: {} adapters", kind.as_str(), report.len());
                report
            }
            Err(e) => {
                warn!("Malformed {} report: {}", kind.as_str(), e);
                PartialReport::new()
            }
        }
    }

    /// Read all four reports concurrently and reconcile them.
    pub fn refresh(&self) -> Vec<AdapterRecord> {
        let reports: Vec<PartialReport> = thread::scope(|scope| {
            let handles: Vec<_> = ReportKind::ALL
                .into_iter()
                .map(|kind| scope.spawn(move || self.fetch(kind)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_default())
                .collect()
        });

        let adapters = reconcile(&reports);
        info!("Inventory refreshed: {} adapters", adapters.len());
        adapters
    }
}
