// Adapter Manager - Background Worker
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Runs inventory refreshes, mutations and scans off the caller's thread.
//!
//! Every external command blocks until the process exits, so each job is
//! moved onto tokio's blocking pool. Jobs are independent: a long port scan
//! never holds up an inventory refresh.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::inventory::Inventory;
use crate::models::{AdapterIndex, AdapterRecord, AppConfig, ArpEntry, CommandOutcome, ConfigurationProfile, Error, Result, ScanReport};
use crate::mutator::AdapterMutator;
use crate::parsers::arp::{parse_arp_table, ArpQuery};
use crate::parsers::scan::{parse_nmap_version, parse_scan, ScanRequest};
use crate::runner::{CommandRunner, CommandSpec};

/// Async front end over a shared command runner.
#[derive(Clone)]
pub struct AdapterWorker {
    runner: Arc<dyn CommandRunner>,
    config: Arc<AppConfig>,
}

impl AdapterWorker {
    pub fn new(runner: Arc<dyn CommandRunner>, config: AppConfig) -> Self {
        Self {
            runner,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run a blocking job with the runner and configuration.
    async fn blocking<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CommandRunner, &AppConfig) -> T + Send + 'static,
    {
        let runner = Arc::clone(&self.runner);
        let config = Arc::clone(&self.config);

        tokio::task::spawn_blocking(move || job(runner.as_ref(), &config))
            .await
            .map_err(|e| Error::Internal(format!("worker task failed: {}", e)))
    }

    /// Read the current adapter inventory.
    pub async fn refresh(&self) -> Result<Vec<AdapterRecord>> {
        self.blocking(|runner, config| Inventory::new(runner, &config.shell_program).refresh())
            .await
    }

    /// Run one or more mutations on the blocking pool.
    pub async fn mutate<F>(&self, op: F) -> Result<CommandOutcome>
    where
        F: FnOnce(&AdapterMutator<'_>) -> CommandOutcome + Send + 'static,
    {
        self.blocking(move |runner, config| op(&AdapterMutator::new(runner, &config.shell_program)))
            .await
    }

    /// Apply a mutation, wait for the network stack to settle, then re-read
    /// the inventory.
    pub async fn mutate_and_refresh<F>(&self, op: F) -> Result<(CommandOutcome, Vec<AdapterRecord>)>
    where
        F: FnOnce(&AdapterMutator<'_>) -> CommandOutcome + Send + 'static,
    {
        let outcome = self.mutate(op).await?;
        if outcome.is_success() && self.config.settle_secs > 0 {
            debug!("Waiting {}s for the adapter to settle", self.config.settle_secs);
            tokio::time::sleep(Duration::from_secs(self.config.settle_secs)).await;
        }
        let adapters = self.refresh().await?;
        Ok((outcome, adapters))
    }

    pub async fn apply_profile(
        &self,
        index: AdapterIndex,
        profile: ConfigurationProfile,
        current_ip: String,
    ) -> Result<CommandOutcome> {
        self.mutate(move |m| m.apply_profile(index, &profile, &current_ip))
            .await
    }

    /// Read the ARP table of an adapter, pinging the target first if set.
    pub async fn arp_table(&self, query: ArpQuery) -> Result<Vec<ArpEntry>> {
        self.blocking(move |runner, config| {
            if let Some(ping) = query.ping_command(config) {
                if let Err(e) = runner.run(&ping) {
                    warn!("Ping before ARP read failed: {}", e);
                }
            }

            let output = runner.run(&query.arp_command(config))?;
            if output.has_diagnostics() {
                warn!("ARP read failed: {}", output.stderr.trim());
                return Ok(Vec::new());
            }
            Ok(parse_arp_table(&output.stdout))
        })
        .await?
    }

    /// Run a port scan.
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanReport> {
        let spec = request.command(&self.config)?;
        info!("Scanning {} ports {}", request.target, request.ports);

        self.blocking(move |runner, _| {
            let output = runner.run(&spec)?;
            parse_scan(&output.stdout, &output.stderr)
        })
        .await?
    }

    /// Installed scanner version, `None` when the scanner is missing.
    pub async fn scanner_version(&self) -> Result<Option<String>> {
        self.blocking(|runner, config| {
            let spec = CommandSpec::new(&config.scan_program).arg("--version");
            match runner.run(&spec) {
                Ok(output) => parse_nmap_version(&output.stdout),
                Err(e) => {
                    debug!("Scanner not available: {}", e);
                    None
                }
            }
        })
        .await
    }
}
