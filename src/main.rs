// Adapter Manager - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Adapter Manager
//!
//! Command-line front end: lists adapters, applies profiles, toggles DHCP,
//! reads ARP tables and runs port scans.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use adapter_manager::models::{
    AdapterRecord, AppConfig, CommandOutcome, ConfigurationProfile, Error, ProfileDraft, Protocol, Result,
    ScanReport, CONFIG_DIR_NAME, CRATE_VERSION,
};
use adapter_manager::network_utils::scan_range;
use adapter_manager::parsers::{ArpQuery, ScanRequest};
use adapter_manager::runner::SystemRunner;
use adapter_manager::services::AdapterWorker;
use adapter_manager::storage::{delete_profile, upsert_profile, JsonProfileStore, ProfileStore};

use crate::cli::{CommandLine, Commands};

/// Human-readable application name.
const APP_NAME: &str = "Adapter Manager";

/// Settings file in the user's config directory.
fn settings_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join("settings.toml"))
}

/// Load the application configuration, falling back to defaults.
fn load_config() -> AppConfig {
    match settings_path() {
        Some(path) if path.exists() => match AppConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Ignoring {}: {}", path.display(), e);
                AppConfig::default()
            }
        },
        _ => AppConfig::default(),
    }
}

fn profile_store(config: &AppConfig) -> JsonProfileStore {
    match &config.profiles_file {
        Some(path) => JsonProfileStore::with_path(path),
        None => JsonProfileStore::new(),
    }
}

fn print_adapters(adapters: &[AdapterRecord]) {
    if adapters.is_empty() {
        println!("No network adapters found.");
        return;
    }

    println!(
        "{:<6}{:<22}{:<14}{:<17}{:<17}{:<17}{:<17}{}",
        "Index", "Name", "Status", "IP", "Mask", "Gateway", "DNS", "MAC"
    );
    for adapter in adapters {
        let origin = if adapter.is_static() { "" } else { "*" };
        println!(
            "{:<6}{:<22}{:<14}{:<17}{:<17}{:<17}{:<17}{}",
            adapter.index,
            adapter.name,
            adapter.status.as_str(),
            format!("{}{}", adapter.ip, origin),
            adapter.mask,
            adapter.gateway,
            adapter.preferred_dns,
            adapter.mac
        );
    }
}

fn print_profiles(store: &dyn ProfileStore) -> Result<()> {
    let profiles = store.get()?;
    if profiles.is_empty() {
        println!("No saved profiles.");
        return Ok(());
    }

    for (name, profile) in &profiles {
        println!(
            "{:<24}{:<17}{:<17}{:<17}{:<17}{}",
            name, profile.ip, profile.mask, profile.gateway, profile.preferred_dns, profile.alternate_dns
        );
    }
    Ok(())
}

fn print_scan(report: &ScanReport) {
    for protocol in [Protocol::Tcp, Protocol::Udp] {
        let hosts = report.hosts(protocol);
        if hosts.is_empty() {
            continue;
        }

        println!("{}", protocol.as_str().to_uppercase());
        for host in hosts.values() {
            for service in &host.services {
                println!(
                    "  {:<19}{:<12}{:<15}{:<17}{:<20}{}",
                    host.ip,
                    service.port,
                    service.state,
                    service.service,
                    host.mac.as_deref().unwrap_or_default(),
                    host.device_label.as_deref().unwrap_or_default()
                );
            }
        }
    }
}

/// Report an outcome; failures become errors for the exit code.
fn finish(outcome: CommandOutcome) -> Result<()> {
    println!("{}", outcome);
    outcome.into_result()
}

async fn run(command: Commands, config: AppConfig) -> Result<()> {
    let runner = Arc::new(SystemRunner::new(&config.shell_program));
    let store = profile_store(&config);
    let worker = AdapterWorker::new(runner, config);

    match command {
        Commands::List { json } => {
            let adapters = worker.refresh().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&adapters)?);
            } else {
                print_adapters(&adapters);
            }
            Ok(())
        }
        Commands::Enable { index } => finish(worker.mutate(move |m| m.enable_adapter(index)).await?),
        Commands::Disable { index } => finish(worker.mutate(move |m| m.disable_adapter(index)).await?),
        Commands::Dhcp { index } => {
            let (outcome, adapters) = worker
                .mutate_and_refresh(move |m| m.enable_dhcp_with_auto_dns(index))
                .await?;
            print_adapters(&adapters);
            finish(outcome)
        }
        Commands::Apply { index, profile: name } => {
            let profile = store
                .get()?
                .remove(&name)
                .ok_or_else(|| Error::validation(format!("No profile named '{}'", name)))?;

            let current_ip = worker
                .refresh()
                .await?
                .into_iter()
                .find(|a| a.index == index)
                .map(|a| a.ip)
                .ok_or(Error::TargetNotFound)?;

            let (outcome, adapters) = worker
                .mutate_and_refresh(move |m| m.apply_profile(index, &profile, &current_ip))
                .await?;
            print_adapters(&adapters);
            finish(outcome)
        }
        Commands::Profiles => print_profiles(&store),
        Commands::SaveProfile {
            name,
            ip,
            mask,
            gateway,
            preferred_dns,
            alternate_dns,
        } => {
            let mut draft = ProfileDraft::new(name);
            draft.ip = ip;
            draft.mask = mask;
            draft.gateway = gateway;
            draft.preferred_dns = preferred_dns;
            draft.alternate_dns = alternate_dns;

            let (name, profile) = draft.validate()?;
            save(&store, &name, profile)
        }
        Commands::Capture { index, name } => {
            let adapter = worker
                .refresh()
                .await?
                .into_iter()
                .find(|a| a.index == index)
                .ok_or(Error::TargetNotFound)?;

            let current = ConfigurationProfile::from_record(&adapter);
            let mut draft = ProfileDraft::new(name);
            draft.ip = current.ip;
            draft.mask = current.mask;
            draft.gateway = current.gateway;
            draft.preferred_dns = current.preferred_dns;
            draft.alternate_dns = current.alternate_dns;

            let (name, profile) = draft.validate()?;
            save(&store, &name, profile)
        }
        Commands::DeleteProfile { name } => {
            if delete_profile(&store, &name)? {
                println!("Profile '{}' successfully deleted.", name);
            } else {
                println!("No profile named '{}'.", name);
            }
            Ok(())
        }
        Commands::Arp { adapter_ip, ping_target } => {
            let mut query = ArpQuery::new(adapter_ip);
            if let Some(target) = ping_target {
                query = query.with_ping(target);
            }

            let entries = worker.arp_table(query).await?;
            if entries.is_empty() {
                println!("No ARP entries found.");
            }
            for entry in entries.iter().filter(|e| !e.is_broadcast()) {
                println!("{:<21}{:<22}{}", entry.ip, entry.mac, entry.kind);
            }
            Ok(())
        }
        Commands::Scan { target, ports, udp } => {
            if worker.scanner_version().await?.is_none() {
                return Err(Error::command_failed(
                    &worker.config().scan_program,
                    "Nmap (https://nmap.org) must be installed to scan",
                ));
            }

            let ports = ports.unwrap_or_else(|| worker.config().default_scan_ports.clone());

            if let Some((ip, prefix)) = target.split_once('/') {
                if let Ok(bits) = prefix.parse() {
                    println!("Range: {}", scan_range(ip, bits)?);
                }
            }

            let report = worker.scan(ScanRequest::new(target, ports).with_udp(udp)).await?;
            print_scan(&report);
            Ok(())
        }
    }
}

fn save(store: &dyn ProfileStore, name: &str, profile: ConfigurationProfile) -> Result<()> {
    if upsert_profile(store, name, profile, None)? {
        println!("Profile '{}' saved successfully.", name);
        Ok(())
    } else {
        Err(Error::ConfigWriteFailed(format!("could not save profile '{}'", name)))
    }
}

fn main() -> ExitCode {
    let cli = CommandLine::parse_args();
    let config = load_config();

    // Initialize logging with appropriate level
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        config.tracing_level()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting {} v{}", APP_NAME, CRATE_VERSION);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli.command, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
