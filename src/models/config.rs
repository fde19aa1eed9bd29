// Adapter Manager - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shell that hosts the network configuration cmdlets.
    #[serde(default = "default_shell_program")]
    pub shell_program: String,

    /// Port scanner executable.
    #[serde(default = "default_scan_program")]
    pub scan_program: String,

    /// ARP table utility.
    #[serde(default = "default_arp_program")]
    pub arp_program: String,

    /// Ping utility used to populate the ARP cache.
    #[serde(default = "default_ping_program")]
    pub ping_program: String,

    /// Echo requests sent before reading the ARP cache.
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// Ports scanned when none are given.
    #[serde(default = "default_scan_ports")]
    pub default_scan_ports: String,

    /// Seconds to wait after a change before re-reading the inventory.
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Profile document location; defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,
}

fn default_shell_program() -> String {
    "powershell.exe".to_string()
}

fn default_scan_program() -> String {
    "nmap".to_string()
}

fn default_arp_program() -> String {
    "arp".to_string()
}

fn default_ping_program() -> String {
    "ping".to_string()
}

fn default_ping_count() -> u32 {
    20
}

fn default_scan_ports() -> String {
    "1-1024".to_string()
}

fn default_settle_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shell_program: default_shell_program(),
            scan_program: default_scan_program(),
            arp_program: default_arp_program(),
            ping_program: default_ping_program(),
            ping_count: default_ping_count(),
            default_scan_ports: default_scan_ports(),
            settle_secs: default_settle_secs(),
            log_level: default_log_level(),
            profiles_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }

    /// Parsed log level, falling back to INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
