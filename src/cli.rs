// Adapter Manager - Command Line
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};

use adapter_manager::models::AdapterIndex;

#[derive(Debug, Parser)]
#[command(name = "adapter-manager")]
#[command(version, about = "IPv4 network adapter inventory, configuration and scanning.")]
#[command(after_help = "Environment variables:\n  RUST_LOG  Set log level (trace, debug, info, warn, error)")]
pub struct CommandLine {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List network adapters
    #[command(alias = "ls")]
    List {
        /// Print the adapters as JSON
        #[arg(long)]
        json: bool,
    },
    /// Enable an adapter
    Enable { index: AdapterIndex },
    /// Disable an adapter
    Disable { index: AdapterIndex },
    /// Use DHCP for address and DNS
    Dhcp { index: AdapterIndex },
    /// Apply a saved profile
    Apply { index: AdapterIndex, profile: String },
    /// List saved profiles
    Profiles,
    /// Save a profile
    SaveProfile {
        name: String,
        ip: String,
        mask: String,
        /// Default gateway
        #[arg(long, default_value = "")]
        gateway: String,
        /// Preferred DNS server
        #[arg(long = "dns", default_value = "")]
        preferred_dns: String,
        /// Alternate DNS server
        #[arg(long = "alt-dns", default_value = "")]
        alternate_dns: String,
    },
    /// Save an adapter's configuration as a profile
    Capture { index: AdapterIndex, name: String },
    /// Delete a saved profile
    DeleteProfile { name: String },
    /// Show an adapter's ARP table
    Arp {
        adapter_ip: String,
        /// Host to ping before reading the table
        ping_target: Option<String>,
    },
    /// Scan ports with nmap
    Scan {
        /// Address or CIDR range
        target: String,
        /// Port list, defaults to the configured ports
        ports: Option<String>,
        /// Also scan UDP ports
        #[arg(long)]
        udp: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
