// Adapter Manager - Library Root
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Adapter Manager
//!
//! Inventories and reconfigures a host's IPv4 network adapters by driving
//! external command-line utilities and parsing what they print.
//!
//! - [`inventory`]: Reconciled adapter list from four adapter reports
//! - [`mutator`]: Address, gateway, DNS and DHCP changes
//! - [`parsers`]: Report, ARP table and port scan parsers
//! - [`storage`]: Saved configuration profiles
//! - [`services`]: Async worker for long-running jobs

pub mod classifier;
pub mod inventory;
pub mod models;
pub mod mutator;
pub mod network_utils;
pub mod parsers;
pub mod runner;
pub mod services;
pub mod storage;

pub use models::{Error, Result};
