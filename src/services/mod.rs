// Adapter Manager - Background Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Background services.
//!
//! - Worker: Runs refreshes, mutations and scans on tokio's blocking pool

pub mod worker;

pub use worker::AdapterWorker;
