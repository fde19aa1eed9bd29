// Adapter Manager - Adapter Mutator
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Configuration changes applied to a single adapter.
//!
//! Every operation validates its input before any command runs, issues one
//! PowerShell cmdlet through the runner and classifies its diagnostics into a
//! [`CommandOutcome`]. The only automatic retry is a single re-issue of
//! `New-NetIPAddress` after clearing an address that already exists.

use tracing::{debug, info, warn};

use crate::classifier::{classify, is_address_conflict};
use crate::models::validation::{is_valid_ipv4, is_valid_mask};
use crate::models::{AdapterIndex, CommandOutcome, ConfigurationProfile};
use crate::network_utils::mask_to_prefix;
use crate::runner::{CommandRunner, CommandSpec};

/// Address that stands for "unset" and is never accepted as a value.
const UNSPECIFIED: &str = "0.0.0.0";

/// Route prefix of the default gateway.
const DEFAULT_ROUTE: &str = "0.0.0.0/0";

fn invalid(reason: impl Into<String>) -> CommandOutcome {
    CommandOutcome::ValidationFailed(reason.into())
}

/// Issues configuration commands for adapters.
pub struct AdapterMutator<'a> {
    runner: &'a dyn CommandRunner,
    shell_program: &'a str,
}

impl<'a> AdapterMutator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, shell_program: &'a str) -> Self {
        Self {
            runner,
            shell_program,
        }
    }

    /// Run one cmdlet, returning its outcome and whether it hit an existing address.
    fn issue(&self, script: &str) -> (CommandOutcome, bool) {
        let spec = CommandSpec::shell(self.shell_program, script);
        debug!("Issuing: {}", script);

        match self.runner.run(&spec) {
            Ok(output) => {
                let outcome = classify(&output.stderr);
                if !outcome.is_success() {
                    debug!("{} -> {}", script, outcome.as_str());
                }
                (outcome, is_address_conflict(&output.stderr))
            }
            Err(e) => {
                warn!("Failed to issue {}: {}", script, e);
                (CommandOutcome::UnclassifiedFailure(e.to_string()), false)
            }
        }
    }

    fn execute(&self, script: &str) -> CommandOutcome {
        self.issue(script).0
    }

    /// Assign a static address and mask.
    ///
    /// When the address already exists on the adapter it is cleared and the
    /// assignment is retried exactly once.
    pub fn set_address_and_mask(&self, index: AdapterIndex, ip: &str, mask: &str) -> CommandOutcome {
        let (ip, mask) = (ip.trim(), mask.trim());

        if ip.is_empty() || mask.is_empty() || ip == UNSPECIFIED || mask == UNSPECIFIED {
            return invalid("Invalid configuration");
        }
        if !is_valid_ipv4(ip) {
            return invalid(format!("Invalid IP address: {}", ip));
        }
        if !is_valid_mask(mask) {
            return invalid(format!("Invalid subnet mask: {}", mask));
        }
        let prefix = match mask_to_prefix(mask) {
            Ok(prefix) => prefix,
            Err(e) => return invalid(e.to_string()),
        };

        let script = format!(
            "New-NetIPAddress -InterfaceIndex {} -IPAddress {} -PrefixLength {} -PolicyStore ActiveStore",
            index, ip, prefix
        );

        let (outcome, conflict) = self.issue(&script);
        if !conflict {
            return outcome;
        }

        info!("Address {} already exists on adapter {}, replacing it", ip, index);
        let cleared = self.clear_address(index);
        if !cleared.is_success_or_not_found() {
            return cleared;
        }
        self.execute(&script)
    }

    /// Remove the adapter's IPv4 addresses.
    pub fn clear_address(&self, index: AdapterIndex) -> CommandOutcome {
        self.execute(&format!(
            "Remove-NetIPAddress -InterfaceIndex {} -Confirm:$false",
            index
        ))
    }

    /// Add a default route through `ip`.
    pub fn set_default_gateway(&self, index: AdapterIndex, ip: &str) -> CommandOutcome {
        let ip = ip.trim();
        if ip.is_empty() || ip == UNSPECIFIED {
            return invalid("Invalid configuration");
        }
        if !is_valid_ipv4(ip) {
            return invalid(format!("Invalid default gateway: {}", ip));
        }

        self.execute(&format!(
            "New-NetRoute -InterfaceIndex {} -DestinationPrefix {} -NextHop {}",
            index, DEFAULT_ROUTE, ip
        ))
    }

    /// Remove the adapter's default route.
    pub fn clear_default_gateway(&self, index: AdapterIndex) -> CommandOutcome {
        self.execute(&format!(
            "Remove-NetRoute -InterfaceIndex {} -DestinationPrefix {} -Confirm:$false",
            index, DEFAULT_ROUTE
        ))
    }

    /// Set the preferred and alternate DNS servers.
    ///
    /// An alternate server given alone becomes the preferred one.
    pub fn set_dns_servers(&self, index: AdapterIndex, preferred: &str, alternate: &str) -> CommandOutcome {
        let (mut preferred, mut alternate) = (preferred.trim(), alternate.trim());

        if preferred == UNSPECIFIED || alternate == UNSPECIFIED {
            return invalid("Invalid configuration");
        }
        if preferred.is_empty() {
            preferred = alternate;
            alternate = "";
        }
        if preferred.is_empty() {
            return invalid("No DNS server given");
        }
        for server in [preferred, alternate].into_iter().filter(|s| !s.is_empty()) {
            if !is_valid_ipv4(server) {
                return invalid(format!("Invalid DNS server: {}", server));
            }
        }

        let servers = if alternate.is_empty() {
            preferred.to_string()
        } else {
            format!("{},{}", preferred, alternate)
        };

        self.execute(&format!(
            "Set-DnsClientServerAddress -InterfaceIndex {} -ServerAddresses {}",
            index, servers
        ))
    }

    /// Return DNS server selection to automatic.
    pub fn reset_dns_servers(&self, index: AdapterIndex) -> CommandOutcome {
        self.execute(&format!(
            "Set-DnsClientServerAddress -InterfaceIndex {} -ResetServerAddresses",
            index
        ))
    }

    /// Switch the adapter to DHCP.
    ///
    /// The default route is removed first; an adapter without one is not an
    /// error.
    pub fn enable_dhcp(&self, index: AdapterIndex) -> CommandOutcome {
        let cleared = self.clear_default_gateway(index);
        if !cleared.is_success_or_not_found() {
            return cleared;
        }

        self.execute(&format!(
            "Set-NetIPInterface -InterfaceIndex {} -DHCP Enabled",
            index
        ))
    }

    /// DHCP for both the address and the DNS servers.
    pub fn enable_dhcp_with_auto_dns(&self, index: AdapterIndex) -> CommandOutcome {
        let outcome = self.enable_dhcp(index);
        if !outcome.is_success() {
            return outcome;
        }
        self.reset_dns_servers(index)
    }

    pub fn enable_adapter(&self, index: AdapterIndex) -> CommandOutcome {
        self.execute(&format!(
            "Get-NetAdapter -InterfaceIndex {} | Enable-NetAdapter",
            index
        ))
    }

    pub fn disable_adapter(&self, index: AdapterIndex) -> CommandOutcome {
        self.execute(&format!(
            "Get-NetAdapter -InterfaceIndex {} | Disable-NetAdapter -Confirm:$false",
            index
        ))
    }

    /// Apply a saved profile to an adapter.
    ///
    /// `current_ip` is the address the adapter holds now; when it equals the
    /// profile's address it is removed first. Stops at the first step that
    /// does not succeed.
    pub fn apply_profile(
        &self,
        index: AdapterIndex,
        profile: &ConfigurationProfile,
        current_ip: &str,
    ) -> CommandOutcome {
        info!("Applying {} / {} to adapter {}", profile.ip, profile.mask, index);

        if !current_ip.is_empty() && current_ip == profile.ip {
            let cleared = self.clear_address(index);
            if !cleared.is_success_or_not_found() {
                return cleared;
            }
        }

        let outcome = self.set_address_and_mask(index, &profile.ip, &profile.mask);
        if !outcome.is_success() {
            return outcome;
        }

        if profile.has_gateway() {
            let cleared = self.clear_default_gateway(index);
            if !cleared.is_success_or_not_found() {
                return cleared;
            }
            let outcome = self.set_default_gateway(index, &profile.gateway);
            if !outcome.is_success() {
                return outcome;
            }
        }

        if profile.has_dns() {
            self.set_dns_servers(index, &profile.preferred_dns, &profile.alternate_dns)
        } else {
            self.reset_dns_servers(index)
        }
    }
}
