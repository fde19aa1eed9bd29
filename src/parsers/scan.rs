// Adapter Manager - Port Scan Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parser for the port scanner's normal output and the scan command builder.
//!
//! The scanner prints one block per host:
//!
//! ```text
//! Nmap scan report for router.lan (192.168.1.1)
//! Host is up (0.0020s latency).
//! PORT    STATE  SERVICE
//! 22/tcp  open   ssh
//! 80/tcp  open   http
//! MAC Address: A0:B1:C2:D3:E4:F5 (Acme Networks)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::validation::{is_valid_ipv4, validate_port_spec};
use crate::models::{AppConfig, Error, HostScanResult, PortResult, Protocol, Result, ScanReport};
use crate::runner::CommandSpec;

const HOST_MARKER: &str = "Nmap scan report for";
const PORT_RANGE_ERROR: &str = "Ports specified must be between";
const MAC_MARKER: &str = "MAC Address";

/// "0 hosts up" but not "10 hosts up".
static NO_HOSTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])0 hosts? up").expect("no-hosts pattern is valid"));

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}

/// Split the host header into `(ip, reverse-DNS label)`.
fn parse_host_header(header: &str) -> (String, Option<String>) {
    let header = header.trim();
    match header.split_once(' ') {
        Some((label, rest)) if rest.trim().starts_with('(') => {
            let ip = rest.trim().trim_start_matches('(').trim_end_matches(')');
            (ip.to_string(), Some(label.to_string()))
        }
        _ => (header.to_string(), None),
    }
}

/// Apply a `MAC Address:` line to the host entries already collected.
fn apply_mac_line(report: &mut ScanReport, ip: &str, label: Option<&str>, line: &str) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(mac) = tokens.get(2) else {
        return;
    };
    let mac = mac.replace(':', "-");

    let vendor = tokens[3..].join(" ");
    let vendor = vendor.trim_start_matches('(').trim_end_matches(')');
    let device = match label {
        Some(label) => format!("{} ({})", vendor, label),
        None => vendor.to_string(),
    };

    for protocol in [Protocol::Tcp, Protocol::Udp] {
        if let Some(host) = report.hosts_mut(protocol).get_mut(ip) {
            host.mac = Some(mac.clone());
            host.device_label = if device.is_empty() {
                None
            } else {
                Some(device.clone())
            };
        }
    }
}

/// Parse captured scanner output into per-protocol host results.
///
/// Diagnostics are checked before any parsing: an out-of-range port list is
/// a validation error, a scan that found no live host is `NoHostsUp`, any
/// other diagnostic text is unclassified, and empty output is `EmptyOutput`.
pub fn parse_scan(stdout: &str, stderr: &str) -> Result<ScanReport> {
    if stderr.contains(PORT_RANGE_ERROR) {
        return Err(Error::validation(first_line(stderr)));
    }
    if NO_HOSTS_RE.is_match(stdout) || NO_HOSTS_RE.is_match(stderr) {
        return Err(Error::NoHostsUp);
    }
    if !stderr.trim().is_empty() {
        return Err(Error::Unclassified(first_line(stderr)));
    }
    if stdout.trim().is_empty() {
        return Err(Error::EmptyOutput);
    }

    let mut report = ScanReport::new();

    for block in stdout.split(HOST_MARKER).skip(1) {
        let mut lines = block.lines();
        let (ip, label) = parse_host_header(lines.next().unwrap_or_default());
        let mut in_table = false;

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if !in_table {
                in_table = line.starts_with("PORT");
                continue;
            }

            if line.contains(MAC_MARKER) {
                apply_mac_line(&mut report, &ip, label.as_deref(), line);
                break;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let (port, state) = match tokens.as_slice() {
                [port, state, ..] => (*port, *state),
                _ => continue,
            };
            let Some(protocol) = Protocol::from_port_token(port) else {
                continue;
            };

            report
                .hosts_mut(protocol)
                .entry(ip.clone())
                .or_insert_with(|| HostScanResult::new(ip.clone(), label.clone()))
                .services
                .push(PortResult {
                    port: port.to_string(),
                    state: state.to_string(),
                    service: tokens.get(2).map(|s| s.to_string()).unwrap_or_default(),
                });
        }
    }

    debug!(
        "Parsed scan: {} TCP hosts, {} UDP hosts",
        report.tcp.len(),
        report.udp.len()
    );
    Ok(report)
}

/// Extract the version from `nmap --version` output.
pub fn parse_nmap_version(stdout: &str) -> Option<String> {
    stdout
        .split(' ')
        .nth(2)
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
}

/// A port scan to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Address or `address/prefix` network.
    pub target: String,
    /// Port list such as `22,80` or `1-1024`.
    pub ports: String,
    pub tcp: bool,
    pub udp: bool,
}

impl ScanRequest {
    /// TCP scan of `target` on `ports`.
    pub fn new(target: impl Into<String>, ports: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ports: ports.into(),
            tcp: true,
            udp: false,
        }
    }

    pub fn with_udp(mut self, udp: bool) -> Self {
        self.udp = udp;
        self
    }

    fn validate_target(&self) -> Result<()> {
        let (ip, prefix) = match self.target.split_once('/') {
            Some((ip, prefix)) => (ip, Some(prefix)),
            None => (self.target.as_str(), None),
        };

        if !is_valid_ipv4(ip) {
            return Err(Error::validation(format!("Invalid IP address: {}", ip)));
        }
        if let Some(prefix) = prefix {
            match prefix.parse::<u32>() {
                Ok(bits) if (1..=32).contains(&bits) => {}
                _ => return Err(Error::validation(format!("Invalid netmask: /{}", prefix))),
            }
        }
        Ok(())
    }

    /// Build the scanner command after validating target and ports.
    pub fn command(&self, config: &AppConfig) -> Result<CommandSpec> {
        self.validate_target()?;
        let ports = validate_port_spec(&self.ports)?;

        let mut spec = CommandSpec::new(&config.scan_program).args(["-p", ports]);
        if self.tcp {
            spec = spec.arg("-sS");
        }
        if self.udp {
            spec = spec.arg("-sU");
        }
        Ok(spec.arg(&self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_HOSTS: &str = "Starting Nmap 7.94 ( https://nmap.org ) at 2026-10-17 10:00\r\n\
Nmap scan report for router.lan (192.168.1.1)\r\n\
Host is up (0.0020s latency).\r\n\
Not shown: 998 closed tcp ports (reset)\r\n\
PORT    STATE         SERVICE\r\n\
22/tcp  open          ssh\r\n\
53/udp  open|filtered domain\r\n\
MAC Address: A0:B1:C2:D3:E4:F5 (Acme Networks)\r\n\
\r\n\
Nmap scan report for 192.168.1.20\r\n\
Host is up (0.0050s latency).\r\n\
PORT     STATE SERVICE\r\n\
8080/tcp open  http-proxy\r\n\
161/udp  open\r\n\
MAC Address: 00:11:22:33:44:55 (Unknown)\r\n\
\r\n\
Nmap done: 256 IP addresses (2 hosts up) scanned in 12.34 seconds\r\n";

    #[test]
    fn test_two_hosts_split_by_protocol() {
        let report = parse_scan(TWO_HOSTS, "").unwrap();

        assert_eq!(report.tcp.len(), 2);
        assert_eq!(report.udp.len(), 2);

        let router = &report.tcp["192.168.1.1"];
        assert_eq!(router.services[0].port, "22/tcp");
        assert_eq!(router.services[0].service, "ssh");
        assert_eq!(router.mac.as_deref(), Some("A0-B1-C2-D3-E4-F5"));
        assert_eq!(router.device_label.as_deref(), Some("Acme Networks (router.lan)"));

        let router_udp = &report.udp["192.168.1.1"];
        assert_eq!(router_udp.services[0].state, "open|filtered");
        assert_eq!(router_udp.mac.as_deref(), Some("A0-B1-C2-D3-E4-F5"));

        let other = &report.udp["192.168.1.20"];
        assert_eq!(other.services[0].service, "");
        assert_eq!(other.device_label.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_host_only_in_protocols_with_ports() {
        let stdout = "Nmap scan report for 10.0.0.1\n\
PORT   STATE SERVICE\n\
22/tcp open  ssh\n\
\n\
Nmap scan report for 10.0.0.2\n\
PORT    STATE SERVICE\n\
161/udp open  snmp\n\
\n\
Nmap done: 2 IP addresses (2 hosts up)\n";
        let report = parse_scan(stdout, "").unwrap();

        assert_eq!(report.tcp.len(), 1);
        assert_eq!(report.udp.len(), 1);
        assert!(report.tcp.contains_key("10.0.0.1"));
        assert!(report.udp.contains_key("10.0.0.2"));
        assert!(!report.tcp.contains_key("10.0.0.2"));
        assert!(!report.udp.contains_key("10.0.0.1"));
    }

    #[test]
    fn test_no_hosts_up_from_stderr() {
        let result = parse_scan("", "Note: Host seems down.\r\n0 hosts up\r\n");
        assert!(matches!(result, Err(Error::NoHostsUp)));
    }

    #[test]
    fn test_no_hosts_up_from_stdout() {
        let stdout = "Nmap done: 256 IP addresses (0 hosts up) scanned in 5.1 seconds\r\n";
        assert!(matches!(parse_scan(stdout, ""), Err(Error::NoHostsUp)));
    }

    #[test]
    fn test_ten_hosts_up_is_not_zero() {
        let stdout = "Nmap done: 256 IP addresses (10 hosts up) scanned in 5.1 seconds\r\n";
        let report = parse_scan(stdout, "").unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_diagnostics_precedence() {
        let err = parse_scan("", "Ports specified must be between 0 and 65535 inclusive\r\nQUITTING!\r\n");
        assert!(matches!(err, Err(Error::ValidationFailed(ref m)) if m.ends_with("inclusive")));

        let err = parse_scan("", "Failed to resolve \"nohost\".\r\nmore\r\n");
        assert!(matches!(err, Err(Error::Unclassified(ref m)) if m == "Failed to resolve \"nohost\"."));

        assert!(matches!(parse_scan("  \r\n", ""), Err(Error::EmptyOutput)));
    }

    #[test]
    fn test_host_without_mac_line() {
        let stdout = "Nmap scan report for 10.0.0.5\nPORT   STATE SERVICE\n443/tcp open https\n\nNmap done: 1 IP address (1 host up)\n";
        let report = parse_scan(stdout, "").unwrap();
        let host = &report.tcp["10.0.0.5"];
        assert_eq!(host.services.len(), 1);
        assert!(host.mac.is_none());
        assert!(host.device_label.is_none());
    }

    #[test]
    fn test_nmap_version() {
        assert_eq!(
            parse_nmap_version("Nmap version 7.94 ( https://nmap.org )\r\n").as_deref(),
            Some("7.94")
        );
        assert_eq!(parse_nmap_version(""), None);
    }

    #[test]
    fn test_scan_request_command() {
        let config = AppConfig::default();
        let spec = ScanRequest::new("192.168.1.0/24", "22,80")
            .with_udp(true)
            .command(&config)
            .unwrap();
        assert_eq!(spec.program, "nmap");
        assert_eq!(spec.args, vec!["-p", "22,80", "-sS", "-sU", "192.168.1.0/24"]);
    }

    #[test]
    fn test_scan_request_rejects_bad_input() {
        let config = AppConfig::default();
        assert!(ScanRequest::new("192.168.1.300", "22").command(&config).is_err());
        assert!(ScanRequest::new("192.168.1.0/33", "22").command(&config).is_err());
        assert!(ScanRequest::new("192.168.1.1", "ssh").command(&config).is_err());
    }
}
