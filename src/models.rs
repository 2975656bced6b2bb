// Wire-contract records (field names frozen for existing JSON consumers)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of `ip -br addr` output. An interface that was asked for but not
/// listed is reported as UNKNOWN instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    pub state: String,
    pub ip: Option<String>,
}

impl InterfaceRecord {
    /// Placeholder for an interface name missing from the listing.
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: "UNKNOWN".to_string(),
            ip: None,
        }
    }
}

/// The first `default ...` line of `ip route`, kept verbatim in `raw` with
/// `via`/`dev` pulled out when present. Serializes as `{}` when no default
/// route exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatStatus {
    pub enabled: bool,
    pub rule: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityProbe {
    pub target: String,
    pub ok: bool,
    pub rtt_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityResult {
    pub ip: ConnectivityProbe,
    pub dns: ConnectivityProbe,
}

/// One DHCP lease, normalized across the ISC dhcpd and dnsmasq file formats.
/// `mac` is lowercase and empty when unknown; `last_seen` is a
/// `YYYY-MM-DD HH:MM:SS` string or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpLease {
    pub ip: String,
    pub mac: String,
    pub hostname: String,
    pub state: String,
    pub last_seen: String,
}

/// Journal line category; serializes uppercase (e.g. "DHCP").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogKind {
    Dhcp,
    Link,
    Http,
    System,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub ts: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub msg: String,
}

/// The wan/lan records plus every parsed interface keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSet {
    pub wan: InterfaceRecord,
    pub lan: InterfaceRecord,
    pub all: BTreeMap<String, InterfaceRecord>,
}

/// Interfaces, default route and any command errors from one collection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStatus {
    pub interfaces: InterfaceSet,
    pub default_route: DefaultRoute,
    pub errors: Vec<String>,
}

/// The full /api/status document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub interfaces: InterfaceSet,
    pub default_route: DefaultRoute,
    pub nat: NatStatus,
    pub connectivity: ConnectivityResult,
    pub errors: Vec<String>,
    pub generated_at: String,
}
