// DHCP lease file parsing: ISC dhcpd blocks and dnsmasq line format

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::models::DhcpLease;

/// Probed in order when the configured path is "auto" (or empty).
const CANDIDATE_PATHS: &[&str] = &[
    "/var/lib/dhcp/dhcpd.leases",
    "/var/lib/misc/dnsmasq.leases",
];

static LEASE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)lease\s+(\S+)\s+\{(.*?)\}").unwrap());
static MAC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hardware ethernet\s+([0-9a-fA-F:]+);").unwrap());
static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"client-hostname\s+"([^"]+)";"#).unwrap());
static STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"binding state\s+(\w+);").unwrap());
// The leading digit is the day-of-week dhcpd writes before the date.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\d+\s+)?(\d{4}/\d{2}/\d{2}\s+\d{2}:\d{2}:\d{2})").unwrap());
static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(starts|ends|cltt)\s+([^;]+);").unwrap());

/// Decide which lease file to read. An explicit path is used only if it
/// exists; "auto" probes the well-known candidates in order.
pub fn resolve_lease_path(configured: &str) -> Option<PathBuf> {
    if !configured.is_empty() && configured != "auto" {
        let path = PathBuf::from(configured);
        return path.exists().then_some(path);
    }

    CANDIDATE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

fn parse_lease_time(raw: &str) -> Option<NaiveDateTime> {
    let caps = TIME_RE.captures(raw)?;
    NaiveDateTime::parse_from_str(&caps[1], "%Y/%m/%d %H:%M:%S").ok()
}

/// The newest of the block's `starts`/`ends`/`cltt` timestamps, considering
/// only the first occurrence of each clause. A block with no parsable
/// timestamp sorts as oldest.
fn block_timestamp(body: &str) -> Option<NaiveDateTime> {
    let mut starts = None;
    let mut ends = None;
    let mut cltt = None;
    for caps in CLAUSE_RE.captures_iter(body) {
        let slot = match &caps[1] {
            "starts" => &mut starts,
            "ends" => &mut ends,
            "cltt" => &mut cltt,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(caps[2].to_string());
        }
    }

    [starts, ends, cltt]
        .into_iter()
        .flatten()
        .filter_map(|raw| parse_lease_time(&raw))
        .max()
}

/// Parse an ISC dhcpd lease file. Blocks are processed in file order; for a
/// duplicated IP the block with the newest timestamp wins, with `>=` so the
/// later block takes ties. The result is sorted newest-first.
pub fn parse_isc_leases(content: &str) -> Vec<DhcpLease> {
    let mut deduped: Vec<(NaiveDateTime, DhcpLease)> = Vec::new();

    for caps in LEASE_BLOCK_RE.captures_iter(content) {
        let ip = caps[1].to_string();
        let body = &caps[2];

        let mac = MAC_RE
            .captures(body)
            .map(|m| m[1].to_lowercase())
            .unwrap_or_default();
        let hostname = HOST_RE
            .captures(body)
            .map(|m| m[1].to_string())
            .unwrap_or_default();
        let state = STATE_RE
            .captures(body)
            .map(|m| m[1].to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let ts = block_timestamp(body);
        let last_seen = ts
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        let ts = ts.unwrap_or(NaiveDateTime::MIN);

        let lease = DhcpLease {
            ip: ip.clone(),
            mac,
            hostname,
            state,
            last_seen,
        };

        match deduped.iter().position(|(_, l)| l.ip == ip) {
            Some(idx) if ts >= deduped[idx].0 => deduped[idx] = (ts, lease),
            Some(_) => {}
            None => deduped.push((ts, lease)),
        }
    }

    deduped.sort_by(|a, b| b.0.cmp(&a.0));
    deduped.into_iter().map(|(_, lease)| lease).collect()
}

/// Parse a dnsmasq lease file: one lease per line,
/// `<epoch> <mac> <ip> <hostname> <client-id>`. Every lease is "active"
/// (the format has no state column). Sorted by the formatted `last_seen`
/// string descending; the fixed-width format makes that chronological.
pub fn parse_dnsmasq_leases(content: &str) -> Vec<DhcpLease> {
    let mut leases = Vec::new();

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }

        let last_seen = fields[0]
            .parse::<i64>()
            .ok()
            .and_then(|epoch| chrono::DateTime::from_timestamp(epoch, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        let hostname = if fields[3] == "*" { "" } else { fields[3] };

        leases.push(DhcpLease {
            ip: fields[2].to_string(),
            mac: fields[1].to_lowercase(),
            hostname: hostname.to_string(),
            state: "active".to_string(),
            last_seen,
        });
    }

    leases.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    leases
}

fn parse_lease_file(path: &Path, content: &str) -> Vec<DhcpLease> {
    if path.file_name().is_some_and(|n| n == "dnsmasq.leases") {
        parse_dnsmasq_leases(content)
    } else {
        parse_isc_leases(content)
    }
}

/// Resolve and read the lease file. A missing or unreadable file is an
/// empty list, never an error.
pub async fn collect_dhcp_leases(configured: &str) -> Vec<DhcpLease> {
    let Some(path) = resolve_lease_path(configured) else {
        tracing::debug!(configured, "no lease file found");
        return Vec::new();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            parse_lease_file(&path, &content)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "lease file unreadable");
            Vec::new()
        }
    }
}
