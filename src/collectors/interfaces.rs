// Interface and default-route state via `ip`

use std::collections::BTreeMap;
use std::time::Duration;

use crate::command::CommandRunner;
use crate::models::{DefaultRoute, InterfaceRecord, InterfaceSet, InterfaceStatus};

const IP_TIMEOUT: Duration = Duration::from_secs(3);

/// Parse `ip -br addr` output into records keyed by interface name.
///
/// Each non-blank line is `<name> <state> [addr/prefix ...]`. The first
/// address token containing `/` but not `:` is taken as the IPv4 (the colon
/// check skips IPv6 tokens); lines with fewer than two tokens are skipped.
pub fn parse_ip_brief(output: &str) -> BTreeMap<String, InterfaceRecord> {
    let mut interfaces = BTreeMap::new();

    for raw_line in output.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let name = parts[0];
        let state = parts[1];
        let ipv4 = parts[2..]
            .iter()
            .copied()
            .find(|token| token.contains('/') && !token.contains(':'))
            .and_then(|token| token.split_once('/'))
            .map(|(addr, _)| addr.to_string());

        interfaces.insert(
            name.to_string(),
            InterfaceRecord {
                name: name.to_string(),
                state: state.to_string(),
                ip: ipv4,
            },
        );
    }

    interfaces
}

/// Parse `ip route` output: the first line starting with `default ` wins.
/// No matching line is not an error, just an empty route.
pub fn parse_default_route(output: &str) -> DefaultRoute {
    for raw_line in output.lines() {
        let line = raw_line.trim();
        if !line.starts_with("default ") {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut route = DefaultRoute {
            raw: Some(line.to_string()),
            via: None,
            dev: None,
        };
        if let Some(idx) = tokens.iter().position(|t| *t == "via") {
            route.via = tokens.get(idx + 1).map(|t| t.to_string());
        }
        if let Some(idx) = tokens.iter().position(|t| *t == "dev") {
            route.dev = tokens.get(idx + 1).map(|t| t.to_string());
        }
        return route;
    }

    DefaultRoute::default()
}

/// Run `ip -br addr` and `ip route`, parse both, and look up the configured
/// WAN/LAN interfaces. Command failures land in `errors`; a missing
/// interface name degrades to an UNKNOWN record.
pub async fn collect_interface_status<R: CommandRunner>(
    runner: &R,
    wan_if: &str,
    lan_if: &str,
) -> InterfaceStatus {
    let mut errors = Vec::new();
    let addr_result = runner.run(&["ip", "-br", "addr"], IP_TIMEOUT).await;
    let route_result = runner.run(&["ip", "route"], IP_TIMEOUT).await;

    if addr_result.exit_code != 0 {
        let stderr = addr_result.stderr.trim();
        errors.push(if stderr.is_empty() {
            "ip -br addr failed".to_string()
        } else {
            stderr.to_string()
        });
    }
    if route_result.exit_code != 0 {
        let stderr = route_result.stderr.trim();
        errors.push(if stderr.is_empty() {
            "ip route failed".to_string()
        } else {
            stderr.to_string()
        });
    }

    let all = parse_ip_brief(&addr_result.stdout);
    let wan = all
        .get(wan_if)
        .cloned()
        .unwrap_or_else(|| InterfaceRecord::unknown(wan_if));
    let lan = all
        .get(lan_if)
        .cloned()
        .unwrap_or_else(|| InterfaceRecord::unknown(lan_if));

    if !errors.is_empty() {
        tracing::warn!(errors = ?errors, "interface collection degraded");
    }

    InterfaceStatus {
        interfaces: InterfaceSet { wan, lan, all },
        default_route: parse_default_route(&route_result.stdout),
        errors,
    }
}
