// NAT masquerade state via `iptables -t nat -S POSTROUTING`

use std::time::Duration;

use crate::command::CommandRunner;
use crate::models::NatStatus;

const IPTABLES_TIMEOUT: Duration = Duration::from_secs(3);

/// Scan the POSTROUTING dump for the first MASQUERADE rule. Blank lines and
/// `#` comments are skipped; no match means NAT is disabled.
pub fn parse_nat_postrouting(output: &str) -> (bool, String) {
    for raw_line in output.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains("MASQUERADE") {
            return (true, line.to_string());
        }
    }
    (false, String::new())
}

pub async fn collect_nat_status<R: CommandRunner>(runner: &R) -> NatStatus {
    let result = runner
        .run(&["iptables", "-t", "nat", "-S", "POSTROUTING"], IPTABLES_TIMEOUT)
        .await;
    let (enabled, rule) = parse_nat_postrouting(&result.stdout);
    let error = if result.exit_code == 0 {
        None
    } else {
        let stderr = result.stderr.trim();
        tracing::warn!(exit_code = result.exit_code, stderr, "iptables failed");
        Some(if stderr.is_empty() {
            "iptables failed".to_string()
        } else {
            stderr.to_string()
        })
    };

    NatStatus {
        enabled,
        rule,
        error,
    }
}
