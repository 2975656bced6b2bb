// Reachability probes via single-packet ping

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::command::CommandRunner;
use crate::models::{ConnectivityProbe, ConnectivityResult};

const PING_TIMEOUT: Duration = Duration::from_secs(3);

// `time<1 ms` shows up for sub-millisecond replies.
static RTT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time[=<]([\d.]+)\s*ms").unwrap());

/// Decide success and extract the round-trip time from raw ping output.
///
/// Different ping versions and locales emit different subsets of the three
/// stdout markers, so any one of them counts.
pub fn parse_ping_output(stdout: &str, stderr: &str, exit_code: i32) -> ConnectivityProbe {
    let rtt_ms = RTT_RE
        .captures(stdout)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    let ok = exit_code == 0
        && (stdout.contains("bytes from")
            || stdout.contains("1 received")
            || stdout.contains("0% packet loss"));

    let error = if ok {
        None
    } else {
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            Some(stderr.to_string())
        } else {
            let last_line = stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .next_back();
            Some(last_line.unwrap_or("ping failed").to_string())
        }
    };

    ConnectivityProbe {
        target: String::new(),
        ok,
        rtt_ms,
        error,
    }
}

/// One `ping -c 1 -W 1 <target>` with an overall command timeout.
pub async fn ping_target<R: CommandRunner>(runner: &R, target: &str) -> ConnectivityProbe {
    let result = runner
        .run(&["ping", "-c", "1", "-W", "1", target], PING_TIMEOUT)
        .await;
    let mut probe = parse_ping_output(&result.stdout, &result.stderr, result.exit_code);
    probe.target = target.to_string();
    if !probe.ok {
        tracing::debug!(target, error = ?probe.error, "ping probe failed");
    }
    probe
}

/// Probe the raw-IP target and the DNS-name target in sequence.
pub async fn collect_connectivity<R: CommandRunner>(
    runner: &R,
    ping_ip: &str,
    ping_dns: &str,
) -> ConnectivityResult {
    ConnectivityResult {
        ip: ping_target(runner, ping_ip).await,
        dns: ping_target(runner, ping_dns).await,
    }
}
