// Journal collection and line classification

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::command::CommandRunner;
use crate::models::{LogEntry, LogKind};

const JOURNALCTL_TIMEOUT: Duration = Duration::from_secs(4);

// `<timestamp> <host> <unit>: <message>` as emitted by short-iso output.
static LOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+\S+\s+([^:]+):\s?(.*)$").unwrap());

/// Ordered substring rules, first match wins: a "failed" DHCPDISCOVER line
/// is DHCP, not SYSTEM.
pub fn classify(message: &str) -> LogKind {
    let msg = message.to_lowercase();
    if msg.contains("dhcpack") || msg.contains("discover") {
        LogKind::Dhcp
    } else if msg.contains("link is up") || msg.contains("link is down") {
        LogKind::Link
    } else if msg.contains("get /") || msg.contains("post /") {
        LogKind::Http
    } else if msg.contains("started") || msg.contains("failed") {
        LogKind::System
    } else {
        LogKind::Other
    }
}

// First whitespace-separated field and the rest of the line, leading
// whitespace stripped.
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(idx) => Some((&s[..idx], s[idx..].trim_start())),
        None => Some((s, "")),
    }
}

/// Parse journal output into entries. Lines that don't match the
/// `<ts> <host> <source>: <msg>` shape fall back to the first token as the
/// timestamp, `"journal"` as the source, and the third field onward (or the
/// whole line) as the message.
pub fn parse_journal(output: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();

    for raw_line in output.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (ts, source, msg) = match LOG_RE.captures(line) {
            Some(caps) => (
                caps[1].to_string(),
                caps[2].to_string(),
                caps[3].to_string(),
            ),
            None => {
                let (ts, rest) = split_field(line).unwrap_or(("", ""));
                let msg = match split_field(rest) {
                    Some((_, tail)) if !tail.is_empty() => tail,
                    _ => line,
                };
                (ts.to_string(), "journal".to_string(), msg.to_string())
            }
        };

        entries.push(LogEntry {
            ts,
            source,
            kind: classify(&msg),
            msg,
        });
    }

    entries
}

/// Request the last `limit` journal lines. A non-zero exit with captured
/// output is still parsed best-effort; with no output it yields an empty
/// list.
pub async fn collect_logs<R: CommandRunner>(runner: &R, limit: u32) -> Vec<LogEntry> {
    let limit_arg = limit.to_string();
    let result = runner
        .run(
            &["journalctl", "-n", &limit_arg, "--no-pager", "-o", "short-iso"],
            JOURNALCTL_TIMEOUT,
        )
        .await;

    if result.exit_code != 0 {
        tracing::debug!(exit_code = result.exit_code, "journalctl failed");
        if result.stdout.is_empty() {
            return Vec::new();
        }
    }
    parse_journal(&result.stdout)
}
