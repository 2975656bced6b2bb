// Ping probe parsing tests

mod common;

use common::{FailingRunner, FakeRunner, output};
use netobserver::collectors::connectivity::{
    collect_connectivity, parse_ping_output, ping_target,
};

const PING_OK: &str = "\
PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=118 time=23.4 ms

--- 8.8.8.8 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
rtt min/avg/max/mdev = 23.412/23.412/23.412/0.000 ms
";

#[test]
fn test_parse_ping_output_success_with_rtt() {
    let probe = parse_ping_output(PING_OK, "", 0);
    assert!(probe.ok);
    assert_eq!(probe.rtt_ms, Some(23.4));
    assert_eq!(probe.error, None);
}

#[test]
fn test_parse_ping_output_sub_millisecond_form() {
    let out = "64 bytes from 192.168.1.1: icmp_seq=1 ttl=64 time<1 ms\n1 received\n";
    let probe = parse_ping_output(out, "", 0);
    assert!(probe.ok);
    assert_eq!(probe.rtt_ms, Some(1.0));
}

#[test]
fn test_parse_ping_output_nonzero_exit_is_failure() {
    let probe = parse_ping_output(PING_OK, "", 1);
    assert!(!probe.ok);
}

#[test]
fn test_parse_ping_output_exit_zero_without_markers_is_failure() {
    let probe = parse_ping_output("something unexpected\n", "", 0);
    assert!(!probe.ok);
    assert_eq!(probe.error.as_deref(), Some("something unexpected"));
}

#[test]
fn test_parse_ping_output_error_prefers_stderr() {
    let probe = parse_ping_output("", "ping: unknown host nope.invalid\n", 2);
    assert_eq!(probe.error.as_deref(), Some("ping: unknown host nope.invalid"));
}

#[test]
fn test_parse_ping_output_error_falls_back_to_last_stdout_line() {
    let out = "PING 10.0.0.9 (10.0.0.9) 56(84) bytes of data.\n\
               1 packets transmitted, 0 received, 100% packet loss, time 0ms\n\n";
    let probe = parse_ping_output(out, "", 1);
    assert_eq!(
        probe.error.as_deref(),
        Some("1 packets transmitted, 0 received, 100% packet loss, time 0ms")
    );
}

#[test]
fn test_parse_ping_output_error_literal_when_silent() {
    let probe = parse_ping_output("", "", 1);
    assert_eq!(probe.error.as_deref(), Some("ping failed"));
    assert_eq!(probe.rtt_ms, None);
}

#[tokio::test]
async fn test_ping_target_sets_target() {
    let runner = FakeRunner::new().with("ping -c 1 -W 1 8.8.8.8", output(PING_OK, "", 0));
    let probe = ping_target(&runner, "8.8.8.8").await;
    assert_eq!(probe.target, "8.8.8.8");
    assert!(probe.ok);
    assert_eq!(probe.rtt_ms, Some(23.4));
}

#[tokio::test]
async fn test_collect_connectivity_probes_both_targets() {
    let runner = FakeRunner::new()
        .with("ping -c 1 -W 1 1.1.1.1", output(PING_OK, "", 0))
        .with("ping -c 1 -W 1 example.org", output("", "name resolution failed", 2));
    let result = collect_connectivity(&runner, "1.1.1.1", "example.org").await;
    assert!(result.ip.ok);
    assert!(!result.dns.ok);
    assert_eq!(result.dns.error.as_deref(), Some("name resolution failed"));
}

#[tokio::test]
async fn test_collect_connectivity_all_failing() {
    let result = collect_connectivity(&FailingRunner, "8.8.8.8", "google.com").await;
    assert!(!result.ip.ok);
    assert!(!result.dns.ok);
    assert_eq!(result.ip.target, "8.8.8.8");
    assert_eq!(result.dns.target, "google.com");
}
