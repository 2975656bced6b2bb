// External command execution with a hard timeout; failures become data

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Captured result of one external command. `exit_code` is non-zero for
/// spawn failures and timeouts as well, with the reason in `stderr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn failure(stderr: String) -> Self {
        Self {
            stdout: String::new(),
            stderr,
            exit_code: 1,
        }
    }
}

/// Seam for collectors: production uses [`SystemRunner`], tests script
/// canned outputs per argv.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[&str], timeout: Duration)
    -> impl Future<Output = CommandOutput> + Send;
}

/// Runs commands on the host. Stateless; cheap to share behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        argv: &[&str],
        timeout: Duration,
    ) -> impl Future<Output = CommandOutput> + Send {
        let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
        async move { run_command(&argv, timeout).await }
    }
}

/// Spawns `argv` and waits up to `timeout` for it to finish. Never errors:
/// spawn failure and timeout are reported through the exit code, and output
/// is decoded lossily.
pub async fn run_command(argv: &[String], timeout: Duration) -> CommandOutput {
    let Some((program, args)) = argv.split_first() else {
        return CommandOutput::failure("empty command".to_string());
    };

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(c) => c,
        Err(e) => return CommandOutput::failure(format!("{program}: {e}")),
    };

    // kill_on_drop reaps the child when the timeout wins the race.
    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        },
        Ok(Err(e)) => CommandOutput::failure(format!("{program}: {e}")),
        Err(_) => CommandOutput::failure(format!(
            "{program}: timed out after {}s",
            timeout.as_secs()
        )),
    }
}
