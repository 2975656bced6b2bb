// Shared test helpers: scripted command runners

use std::collections::HashMap;
use std::time::Duration;

use netobserver::command::{CommandOutput, CommandRunner};

pub fn output(stdout: &str, stderr: &str, exit_code: i32) -> CommandOutput {
    CommandOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
    }
}

/// Returns canned output per exact argv (joined with spaces); anything not
/// scripted fails with exit code 1.
pub struct FakeRunner {
    outputs: HashMap<String, CommandOutput>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
        }
    }

    pub fn with(mut self, argv: &str, out: CommandOutput) -> Self {
        self.outputs.insert(argv.to_string(), out);
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        argv: &[&str],
        _timeout: Duration,
    ) -> impl Future<Output = CommandOutput> + Send {
        let key = argv.join(" ");
        let out = self
            .outputs
            .get(&key)
            .cloned()
            .unwrap_or_else(|| output("", &format!("not scripted: {key}"), 1));
        std::future::ready(out)
    }
}

/// Every command fails the same way.
pub struct FailingRunner;

impl CommandRunner for FailingRunner {
    fn run(
        &self,
        _argv: &[&str],
        _timeout: Duration,
    ) -> impl Future<Output = CommandOutput> + Send {
        std::future::ready(output("", "failed", 1))
    }
}
