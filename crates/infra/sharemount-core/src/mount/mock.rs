use super::executor::{CommandExecutor, ExitResult};
use crate::error::{Result, ShareMountError};
use crate::platform::{MKDIR_CMD, MOUNT_CMD, OPEN_CMD};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

struct Rule {
    program: String,
    needle: String,
    result: ExitResult,
}

#[derive(Default)]
struct MockState {
    mount_table: String,
    table_unavailable: bool,
    create_dirs: bool,
    rules: Vec<Rule>,
    missing_programs: Vec<String>,
    calls: Vec<Invocation>,
}

/// Mock executor for testing.
///
/// `mount` without arguments prints the in-memory mount table. A
/// successful `mount ...` or `open ...` appends its arguments to that
/// table, so a second run sees the share as attached.
#[derive(Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<MockState>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount_table(self, table: &str) -> Self {
        self.state.lock().unwrap().mount_table = table.to_string();
        self
    }

    pub fn set_mount_table(&self, table: &str) {
        self.state.lock().unwrap().mount_table = table.to_string();
    }

    /// Make the mount-table query exit non-zero
    pub fn with_table_unavailable(self) -> Self {
        self.state.lock().unwrap().table_unavailable = true;
        self
    }

    /// Actually create directories when `mkdir` is invoked
    pub fn with_real_mkdir(self) -> Self {
        self.state.lock().unwrap().create_dirs = true;
        self
    }

    /// Fail invocations of `program` whose arguments contain `needle`
    pub fn fail_when(self, program: &str, needle: &str, code: i32, stderr: &str) -> Self {
        self.state.lock().unwrap().rules.push(Rule {
            program: program.to_string(),
            needle: needle.to_string(),
            result: ExitResult::failure(code, stderr),
        });
        self
    }

    /// Make spawning `program` fail as if it were not installed
    pub fn without_program(self, program: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .missing_programs
            .push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Invocations other than mount-table queries
    pub fn actions(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| !(c.program == MOUNT_CMD && c.args.is_empty()))
            .collect()
    }

    pub fn mount_table(&self) -> String {
        self.state.lock().unwrap().mount_table.clone()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExitResult> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });

        if state.missing_programs.iter().any(|p| p == program) {
            return Err(ShareMountError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            });
        }

        if program == MOUNT_CMD && args.is_empty() {
            if state.table_unavailable {
                return Ok(ExitResult::failure(1, "mount: table unavailable"));
            }
            return Ok(ExitResult::success().with_stdout(state.mount_table.clone()));
        }

        if let Some(rule) = state
            .rules
            .iter()
            .find(|r| r.program == program && args.iter().any(|a| a.contains(&r.needle)))
        {
            return Ok(rule.result.clone());
        }

        if state.create_dirs
            && let Some(pos) = args.iter().position(|a| a == MKDIR_CMD)
        {
            for dir in args[pos + 1..].iter().filter(|a| !a.starts_with('-')) {
                std::fs::create_dir_all(dir)?;
            }
        }

        if program == MOUNT_CMD || program == OPEN_CMD {
            let line = args.join(" ");
            state.mount_table.push_str(&line);
            state.mount_table.push('\n');
        }

        Ok(ExitResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_mock_executor() {
        let executor = MockExecutor::new().with_mount_table("/dev/disk1s1 on / (apfs)\n");

        let table = executor.execute("mount", &[]).await.unwrap();
        assert!(table.stdout.contains("/dev/disk1s1"));

        // Successful mounts show up in the table
        executor
            .execute("mount", &strings(&["-t", "nfs", "h:/x", "/Volumes/x"]))
            .await
            .unwrap();
        assert!(executor.mount_table().contains("/Volumes/x"));
        assert_eq!(executor.actions().len(), 1);
        assert_eq!(executor.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_rules() {
        let executor = MockExecutor::new()
            .fail_when("sudo", "chown", 1, "chown: denied")
            .without_program("open");

        let ok = executor
            .execute("sudo", &strings(&["mkdir", "-p", "/nowhere"]))
            .await
            .unwrap();
        assert!(ok.is_success());

        let failed = executor
            .execute("sudo", &strings(&["chown", "a:b", "/nowhere"]))
            .await
            .unwrap();
        assert_eq!(failed.code, Some(1));

        assert!(executor.execute("open", &[]).await.is_err());
    }
}
