//! Async executor for JXA scripts
//!
//! [`ScriptRunner`] is the seam between the tools and OmniFocus. The real
//! runner pipes a [`Script`] into `osascript -l JavaScript`; tests swap in a
//! runner that returns canned output.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{BridgeError, BridgeResult};
use super::script::Script;

/// Something that can run a JXA program and return what it printed
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run the script and return its trimmed stdout
    async fn run(&self, script: &Script) -> BridgeResult<String>;
}

/// Run a script and parse its output as JSON
pub async fn run_json<T: DeserializeOwned>(
    runner: &dyn ScriptRunner,
    script: &Script,
) -> BridgeResult<T> {
    let output = runner.run(script).await?;
    serde_json::from_str(&output).map_err(|e| {
        error!(
            script = script.name(),
            bytes = output.len(),
            output = %excerpt(&output),
            "unexpected script output"
        );
        BridgeError::Parse(e)
    })
}

/// Characters of unparseable output kept in the log
const LOGGED_OUTPUT_CHARS: usize = 200;

/// Leading part of `output`, cut on a char boundary
fn excerpt(output: &str) -> &str {
    match output.char_indices().nth(LOGGED_OUTPUT_CHARS) {
        Some((end, _)) => &output[..end],
        None => output,
    }
}

/// Runs scripts through the `osascript` binary
#[derive(Debug, Clone)]
pub struct Osascript {
    program: String,
    timeout: Duration,
}

impl Osascript {
    pub fn new(program: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new("osascript", 120)
    }
}

#[async_trait]
impl ScriptRunner for Osascript {
    #[instrument(skip(self, script), fields(script = script.name(), program = %self.program))]
    async fn run(&self, script: &Script) -> BridgeResult<String> {
        debug!(bytes = script.source().len(), "executing script");

        let mut child = Command::new(&self.program)
            .args(["-l", "JavaScript"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BridgeError::NotFound
                } else {
                    BridgeError::Spawn(e)
                }
            })?;

        let stdin = child.stdin.take();
        let source = script.source().as_bytes();

        let finished = tokio::time::timeout(self.timeout, async move {
            if let Some(mut stdin) = stdin {
                let written = async {
                    stdin.write_all(source).await?;
                    stdin.shutdown().await
                }
                .await;
                match written {
                    // Exited without reading everything; status and stderr say why
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        debug!("osascript closed stdin early");
                    }
                    other => other?,
                }
            }
            child.wait_with_output().await
        })
        .await;

        let output = match finished {
            Ok(result) => result?,
            Err(_elapsed) => {
                // The child is dropped with the future and killed
                let secs = self.timeout.as_secs();
                error!(secs, "script timed out");
                return Err(BridgeError::Timeout(secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            error!(code, stderr = %stderr, "osascript failed");
            return Err(BridgeError::CommandFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeRunner;
    use super::*;
    use serde_json::{json, Value};

    fn script() -> Script {
        Script::omnijs("echo", "(args) => args", &json!({})).unwrap()
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let runner = Osascript::new("/nonexistent/osascript-for-tests", 5);
        let err = runner.run(&script()).await.unwrap_err();
        assert!(matches!(err, BridgeError::NotFound), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-osascript");
        std::fs::write(&path, "#!/bin/sh\ncat >/dev/null\necho '  {\"ok\":true}  '\n").unwrap();
        make_executable(&path);

        let runner = Osascript::new(path.to_string_lossy(), 5);
        let out = runner.run(&script()).await.unwrap();
        assert_eq!(out, "{\"ok\":true}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-osascript");
        std::fs::write(&path, "#!/bin/sh\ncat >/dev/null\necho 'boom' >&2\nexit 3\n").unwrap();
        make_executable(&path);

        let runner = Osascript::new(path.to_string_lossy(), 5);
        match runner.run(&script()).await.unwrap_err() {
            BridgeError::CommandFailed { code, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_early_exit_reports_stderr_not_broken_pipe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-osascript");
        std::fs::write(&path, "#!/bin/sh\necho 'syntax error' >&2\nexit 4\n").unwrap();
        make_executable(&path);

        // Larger than a pipe buffer so the write outlives the child
        let big = Script::omnijs("echo", "(args) => args", &json!({ "pad": "x".repeat(1 << 20) }))
            .unwrap();
        let runner = Osascript::new(path.to_string_lossy(), 5);
        match runner.run(&big).await.unwrap_err() {
            BridgeError::CommandFailed { code, stderr } => {
                assert_eq!(code, 4);
                assert_eq!(stderr, "syntax error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_excerpt_is_bounded() {
        assert_eq!(excerpt("short"), "short");

        let long = "é".repeat(LOGGED_OUTPUT_CHARS + 50);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), LOGGED_OUTPUT_CHARS);
        assert!(long.starts_with(cut));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_script_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-osascript");
        std::fs::write(&path, "#!/bin/sh\nsleep 5\n").unwrap();
        make_executable(&path);

        let runner = Osascript {
            program: path.to_string_lossy().into_owned(),
            timeout: Duration::from_millis(200),
        };
        let err = runner.run(&script()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Timeout(0)), "{err:?}");
    }

    #[cfg(unix)]
    fn make_executable(path: &std::path::Path) {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }

    #[tokio::test]
    async fn test_run_json_parses_and_rejects() {
        let runner = FakeRunner::new().reply(r#"{"success":true}"#).reply("not json");

        let value: Value = run_json(&runner, &script()).await.unwrap();
        assert_eq!(value, json!({ "success": true }));

        let err = run_json::<Value>(&runner, &script()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
        assert_eq!(runner.names(), vec!["echo", "echo"]);
    }
}
