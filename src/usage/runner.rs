use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use crate::config::Config;

/// Report types emitted by the external usage CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Daily,
    Monthly,
    Blocks,
}

impl ReportKind {
    pub fn subcommand(&self) -> &'static str {
        match self {
            ReportKind::Daily => "daily",
            ReportKind::Monthly => "monthly",
            ReportKind::Blocks => "blocks",
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' timed out after {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },
    #[error("'{command}' exited with {status}")]
    ExitStatus {
        command: String,
        status: std::process::ExitStatus,
    },
    #[error("invalid JSON from '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Invoke the configured usage CLI for one report type and parse its stdout.
///
/// `<usage_command> <daily|monthly|blocks> --json`, bounded by the
/// configured timeout.
pub async fn fetch_report(config: &Config, kind: ReportKind) -> Result<Value, RunnerError> {
    let command_line = format!("{} {} --json", config.usage_command, kind.subcommand());

    let child = Command::new(&config.usage_command)
        .arg(kind.subcommand())
        .arg("--json")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output();

    let output = match tokio::time::timeout(Duration::from_secs(config.timeout_secs), child).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(RunnerError::Spawn {
                command: command_line,
                source,
            })
        }
        Err(_) => {
            return Err(RunnerError::Timeout {
                command: command_line,
                timeout_secs: config.timeout_secs,
            })
        }
    };

    if !output.status.success() {
        return Err(RunnerError::ExitStatus {
            command: command_line,
            status: output.status,
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|source| RunnerError::Parse {
        command: command_line,
        source,
    })
}

/// Fetch one report, degrading failure to `None` with a warning.
///
/// The aggregation downstream is total over missing reports, so a broken
/// upstream invocation costs one report section, not the whole dashboard.
pub async fn try_fetch_report(config: &Config, kind: ReportKind) -> Option<Value> {
    match fetch_report(config, kind).await {
        Ok(report) => Some(report),
        Err(e) => {
            eprintln!("[ccdash] {} report unavailable: {}", kind.subcommand(), e);
            None
        }
    }
}

/// Read one report from `<dir>/<kind>.json`, degrading failure to `None`.
/// Offline counterpart of [`try_fetch_report`].
pub fn try_read_report(dir: &std::path::Path, kind: ReportKind) -> Option<Value> {
    let path = dir.join(format!("{}.json", kind.subcommand()));
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("[ccdash] cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(report) => Some(report),
        Err(e) => {
            eprintln!("[ccdash] invalid JSON in {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_report_kind_subcommands() {
        assert_eq!(ReportKind::Daily.subcommand(), "daily");
        assert_eq!(ReportKind::Monthly.subcommand(), "monthly");
        assert_eq!(ReportKind::Blocks.subcommand(), "blocks");
    }

    #[test]
    fn test_try_read_report_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_read_report(dir.path(), ReportKind::Daily).is_none());
    }

    #[test]
    fn test_try_read_report_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("daily.json")).unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(try_read_report(dir.path(), ReportKind::Daily).is_none());
    }

    #[test]
    fn test_try_read_report_valid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("blocks.json"),
            r#"{"blocks":[{"id":"b1","costUSD":0.5}]}"#,
        )
        .unwrap();
        let report = try_read_report(dir.path(), ReportKind::Blocks).unwrap();
        assert!(report.get("blocks").unwrap().is_array());
    }

    #[tokio::test]
    async fn test_fetch_report_spawn_failure() {
        let config = Config {
            usage_command: "ccdash-test-no-such-binary".to_string(),
            timeout_secs: 5,
        };
        let err = fetch_report(&config, ReportKind::Daily).await.unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }
}
