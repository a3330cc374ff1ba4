//! Shared integration-test harness for running the `logwrap` binary.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Helpers for invoking the compiled `logwrap` binary.
pub struct LogwrapProcess;

impl LogwrapProcess {
    /// Runs `logwrap` with `args` to completion with colour disabled.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_with_env(args, &[])
    }

    /// Runs `logwrap` with `args` and extra environment variables.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_logwrap");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .env("NO_COLOR", "1")
            .env_remove("LOGWRAP_LOG_LEVEL")
            .env_remove("LOGWRAP_CONFIG")
            .env_remove("LOGWRAP_RECORDS_FILE");
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to run logwrap")
    }

    /// Reads a JSONL file into parsed values.
    #[allow(clippy::missing_panics_doc)]
    pub fn read_records(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .expect("records file should exist")
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("invalid JSON: {e}\nline: {l}")))
            .collect()
    }
}
