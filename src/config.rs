use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use tracing::debug;

/// Remote used when `gitmenu.defaultRemote` is not set.
pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the session operates on.
    pub workdir: PathBuf,
    /// Preferred remote for commit & sync and the push menu.
    pub default_remote: String,
}

impl Config {
    /// Load config from git config, falling back to defaults for unset keys.
    pub fn load(workdir: &Path) -> Result<Self> {
        let output = std::process::Command::new("git")
            .current_dir(workdir)
            .args(["config", "--get", "gitmenu.defaultRemote"])
            .output()
            .context("Failed to execute git command")?;

        // Exit code 1 means the key is unset
        let configured = if output.status.success() {
            Some(String::from_utf8(output.stdout)?.trim().to_string())
        } else {
            debug!(status = %output.status, "gitmenu.defaultRemote not set");
            None
        };

        Ok(Self::new(
            workdir.to_path_buf(),
            configured
                .filter(|remote| !remote.is_empty())
                .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
        ))
    }

    /// Create a new config with explicit values (useful for tests)
    pub fn new(workdir: PathBuf, default_remote: String) -> Self {
        Self {
            workdir,
            default_remote,
        }
    }

    /// Default config for tests
    pub fn default_for_tests() -> Self {
        Self::new(PathBuf::from("."), DEFAULT_REMOTE.to_string())
    }
}
