//! Fetches the discovery agent's raw output once per refresh tick.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;
use tokio::process::Command;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("discovery command failed to run: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("discovery command exited with {0}")]
    Exit(std::process::ExitStatus),
    #[error("snapshot file unreadable: {0}")]
    Read(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Shell command whose stdout is the JSON blob.
    Command(String),
    /// File holding the JSON blob, re-read every tick.
    File(PathBuf),
}

impl Source {
    pub async fn try_fetch(&self) -> Result<String, SourceError> {
        match self {
            Source::Command(cmd) => {
                #[cfg(windows)]
                let mut c = {
                    let mut c = Command::new("cmd");
                    c.arg("/C").arg(cmd);
                    c
                };
                #[cfg(not(windows))]
                let mut c = {
                    let mut c = Command::new("sh");
                    c.arg("-c").arg(cmd);
                    c
                };
                let out = c.kill_on_drop(true).output().await.map_err(SourceError::Spawn)?;
                if !out.status.success() {
                    return Err(SourceError::Exit(out.status));
                }
                Ok(String::from_utf8_lossy(&out.stdout).into_owned())
            }
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(SourceError::Read),
        }
    }

    /// Raw text for this tick. Failures read as empty output; `None` means the fetch
    /// stalled and the previous view should stay up.
    pub async fn fetch(&self) -> Option<String> {
        match tokio::time::timeout(FETCH_TIMEOUT, self.try_fetch()).await {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "discovery fetch failed");
                Some(String::new())
            }
            Err(_) => {
                tracing::warn!(timeout = ?FETCH_TIMEOUT, "discovery fetch timed out");
                None
            }
        }
    }
}
