//! Opening the dashboard URL in the user's browser.

use std::process::{Command, Stdio};

pub trait UrlOpener {
    /// Fire-and-forget; implementations must not block or fail loudly.
    fn open(&self, url: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) {
        #[cfg(target_os = "macos")]
        let mut cmd = {
            let mut c = Command::new("open");
            c.arg(url);
            c
        };
        #[cfg(windows)]
        let mut cmd = {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", url]);
            c
        };
        #[cfg(not(any(target_os = "macos", windows)))]
        let mut cmd = {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };
        let spawned = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            tracing::warn!(%url, error = %e, "could not open dashboard");
        }
    }
}
