//! Subprocess version probe with an optional timeout.

use crate::DiscoveryError;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Argument that makes the executable report its version.
const VERSION_ARG: &str = "version";

/// Runs an executable and reports what it printed for its version.
///
/// The resolver calls this at most once per discovery. Implement it to
/// substitute the subprocess in tests:
///
/// ```rust
/// use hadoop_discovery::{DiscoveryError, VersionProbe};
/// use std::path::Path;
///
/// struct Canned(&'static str);
///
/// impl VersionProbe for Canned {
///     async fn report_version(&self, _executable: &Path) -> Result<String, DiscoveryError> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
pub trait VersionProbe {
    /// Run `executable version` and return its standard output.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::VersionUndetermined`] when the process cannot be
    /// started or does not finish in time.
    fn report_version(
        &self,
        executable: &Path,
    ) -> impl Future<Output = Result<String, DiscoveryError>> + Send;
}

/// The production probe: spawns the executable as a subprocess.
///
/// Standard error is logged at debug level and otherwise discarded. A
/// non-zero exit status is logged but does not by itself fail the probe;
/// only the output matters.
#[derive(Debug, Clone, Default)]
pub struct CommandProbe {
    timeout: Option<Duration>,
}

impl CommandProbe {
    /// Probe bounded by `timeout`, or unbounded when `None`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// The configured bound.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl VersionProbe for CommandProbe {
    async fn report_version(&self, executable: &Path) -> Result<String, DiscoveryError> {
        let failed = |detail: String| DiscoveryError::VersionUndetermined {
            reason: format!("'{} {}' failed: {}", executable.display(), VERSION_ARG, detail),
        };

        let mut command = Command::new(executable);
        command
            .arg(VERSION_ARG)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => timeout(limit, command.output())
                .await
                .map_err(|_| {
                    warn!(executable = %executable.display(), ?limit, "version probe timed out");
                    failed(format!("timed out after {limit:?}"))
                })?,
            None => command.output().await,
        }
        .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            debug!(executable = %executable.display(), status = %output.status, "version probe exited unsuccessfully");
        }
        if !output.stderr.is_empty() {
            debug!(
                executable = %executable.display(),
                "version probe stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
