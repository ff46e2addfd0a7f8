//! Error types for installation discovery.
//!
//! Every failure the resolver can record is a [`DiscoveryError`]. Errors are
//! `Clone` so that a failure captured during the one-time discovery pipeline
//! can be handed back to every later caller of the same accessor.

use thiserror::Error;

/// Errors that can occur while discovering a Hadoop installation.
///
/// None of these are fatal to the discovery pipeline: each is recorded
/// against the single field it concerns and surfaced only when a caller asks
/// for that field.
///
/// # Example
///
/// ```rust
/// use hadoop_discovery::{DiscoveryError, HadoopVersion};
///
/// let err = HadoopVersion::parse("1.2").unwrap_err();
/// assert!(matches!(err, DiscoveryError::MalformedVersion { .. }));
/// eprintln!("{err}. To fix: {}", err.fix_suggestion());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The version string does not fit the version grammar or has fewer
    /// than three leading numeric components.
    #[error("unrecognized version string format: {raw:?}")]
    MalformedVersion {
        /// The raw string that was rejected.
        raw: String,
    },

    /// No runnable executable was located by any strategy.
    #[error("couldn't find the {name} executable in the hinted home, HADOOP_HOME/bin or PATH")]
    ExecutableNotFound {
        /// Executable name that was searched for.
        name: String,
    },

    /// The executable could not be run or produced no usable version token.
    #[error("couldn't determine Hadoop version: {reason}")]
    VersionUndetermined {
        /// What went wrong while probing.
        reason: String,
    },

    /// No installation home directory could be determined.
    #[error("Hadoop home directory not found")]
    HomeNotFound,

    /// No configuration directory could be determined.
    #[error("Hadoop configuration directory not found")]
    ConfigDirNotFound,
}

impl DiscoveryError {
    /// An actionable suggestion for resolving this error.
    ///
    /// ```rust
    /// use hadoop_discovery::DiscoveryError;
    ///
    /// assert!(DiscoveryError::HomeNotFound.fix_suggestion().contains("HADOOP_HOME"));
    /// ```
    pub fn fix_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedVersion { .. } => {
                "Set HADOOP_VERSION to a version such as 1.0.4 or 0.20.2-cdh3u6"
            }
            Self::ExecutableNotFound { .. } => {
                "Set HADOOP_HOME to the installation root or add its bin directory to PATH"
            }
            Self::VersionUndetermined { .. } => {
                "Check that the hadoop executable runs, or set HADOOP_VERSION explicitly"
            }
            Self::HomeNotFound => "Set HADOOP_HOME to the installation root",
            Self::ConfigDirNotFound => "Set HADOOP_CONF_DIR to the configuration directory",
        }
    }
}
