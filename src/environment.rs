//! The resolved environment record.

use crate::{DiscoveryError, Distribution, HadoopVersion};
use std::path::{Path, PathBuf};

/// Result of running the discovery pipeline once.
///
/// Each field is resolved independently: a missing version does not stop
/// the home or configuration directory from being found, and vice versa.
/// Unresolved fields keep the error that explains why.
///
/// # Example
///
/// ```rust,no_run
/// use hadoop_discovery::Resolver;
///
/// # async fn run() {
/// let resolver = Resolver::from_env();
/// let env = resolver.environment().await;
/// match env.hadoop_version() {
///     Some(v) => println!("Hadoop {v}"),
///     None => println!("unknown version: {:?}", env.version().unwrap_err()),
/// }
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    home: Result<PathBuf, DiscoveryError>,
    version: Result<HadoopVersion, DiscoveryError>,
    config_dir: Result<PathBuf, DiscoveryError>,
    executable: Option<PathBuf>,
}

impl ResolvedEnvironment {
    pub(crate) fn new(
        home: Result<PathBuf, DiscoveryError>,
        version: Result<HadoopVersion, DiscoveryError>,
        config_dir: Result<PathBuf, DiscoveryError>,
        executable: Option<PathBuf>,
    ) -> Self {
        Self {
            home,
            version,
            config_dir,
            executable,
        }
    }

    /// The installation home, or why it could not be found.
    pub fn home(&self) -> Result<&Path, DiscoveryError> {
        self.home.as_deref().map_err(Clone::clone)
    }

    /// The installation home, if found.
    pub fn home_dir(&self) -> Option<&Path> {
        self.home.as_deref().ok()
    }

    /// The version, or why it could not be determined.
    pub fn version(&self) -> Result<&HadoopVersion, DiscoveryError> {
        self.version.as_ref().map_err(Clone::clone)
    }

    /// The version, if determined.
    pub fn hadoop_version(&self) -> Option<&HadoopVersion> {
        self.version.as_ref().ok()
    }

    /// The configuration directory, or why it could not be found.
    pub fn config_dir(&self) -> Result<&Path, DiscoveryError> {
        self.config_dir.as_deref().map_err(Clone::clone)
    }

    /// The configuration directory, if found.
    pub fn conf_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref().ok()
    }

    /// The executable located while probing for the version.
    ///
    /// `None` when the version came from `HADOOP_VERSION` or no executable
    /// was found.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// The distribution, if the version is known.
    pub fn distribution(&self) -> Option<Distribution> {
        self.hadoop_version().map(HadoopVersion::distribution)
    }

    /// Whether the version carries a vendor tag. `false` if unknown.
    pub fn is_vendor_distribution(&self) -> bool {
        self.distribution().is_some_and(|d| d.is_vendor())
    }

    /// Whether home, version and configuration directory were all found.
    pub fn is_complete(&self) -> bool {
        self.home.is_ok() && self.version.is_ok() && self.config_dir.is_ok()
    }
}
