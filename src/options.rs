//! Resolver options configuration.
//!
//! This module provides [`ResolverOptions`] for configuring discovery,
//! and [`EnvOverrides`], the snapshot of the environment variables the
//! resolver consults.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the installation home directory.
pub const HOME_ENV: &str = "HADOOP_HOME";

/// Environment variable providing the version string directly.
pub const VERSION_ENV: &str = "HADOOP_VERSION";

/// Environment variable naming the configuration directory.
pub const CONF_DIR_ENV: &str = "HADOOP_CONF_DIR";

/// Environment variable holding the executable search path.
pub const PATH_ENV: &str = "PATH";

/// Values of the environment variables the resolver reads.
///
/// The environment is captured once, so discovery is deterministic for a
/// given snapshot and tests never have to mutate the process environment.
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `HADOOP_HOME`.
    pub home: Option<PathBuf>,
    /// `HADOOP_VERSION`.
    pub version: Option<String>,
    /// `HADOOP_CONF_DIR`.
    pub conf_dir: Option<PathBuf>,
    /// `PATH`.
    pub search_path: Option<OsString>,
}

impl EnvOverrides {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// ```rust
    /// use hadoop_discovery::EnvOverrides;
    ///
    /// let env = EnvOverrides::from_lookup(|key| match key {
    ///     "HADOOP_VERSION" => Some("0.20.2-cdh3u6".into()),
    ///     "HADOOP_HOME" => Some("".into()),
    ///     _ => None,
    /// });
    /// assert_eq!(env.version.as_deref(), Some("0.20.2-cdh3u6"));
    /// assert!(env.home.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            home: get(HOME_ENV).map(PathBuf::from),
            version: get(VERSION_ENV).map(|v| v.to_string_lossy().trim().to_string()),
            conf_dir: get(CONF_DIR_ENV).map(PathBuf::from),
            search_path: get(PATH_ENV),
        }
    }
}

/// Configuration options for installation discovery.
///
/// `Default` never touches the process environment; use
/// [`ResolverOptions::from_env`] for the usual setup.
///
/// # Example
///
/// ```rust
/// use hadoop_discovery::ResolverOptions;
/// use std::time::Duration;
///
/// let opts = ResolverOptions {
///     home_hint: Some("/opt/hadoop-1.0.4".into()),
///     version_timeout: Some(Duration::from_secs(30)),
///     ..ResolverOptions::from_env()
/// };
/// assert_eq!(opts.executable_name, "hadoop");
/// ```
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Caller-supplied installation home, tried before anything else.
    pub home_hint: Option<PathBuf>,

    /// Executable name looked up under `<home>/bin` and on the search path.
    ///
    /// Default: `hadoop`
    pub executable_name: String,

    /// Upper bound on the `hadoop version` subprocess.
    ///
    /// `None` waits indefinitely.
    ///
    /// Default: 10 seconds
    pub version_timeout: Option<Duration>,

    /// Environment snapshot.
    ///
    /// Default: empty
    pub env: EnvOverrides,

    /// System-default configuration files scanned for a `HADOOP_HOME=`
    /// assignment, as `<dir>/<prefix>*` patterns.
    ///
    /// Default: `/etc/default/hadoop*`
    pub default_config_patterns: Vec<String>,

    /// Conventional installation locations, as `<dir>/<prefix>*` patterns.
    ///
    /// Default: `/opt/hadoop*`, `/usr/lib/hadoop*`, `/usr/local/lib/hadoop*`
    pub install_patterns: Vec<String>,

    /// Root under which vendor packages keep their configuration.
    ///
    /// Default: `/etc`
    pub vendor_conf_root: PathBuf,
}

impl ResolverOptions {
    /// Default options with the environment captured from this process.
    pub fn from_env() -> Self {
        Self {
            env: EnvOverrides::from_process(),
            ..Default::default()
        }
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            home_hint: None,
            executable_name: "hadoop".to_string(),
            version_timeout: Some(Duration::from_secs(10)),
            env: EnvOverrides::default(),
            default_config_patterns: vec!["/etc/default/hadoop*".to_string()],
            install_patterns: vec![
                "/opt/hadoop*".to_string(),
                "/usr/lib/hadoop*".to_string(),
                "/usr/local/lib/hadoop*".to_string(),
            ],
            vendor_conf_root: PathBuf::from("/etc"),
        }
    }
}
