//! The installation resolver.

use crate::detection::{
    extract_version_token, locate_executable, resolve_conf_dir, resolve_home, CommandProbe,
    VersionProbe,
};
use crate::{DiscoveryError, Distribution, HadoopVersion, ResolvedEnvironment, ResolverOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;
use tracing::debug;

/// Lifecycle of a [`Resolver`]'s discovery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// Discovery has not run yet.
    Uninitialized,
    /// Discovery is running.
    Resolving,
    /// Discovery has finished; results are fixed for the resolver's lifetime.
    Resolved,
}

/// Discovers and memoizes the Hadoop installation environment.
///
/// Nothing happens at construction. The first accessor call runs the whole
/// discovery pipeline once, and every later call (from any task sharing the
/// resolver) returns the cached value or the cached failure.
///
/// # Discovery Process
///
/// 1. Home: hint, `HADOOP_HOME`, `/etc/default/hadoop*`, install globs
/// 2. Version: `HADOOP_VERSION`, else `<executable> version`
/// 3. Vendor: derived from the version's extras
/// 4. Config dir: `HADOOP_CONF_DIR`, vendor layout, `<home>/conf`
///
/// # Example
///
/// ```rust,no_run
/// use hadoop_discovery::Resolver;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let resolver = Resolver::from_env();
///     match resolver.version().await {
///         Ok(version) => println!("Hadoop {version}"),
///         Err(e) => eprintln!("{e}. To fix: {}", e.fix_suggestion()),
///     }
///     if resolver.is_vendor_distribution().await {
///         println!("vendor build, conf at {:?}", resolver.config_dir().await);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Resolver<P = CommandProbe> {
    options: ResolverOptions,
    probe: P,
    resolving: AtomicBool,
    resolved: OnceCell<ResolvedEnvironment>,
}

impl Resolver<CommandProbe> {
    /// Resolver that probes with a real subprocess.
    pub fn new(options: ResolverOptions) -> Self {
        let probe = CommandProbe::new(options.version_timeout);
        Self::with_probe(options, probe)
    }

    /// Resolver with default options and the current process environment.
    pub fn from_env() -> Self {
        Self::new(ResolverOptions::from_env())
    }
}

impl<P: VersionProbe> Resolver<P> {
    /// Resolver that asks `probe` for the version output.
    pub fn with_probe(options: ResolverOptions, probe: P) -> Self {
        Self {
            options,
            probe,
            resolving: AtomicBool::new(false),
            resolved: OnceCell::new(),
        }
    }

    /// The options this resolver was built with.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Where the pipeline is in its lifecycle.
    pub fn state(&self) -> ResolverState {
        if self.resolved.initialized() {
            ResolverState::Resolved
        } else if self.resolving.load(Ordering::Acquire) {
            ResolverState::Resolving
        } else {
            ResolverState::Uninitialized
        }
    }

    /// The full resolved record, running discovery if needed.
    ///
    /// Dropping the returned future before it completes leaves the resolver
    /// [`ResolverState::Uninitialized`]; the next call starts over.
    pub async fn environment(&self) -> &ResolvedEnvironment {
        self.resolved
            .get_or_init(|| async {
                let _resolving = ResolvingGuard::enter(&self.resolving);
                discover(&self.options, &self.probe).await
            })
            .await
    }

    /// The installation home.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::HomeNotFound`] if no strategy found one.
    pub async fn home(&self) -> Result<&Path, DiscoveryError> {
        self.environment().await.home()
    }

    /// The installation version.
    ///
    /// # Errors
    ///
    /// The failure recorded during discovery:
    /// [`DiscoveryError::ExecutableNotFound`] when nothing runnable was
    /// found, [`DiscoveryError::VersionUndetermined`] when the executable
    /// gave no usable version, or [`DiscoveryError::MalformedVersion`] for a
    /// bad `HADOOP_VERSION` override.
    pub async fn version(&self) -> Result<&HadoopVersion, DiscoveryError> {
        self.environment().await.version()
    }

    /// The configuration directory.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::ConfigDirNotFound`] if no strategy found one.
    pub async fn config_dir(&self) -> Result<&Path, DiscoveryError> {
        self.environment().await.config_dir()
    }

    /// Whether the installation is a vendor build. Never fails: an unknown
    /// version counts as not vendor.
    pub async fn is_vendor_distribution(&self) -> bool {
        self.environment().await.is_vendor_distribution()
    }

    /// The distribution, if the version is known.
    pub async fn distribution(&self) -> Option<Distribution> {
        self.environment().await.distribution()
    }

    /// The executable found while probing for the version.
    pub async fn executable(&self) -> Option<&Path> {
        self.environment().await.executable()
    }
}

/// Marks discovery as in flight; cleared on completion or cancellation.
struct ResolvingGuard<'a>(&'a AtomicBool);

impl<'a> ResolvingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Detect the installed version once, without memoization.
///
/// Uses `options.home_hint` as the preferred installation, then
/// `HADOOP_HOME`, then the search path. `HADOOP_VERSION` in `options.env`
/// short-circuits the probe entirely.
///
/// # Example
///
/// ```rust,no_run
/// use hadoop_discovery::{detect_version, CommandProbe, ResolverOptions};
///
/// # async fn run() {
/// let options = ResolverOptions {
///     home_hint: Some("/opt/hadoop-1.0.4".into()),
///     ..ResolverOptions::from_env()
/// };
/// let probe = CommandProbe::new(options.version_timeout);
/// let version = detect_version(&options, &probe).await;
/// # }
/// ```
pub async fn detect_version<P: VersionProbe>(
    options: &ResolverOptions,
    probe: &P,
) -> Result<HadoopVersion, DiscoveryError> {
    resolve_version(options, None, probe).await.1
}

/// Run every strategy once and record the outcome per field.
async fn discover<P: VersionProbe>(options: &ResolverOptions, probe: &P) -> ResolvedEnvironment {
    let home = resolve_home(options);
    let (executable, version) = resolve_version(options, home.as_deref().ok(), probe).await;
    let config_dir = resolve_conf_dir(
        options.env.conf_dir.as_deref(),
        version.as_ref().ok(),
        home.as_deref().ok(),
        &options.vendor_conf_root,
    );

    debug!(
        home = ?home.as_deref().ok(),
        version = ?version.as_ref().ok().map(ToString::to_string),
        config_dir = ?config_dir.as_deref().ok(),
        "hadoop discovery finished"
    );
    ResolvedEnvironment::new(home, version, config_dir, executable)
}

/// Version strategies: the override, else locate and probe the executable.
///
/// Returns the executable that was probed alongside the outcome.
async fn resolve_version<P: VersionProbe>(
    options: &ResolverOptions,
    discovered_home: Option<&Path>,
    probe: &P,
) -> (Option<PathBuf>, Result<HadoopVersion, DiscoveryError>) {
    if let Some(raw) = &options.env.version {
        debug!(version = %raw, "version from HADOOP_VERSION");
        return (None, HadoopVersion::parse(raw));
    }

    let name = options.executable_name.as_str();
    let homes = options
        .home_hint
        .as_deref()
        .into_iter()
        .chain(options.env.home.as_deref())
        .chain(discovered_home);
    let Some(executable) = locate_executable(name, homes, options.env.search_path.as_deref())
    else {
        debug!(name, "no executable found");
        return (
            None,
            Err(DiscoveryError::ExecutableNotFound {
                name: name.to_string(),
            }),
        );
    };

    debug!(executable = %executable.display(), "probing version");
    let version = probe_version(&executable, probe).await;
    (Some(executable), version)
}

async fn probe_version<P: VersionProbe>(
    executable: &Path,
    probe: &P,
) -> Result<HadoopVersion, DiscoveryError> {
    let output = probe.report_version(executable).await?;
    let token = extract_version_token(&output).ok_or_else(|| {
        DiscoveryError::VersionUndetermined {
            reason: format!("'{} version' printed no version line", executable.display()),
        }
    })?;
    HadoopVersion::parse(token).map_err(|_| DiscoveryError::VersionUndetermined {
        reason: format!(
            "'{} version' reported unparseable token {token:?}",
            executable.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[derive(Clone)]
    struct FixedProbe {
        output: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl VersionProbe for FixedProbe {
        async fn report_version(&self, _executable: &Path) -> Result<String, DiscoveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.to_string())
        }
    }

    fn isolated_options() -> ResolverOptions {
        ResolverOptions {
            default_config_patterns: Vec::new(),
            install_patterns: Vec::new(),
            vendor_conf_root: PathBuf::from("/nonexistent"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let resolver = Resolver::new(isolated_options());
        assert_eq!(resolver.state(), ResolverState::Uninitialized);

        let _ = resolver.home().await;
        assert_eq!(resolver.state(), ResolverState::Resolved);
    }

    #[tokio::test]
    async fn test_version_override_parses_directly() {
        let mut options = isolated_options();
        options.env.version = Some("0.20.3-cdh3".to_string());

        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = Resolver::with_probe(
            options,
            FixedProbe {
                output: "Hadoop 9.9.9",
                calls: calls.clone(),
            },
        );

        let version = resolver.version().await.unwrap();
        assert_eq!(*version, HadoopVersion::with_extras(0, 20, 3, ["cdh3"]));
        assert!(resolver.is_vendor_distribution().await);
        assert_eq!(resolver.executable().await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_override_is_recorded() {
        let mut options = isolated_options();
        options.env.version = Some("1.2".to_string());

        let resolver = Resolver::new(options);
        assert_eq!(
            resolver.version().await,
            Err(DiscoveryError::MalformedVersion {
                raw: "1.2".to_string()
            })
        );
        assert!(!resolver.is_vendor_distribution().await);
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let resolver = Resolver::new(isolated_options());

        assert_eq!(resolver.home().await, Err(DiscoveryError::HomeNotFound));
        assert_eq!(
            resolver.version().await,
            Err(DiscoveryError::ExecutableNotFound {
                name: "hadoop".to_string()
            })
        );
        assert_eq!(
            resolver.config_dir().await,
            Err(DiscoveryError::ConfigDirNotFound)
        );
        assert!(!resolver.is_vendor_distribution().await);
        assert_eq!(resolver.distribution().await, None);
    }

    #[tokio::test]
    async fn test_conf_dir_override_without_anything_else() {
        let mut options = isolated_options();
        options.env.conf_dir = Some(PathBuf::from("/etc/hadoop/conf"));

        let resolver = Resolver::new(options);
        assert_eq!(
            resolver.config_dir().await,
            Ok(Path::new("/etc/hadoop/conf"))
        );
        assert!(resolver.version().await.is_err());
    }

    #[tokio::test]
    async fn test_detect_version_uses_override() {
        let mut options = isolated_options();
        options.env.version = Some("1.0.4".to_string());

        let calls = Arc::new(AtomicUsize::new(0));
        let probe = FixedProbe {
            output: "",
            calls: calls.clone(),
        };
        assert_eq!(
            detect_version(&options, &probe).await,
            Ok(HadoopVersion::new(1, 0, 4))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
