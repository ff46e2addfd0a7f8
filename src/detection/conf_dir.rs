//! Configuration directory discovery.

use crate::{DiscoveryError, Distribution, HadoopVersion};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Run the configuration directory strategies in priority order.
///
/// 1. the `HADOOP_CONF_DIR` override, taken as-is
/// 2. the vendor's conventional directory, when the version is a vendor build
/// 3. `<home>/conf`
pub(crate) fn resolve_conf_dir(
    env_conf_dir: Option<&Path>,
    version: Option<&HadoopVersion>,
    home: Option<&Path>,
    vendor_conf_root: &Path,
) -> Result<PathBuf, DiscoveryError> {
    if let Some(dir) = env_conf_dir {
        debug!(conf_dir = %dir.display(), "conf dir from HADOOP_CONF_DIR");
        return Ok(dir.to_path_buf());
    }

    if let Some(version) = version {
        let distribution = Distribution::classify(version);
        if let Some(candidate) = distribution.conf_dir(vendor_conf_root, version) {
            if candidate.is_dir() {
                debug!(conf_dir = %candidate.display(), vendor = distribution.display_name(), "conf dir from vendor layout");
                return Ok(candidate);
            }
            debug!(candidate = %candidate.display(), "vendor conf dir missing");
        }
    }

    if let Some(home) = home {
        let candidate = home.join("conf");
        if candidate.is_dir() {
            debug!(conf_dir = %candidate.display(), "conf dir under home");
            return Ok(candidate);
        }
    }

    debug!("no configuration directory found");
    Err(DiscoveryError::ConfigDirNotFound)
}
