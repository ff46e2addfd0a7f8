//! Installation home discovery.

use super::path_finder::executable_in_home;
use crate::{DiscoveryError, ResolverOptions};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// The variable looked up in system-default configuration files.
const HOME_KEY: &str = "HADOOP_HOME";

fn home_assignment() -> &'static Regex {
    static ASSIGNMENT: OnceLock<Regex> = OnceLock::new();
    ASSIGNMENT.get_or_init(|| {
        Regex::new(r"^\s*(?:export\s+)?HADOOP_HOME=(.*)$").expect("Invalid assignment regex")
    })
}

/// The value of the last `HADOOP_HOME=value` line in `text`.
///
/// Lines are scanned in file order and the last match wins. A leading
/// `export` and surrounding quotes are accepted:
///
/// ```text
/// # comment
/// HADOOP_HOME=/usr/lib/hadoop-0.20
/// export HADOOP_HOME="/usr/lib/hadoop"   <- this one
/// ```
pub(crate) fn last_home_assignment(text: &str) -> Option<String> {
    text.lines()
        .filter_map(|line| home_assignment().captures(line))
        .last()
        .and_then(|caps| caps.get(1))
        .map(|value| unquote(value.as_str().trim()).to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Expand a glob pattern into matching paths, sorted.
///
/// A pattern without metacharacters names a single path, returned if it
/// exists. Invalid patterns and unreadable entries expand to nothing.
pub(crate) fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(pattern, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                trace!(error = %e, "skipping unreadable glob entry");
                None
            }
        })
        .collect();
    matches.sort();
    matches
}

/// Home named by the system-default configuration files.
///
/// Candidates from all patterns are tried newest-named first (reverse
/// lexical order). Within a file only the last `HADOOP_HOME=` line counts,
/// and it must name an existing directory; otherwise the next file is tried.
pub(crate) fn home_from_default_configs(patterns: &[String]) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| expand_pattern(pattern))
        .filter(|path| path.is_file())
        .collect();
    candidates.sort_by(|a, b| b.cmp(a));

    for file in candidates {
        let text = match fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(file = %file.display(), error = %e, "skipping unreadable config file");
                continue;
            }
        };
        match last_home_assignment(&text) {
            Some(value) if Path::new(&value).is_dir() => {
                debug!(file = %file.display(), home = %value, "home from default config");
                return Some(PathBuf::from(value));
            }
            Some(value) => {
                debug!(file = %file.display(), home = %value, "config names a missing directory");
            }
            None => trace!(file = %file.display(), "no {HOME_KEY} assignment"),
        }
    }
    None
}

/// First directory matching the conventional installation patterns.
pub(crate) fn home_from_install_patterns(patterns: &[String]) -> Option<PathBuf> {
    patterns
        .iter()
        .flat_map(|pattern| expand_pattern(pattern))
        .find(|path| path.is_dir())
}

/// Run the home strategies in priority order.
pub(crate) fn resolve_home(options: &ResolverOptions) -> Result<PathBuf, DiscoveryError> {
    let name = options.executable_name.as_str();

    if let Some(hint) = &options.home_hint {
        if executable_in_home(hint, name).is_some() {
            debug!(home = %hint.display(), "home from caller hint");
            return Ok(hint.clone());
        }
        debug!(home = %hint.display(), "hinted home has no executable, ignoring");
    }

    if let Some(home) = &options.env.home {
        if executable_in_home(home, name).is_some() {
            debug!(home = %home.display(), "home from {HOME_KEY}");
            return Ok(home.clone());
        }
        debug!(home = %home.display(), "{HOME_KEY} has no executable, ignoring");
    }

    if let Some(home) = home_from_default_configs(&options.default_config_patterns) {
        return Ok(home);
    }

    if let Some(home) = home_from_install_patterns(&options.install_patterns) {
        debug!(home = %home.display(), "home from installation pattern");
        return Ok(home);
    }

    debug!("no home directory found");
    Err(DiscoveryError::HomeNotFound)
}
