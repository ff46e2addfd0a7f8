//! Executable lookup: explicit home hint, `HADOOP_HOME`, then the search path.

use crate::EnvOverrides;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Whether `path` exists and carries an execute bit.
pub(crate) fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    metadata.is_file() && has_exec_bit(&metadata)
}

#[cfg(unix)]
fn has_exec_bit(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(_metadata: &Metadata) -> bool {
    true
}

/// `<home>/bin/<name>` if it is executable.
pub(crate) fn executable_in_home(home: &Path, name: &str) -> Option<PathBuf> {
    let candidate = home.join("bin").join(name);
    if is_executable(&candidate) {
        Some(candidate)
    } else {
        trace!(candidate = %candidate.display(), "not an executable");
        None
    }
}

/// Try each home in order, then the search path.
///
/// Homes that appear more than once are only probed the first time.
pub(crate) fn locate_executable<'a, I>(
    name: &str,
    homes: I,
    search_path: Option<&OsStr>,
) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut seen: Vec<&Path> = Vec::new();
    for home in homes {
        if seen.contains(&home) {
            continue;
        }
        seen.push(home);
        if let Some(path) = executable_in_home(home, name) {
            return Some(path);
        }
    }

    // `which` applies the same existence and execute-bit checks per entry.
    let search_path = search_path?;
    which::which_in(name, Some(search_path), Path::new(".")).ok()
}

/// Find the Hadoop executable.
///
/// Candidates are checked in order, each for existence and the execute bit:
///
/// 1. `<hint>/bin/<name>`
/// 2. `$HADOOP_HOME/bin/<name>`
/// 3. every directory of `$PATH`
///
/// # Example
///
/// ```rust,no_run
/// use hadoop_discovery::{find_executable, EnvOverrides};
/// use std::path::Path;
///
/// let env = EnvOverrides::from_process();
/// if let Some(exe) = find_executable("hadoop", Some(Path::new("/opt/hadoop")), &env) {
///     println!("hadoop at {}", exe.display());
/// }
/// ```
pub fn find_executable(name: &str, hint: Option<&Path>, env: &EnvOverrides) -> Option<PathBuf> {
    let homes = hint.into_iter().chain(env.home.as_deref());
    locate_executable(name, homes, env.search_path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn make_home(root: &Path, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join("hadoop");
        fs::write(&exe, "#!/bin/sh\necho Hadoop 1.0.4\n").unwrap();
        let mut perms = fs::metadata(&exe).unwrap().permissions();
        perms.set_mode(mode);
        fs::set_permissions(&exe, perms).unwrap();
        root.to_path_buf()
    }

    #[test]
    fn test_is_executable_nonexistent() {
        assert!(!is_executable(Path::new("/nonexistent/bin/hadoop")));
    }

    #[test]
    fn test_is_executable_directory() {
        let dir = tempdir().unwrap();
        assert!(!is_executable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_not_executable_is_skipped() {
        let dir = tempdir().unwrap();
        let home = make_home(dir.path(), 0o644);
        assert!(executable_in_home(&home, "hadoop").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_hint_wins_over_env_home() {
        let hinted = tempdir().unwrap();
        let from_env = tempdir().unwrap();
        let hint = make_home(hinted.path(), 0o755);
        let env_home = make_home(from_env.path(), 0o755);

        let env = EnvOverrides {
            home: Some(env_home),
            ..Default::default()
        };
        let found = find_executable("hadoop", Some(hint.as_path()), &env).unwrap();
        assert_eq!(found, hint.join("bin").join("hadoop"));
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_hint_falls_back_to_env_home() {
        let from_env = tempdir().unwrap();
        let env_home = make_home(from_env.path(), 0o755);

        let env = EnvOverrides {
            home: Some(env_home.clone()),
            ..Default::default()
        };
        let found = find_executable("hadoop", Some(Path::new("/nonexistent")), &env).unwrap();
        assert_eq!(found, env_home.join("bin").join("hadoop"));
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_lookup() {
        let dir = tempdir().unwrap();
        let home = make_home(dir.path(), 0o755);

        let env = EnvOverrides {
            search_path: Some(home.join("bin").into_os_string()),
            ..Default::default()
        };
        let found = find_executable("hadoop", None, &env).unwrap();
        assert!(found.ends_with("bin/hadoop"));
        assert!(is_executable(&found));
    }

    #[test]
    fn test_nothing_found() {
        let env = EnvOverrides::default();
        assert!(find_executable("definitely_not_a_real_hadoop_12345", None, &env).is_none());
    }

    #[test]
    fn test_empty_search_path() {
        let dir = tempdir().unwrap();
        let env = EnvOverrides {
            search_path: Some(dir.path().as_os_str().to_owned()),
            ..Default::default()
        };
        assert!(find_executable("hadoop", None, &env).is_none());
    }
}
