//! Detection implementation submodule.
//!
//! This module contains the individual discovery strategies the resolver
//! chains together:
//!
//! - `resolve_home`: hint, `HADOOP_HOME`, default config files, install globs
//! - `locate_executable`: `<home>/bin` candidates, then the search path
//! - `VersionProbe`: the `hadoop version` subprocess boundary
//! - `extract_version_token`: first-line, last-word token extraction
//! - `resolve_conf_dir`: `HADOOP_CONF_DIR`, vendor layout, `<home>/conf`

mod conf_dir;
mod home;
mod parser;
mod path_finder;
mod probe;

pub(crate) use conf_dir::resolve_conf_dir;
pub(crate) use home::resolve_home;
pub(crate) use parser::extract_version_token;
pub(crate) use path_finder::locate_executable;
pub use path_finder::find_executable;
pub use probe::{CommandProbe, VersionProbe};
