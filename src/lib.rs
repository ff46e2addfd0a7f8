//! # hadoop-discovery
//!
//! Installation discovery for Hadoop: where it is installed, which version it
//! is, whether it is a vendor distribution, and where its configuration lives.
//!
//! Discovery works with zero prior knowledge and degrades gracefully: each
//! field is resolved independently, so an unknown version never prevents the
//! home or configuration directory from being found.
//!
//! ## Features
//!
//! - `HadoopVersion` parser for vendor-tagged version strings (`0.20.2-cdh3u6`)
//! - `Distribution` classification from version tags
//! - `Resolver` running the discovery pipeline once and memoizing the results
//! - `find_executable()` and `detect_version()` for one-off lookups
//!
//! ## Example
//!
//! ```rust,no_run
//! use hadoop_discovery::{HadoopVersion, Resolver};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let v = HadoopVersion::parse("0.20.2-cdh3u6").unwrap();
//!     assert!(v.is_vendor_distribution());
//!
//!     let resolver = Resolver::from_env();
//!     println!("home: {:?}", resolver.home().await);
//!     println!("version: {:?}", resolver.version().await);
//!     println!("conf: {:?}", resolver.config_dir().await);
//! }
//! ```

mod detection;
mod distribution;
mod environment;
mod errors;
mod options;
mod resolver;
mod version;

pub use detection::{find_executable, CommandProbe, VersionProbe};
pub use distribution::Distribution;
pub use environment::ResolvedEnvironment;
pub use errors::DiscoveryError;
pub use options::{
    EnvOverrides, ResolverOptions, CONF_DIR_ENV, HOME_ENV, PATH_ENV, VERSION_ENV,
};
pub use resolver::{detect_version, Resolver, ResolverState};
pub use version::HadoopVersion;
