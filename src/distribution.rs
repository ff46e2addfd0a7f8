//! Distribution enum identifying who packaged a Hadoop installation.

use crate::HadoopVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// The distribution a Hadoop installation came from.
///
/// Vendor distributions are repackaged builds that append a tag to the
/// version string (Cloudera's `0.20.2-cdh3u6`, for example). Classification
/// looks only at the version's extras, never at the filesystem.
///
/// This enum is marked `#[non_exhaustive]` so new vendors can be added.
///
/// # Example
///
/// ```rust
/// use hadoop_discovery::{Distribution, HadoopVersion};
///
/// let v = HadoopVersion::parse("0.20.2-cdh3u6").unwrap();
/// assert_eq!(Distribution::classify(&v), Distribution::Cloudera);
///
/// for dist in Distribution::all() {
///     println!("{}: vendor={}", dist.display_name(), dist.is_vendor());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum Distribution {
    /// Upstream Apache release, no vendor tag.
    Apache,
    /// Cloudera's Distribution including Hadoop (`cdh` tag).
    Cloudera,
}

impl Distribution {
    /// Version-tag prefix identifying this vendor, `None` for upstream.
    ///
    /// ```rust
    /// use hadoop_discovery::Distribution;
    ///
    /// assert_eq!(Distribution::Cloudera.tag_prefix(), Some("cdh"));
    /// assert_eq!(Distribution::Apache.tag_prefix(), None);
    /// ```
    pub fn tag_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Apache => None,
            Self::Cloudera => Some("cdh"),
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apache => "Apache Hadoop",
            Self::Cloudera => "Cloudera CDH",
        }
    }

    /// Whether this is a repackaged vendor build.
    pub fn is_vendor(&self) -> bool {
        self.tag_prefix().is_some()
    }

    /// Whether `token` carries this vendor's tag (case-insensitive prefix).
    pub fn matches_tag(&self, token: &str) -> bool {
        match self.tag_prefix() {
            Some(prefix) => token
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            None => false,
        }
    }

    /// Classify a version by its extras.
    ///
    /// Returns the first vendor whose tag matches any extra, otherwise
    /// [`Distribution::Apache`].
    pub fn classify(version: &HadoopVersion) -> Self {
        Self::all()
            .filter(Self::is_vendor)
            .find(|dist| version.extras().iter().any(|extra| dist.matches_tag(extra)))
            .unwrap_or(Self::Apache)
    }

    /// Conventional configuration directory for this vendor's packages.
    ///
    /// Cloudera packages install their configuration under
    /// `<root>/hadoop-<major>.<minor>/conf`. Upstream has no such
    /// convention and returns `None`.
    ///
    /// ```rust
    /// use hadoop_discovery::{Distribution, HadoopVersion};
    /// use std::path::{Path, PathBuf};
    ///
    /// let v = HadoopVersion::parse("0.20.2-cdh3u6").unwrap();
    /// assert_eq!(
    ///     Distribution::Cloudera.conf_dir(Path::new("/etc"), &v),
    ///     Some(PathBuf::from("/etc/hadoop-0.20/conf"))
    /// );
    /// ```
    pub fn conf_dir(&self, root: &Path, version: &HadoopVersion) -> Option<PathBuf> {
        match self {
            Self::Apache => None,
            Self::Cloudera => Some(
                root.join(format!("hadoop-{}.{}", version.major(), version.minor()))
                    .join("conf"),
            ),
        }
    }

    /// Iterator over all known distributions.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
