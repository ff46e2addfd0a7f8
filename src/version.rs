//! Structured Hadoop version values and the version-string parser.

use crate::{DiscoveryError, Distribution};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A parsed Hadoop version.
///
/// The first three components are the numeric major, minor and patch
/// numbers. Anything after them (vendor tags such as `cdh3`, pre-release
/// markers such as `SNAPSHOT`, a fourth numeric component) is kept verbatim
/// in [`extras`](HadoopVersion::extras), in order and uninterpreted.
///
/// Versions order lexicographically by `(major, minor, patch, extras)`, with
/// empty extras sorting before non-empty extras of the same numeric triple.
///
/// # Example
///
/// ```rust
/// use hadoop_discovery::HadoopVersion;
///
/// let v = HadoopVersion::parse("0.20.203.1-SNAPSHOT").unwrap();
/// assert_eq!((v.major(), v.minor(), v.patch()), (0, 20, 203));
/// assert_eq!(v.extras(), ["1", "SNAPSHOT"]);
/// assert!(v > HadoopVersion::parse("0.20.203").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HadoopVersion {
    major: u64,
    minor: u64,
    patch: u64,
    extras: Vec<String>,
}

fn version_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)*(-.+)?").expect("Invalid version regex"))
}

impl HadoopVersion {
    /// Build a version with no extras.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            extras: Vec::new(),
        }
    }

    /// Build a version with trailing extra components.
    pub fn with_extras<I, S>(major: u64, minor: u64, patch: u64, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            major,
            minor,
            patch,
            extras: extras.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a raw version string such as `0.20.3-cdh3` or `1.0.4`.
    ///
    /// The string must start with `digits ('.' digits)* ('-' suffix)?`. It is
    /// then split on both `.` and `-`: the first three segments must be
    /// integers and every later segment is kept as an extra.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::MalformedVersion`] naming `raw` when the shape check
    /// fails, fewer than three segments are present, or one of the first
    /// three is not a non-negative integer.
    ///
    /// ```rust
    /// use hadoop_discovery::{DiscoveryError, HadoopVersion};
    ///
    /// let v = HadoopVersion::parse("0.20.3-cdh3").unwrap();
    /// assert_eq!(v, HadoopVersion::with_extras(0, 20, 3, ["cdh3"]));
    ///
    /// assert_eq!(
    ///     HadoopVersion::parse("1.2"),
    ///     Err(DiscoveryError::MalformedVersion { raw: "1.2".to_string() })
    /// );
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DiscoveryError> {
        let malformed = || DiscoveryError::MalformedVersion {
            raw: raw.to_string(),
        };

        if !version_shape().is_match(raw) {
            return Err(malformed());
        }

        let parts: Vec<&str> = raw.split(['.', '-']).collect();
        if parts.len() < 3 {
            return Err(malformed());
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts[..3]) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            *slot = part.parse().map_err(|_| malformed())?;
        }

        let [major, minor, patch] = numbers;
        Ok(Self::with_extras(major, minor, patch, parts[3..].iter().copied()))
    }

    /// Major version number.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor version number.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch (bugfix) version number.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Trailing components after the numeric triple, verbatim.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// The distribution that produced this version, judged by its extras.
    pub fn distribution(&self) -> Distribution {
        Distribution::classify(self)
    }

    /// Whether any extra carries a known vendor tag.
    ///
    /// ```rust
    /// use hadoop_discovery::HadoopVersion;
    ///
    /// assert!(HadoopVersion::parse("0.20.3-cdh3").unwrap().is_vendor_distribution());
    /// assert!(!HadoopVersion::parse("0.21.2").unwrap().is_vendor_distribution());
    /// ```
    pub fn is_vendor_distribution(&self) -> bool {
        self.distribution().is_vendor()
    }

    /// Convert to a [`semver::Version`], carrying extras as build metadata.
    ///
    /// # Errors
    ///
    /// Fails when an extra contains characters semver does not allow in
    /// build metadata.
    pub fn to_semver(&self) -> Result<semver::Version, semver::Error> {
        let mut version = semver::Version::new(self.major, self.minor, self.patch);
        if !self.extras.is_empty() {
            version.build = semver::BuildMetadata::new(&self.extras.join("."))?;
        }
        Ok(version)
    }

    /// Check the numeric triple against a semver requirement.
    ///
    /// Extras are ignored, so `0.20.2-cdh3u6` satisfies `>=0.20, <0.21`.
    ///
    /// ```rust
    /// use hadoop_discovery::HadoopVersion;
    /// use semver::VersionReq;
    ///
    /// let v = HadoopVersion::parse("0.20.2-cdh3u6").unwrap();
    /// assert!(v.satisfies(&VersionReq::parse(">=0.20, <0.21").unwrap()));
    /// ```
    pub fn satisfies(&self, req: &semver::VersionReq) -> bool {
        req.matches(&semver::Version::new(self.major, self.minor, self.patch))
    }
}

impl fmt::Display for HadoopVersion {
    /// Canonical form: `major.minor.patch`, then `-` and the extras joined
    /// with `.` when there are any.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.extras.is_empty() {
            write!(f, "-{}", self.extras.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for HadoopVersion {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_triple() {
        let v = HadoopVersion::parse("0.21.2").unwrap();
        assert_eq!(v, HadoopVersion::new(0, 21, 2));
        assert!(v.extras().is_empty());
    }

    #[test]
    fn test_parse_plain_triples() {
        for (maj, min, patch) in [(0, 0, 0), (1, 0, 4), (2, 10, 1), (3, 3, 6), (10, 200, 3000)] {
            let raw = format!("{maj}.{min}.{patch}");
            assert_eq!(
                HadoopVersion::parse(&raw).unwrap(),
                HadoopVersion::new(maj, min, patch),
                "parsing {raw}"
            );
        }
    }

    #[test]
    fn test_parse_vendor_tag() {
        let v = HadoopVersion::parse("0.20.3-cdh3").unwrap();
        assert_eq!(v, HadoopVersion::with_extras(0, 20, 3, ["cdh3"]));
    }

    #[test]
    fn test_parse_snapshot_with_fourth_component() {
        let v = HadoopVersion::parse("0.20.203.1-SNAPSHOT").unwrap();
        assert_eq!((v.major(), v.minor(), v.patch()), (0, 20, 203));
        assert_eq!(v.extras(), ["1", "SNAPSHOT"]);
    }

    #[test]
    fn test_parse_numeric_extras_stay_strings() {
        let v = HadoopVersion::parse("1.2.3.4.5").unwrap();
        assert_eq!(v.extras(), ["4", "5"]);
    }

    #[test]
    fn test_parse_dash_separated_suffix_segments() {
        let v = HadoopVersion::parse("2.6.0-cdh5.16.2").unwrap();
        assert_eq!(v.extras(), ["cdh5", "16", "2"]);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            HadoopVersion::parse("abc"),
            Err(DiscoveryError::MalformedVersion {
                raw: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_too_few_components() {
        assert_eq!(
            HadoopVersion::parse("1.2"),
            Err(DiscoveryError::MalformedVersion {
                raw: "1.2".to_string()
            })
        );
        assert!(HadoopVersion::parse("1").is_err());
        assert!(HadoopVersion::parse("").is_err());
    }

    #[test]
    fn test_parse_error_names_raw_string_not_segment() {
        // Shape check passes on the "1.2" prefix, then "x" fails as an integer.
        let err = HadoopVersion::parse("1.2.x").unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::MalformedVersion {
                raw: "1.2.x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_suffix_in_numeric_position() {
        // "1.2-beta" splits into three segments but "beta" is the patch slot.
        assert!(HadoopVersion::parse("1.2-beta").is_err());
    }

    #[test]
    fn test_parse_rejects_signed_component() {
        assert!(HadoopVersion::parse("1.2.+3").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(HadoopVersion::parse("99999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_parse_wide_components() {
        let v = HadoopVersion::parse("4294967296.0.20211231").unwrap();
        assert_eq!(v.major(), 4_294_967_296);
        assert_eq!(v.patch(), 20_211_231);
        assert_eq!(v.to_semver().unwrap(), semver::Version::new(4_294_967_296, 0, 20_211_231));
    }

    #[test]
    fn test_ordering() {
        let parse = |s| HadoopVersion::parse(s).unwrap();
        assert!(parse("0.20.2") < parse("0.20.3"));
        assert!(parse("0.20.203") < parse("0.21.0"));
        assert!(parse("1.0.0") > parse("0.99.99"));
        // Empty extras sort first.
        assert!(parse("0.20.2") < parse("0.20.2-cdh3"));
        assert!(parse("0.20.2-cdh3") < parse("0.20.2-cdh3.1"));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["0.21.2", "0.20.3-cdh3", "0.20.203.1-SNAPSHOT", "1.2.3.4.5"] {
            let v = HadoopVersion::parse(raw).unwrap();
            let rendered = v.to_string();
            assert_eq!(HadoopVersion::parse(&rendered).unwrap(), v, "{raw} -> {rendered}");
        }
        assert_eq!(HadoopVersion::parse("0.20.3-cdh3").unwrap().to_string(), "0.20.3-cdh3");
    }

    #[test]
    fn test_from_str() {
        let v: HadoopVersion = "1.0.4".parse().unwrap();
        assert_eq!(v, HadoopVersion::new(1, 0, 4));
    }

    #[test]
    fn test_to_semver() {
        let v = HadoopVersion::parse("0.20.2-cdh3u6").unwrap();
        let sv = v.to_semver().unwrap();
        assert_eq!((sv.major, sv.minor, sv.patch), (0, 20, 2));
        assert_eq!(sv.build.as_str(), "cdh3u6");

        let plain = HadoopVersion::new(1, 0, 4).to_semver().unwrap();
        assert_eq!(plain, semver::Version::new(1, 0, 4));
    }

    #[test]
    fn test_satisfies_ignores_extras() {
        let req = semver::VersionReq::parse(">=0.20, <0.21").unwrap();
        assert!(HadoopVersion::parse("0.20.2-cdh3u6").unwrap().satisfies(&req));
        assert!(!HadoopVersion::parse("0.21.0").unwrap().satisfies(&req));
    }

    #[test]
    fn test_serde_round_trip() {
        let v = HadoopVersion::parse("0.20.3-cdh3").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: HadoopVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
