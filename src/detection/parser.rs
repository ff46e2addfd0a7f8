//! Version token extraction from `hadoop version` output.

/// Extract the version token from `hadoop version` output.
///
/// The token is the last whitespace-separated word of the first line:
///
/// - `Hadoop 0.20.2-cdh3u6` -> `0.20.2-cdh3u6`
/// - `Hadoop 1.0.4\nSubversion ...` -> `1.0.4`
///
/// Returns `None` when the output is empty or its first line is blank.
pub(crate) fn extract_version_token(output: &str) -> Option<&str> {
    output.lines().next()?.split_whitespace().last()
}
