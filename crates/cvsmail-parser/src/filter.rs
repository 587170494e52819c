//! Path-prefix filtering.

/// Applies the configured prefix to a candidate path.
///
/// Without a prefix (or with an empty one) the path is returned unchanged. Otherwise the path is
/// returned with the prefix removed, or `None` when it lies outside the prefix.
pub fn apply_prefix<'a>(path: &'a str, prefix: Option<&str>) -> Option<&'a str> {
    match prefix {
        Some(prefix) if !prefix.is_empty() => path.strip_prefix(prefix),
        _ => Some(path),
    }
}
