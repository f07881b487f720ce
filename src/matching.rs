//! Segment-based path matching
//!
//! Route table keys are patterns such as `/sys/account/:id`. Matching works
//! on `/`-separated segments:
//!
//! - literal segments match exactly
//! - `:name` segments match any single segment and capture it
//! - a trailing `*` (or `*name`) matches the rest of the path, possibly empty
//!
//! Empty segments are ignored, so `/sys/` and `/sys` are the same path.

use crate::params::RouteParams;

/// Match a concrete path against a pattern, extracting parameters.
///
/// Returns `None` unless the whole path is consumed.
///
/// # Examples
///
/// ```
/// use console_navigator::matching::match_pattern;
///
/// let params = match_pattern("/sys/account/:id", "/sys/account/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
///
/// assert!(match_pattern("/sys/account/:id", "/sys/account").is_none());
/// ```
pub fn match_pattern(pattern: &str, path: &str) -> Option<RouteParams> {
    let pattern_segments = split_path(pattern);
    let path_segments = split_path(path);

    let mut params = RouteParams::new();

    for (index, pattern_seg) in pattern_segments.iter().enumerate() {
        if is_wildcard_segment(pattern_seg) {
            // Wildcard must be the last pattern segment
            if index + 1 != pattern_segments.len() {
                return None;
            }
            let name = pattern_seg.trim_start_matches('*');
            if !name.is_empty() {
                let rest = path_segments.get(index..).unwrap_or_default().join("/");
                params.insert(name.to_string(), rest);
            }
            return Some(params);
        }

        let path_seg = path_segments.get(index)?;
        if let Some(name) = extract_param_name(pattern_seg) {
            params.insert(name.to_string(), (*path_seg).to_string());
        } else if pattern_seg != path_seg {
            return None;
        }
    }

    (pattern_segments.len() == path_segments.len()).then_some(params)
}

/// Check whether a pattern matches a path, ignoring captured values.
pub fn matches(pattern: &str, path: &str) -> bool {
    match_pattern(pattern, path).is_some()
}

/// Split a path into segments, filtering empty segments
///
/// # Examples
///
/// ```
/// use console_navigator::matching::split_path;
///
/// assert_eq!(split_path("/users/123"), vec!["users", "123"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Every ancestor path of `path`, shortest first, ending with the path
/// itself.
///
/// ```
/// use console_navigator::matching::path_prefixes;
///
/// assert_eq!(path_prefixes("/sys/account/edit"), vec!["/sys", "/sys/account", "/sys/account/edit"]);
/// assert!(path_prefixes("/").is_empty());
/// ```
pub fn path_prefixes(path: &str) -> Vec<String> {
    let mut prefix = String::new();
    split_path(path)
        .into_iter()
        .map(|segment| {
            prefix.push('/');
            prefix.push_str(segment);
            prefix.clone()
        })
        .collect()
}

/// Extract parameter name from a route segment
pub fn extract_param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':')
}

/// Check if a route segment is a parameter
pub fn is_param_segment(segment: &str) -> bool {
    segment.starts_with(':')
}

/// Check if a route segment is a wildcard
pub fn is_wildcard_segment(segment: &str) -> bool {
    segment.starts_with('*')
}

/// Check if a pattern contains no parameter or wildcard segments.
pub fn is_static_pattern(pattern: &str) -> bool {
    split_path(pattern)
        .iter()
        .all(|seg| !is_param_segment(seg) && !is_wildcard_segment(seg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/users/123"), vec!["users", "123"]);
        assert_eq!(split_path("/"), Vec::<&str>::new());
        assert_eq!(split_path(""), Vec::<&str>::new());
        assert_eq!(split_path("/users/"), vec!["users"]);
        assert_eq!(split_path("users"), vec!["users"]);
    }

    #[test]
    fn test_literal_match() {
        assert!(matches("/sys/account", "/sys/account"));
        assert!(matches("/sys/account", "/sys/account/"));
        assert!(!matches("/sys/account", "/sys/account/edit"));
        assert!(!matches("/sys/account", "/sys"));
        assert!(matches("/", "/"));
        assert!(!matches("/", "/sys"));
    }

    #[test]
    fn test_param_match() {
        let params = match_pattern("/org/:orgId/member/:id", "/org/7/member/9").unwrap();
        assert_eq!(params.get("orgId"), Some(&"7".to_string()));
        assert_eq!(params.get_as::<u32>("id"), Some(9));
    }

    #[test]
    fn test_wildcard_match() {
        let params = match_pattern("/docs/*rest", "/docs/a/b").unwrap();
        assert_eq!(params.get("rest"), Some(&"a/b".to_string()));

        let params = match_pattern("/docs/*rest", "/docs").unwrap();
        assert_eq!(params.get("rest"), Some(&String::new()));

        assert!(matches("/docs/*", "/docs/anything"));
        assert!(!matches("/docs/*/x", "/docs/a/x"));
    }

    #[test]
    fn test_path_prefixes() {
        assert_eq!(path_prefixes("/a/b"), vec!["/a", "/a/b"]);
        assert_eq!(path_prefixes("a//b/"), vec!["/a", "/a/b"]);
    }

    #[test]
    fn test_segment_kinds() {
        assert_eq!(extract_param_name(":id"), Some("id"));
        assert_eq!(extract_param_name("users"), None);
        assert!(is_param_segment(":userId"));
        assert!(is_wildcard_segment("*path"));
        assert!(!is_wildcard_segment(":id"));
        assert!(is_static_pattern("/sys/account"));
        assert!(!is_static_pattern("/sys/:id"));
    }
}
