//! Path Model
//!
//! Pure functions over `/`-separated virtual paths. Store keys are always
//! absolute (`/a/b`), source paths are always relative (`a/b`).

use super::types::FsError;

/// Normalize an absolute store path.
///
/// Backslashes become `/`, repeated leading slashes collapse to one, a
/// missing leading slash is added and a trailing slash is dropped (except for
/// the root). Nothing else is rewritten: `.` and `..` are kept literally.
pub fn normalize_path(raw: &str) -> Result<String, FsError> {
    let converted = raw.replace('\\', "/");
    let trimmed = converted.trim_start_matches('/');
    if trimmed.is_empty() {
        if converted.is_empty() {
            return Err(FsError::InvalidPath { path: raw.to_string() });
        }
        return Ok("/".to_string());
    }
    let trimmed = trimmed.trim_end_matches('/');
    Ok(format!("/{}", trimmed))
}

/// Normalize a source-relative path fragment.
///
/// Fails with `InvalidPath` when nothing is left after stripping separators.
pub fn normalize_relative(raw: &str) -> Result<String, FsError> {
    let converted = raw.replace('\\', "/");
    let trimmed = converted.trim_start_matches('/');
    let trimmed = trimmed.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(FsError::InvalidPath { path: raw.to_string() });
    }
    Ok(trimmed.to_string())
}

/// Normalize a prefix for literal prefix matching.
///
/// Unlike `normalize_path` a trailing slash is significant here and kept, and
/// an empty prefix means "everything".
pub fn normalize_prefix(raw: &str) -> String {
    let converted = raw.replace('\\', "/");
    format!("/{}", converted.trim_start_matches('/'))
}

/// Join an absolute prefix and a relative fragment with exactly one separator.
pub fn join_path(prefix: &str, relative: &str) -> Result<String, FsError> {
    let base = normalize_path(prefix)?;
    let rel = normalize_relative(relative)?;
    if base == "/" {
        Ok(format!("/{}", rel))
    } else {
        Ok(format!("{}/{}", base, rel))
    }
}

/// The prefix every descendant of `directory` starts with.
pub(crate) fn child_prefix(directory: &str) -> String {
    if directory == "/" {
        "/".to_string()
    } else {
        format!("{}/", directory)
    }
}

/// True iff `candidate` is an immediate child of `directory`.
///
/// Both arguments are expected to be normalized already.
pub fn is_child_of(candidate: &str, directory: &str) -> bool {
    if candidate == directory {
        return false;
    }
    let prefix = child_prefix(directory);
    match candidate.strip_prefix(prefix.as_str()) {
        Some(rest) => !rest.is_empty() && !rest.contains('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/").unwrap(), "/");
        assert_eq!(normalize_path("///").unwrap(), "/");
        assert_eq!(normalize_path("/foo/bar").unwrap(), "/foo/bar");
        assert_eq!(normalize_path("/foo/bar/").unwrap(), "/foo/bar");
        assert_eq!(normalize_path("foo/bar").unwrap(), "/foo/bar");
        assert_eq!(normalize_path("//foo").unwrap(), "/foo");
        assert_eq!(normalize_path("\\foo\\bar.txt").unwrap(), "/foo/bar.txt");
        assert_eq!(normalize_path("/foo/../bar").unwrap(), "/foo/../bar");
        assert!(matches!(normalize_path(""), Err(FsError::InvalidPath { .. })));
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize_relative("a.txt").unwrap(), "a.txt");
        assert_eq!(normalize_relative("/sub/b.txt").unwrap(), "sub/b.txt");
        assert_eq!(normalize_relative("sub\\b.txt").unwrap(), "sub/b.txt");
        assert!(normalize_relative("").is_err());
        assert!(normalize_relative("//").is_err());
    }

    #[test]
    fn test_normalize_prefix_keeps_trailing_slash() {
        assert_eq!(normalize_prefix("/ab"), "/ab");
        assert_eq!(normalize_prefix("ab/"), "/ab/");
        assert_eq!(normalize_prefix(""), "/");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/skills/demo", "a.txt").unwrap(), "/skills/demo/a.txt");
        assert_eq!(join_path("/skills/demo/", "/sub/b.txt").unwrap(), "/skills/demo/sub/b.txt");
        assert_eq!(join_path("/", "a.txt").unwrap(), "/a.txt");
        assert_eq!(join_path("skills", "x\\y").unwrap(), "/skills/x/y");
        assert!(join_path("/skills", "").is_err());
    }

    #[test]
    fn test_is_child_of() {
        assert!(is_child_of("/a/x", "/a"));
        assert!(!is_child_of("/a/y/z", "/a"));
        assert!(!is_child_of("/a", "/a"));
        assert!(!is_child_of("/ab", "/a"));
        assert!(is_child_of("/b", "/"));
        assert!(!is_child_of("/b/c", "/"));
        assert!(!is_child_of("/", "/"));
    }
}
