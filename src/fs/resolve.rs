//! Maps request paths onto the serving root.
//!
//! The traversal guard here is the security boundary of the whole service:
//! a resolved path must never name anything outside the serving root. The
//! path is percent-decoded *first* and only `Normal` components are joined
//! onto the root, so an encoded `..` cannot slip through.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::error::ServeError;

/// Resolve a request path (as received in the URI, still percent-encoded)
/// against `root`.
///
/// # Errors
///
/// Returns [`ServeError::Forbidden`] if the path contains a `..` component,
/// a NUL byte, or is not valid UTF-8 after decoding.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::Forbidden("request path is not valid UTF-8".into()))?;

    if decoded.contains('\0') {
        return Err(ServeError::Forbidden("request path contains a NUL byte".into()));
    }

    let mut resolved = root.to_path_buf();
    for component in Path::new(decoded.as_ref()).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            // Leading "/" and "." segments are no-ops relative to the root.
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => {
                return Err(ServeError::Forbidden(
                    "request path escapes the serving root".into(),
                ));
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/files")
    }

    #[test]
    fn plain_file_resolves_under_root() {
        let p = resolve(&root(), "/index.html").unwrap();
        assert_eq!(p, PathBuf::from("/srv/files/index.html"));
    }

    #[test]
    fn nested_path_resolves_under_root() {
        let p = resolve(&root(), "/a/b/c.txt").unwrap();
        assert_eq!(p, PathBuf::from("/srv/files/a/b/c.txt"));
    }

    #[test]
    fn root_path_resolves_to_root() {
        let p = resolve(&root(), "/").unwrap();
        assert_eq!(p, root());
    }

    #[test]
    fn percent_encoded_name_is_decoded() {
        let p = resolve(&root(), "/hello%20world.txt").unwrap();
        assert_eq!(p, PathBuf::from("/srv/files/hello world.txt"));
    }

    #[test]
    fn parent_dir_is_forbidden() {
        let e = resolve(&root(), "/../../etc/passwd").unwrap_err();
        assert_eq!(e.http_status(), 403);
    }

    #[test]
    fn encoded_parent_dir_is_forbidden() {
        let e = resolve(&root(), "/%2e%2e/%2e%2e/etc/passwd").unwrap_err();
        assert_eq!(e.http_status(), 403);
    }

    #[test]
    fn parent_dir_in_the_middle_is_forbidden() {
        let e = resolve(&root(), "/sub/../../../etc/passwd").unwrap_err();
        assert_eq!(e.http_status(), 403);
    }

    #[test]
    fn nul_byte_is_forbidden() {
        let e = resolve(&root(), "/file%00.html").unwrap_err();
        assert_eq!(e.http_status(), 403);
    }

    #[test]
    fn cur_dir_segments_are_ignored() {
        let p = resolve(&root(), "/./a/./b.txt").unwrap();
        assert_eq!(p, PathBuf::from("/srv/files/a/b.txt"));
    }
}
