//! Path helpers for bucket keys and CDN paths.
//!
//! Bucket keys and invalidation paths always use forward slashes, regardless
//! of the host platform; these helpers keep that normalization in one place.

use jwalk::WalkDir;
use std::path::Path;

/// Join path segments with `/`, skipping empty segments and collapsing
/// duplicate separators. Leading/trailing slashes on segments are preserved
/// only at the outer edges (`join(&["/", "a/", "b"])` is `/a/b`).
pub fn posix_join(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push_str(segment);
            continue;
        }
        let trimmed = segment.trim_start_matches('/');
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(trimmed);
    }
    out
}

/// Render a relative path with forward slashes.
pub fn forward_slashes(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

/// List all files under `root` as forward-slash relative paths, sorted.
///
/// Sorting makes every downstream digest deterministic regardless of
/// filesystem enumeration order. A missing root yields an empty list; the
/// copy manifest may name directories the build did not produce.
///
/// Dotfiles are included: build output regularly carries entries like
/// `.well-known/`, and jwalk skips hidden files unless told otherwise.
pub fn relative_files_sorted(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<String> = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = e.path();
            let rel = path.strip_prefix(root).ok()?;
            Some(forward_slashes(rel))
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_posix_join() {
        assert_eq!(posix_join(&["/", "assets", "_dist", "*"]), "/assets/_dist/*");
        assert_eq!(posix_join(&["/", "", "_dist", "*"]), "/_dist/*");
        assert_eq!(posix_join(&["_dist", "**"]), "_dist/**");
        assert_eq!(posix_join(&["", ""]), "");
        assert_eq!(posix_join(&["a/", "b"]), "a/b");
    }

    #[test]
    fn test_relative_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
        fs::write(dir.path().join(".hidden"), "h").unwrap();

        let files = relative_files_sorted(dir.path());
        assert_eq!(files, vec![".hidden", "a.txt", "b.txt", "sub/c.txt"]);
    }

    #[test]
    fn test_relative_files_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(relative_files_sorted(&dir.path().join("nope")).is_empty());
    }
}
