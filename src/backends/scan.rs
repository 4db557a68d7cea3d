//! File matching backend
//!
//! Walks the root with walkdir and keeps every regular file accepted by the
//! configured predicate. Dotfiles are included, ignore files are not consulted
//! and symlinks are never followed or returned.

use log::{debug, trace};
use std::path::Path;
use walkdir::WalkDir;

use crate::core::error::Result;
use crate::core::model::RelativePath;
use crate::core::options::{FileMatch, VfsOptions};
use crate::core::paths::make_relative;

/// Relative posix paths of all files under `opts.dir_path` that match
///
/// Fails with `InvalidArguments` when both extensions and a predicate are set.
/// The result is sorted so that unchanged directories give identical output.
pub fn match_file_paths(opts: &VfsOptions) -> Result<Vec<RelativePath>> {
    let matcher = opts.matcher()?;
    scan_files(&opts.dir_path, matcher.as_ref())
}

/// Scan files in a directory, keeping those `matcher` accepts
pub fn scan_files(root: &Path, matcher: &dyn FileMatch) -> Result<Vec<RelativePath>> {
    debug!("Scanning {}", root.display());

    let mut paths = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match make_relative(entry.path(), root) {
            Some(r) if !r.is_empty() => r,
            _ => continue,
        };

        if matcher.matches(&relative, entry.path()) {
            trace!("Matched {}", relative);
            paths.push(relative);
        }
    }

    paths.sort();
    debug!("Matched {} files under {}", paths.len(), root.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::VfsError;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = tempdir().unwrap();
        let result = match_file_paths(&VfsOptions::new(temp.path())).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_with_extensions() {
        let temp = tempdir().unwrap();
        write(temp.path(), "file1.txt", "this is file1 content");
        write(temp.path(), "file2.js", "console.log(\"hello world\")");
        write(temp.path(), "file3.png", "should not include");

        let opts = VfsOptions::new(temp.path()).with_extensions(["txt", "js"]);
        let result = match_file_paths(&opts).unwrap();
        assert_eq!(result, vec!["file1.txt", "file2.js"]);
    }

    #[test]
    fn test_scan_nested_uses_forward_slashes() {
        let temp = tempdir().unwrap();
        write(temp.path(), "nested/file1.txt", "nested file1 content");
        write(temp.path(), "nested/deeper/file2.js", "console.log(\"nested\")");

        let opts = VfsOptions::new(temp.path()).with_extensions(["txt", "js"]);
        let result = match_file_paths(&opts).unwrap();
        assert_eq!(result, vec!["nested/deeper/file2.js", "nested/file1.txt"]);
        assert!(result.iter().all(|p| !p.contains('\\') && !p.starts_with('/')));
    }

    #[test]
    fn test_scan_includes_dotfiles_excludes_dirs() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".env", "SECRET=1");
        write(temp.path(), ".config/settings.json", "{}");
        fs::create_dir_all(temp.path().join("empty_dir")).unwrap();

        let result = match_file_paths(&VfsOptions::new(temp.path())).unwrap();
        assert_eq!(result, vec![".config/settings.json", ".env"]);
    }

    #[test]
    fn test_scan_extension_is_suffix_and_case_sensitive() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("a.sql")).unwrap();
        File::create(temp.path().join("b.SQL")).unwrap();
        File::create(temp.path().join("sql")).unwrap();
        File::create(temp.path().join("c.mysql")).unwrap();

        let opts = VfsOptions::new(temp.path()).with_extensions(["sql"]);
        assert_eq!(match_file_paths(&opts).unwrap(), vec!["a.sql"]);
    }

    #[test]
    fn test_scan_custom_predicate() {
        let temp = tempdir().unwrap();
        write(temp.path(), "keep/a.txt", "a");
        write(temp.path(), "drop/b.txt", "b");

        let opts = VfsOptions::new(temp.path())
            .with_file_match(|relative: &str, absolute: &Path| {
                absolute.is_file() && relative.starts_with("keep/")
            });
        assert_eq!(match_file_paths(&opts).unwrap(), vec!["keep/a.txt"]);
    }

    #[test]
    fn test_scan_rejects_extensions_and_predicate() {
        let temp = tempdir().unwrap();
        let opts = VfsOptions::new(temp.path())
            .with_extensions(["txt"])
            .with_file_match(|_: &str, _: &Path| true);
        assert!(matches!(
            match_file_paths(&opts),
            Err(VfsError::InvalidArguments)
        ));
    }

    #[test]
    fn test_scan_missing_dir() {
        let temp = tempdir().unwrap();
        let opts = VfsOptions::new(temp.path().join("does-not-exist"));
        assert!(matches!(match_file_paths(&opts), Err(VfsError::Walk(_))));
    }

    #[test]
    fn test_scan_is_sorted() {
        let temp = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "sub/zz.md", "C.txt"] {
            write(temp.path(), name, name);
        }
        let result = match_file_paths(&VfsOptions::new(temp.path())).unwrap();
        assert_eq!(result, vec!["C.txt", "a.txt", "b.txt", "sub/zz.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let temp = tempdir().unwrap();
        write(temp.path(), "real.txt", "real");
        write(temp.path(), "dir/inner.txt", "inner");
        std::os::unix::fs::symlink(temp.path().join("real.txt"), temp.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(temp.path().join("dir"), temp.path().join("linked_dir")).unwrap();

        let result = match_file_paths(&VfsOptions::new(temp.path())).unwrap();
        assert_eq!(result, vec!["dir/inner.txt", "real.txt"]);
    }
}
