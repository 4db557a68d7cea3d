//! Path normalization utilities
//!
//! Ensures all paths are normalized to use '/' as separator and are relative to root.

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

static DRIVE_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]:").expect("Invalid DRIVE_LETTER_RE regex"));

static FINAL_EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^./]+$").expect("Invalid FINAL_EXTENSION_RE regex"));

/// Normalize a path string to posix style: no drive letter, '/' separators only
pub fn to_posix(path: &str) -> String {
    DRIVE_LETTER_RE.replace(path, "").replace('\\', "/")
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    to_posix(&path.to_string_lossy())
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Join a posix relative path onto a host path
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// Strip the final extension segment (`routes/index.ts` -> `routes/index`)
///
/// Dotfiles without a further extension lose their whole name, as a plain
/// "last dot onwards" rule would do.
pub fn strip_extension(path: &str) -> String {
    FINAL_EXTENSION_RE.replace(path, "").into_owned()
}

/// Fold `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root, as `/..` names `/`.
pub fn resolve_lexically(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match resolved.components().next_back() {
                Some(Component::Normal(_)) => {
                    resolved.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => resolved.push(".."),
            },
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Posix path from the directory holding `target` to `dir`
///
/// Both sides are made absolute against the current directory and resolved
/// lexically first, so a relative `dir` and a `../gen/vfs.ts` style `target`
/// still line up. An absolute `dir` is returned only when no relative path
/// exists (different drive prefixes).
pub fn relative_base(dir: &Path, target: &Path) -> std::io::Result<String> {
    let dir = resolve_lexically(&std::path::absolute(dir)?);
    let target = resolve_lexically(&std::path::absolute(target)?);
    let target_dir = target.parent().unwrap_or(&target);

    let base = pathdiff::diff_paths(&dir, target_dir).unwrap_or(dir);
    Ok(normalize_path(&base))
}

/// Build an import specifier for `relative` given the base from [`relative_base`]
pub fn import_specifier(base: &str, relative: &str) -> String {
    let joined = if base.is_empty() || base == "." {
        relative.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), relative)
    };

    if joined.starts_with("../") || joined.starts_with('/') {
        joined
    } else {
        format!("./{}", joined)
    }
}
