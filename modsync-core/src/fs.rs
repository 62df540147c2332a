//! File-system primitives used by the reconciler.
//!
//! Every function annotates I/O failures with the offending path
//! ([`CoreError::Io`]).

use std::ffi::OsString;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{io_err, CoreError};

/// Whether anything exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Create `dir` (and missing parents) if it does not exist.
///
/// If `dir` names an existing file, its parent directory is ensured instead.
/// Returns `true` if a directory was created.
pub fn ensure_dir(dir: &Path) -> Result<bool, CoreError> {
    let target = if dir.is_file() {
        match dir.parent() {
            Some(parent) => parent,
            None => return Ok(false),
        }
    } else {
        dir
    };

    if target.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(target).map_err(|e| io_err(target, e))?;
    Ok(true)
}

/// Names of the regular files under `dir`, sorted, for display and
/// comparison.
///
/// Non-recursive listings return bare file names. Recursive listings return
/// paths relative to `dir`, `/`-separated on every platform. Directories and
/// symlinks are never included, and names that are not valid UTF-8 are
/// converted lossily, so a returned name is not always a usable path. Use
/// [`file_names`] when the names will be joined back onto `dir`.
pub fn list_files(dir: &Path, recursive: bool) -> Result<Vec<String>, CoreError> {
    let mut walker = WalkDir::new(dir).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut names = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop"));
            io_err(path, source)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        // Every walked path starts with `dir`.
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Exact names of the top-level entries of `dir` that are files, sorted.
///
/// Symlinks count when they resolve to a file; dangling links and links to
/// directories are left out, as are directories themselves. Names are
/// returned unaltered, so `dir.join(name)` always addresses the entry.
pub fn file_names(dir: &Path) -> Result<Vec<OsString>, CoreError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop"));
            io_err(path, source)
        })?;
        let file_type = entry.file_type();
        let is_file = file_type.is_file()
            || (file_type.is_symlink()
                && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file()));
        if is_file {
            names.push(entry.file_name().to_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Remove the file at `path` if present.
///
/// An already-absent file is success. Returns `true` if a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, CoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_reports_creation_once() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("mods");
        assert!(ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_dir(&dir).unwrap());
    }

    #[test]
    fn ensure_dir_on_file_uses_parent() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("mod.jar");
        fs::write(&file, "x").unwrap();
        assert!(!ensure_dir(&file).unwrap());
    }

    #[test]
    fn flat_listing_skips_directories_and_nested_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.jar"), "b").unwrap();
        fs::write(tmp.path().join("a.jar"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join("config").join("c.toml"), "c").unwrap();

        let names = list_files(tmp.path(), false).unwrap();
        assert_eq!(names, vec!["a.jar", "b.jar"]);
    }

    #[test]
    fn recursive_listing_uses_relative_slash_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jar"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("config").join("deep")).unwrap();
        fs::write(tmp.path().join("config").join("deep").join("c.toml"), "c").unwrap();

        let names = list_files(tmp.path(), true).unwrap();
        assert_eq!(names, vec!["a.jar", "config/deep/c.toml"]);
    }

    #[test]
    fn listing_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = list_files(&tmp.path().join("nope"), false).unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }

    #[test]
    fn file_names_lists_top_level_files_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.jar"), "b").unwrap();
        fs::write(tmp.path().join("a.jar"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join("config").join("c.toml"), "c").unwrap();

        let names = file_names(tmp.path()).unwrap();
        assert_eq!(names, vec![OsString::from("a.jar"), OsString::from("b.jar")]);
    }

    #[cfg(unix)]
    #[test]
    fn file_names_keeps_non_utf8_names_exact() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let raw = std::ffi::OsStr::from_bytes(b"bad\xffname.jar");
        fs::write(tmp.path().join(raw), "x").unwrap();

        let names = file_names(tmp.path()).unwrap();
        assert_eq!(names, vec![raw.to_owned()]);
        assert!(tmp.path().join(&names[0]).is_file());
    }

    #[cfg(unix)]
    #[test]
    fn file_names_follows_symlinks_to_files_only() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("real.jar"), "r").unwrap();
        std::os::unix::fs::symlink(outside.path().join("real.jar"), tmp.path().join("link.jar"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("dir-link")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling.jar"))
            .unwrap();

        let names = file_names(tmp.path()).unwrap();
        assert_eq!(names, vec![OsString::from("link.jar")]);
        assert!(list_files(tmp.path(), false).unwrap().is_empty());
    }

    #[test]
    fn remove_if_exists_is_ok_when_absent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone.jar");
        assert!(!remove_if_exists(&path).unwrap());

        fs::write(&path, "x").unwrap();
        assert!(exists(&path));
        assert!(remove_if_exists(&path).unwrap());
        assert!(!exists(&path));
    }
}
