use crate::error::Error;
use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Turn a user supplied path into an absolute, symlink-free path naming an
/// existing regular file.
///
/// Symlink resolution is best effort: if it fails the lexically cleaned
/// absolute path is used instead.
pub fn normalize(input: &Path) -> Result<PathBuf, Error> {
    let absolute = make_absolute(input)?;

    let resolved = match fs::canonicalize(&absolute) {
        Ok(path) => path,
        Err(err) => {
            debug!("Could not resolve symlinks in {}: {}", absolute.display(), err);
            absolute
        }
    };

    let metadata = match fs::metadata(&resolved) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound(resolved));
        }
        Err(source) => {
            return Err(Error::PathResolution {
                path: resolved,
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(Error::NotRegularFile(resolved));
    }

    Ok(resolved)
}

/// Path of `file` below `root`. Pure path arithmetic, no filesystem access.
pub fn relative_to(root: &Path, file: &Path) -> Result<PathBuf, Error> {
    match file.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => Ok(relative.to_path_buf()),
        _ => Err(Error::RelativePath {
            file: file.to_path_buf(),
            root: root.to_path_buf(),
        }),
    }
}

fn make_absolute(input: &Path) -> Result<PathBuf, Error> {
    if input.is_absolute() {
        return Ok(clean(input));
    }
    let cwd = env::current_dir().map_err(|source| Error::PathResolution {
        path: input.to_path_buf(),
        source,
    })?;
    Ok(clean(&cwd.join(input)))
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem. `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component.as_os_str());
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_clean_folds_dot_components() {
        assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_relative_to() {
        let relative = relative_to(Path::new("/tank/home"), Path::new("/tank/home/rob/notes.txt"));
        assert_eq!(relative.unwrap(), PathBuf::from("rob/notes.txt"));
    }

    #[test]
    fn test_relative_to_outside_root() {
        let err = relative_to(Path::new("/tank/home"), Path::new("/var/notes.txt")).unwrap_err();
        assert!(matches!(err, Error::RelativePath { .. }));
    }

    #[test]
    fn test_relative_to_does_not_match_partial_component() {
        let err = relative_to(Path::new("/tank/ho"), Path::new("/tank/home/notes.txt")).unwrap_err();
        assert!(matches!(err, Error::RelativePath { .. }));
    }

    #[test]
    fn test_normalize_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let normalized = normalize(&file).unwrap();
        assert_eq!(normalized, fs::canonicalize(&file).unwrap());
    }

    #[test]
    fn test_normalize_cleans_before_resolving() {
        // `sub` does not exist; `..` is folded lexically before any lookup.
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let normalized = normalize(&dir.path().join("./sub/../a.txt")).unwrap();
        assert_eq!(normalized, fs::canonicalize(&file).unwrap());
    }

    #[test]
    fn test_normalize_missing_file() {
        let dir = tempdir().unwrap();
        let err = normalize(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_normalize_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let err = normalize(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotRegularFile(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_resolves_symlinks() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, "real").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let normalized = normalize(&link).unwrap();
        assert_eq!(normalized, fs::canonicalize(&target).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_symlink_to_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real_dir");
        let link = dir.path().join("link");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = normalize(&link).unwrap_err();
        assert!(matches!(err, Error::NotRegularFile(_)));
    }
}
