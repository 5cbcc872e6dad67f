//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/blog/records/2021/  ← cwd
/// /home/user/blog/folio.toml     ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

/// Expand `~` and resolve a relative path against `root`.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("records/2021");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("folio.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("folio.toml")).unwrap();
        assert_eq!(found, dir.path().join("folio.toml"));
        assert!(find_config_from(&nested, Path::new("missing.toml")).is_none());
    }

    #[test]
    fn test_absolute_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file(&path).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path), Some(path));
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/srv/blog");
        assert_eq!(resolve_path(Path::new("content"), root), root.join("content"));
        assert_eq!(resolve_path(Path::new("/data"), root), PathBuf::from("/data"));

        let home = resolve_path(Path::new("~/posts"), root);
        assert!(!home.starts_with("~"));
        assert!(home.ends_with("posts"));
    }
}
