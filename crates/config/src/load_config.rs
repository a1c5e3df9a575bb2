// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::constants::files::CONFIG_DIR_NAME;
use path_clean::clean;
use std::path::{Path, PathBuf};

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Walks from `start` up to the filesystem root looking for `filename`.
pub fn find_in_parent(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// `~/.config/pqdevkit` on linux, or the platform equivalent.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Picks the configuration file to read.
///
/// An explicit file wins (relative paths are taken from `cwd`), then the nearest
/// `filename` in `cwd` or one of its parents, then `filename` in the default
/// configuration directory.
pub fn resolve_config_path(
    find: FindInParent,
    cwd: &Path,
    default_config_dir: &Path,
    filename: &str,
    cli_file: Option<&Path>,
) -> PathBuf {
    match cli_file {
        Some(file) if file.is_absolute() => file.to_path_buf(),
        Some(file) => clean(cwd.join(file)),
        None => find(cwd, filename).unwrap_or_else(|| clean(default_config_dir.join(filename))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn not_found(_: &Path, _: &str) -> Option<PathBuf> {
        None
    }

    fn found(_: &Path, _: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/work/pqdevkit.config.yaml"))
    }

    #[test]
    fn test_resolve_order() -> Result<()> {
        let cwd = Path::new("/work/project");
        let default_dir = Path::new("/home/me/.config/pqdevkit");
        let name = "pqdevkit.config.yaml";

        let path = resolve_config_path(not_found, cwd, default_dir, name, None);
        assert_eq!(path, default_dir.join(name));

        let path = resolve_config_path(found, cwd, default_dir, name, None);
        assert_eq!(path, PathBuf::from("/work/pqdevkit.config.yaml"));

        // an explicit file overrides the search
        let path = resolve_config_path(
            found,
            cwd,
            default_dir,
            name,
            Some(Path::new("/etc/ring.yaml")),
        );
        assert_eq!(path, PathBuf::from("/etc/ring.yaml"));

        let path = resolve_config_path(
            found,
            cwd,
            default_dir,
            name,
            Some(Path::new("../conf/./ring.yaml")),
        );
        assert_eq!(path, PathBuf::from("/work/conf/ring.yaml"));
        Ok(())
    }

    #[test]
    fn test_find_in_parent() -> Result<()> {
        let root = tempdir()?;
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        fs::write(root.path().join("a").join("ring.yaml"), "degree: 4\n")?;

        assert_eq!(
            find_in_parent(&nested, "ring.yaml"),
            Some(root.path().join("a").join("ring.yaml"))
        );
        assert_eq!(find_in_parent(&nested, "missing-ring-config.yaml"), None);
        Ok(())
    }
}
