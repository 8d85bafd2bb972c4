use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Normalizes SVG asset filenames under the icons root.
///
/// For every project sub-directory, each `*.svg` file is renamed so that
/// its stem is lowercase, `&` characters are dropped and spaces become
/// hyphens (`Arrow Up.svg` → `arrow-up.svg`, `arrow&down.svg` →
/// `arrowdown.svg`). Files whose names are already normalized are left
/// untouched. Returns the number of files renamed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the icons root or a project directory cannot
/// be read, or a rename fails.
pub fn normalize_asset_names(icons_dir: &Path) -> Result<usize> {
    info!("Scanning {} for svg files to rename", icons_dir.display());

    let mut renamed = 0;

    for entry in fs::read_dir(icons_dir).map_err(|e| Error::io(icons_dir, e))? {
        let entry = entry.map_err(|e| Error::io(icons_dir, e))?;
        let project_dir = entry.path();
        if !project_dir.is_dir() {
            continue;
        }

        renamed += normalize_project_dir(&project_dir)?;
    }

    info!("All assets have been renamed ({renamed} changed)");
    Ok(renamed)
}

fn normalize_project_dir(project_dir: &Path) -> Result<usize> {
    debug!("Scanning {} for svg files", project_dir.display());

    let mut renamed = 0;

    for entry in fs::read_dir(project_dir).map_err(|e| Error::io(project_dir, e))? {
        let entry = entry.map_err(|e| Error::io(project_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(".svg") else {
            continue;
        };

        let normalized = normalize_stem(stem);
        if normalized == stem {
            continue;
        }

        let target = project_dir.join(format!("{normalized}.svg"));
        info!("Rename {stem} -> {normalized}");
        fs::rename(&path, &target).map_err(|e| Error::io(&path, e))?;
        renamed += 1;
    }

    Ok(renamed)
}

fn normalize_stem(stem: &str) -> String {
    stem.to_lowercase().replace('&', "").replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_normalize_stem() {
        assert_eq!(normalize_stem("Arrow Up"), "arrow-up");
        assert_eq!(normalize_stem("arrow&down"), "arrowdown");
        assert_eq!(normalize_stem("already-fine"), "already-fine");
    }

    #[test]
    fn test_renames_denormalized_assets() {
        let temp = assert_fs::TempDir::new().unwrap();
        let project = temp.child("arrow");
        project.create_dir_all().unwrap();
        project.child("Arrow Up.svg").write_str("<svg/>").unwrap();
        project.child("arrow&down.svg").write_str("<svg/>").unwrap();
        project.child("left.svg").write_str("<svg/>").unwrap();

        let renamed = normalize_asset_names(temp.path()).unwrap();

        assert_eq!(renamed, 2);
        assert!(project.child("arrow-up.svg").exists());
        assert!(project.child("arrowdown.svg").exists());
        assert!(project.child("left.svg").exists());
        assert!(!project.child("Arrow Up.svg").exists());
    }

    #[test]
    fn test_ignores_non_svg_files_and_plain_files_at_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("README.md").write_str("not a project").unwrap();
        let project = temp.child("arrow");
        project.create_dir_all().unwrap();
        project.child("Notes.txt").write_str("keep me").unwrap();

        let renamed = normalize_asset_names(temp.path()).unwrap();

        assert_eq!(renamed, 0);
        assert!(project.child("Notes.txt").exists());
    }

    #[test]
    fn test_missing_icons_root_is_io_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = normalize_asset_names(&missing).unwrap_err();
        assert!(err.is_io());
    }
}
