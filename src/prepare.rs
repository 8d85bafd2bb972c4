use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Guarantees a clean output directory and stages template files into it.
///
/// The output directory is removed and recreated, so a failed previous
/// run cannot leak stale artifacts into this one. Every regular file in
/// `template_dir` is then copied over, with a trailing `.template`
/// stripped from the destination name. Returns the number of staged
/// files.
///
/// # Errors
///
/// Returns [`Error::Io`] if either directory is inaccessible or a copy
/// fails.
pub(crate) fn prepare_output_dir(output_dir: &Path, template_dir: &Path) -> Result<usize> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut staged = 0;

    for entry in fs::read_dir(template_dir).map_err(|e| Error::io(template_dir, e))? {
        let entry = entry.map_err(|e| Error::io(template_dir, e))?;
        let source = entry.path();
        if !source.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        let dest_name = name.strip_suffix(".template").unwrap_or(&name);
        let dest = output_dir.join(dest_name);

        fs::copy(&source, &dest).map_err(|e| Error::io(&source, e))?;
        debug!("Staged {} -> {}", source.display(), dest.display());
        staged += 1;
    }

    Ok(staged)
}
