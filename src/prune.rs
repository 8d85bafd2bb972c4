use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stylesheet dialects the generator emits that the final package does
/// not ship. The raw `css` is read into memory before this step runs.
const STYLESHEET_VARIANTS: [&str; 5] = ["css", "less", "module.less", "scss", "styl"];

/// Font container formats the final package does not ship; TrueType and
/// WOFF stay.
const FONT_VARIANTS: [&str; 4] = ["eot", "svg", "symbol.svg", "woff2"];

/// Auxiliary preview pages removed when the run requested a website;
/// `index.html` is kept for rewriting.
const PREVIEW_AUX_PAGES: [&str; 1] = ["unicode.html"];

/// Deletes the fixed set of generated-but-unwanted files.
///
/// Every target must exist: the pipeline configures the generator's
/// output shape exactly, so a missing target means the generator broke
/// its contract and the run must stop rather than ship an unexpected
/// artifact set. Returns the removed paths.
///
/// # Errors
///
/// Returns [`Error::Io`] if any deletion target is missing or cannot be
/// removed.
pub(crate) fn prune(output_dir: &Path, project: &str, preview: bool) -> Result<Vec<PathBuf>> {
    let mut targets: Vec<PathBuf> = STYLESHEET_VARIANTS
        .iter()
        .chain(FONT_VARIANTS.iter())
        .map(|ext| output_dir.join(format!("{project}.{ext}")))
        .collect();

    if preview {
        targets.extend(PREVIEW_AUX_PAGES.iter().map(|page| output_dir.join(page)));
    }

    for target in &targets {
        fs::remove_file(target).map_err(|e| Error::io(target, e))?;
        debug!("Removed {}", target.display());
    }

    Ok(targets)
}
