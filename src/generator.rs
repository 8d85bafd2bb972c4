use crate::config::Config;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Glyph height passed to the generator for every project. Fixed so that
/// icon metrics stay visually consistent across projects.
const FONT_HEIGHT: u32 = 1000;

/// Options for the auxiliary preview website.
#[derive(Debug, Clone)]
pub struct WebsiteOptions {
    /// Page title shown on the preview site
    pub title: String,
}

/// One generation order handed to the external font generator.
///
/// The request is fixed per run: source and destination directories, the
/// font name, and rasterization options that are invariant across all
/// projects.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Directory containing the project's SVG assets
    pub src: PathBuf,

    /// Directory the generator writes its artifacts into
    pub dist: PathBuf,

    /// Font family name, equal to the project name
    pub font_name: String,

    /// Emit a raw stylesheet alongside the font binaries
    pub css: bool,

    /// Glyph height in font units
    pub font_height: u32,

    /// Normalize glyph shapes to a common baseline
    pub normalize: bool,

    /// Preview website options, when the run requests one
    pub website: Option<WebsiteOptions>,
}

impl GenerationRequest {
    /// Builds the request for a run from its configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            src: config.project_dir(),
            dist: config.output_dir(),
            font_name: config.project.clone(),
            css: true,
            font_height: FONT_HEIGHT,
            normalize: true,
            website: config.preview.then(|| WebsiteOptions {
                title: config.project.clone(),
            }),
        }
    }
}

/// Delegation boundary for font generation.
///
/// The pipeline treats generation as opaque: the only contract is that
/// on success the declared artifact set exists in the destination
/// directory.
pub trait FontGenerator {
    /// Generates font binaries and the raw stylesheet for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the generator fails.
    fn generate(&self, request: &GenerationRequest) -> Result<()>;
}

/// Runs an external `svgtofont`-style command-line generator.
#[derive(Debug, Clone)]
pub struct SvgToFontCommand {
    program: String,
}

impl SvgToFontCommand {
    /// Creates an adapter invoking the given executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl FontGenerator for SvgToFontCommand {
    fn generate(&self, request: &GenerationRequest) -> Result<()> {
        let mut command = Command::new(&self.program);
        command
            .arg("--sources")
            .arg(&request.src)
            .arg("--output")
            .arg(&request.dist)
            .arg("--fontName")
            .arg(&request.font_name)
            .arg("--height")
            .arg(request.font_height.to_string());

        if request.css {
            command.arg("--css");
        }
        if request.normalize {
            command.arg("--normalize");
        }
        if let Some(website) = &request.website {
            command.arg("--website-title").arg(&website.title);
        }

        debug!("Running font generator: {command:?}");

        let status = command.status().map_err(|e| {
            Error::generation(format!("failed to run `{}`: {e}", self.program))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::generation(format!(
                "`{}` exited with {status}",
                self.program
            )))
        }
    }
}
