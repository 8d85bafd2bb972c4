//! # iconsmith
//!
//! Converts a directory of SVG icon assets into a distributable
//! icon-font package: font binaries, a namespaced stylesheet and a typed
//! component enum, generated for one named project per run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use iconsmith::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .project("arrow")
//!     .icons_dir("./icons")
//!     .output_root("./fonts")
//!     .build()?;
//!
//! let report = Pipeline::new(config)?.run()?;
//! report.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is a linear pipeline with fatal-abort semantics:
//! 1. **Preconditions**: the project's asset directory must exist
//! 2. **Prepare**: clear the output directory and stage templates
//! 3. **Generate**: delegate glyph rasterization to an external program
//! 4. **Analyze**: extract the icon class list from the generated CSS
//! 5. **Prune**: delete unwanted intermediate artifacts
//! 6. **Emit**: fill the component and stylesheet templates
//! 7. **Format**: delegate output formatting to an external program
//!
//! ## Usage contract of the emitted stylesheet
//!
//! Every icon rule is namespaced as `.g-<project>-icon.<class>`:
//! consumers must put the namespace class and the icon class on the
//! same element, e.g. `<i class="g-arrow-icon arrow-up"></i>`.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod css;
mod emit;
mod error;
mod format;
mod generator;
mod naming;
mod pipeline;
mod prepare;
mod prune;
mod rename;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use format::{Formatter, NoopFormatter, PrettierCommand};
pub use generator::{FontGenerator, GenerationRequest, SvgToFontCommand, WebsiteOptions};
pub use naming::ClassNaming;
pub use pipeline::{Pipeline, PipelineReport};
pub use rename::normalize_asset_names;

/// Runs the complete generation pipeline with the given configuration
/// and the default external collaborators.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The project source directory doesn't exist
/// - The external generator or formatter fails
/// - An icon class violates the naming convention
/// - A generated artifact expected by the pipeline is missing
///
/// # Examples
///
/// ```no_run
/// use iconsmith::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .project("arrow")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineReport> {
    Pipeline::new(config)?.run()
}
