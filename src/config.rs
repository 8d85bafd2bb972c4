use crate::error::{Error, Result};
use crate::naming;
use std::path::PathBuf;

const DEFAULT_ICONS_DIR: &str = "icons";
const DEFAULT_OUTPUT_ROOT: &str = "fonts";
const DEFAULT_TEMPLATE_DIR: &str = "template";
const DEFAULT_GENERATOR_PROGRAM: &str = "svgtofont";
const DEFAULT_FORMATTER_PROGRAM: &str = "prettier";

/// Configuration for one iconsmith pipeline run.
///
/// Use [`Config::builder()`] to construct a new configuration. One run
/// processes exactly one project; the output directory derived from the
/// project name is exclusively owned by that run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Project name; selects `<icons_dir>/<project>` as the asset source
    pub project: String,

    /// Root directory holding one sub-directory of SVG assets per project
    pub icons_dir: PathBuf,

    /// Root directory for generated font packages
    pub output_root: PathBuf,

    /// Directory holding the component and stylesheet templates
    pub template_dir: PathBuf,

    /// Request the preview website from the generator and rewrite it
    pub preview: bool,

    /// Normalize SVG filenames under the icons root before running
    pub rename_assets: bool,

    /// Executable name of the external font generator
    pub generator_program: String,

    /// Executable name of the external formatter
    pub formatter_program: String,

    /// Skip the final formatting pass
    pub skip_format: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use iconsmith::Config;
    ///
    /// let config = Config::builder()
    ///     .project("arrow")
    ///     .icons_dir("./icons")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Only the argument shape is checked here; existence of the project
    /// source directory is a pipeline precondition so that an invalid
    /// invocation never touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if the project name is missing, numeric,
    /// or violates the naming convention.
    pub fn validate(&self) -> Result<()> {
        if self.project.is_empty() {
            return Err(Error::usage(
                "project name must be provided as the first argument",
            ));
        }

        if self.project.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::usage(format!(
                "project name '{}' must not be numeric",
                self.project
            )));
        }

        if !naming::PROJECT_NAME.is_match(&self.project) {
            return Err(Error::usage(format!(
                "project name '{}' must be lowercase alphanumeric segments joined by single hyphens",
                self.project
            )));
        }

        Ok(())
    }

    /// Directory containing the project's SVG source assets.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.icons_dir.join(&self.project)
    }

    /// Output directory owned by this run.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.project)
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    project: Option<String>,
    icons_dir: Option<PathBuf>,
    output_root: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    preview: bool,
    rename_assets: bool,
    generator_program: Option<String>,
    formatter_program: Option<String>,
    skip_format: bool,
}

impl ConfigBuilder {
    /// Sets the project name.
    #[must_use]
    pub fn project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    /// Sets the icons root directory.
    #[must_use]
    pub fn icons_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.icons_dir = Some(path.into());
        self
    }

    /// Sets the root directory for generated font packages.
    #[must_use]
    pub fn output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_root = Some(path.into());
        self
    }

    /// Sets the template directory.
    #[must_use]
    pub fn template_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(path.into());
        self
    }

    /// Enables or disables preview website generation and rewriting.
    #[must_use]
    pub fn preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    /// Enables or disables asset filename normalization before the run.
    #[must_use]
    pub fn rename_assets(mut self, enabled: bool) -> Self {
        self.rename_assets = enabled;
        self
    }

    /// Sets the external font generator executable.
    #[must_use]
    pub fn generator_program(mut self, program: impl Into<String>) -> Self {
        self.generator_program = Some(program.into());
        self
    }

    /// Sets the external formatter executable.
    #[must_use]
    pub fn formatter_program(mut self, program: impl Into<String>) -> Self {
        self.formatter_program = Some(program.into());
        self
    }

    /// Skips the final formatting pass.
    #[must_use]
    pub fn skip_format(mut self, enabled: bool) -> Self {
        self.skip_format = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            project: self.project.unwrap_or_default(),
            icons_dir: self
                .icons_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ICONS_DIR)),
            output_root: self
                .output_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
            template_dir: self
                .template_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            preview: self.preview,
            rename_assets: self.rename_assets,
            generator_program: self
                .generator_program
                .unwrap_or_else(|| DEFAULT_GENERATOR_PROGRAM.to_string()),
            formatter_program: self
                .formatter_program
                .unwrap_or_else(|| DEFAULT_FORMATTER_PROGRAM.to_string()),
            skip_format: self.skip_format,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::builder().project("arrow").build().unwrap();

        assert_eq!(config.project, "arrow");
        assert_eq!(config.icons_dir, PathBuf::from("icons"));
        assert_eq!(config.output_root, PathBuf::from("fonts"));
        assert_eq!(config.template_dir, PathBuf::from("template"));
        assert_eq!(config.generator_program, "svgtofont");
        assert!(!config.preview);
    }

    #[test]
    fn test_derived_directories() {
        let config = Config::builder()
            .project("arrow")
            .icons_dir("/srv/icons")
            .output_root("/srv/fonts")
            .build()
            .unwrap();

        assert_eq!(config.project_dir(), PathBuf::from("/srv/icons/arrow"));
        assert_eq!(config.output_dir(), PathBuf::from("/srv/fonts/arrow"));
    }

    #[test]
    fn test_missing_project_is_usage_error() {
        let err = Config::builder().build().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_numeric_project_is_usage_error() {
        let err = Config::builder().project("42").build().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_malformed_project_names_rejected() {
        for name in ["Arrow", "arrow--icons", "-arrow", "arrow_icons"] {
            let err = Config::builder().project(name).build().unwrap_err();
            assert!(err.is_usage(), "expected usage error for '{name}'");
        }
    }

    #[test]
    fn test_hyphenated_project_accepted() {
        let config = Config::builder().project("my-icons").build().unwrap();
        assert_eq!(config.project, "my-icons");
    }
}
