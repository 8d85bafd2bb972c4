use crate::{
    config::Config,
    css, emit,
    error::{Error, Result},
    format::{Formatter, NoopFormatter, PrettierCommand},
    generator::{FontGenerator, GenerationRequest, SvgToFontCommand},
    naming::ClassNaming,
    prepare, prune, rename,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Filename of the emitted component source.
pub(crate) const COMPONENT_FILE: &str = "index.tsx";

/// Filename of the emitted final stylesheet.
pub(crate) const STYLESHEET_FILE: &str = "iconfont.css";

/// Filename of the generator's preview page kept for rewriting.
pub(crate) const PREVIEW_PAGE: &str = "index.html";

/// Statistics collected during a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Project the run processed
    pub project: String,

    /// Number of icon classes extracted from the generated stylesheet
    pub icon_count: usize,

    /// Number of template files staged into the output directory
    pub files_staged: usize,

    /// Number of unwanted generated files removed
    pub files_removed: usize,

    /// Output directory path
    pub output_directory: String,

    /// Total execution time
    pub duration: Duration,

    /// Time spent inside the external font generator
    pub generate_duration: Duration,
}

impl PipelineReport {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════╗");
        println!("║           Icon Font Build Summary             ║");
        println!("╠═══════════════════════════════════════════════╣");
        println!("║ Project:          {:<27} ║", self.project);
        println!("║ Icon classes:     {:<27} ║", self.icon_count);
        println!("║ Files staged:     {:<27} ║", self.files_staged);
        println!("║ Files removed:    {:<27} ║", self.files_removed);
        println!(
            "║ Generation time:  {:<27} ║",
            format!("{:.2}s", self.generate_duration.as_secs_f64())
        );
        println!(
            "║ Total time:       {:<27} ║",
            format!("{:.2}s", self.duration.as_secs_f64())
        );
        println!("║ Output:                                       ║");
        println!("║   {:<43} ║", self.output_directory);
        println!("╚═══════════════════════════════════════════════╝\n");
    }
}

/// Orchestrates one icon-font build from SVG assets to final package.
///
/// The run is linear with no branching except fatal abort: any failing
/// step surfaces its error to the caller and nothing is retried or
/// rolled back. A failed run may leave the output directory in an
/// inconsistent state; the next run's preparation step restores a clean
/// slate by clearing the directory first. The output directory is
/// exclusively owned by the run; concurrent invocations targeting the
/// same project are unsafe (no locking is provided).
pub struct Pipeline {
    config: Config,
    generator: Box<dyn FontGenerator>,
    formatter: Box<dyn Formatter>,
}

impl Pipeline {
    /// Creates a pipeline with the default external collaborators
    /// configured by `config` (an `svgtofont`-style generator and a
    /// `prettier`-style formatter).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        let generator = Box::new(SvgToFontCommand::new(config.generator_program.clone()));
        let formatter: Box<dyn Formatter> = if config.skip_format {
            Box::new(NoopFormatter)
        } else {
            Box::new(PrettierCommand::new(config.formatter_program.clone()))
        };

        Self::with_collaborators(config, generator, formatter)
    }

    /// Creates a pipeline with injected collaborators.
    ///
    /// This is the library-level seam: tests and embedders supply their
    /// own generator and formatter implementations.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn with_collaborators(
        config: Config,
        generator: Box<dyn FontGenerator>,
        formatter: Box<dyn Formatter>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            generator,
            formatter,
        })
    }

    /// Executes the complete pipeline and returns run statistics.
    ///
    /// # Process
    ///
    /// 1. **Preconditions**: the project source directory must exist
    /// 2. **Prepare**: clear the output directory, stage templates
    /// 3. **Generate**: delegate font + raw stylesheet creation
    /// 4. **Analyze**: read the stylesheet, extract icon classes
    /// 5. **Prune**: delete unwanted generated artifacts
    /// 6. **Emit**: fill the component and stylesheet templates
    /// 7. **Preview** (optional): rewrite the generator's preview page
    /// 8. **Format**: delegate output formatting
    ///
    /// # Errors
    ///
    /// Returns the first error any stage produces; no stage is retried.
    #[instrument(skip(self), fields(project = %self.config.project))]
    pub fn run(self) -> Result<PipelineReport> {
        let start_time = Instant::now();
        let output_dir = self.config.output_dir();

        info!("Starting icon font build");

        if self.config.rename_assets {
            info!("Normalizing asset filenames...");
            rename::normalize_asset_names(&self.config.icons_dir)?;
        }

        info!("Checking preconditions...");
        self.check_preconditions()?;

        info!("Copying template files to {}", output_dir.display());
        let files_staged = prepare::prepare_output_dir(&output_dir, &self.config.template_dir)?;

        info!("Generating icon fonts...");
        let generate_start = Instant::now();
        let request = GenerationRequest::new(&self.config);
        self.generator.generate(&request)?;
        let generate_duration = generate_start.elapsed();

        info!("Parsing CSS icon classlist...");
        let css_text = css::read_generated_css(&output_dir, &self.config.project)?;
        let classes = css::extract_class_list(&css_text, &self.config.project);
        info!("Parsed CSS classes, total {}", classes.len());
        if classes.is_empty() {
            warn!(
                "No icon classes found in {}.css; the source directory may contain no usable svg files",
                self.config.project
            );
        }

        info!("Removing unwanted files...");
        let removed = prune::prune(&output_dir, &self.config.project, self.config.preview)?;

        info!("Generating component...");
        let naming = ClassNaming::new(&self.config.project)?;
        emit::emit_component(&output_dir.join(COMPONENT_FILE), &classes, &naming)?;

        info!("Generating CSS file...");
        emit::emit_stylesheet(&output_dir.join(STYLESHEET_FILE), &css_text, &self.config.project)?;

        if self.config.preview {
            info!("Rewriting preview page...");
            emit::rewrite_preview(&output_dir.join(PREVIEW_PAGE), &self.config.project)?;
        }

        info!("Formatting output directory...");
        self.formatter.format(&output_dir)?;

        let duration = start_time.elapsed();
        info!("Build completed in {:.2}s", duration.as_secs_f64());

        Ok(PipelineReport {
            project: self.config.project.clone(),
            icon_count: classes.len(),
            files_staged,
            files_removed: removed.len(),
            output_directory: output_dir.display().to_string(),
            duration,
            generate_duration,
        })
    }

    /// The project source directory must pre-exist as a directory.
    fn check_preconditions(&self) -> Result<()> {
        let project_dir = self.config.project_dir();

        if !project_dir.is_dir() {
            return Err(Error::precondition(format!(
                "'{}' is not a valid project directory",
                project_dir.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::fs;
    use std::path::Path;

    /// Writes the exact artifact set the external generator contract
    /// declares, with a caller-supplied raw stylesheet.
    struct FakeGenerator {
        css: String,
    }

    impl FontGenerator for FakeGenerator {
        fn generate(&self, request: &GenerationRequest) -> Result<()> {
            let artifacts = [
                "less", "module.less", "scss", "styl", "eot", "svg", "symbol.svg", "woff2",
                "ttf", "woff",
            ];
            for ext in artifacts {
                fs::write(
                    request.dist.join(format!("{}.{ext}", request.font_name)),
                    b"binary",
                )
                .map_err(|e| Error::io(&request.dist, e))?;
            }
            fs::write(
                request.dist.join(format!("{}.css", request.font_name)),
                &self.css,
            )
            .map_err(|e| Error::io(&request.dist, e))?;

            if request.website.is_some() {
                fs::write(
                    request.dist.join("index.html"),
                    format!(
                        "<link href=\"{0}.css\">\n<i class=\"{0}-up\"></i>\n",
                        request.font_name
                    ),
                )
                .map_err(|e| Error::io(&request.dist, e))?;
                fs::write(request.dist.join("unicode.html"), "<html/>")
                    .map_err(|e| Error::io(&request.dist, e))?;
            }

            Ok(())
        }
    }

    fn stage_workspace(temp: &assert_fs::TempDir, project: &str) {
        let icons = temp.child(format!("icons/{project}"));
        icons.create_dir_all().unwrap();
        icons.child("up.svg").write_str("<svg/>").unwrap();

        let templates = temp.child("template");
        templates.create_dir_all().unwrap();
        templates
            .child("index.tsx.template")
            .write_str("export enum IconClass {\n{{ members }}\n}\n")
            .unwrap();
        templates
            .child("iconfont.css.template")
            .write_str("@font-face { src: {{ import_source }}; }\n{{ rules }}\n")
            .unwrap();
    }

    fn test_config(root: &Path, project: &str, preview: bool) -> Config {
        Config::builder()
            .project(project)
            .icons_dir(root.join("icons"))
            .output_root(root.join("fonts"))
            .template_dir(root.join("template"))
            .preview(preview)
            .build()
            .unwrap()
    }

    fn run_pipeline(config: Config, css: &str) -> Result<PipelineReport> {
        Pipeline::with_collaborators(
            config,
            Box::new(FakeGenerator {
                css: css.to_string(),
            }),
            Box::new(NoopFormatter),
        )?
        .run()
    }

    const ARROW_CSS: &str = concat!(
        ".arrow-up:before { content: \"\\ea01\"; }\n",
        ".arrow-arrowdown:before { content: \"\\ea02\"; }\n",
    );

    #[test]
    fn test_full_run_produces_final_artifact_set() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        let report = run_pipeline(test_config(temp.path(), "arrow", false), ARROW_CSS).unwrap();

        assert_eq!(report.icon_count, 2);
        assert_eq!(report.files_staged, 2);
        assert_eq!(report.files_removed, 9);

        let output = temp.child("fonts/arrow");
        let mut entries: Vec<String> = fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(
            entries,
            vec!["arrow.ttf", "arrow.woff", "iconfont.css", "index.tsx"]
        );

        let component = fs::read_to_string(output.child("index.tsx").path()).unwrap();
        assert!(component.contains("UP = \"arrow-up\","));
        assert!(component.contains("ARROWDOWN = \"arrow-arrowdown\","));

        let stylesheet = fs::read_to_string(output.child("iconfont.css").path()).unwrap();
        assert!(stylesheet.contains(".g-arrow-icon.arrow-up:before"));
        assert!(stylesheet.contains(r#"url("./arrow.ttf") format("truetype")"#));
    }

    #[test]
    fn test_member_order_matches_stylesheet_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        let css = ".arrow-zebra:before { content: \"a\"; }\n.arrow-alpha:before { content: \"b\"; }\n";
        run_pipeline(test_config(temp.path(), "arrow", false), css).unwrap();

        let component =
            fs::read_to_string(temp.child("fonts/arrow/index.tsx").path()).unwrap();
        let zebra = component.find("ZEBRA").unwrap();
        let alpha = component.find("ALPHA").unwrap();
        assert!(zebra < alpha);
    }

    #[test]
    fn test_runs_are_byte_deterministic() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        run_pipeline(test_config(temp.path(), "arrow", false), ARROW_CSS).unwrap();
        let first_component =
            fs::read_to_string(temp.child("fonts/arrow/index.tsx").path()).unwrap();
        let first_stylesheet =
            fs::read_to_string(temp.child("fonts/arrow/iconfont.css").path()).unwrap();

        run_pipeline(test_config(temp.path(), "arrow", false), ARROW_CSS).unwrap();
        let second_component =
            fs::read_to_string(temp.child("fonts/arrow/index.tsx").path()).unwrap();
        let second_stylesheet =
            fs::read_to_string(temp.child("fonts/arrow/iconfont.css").path()).unwrap();

        assert_eq!(first_component, second_component);
        assert_eq!(first_stylesheet, second_stylesheet);
    }

    #[test]
    fn test_preview_run_rewrites_kept_page() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        run_pipeline(test_config(temp.path(), "arrow", true), ARROW_CSS).unwrap();

        let output = temp.child("fonts/arrow");
        assert!(!output.child("unicode.html").exists());

        let page = fs::read_to_string(output.child("index.html").path()).unwrap();
        assert!(page.contains("iconfont.css"));
        assert!(page.contains(
            "<i class=\"g-arrow-icon arrow-up\" style=\"font-size: 32px\"></i>"
        ));
    }

    #[test]
    fn test_missing_project_directory_is_precondition_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        let err = run_pipeline(test_config(temp.path(), "chart", false), ARROW_CSS).unwrap_err();
        assert!(matches!(err, Error::Precondition { .. }));
    }

    #[test]
    fn test_naming_violation_aborts_without_component() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        let css = ".arrow-up:before { content: \"a\"; }\n.arrow-Bad:before { content: \"b\"; }\n";
        let err = run_pipeline(test_config(temp.path(), "arrow", false), css).unwrap_err();

        assert!(err.is_naming());
        // The staged component template must not have been rendered.
        let component =
            fs::read_to_string(temp.child("fonts/arrow/index.tsx").path()).unwrap();
        assert!(component.contains("{{ members }}"));
    }

    #[test]
    fn test_rename_step_feeds_generation() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");
        let icons = temp.child("icons/arrow");
        icons.child("Arrow Up.svg").write_str("<svg/>").unwrap();
        icons.child("arrow&down.svg").write_str("<svg/>").unwrap();

        let config = Config::builder()
            .project("arrow")
            .icons_dir(temp.path().join("icons"))
            .output_root(temp.path().join("fonts"))
            .template_dir(temp.path().join("template"))
            .rename_assets(true)
            .build()
            .unwrap();

        // Classes as produced by a generator that names glyphs after the
        // normalized file stems.
        let css = ".arrow-arrow-up:before { content: \"a\"; }\n.arrow-arrowdown:before { content: \"b\"; }\n";
        run_pipeline(config, css).unwrap();

        assert!(icons.child("arrow-up.svg").exists());
        assert!(icons.child("arrowdown.svg").exists());

        let component =
            fs::read_to_string(temp.child("fonts/arrow/index.tsx").path()).unwrap();
        assert!(component.contains("ARROW_UP = \"arrow-arrow-up\","));
        assert!(component.contains("ARROWDOWN = \"arrow-arrowdown\","));
    }

    #[test]
    fn test_report_serializes() {
        let temp = assert_fs::TempDir::new().unwrap();
        stage_workspace(&temp, "arrow");

        let report = run_pipeline(test_config(temp.path(), "arrow", false), ARROW_CSS).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"icon_count\":2"));
    }
}
