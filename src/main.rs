use anyhow::Context;
use clap::Parser;
use iconsmith::{Config, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "iconsmith",
    version,
    about = "Convert SVG icon sets into icon-font packages",
    long_about = "Convert a project's SVG icon assets into a distributable icon-font package: \
    font binaries, a namespaced stylesheet and a typed component enum.\n\n\
    The project name selects <icons-dir>/<project> as the asset source and \
    <out-dir>/<project> as the output directory, which is cleared at the start of every run.\n\n\
    USAGE EXAMPLES:\n  \
      # Build the 'arrow' icon set\n  \
      iconsmith arrow\n\n  \
      # Normalize asset filenames first, then build with a preview page\n  \
      iconsmith arrow --rename --preview\n\n  \
      # Use project directories outside the working directory\n  \
      iconsmith arrow --icons-dir ./assets/icons --out-dir ./dist/fonts"
)]
struct Cli {
    /// Project name; must match a sub-directory of the icons root
    #[arg(value_name = "PROJECT")]
    project: Option<String>,

    /// Root directory holding one sub-directory of SVG assets per project
    #[arg(long, default_value = "icons", value_name = "PATH")]
    icons_dir: PathBuf,

    /// Root directory for generated font packages
    #[arg(long, default_value = "fonts", value_name = "PATH")]
    out_dir: PathBuf,

    /// Directory holding the component and stylesheet templates
    #[arg(long, default_value = "template", value_name = "PATH")]
    template_dir: PathBuf,

    /// Request the generator's preview website and rewrite it against
    /// the final artifact set
    #[arg(long)]
    preview: bool,

    /// Normalize SVG filenames under the icons root before building
    #[arg(long)]
    rename: bool,

    /// External font generator executable
    #[arg(long, default_value = "svgtofont", value_name = "BIN")]
    generator: String,

    /// External formatter executable
    #[arg(long, default_value = "prettier", value_name = "BIN")]
    formatter: String,

    /// Skip the final formatting pass
    #[arg(long)]
    skip_format: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = Config::builder()
        .project(cli.project.unwrap_or_default())
        .icons_dir(cli.icons_dir)
        .output_root(cli.out_dir)
        .template_dir(cli.template_dir)
        .preview(cli.preview)
        .rename_assets(cli.rename)
        .generator_program(cli.generator)
        .formatter_program(cli.formatter)
        .skip_format(cli.skip_format)
        .build()
        .context("Failed to build configuration")?;

    let report = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Icon font build failed")?;

    report.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("iconsmith=info"),
        1 => EnvFilter::new("iconsmith=debug"),
        _ => EnvFilter::new("iconsmith=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
