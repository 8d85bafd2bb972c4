use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Delegation boundary for source formatting.
///
/// The formatter rewrites files under a directory to a canonical style
/// without changing semantic content.
pub trait Formatter {
    /// Formats every source file under `dir` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the formatter fails.
    fn format(&self, dir: &Path) -> Result<()>;
}

/// Runs an external `prettier`-style command-line formatter.
#[derive(Debug, Clone)]
pub struct PrettierCommand {
    program: String,
}

impl PrettierCommand {
    /// Creates an adapter invoking the given executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for PrettierCommand {
    fn format(&self, dir: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.arg("--write").arg(dir);

        debug!("Running formatter: {command:?}");

        let status = command.status().map_err(|e| {
            Error::formatting(format!("failed to run `{}`: {e}", self.program))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::formatting(format!(
                "`{}` exited with {status}",
                self.program
            )))
        }
    }
}

/// Formatter that leaves the output directory untouched.
///
/// Used when the run is configured to skip the formatting pass.
#[derive(Debug, Clone, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}
