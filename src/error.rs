use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the iconsmith library.
///
/// Every variant is fatal for the run it occurs in: the pipeline never
/// retries a step and never emits partial output after a failure.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Bad or missing project argument.
    #[error("Invalid project argument: {message}")]
    Usage {
        /// Detailed error message
        message: String,
    },

    /// Project source directory is absent or not a directory.
    #[error("Precondition failed: {message}")]
    Precondition {
        /// Detailed error message
        message: String,
    },

    /// An icon class violates the project naming convention.
    #[error("Icon class '{class}' does not conform to naming convention: {reason}")]
    Naming {
        /// The offending class name
        class: String,
        /// Why the class was rejected
        reason: String,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The external font generator failed or could not be invoked.
    #[error("Font generation failed: {message}")]
    Generation {
        /// Error message
        message: String,
    },

    /// The external formatter failed or could not be invoked.
    #[error("Formatting output failed: {message}")]
    Format {
        /// Error message
        message: String,
    },

    /// Template rendering error.
    #[error("Failed to render template '{template}': {message}")]
    Template {
        /// Template name
        template: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates a usage error.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Creates a precondition error.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Creates a naming convention error.
    #[must_use]
    pub fn naming(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Naming {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a font generation error.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a formatter error.
    #[must_use]
    pub fn formatting(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates a template error.
    #[must_use]
    pub fn template(template: impl Into<String>, source: tera::Error) -> Self {
        Self::Template {
            template: template.into(),
            message: source.to_string(),
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a naming convention error.
    #[must_use]
    pub const fn is_naming(&self) -> bool {
        matches!(self, Self::Naming { .. })
    }

    /// Returns true if this is a usage error.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}
