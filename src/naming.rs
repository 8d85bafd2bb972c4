use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Convention for project names given on the command line: lowercase
/// alphanumeric segments joined by single hyphens, leading letter.
pub(crate) static PROJECT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").unwrap());

/// Validates icon class names against a project's naming convention and
/// converts them to identifier-safe constant names.
///
/// A valid class is `<project>-<segment>(-<segment>)*` with every segment
/// lowercase alphanumeric. Any deviation is fatal for the whole run: the
/// emitted enum must be complete and consistent, so a partially valid
/// class list is never written out.
#[derive(Debug)]
pub struct ClassNaming {
    project: String,
    class_pattern: Regex,
}

impl ClassNaming {
    /// Creates a validator for the given project name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if the project name itself violates the
    /// naming convention.
    pub fn new(project: &str) -> Result<Self> {
        if !PROJECT_NAME.is_match(project) {
            return Err(Error::usage(format!(
                "project name '{project}' must be lowercase alphanumeric segments joined by single hyphens"
            )));
        }

        let pattern = format!("^{}-[a-z0-9]+(-[a-z0-9]+)*$", regex::escape(project));
        let class_pattern = Regex::new(&pattern)
            .map_err(|e| Error::usage(format!("cannot build class pattern for '{project}': {e}")))?;

        Ok(Self {
            project: project.to_string(),
            class_pattern,
        })
    }

    /// Returns the project name this validator was built for.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Checks that `class` conforms to the project naming convention.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Naming`] on any deviation: uppercase letters,
    /// consecutive hyphens, an empty tail, or a missing/foreign
    /// `<project>-` prefix.
    pub fn validate(&self, class: &str) -> Result<()> {
        if self.class_pattern.is_match(class) {
            Ok(())
        } else {
            Err(Error::naming(
                class,
                format!(
                    "expected '{}-' followed by lowercase alphanumeric segments joined by single hyphens",
                    self.project
                ),
            ))
        }
    }

    /// Converts a validated class name into an enum identifier.
    ///
    /// Strips the `<project>-` prefix, replaces the remaining hyphens
    /// with underscores and upper-cases the result. The mapping is lossy
    /// but deterministic: the same class always yields the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Naming`] if the class fails [`Self::validate`].
    pub fn identifier(&self, class: &str) -> Result<String> {
        self.validate(class)?;

        let tail = &class[self.project.len() + 1..];
        Ok(tail.replace('-', "_").to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_classes_pass() {
        let naming = ClassNaming::new("arrow").unwrap();
        assert!(naming.validate("arrow-up").is_ok());
        assert!(naming.validate("arrow-arrow-up").is_ok());
        assert!(naming.validate("arrow-2x").is_ok());
    }

    #[test]
    fn test_rejects_uppercase() {
        let naming = ClassNaming::new("arrow").unwrap();
        let err = naming.validate("arrow-Up").unwrap_err();
        assert!(err.is_naming());
    }

    #[test]
    fn test_rejects_consecutive_hyphens() {
        let naming = ClassNaming::new("arrow").unwrap();
        assert!(naming.validate("arrow--up").is_err());
        assert!(naming.validate("arrow-up-").is_err());
    }

    #[test]
    fn test_rejects_missing_or_foreign_prefix() {
        let naming = ClassNaming::new("arrow").unwrap();
        assert!(naming.validate("up").is_err());
        assert!(naming.validate("chart-up").is_err());
        assert!(naming.validate("arrow").is_err());
    }

    #[test]
    fn test_identifier_mapping() {
        let naming = ClassNaming::new("arrow").unwrap();
        assert_eq!(naming.identifier("arrow-up").unwrap(), "UP");
        assert_eq!(naming.identifier("arrow-arrow-up").unwrap(), "ARROW_UP");
        assert_eq!(naming.identifier("arrow-arrowdown").unwrap(), "ARROWDOWN");
    }

    #[test]
    fn test_identifier_is_deterministic() {
        let naming = ClassNaming::new("arrow").unwrap();
        let first = naming.identifier("arrow-chevron-left").unwrap();
        let second = naming.identifier("arrow-chevron-left").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "CHEVRON_LEFT");
    }

    #[test]
    fn test_identifier_refuses_invalid_class() {
        let naming = ClassNaming::new("arrow").unwrap();
        assert!(naming.identifier("arrow-Up").is_err());
    }

    #[test]
    fn test_hyphenated_project_prefix() {
        let naming = ClassNaming::new("my-icons").unwrap();
        assert!(naming.validate("my-icons-up").is_ok());
        assert_eq!(naming.identifier("my-icons-up").unwrap(), "UP");
        // The whole project prefix must be present, not just its head.
        assert!(naming.validate("my-up").is_err());
    }

    #[test]
    fn test_rejects_invalid_project_name() {
        assert!(ClassNaming::new("42").is_err());
        assert!(ClassNaming::new("Arrow").is_err());
        assert!(ClassNaming::new("arrow--icons").is_err());
        assert!(ClassNaming::new("").is_err());
    }
}
