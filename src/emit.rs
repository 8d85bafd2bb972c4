use crate::css;
use crate::error::{Error, Result};
use crate::naming::ClassNaming;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Preview icon markup emitted by the generator's website. The capture
/// is bounded so a malformed page cannot make the rewrite swallow
/// unrelated markup.
static PREVIEW_ICON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<i class="([^"]{1,50})"></i>"#).unwrap());

/// Font size applied to rewritten preview icons.
const PREVIEW_FONT_SIZE: &str = "32px";

/// Fills the staged component template with one enum member per icon
/// class.
///
/// Members are emitted as `IDENTIFIER = "<class>",` in stylesheet
/// appearance order, never sorted: consumers diffing regenerated output
/// see icons move only when the stylesheet itself changed.
///
/// # Errors
///
/// Returns [`Error::Naming`] if any class violates the convention (the
/// file is left unrendered in that case), [`Error::Template`] on a
/// placeholder mismatch, or [`Error::Io`] on read/write failure.
pub(crate) fn emit_component(path: &Path, classes: &[String], naming: &ClassNaming) -> Result<()> {
    let members = classes
        .iter()
        .map(|class| Ok(format!("{} = \"{}\",", naming.identifier(class)?, class)))
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    let mut context = tera::Context::new();
    context.insert("members", &members);
    context.insert("project", naming.project());

    render_staged(path, &context)
}

/// Fills the staged stylesheet template with the font imports and the
/// re-namespaced icon rules.
///
/// Every rule of the project is prefixed with `.g-<project>-icon`
/// directly before its original selector, producing compound-class
/// selectors: consumers must put the namespace class and the icon class
/// on the same element.
///
/// # Errors
///
/// Returns [`Error::Template`] on a placeholder mismatch or
/// [`Error::Io`] on read/write failure.
pub(crate) fn emit_stylesheet(path: &Path, css_text: &str, project: &str) -> Result<()> {
    let import_source = format!(
        r#"url("./{project}.ttf") format("truetype"),url("./{project}.woff") format("woff")"#
    );

    let rules = css::extract_rule_bodies(css_text, project)
        .iter()
        .map(|rule| format!(".g-{project}-icon{rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut context = tera::Context::new();
    context.insert("import_source", &import_source);
    context.insert("project", project);
    context.insert("rules", &rules);

    render_staged(path, &context)
}

/// Rewrites the generator's preview page against the final artifact set.
///
/// The reference to the pruned raw stylesheet is repointed at
/// `iconfont.css`, and every `<i class="..."></i>` sample is rewritten
/// to carry the namespace class alongside the icon class, with an
/// inline font size for the visual preview.
///
/// # Errors
///
/// Returns [`Error::Io`] if the page cannot be read or written.
pub(crate) fn rewrite_preview(html_path: &Path, project: &str) -> Result<()> {
    let html = fs::read_to_string(html_path).map_err(|e| Error::io(html_path, e))?;

    let html = html.replace(&format!("{project}.css"), "iconfont.css");
    let html = PREVIEW_ICON.replace_all(&html, |caps: &Captures<'_>| {
        format!(
            r#"<i class="g-{project}-icon {}" style="font-size: {PREVIEW_FONT_SIZE}"></i>"#,
            &caps[1]
        )
    });

    write_file_atomic(html_path, &html)
}

/// Renders a staged template file in place.
fn render_staged(path: &Path, context: &tera::Context) -> Result<()> {
    let template_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let rendered = tera::Tera::one_off(&raw, context, false)
        .map_err(|e| Error::template(&template_name, e))?;

    debug!("Rendered {template_name}");
    write_file_atomic(path, &rendered)
}

/// Writes a file through a temp-file rename so an interrupted run never
/// leaves a half-written artifact behind.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
}
