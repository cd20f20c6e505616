//! Documentation stub generation
//!
//! Produces the logical lines of an XML documentation skeleton:
//!
//! ```text
//! /// <summary>
//! ///
//! /// </summary>
//! /// <typeparam name="T"></typeparam>
//! /// <param name="value"></param>
//! /// <returns></returns>
//! ```
//!
//! Lines carry the marker but no indentation and no line terminator; the
//! continuation engine adds both to fit the call site.

use crate::syntax::StubOutline;

/// Open, placeholder and close lines are always present
pub const MIN_STUB_LINES: usize = 3;

/// Build the stub lines for a declaration outline
pub fn build_stub(marker: &str, outline: &StubOutline) -> Vec<String> {
    let mut lines = Vec::with_capacity(
        MIN_STUB_LINES + outline.type_parameters.len() + outline.parameters.len() + 1,
    );

    lines.push(format!("{marker} <summary>"));
    lines.push(format!("{marker} "));
    lines.push(format!("{marker} </summary>"));

    for name in &outline.type_parameters {
        lines.push(format!(
            "{marker} <typeparam name=\"{}\"></typeparam>",
            encode_name(name)
        ));
    }

    for name in &outline.parameters {
        lines.push(format!(
            "{marker} <param name=\"{}\"></param>",
            encode_name(name)
        ));
    }

    if outline.has_return {
        lines.push(format!("{marker} <returns></returns>"));
    }

    lines
}

/// Attribute-safe form of an identifier
fn encode_name(name: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(name)
}
