//! Token substitution and literal replacements.
//! Handles `{{NAME}}`-style tokens in file contents and paths.

use crate::config::{Replacement, TokenDelimiters};
use crate::resolver::Values;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given values.
    fn render(&self, template: &str, values: &Values) -> String;

    /// Renders file content, which need not be valid UTF-8.
    fn render_bytes(&self, template: &[u8], values: &Values) -> Vec<u8>;
}

/// Replaces `start + NAME + end` tokens with resolved values.
#[derive(Debug, Clone, Default)]
pub struct TokenRenderer {
    token: TokenDelimiters,
}

impl TokenRenderer {
    pub fn new(token: TokenDelimiters) -> Self {
        Self { token: token.normalized() }
    }
}

impl TemplateRenderer for TokenRenderer {
    fn render(&self, template: &str, values: &Values) -> String {
        substitute(template, values, &self.token.start, &self.token.end)
    }

    fn render_bytes(&self, template: &[u8], values: &Values) -> Vec<u8> {
        substitute_bytes(template, values, &self.token.start, &self.token.end)
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Replaces every `start + name + end` occurrence with the variable's value.
///
/// The text is scanned once from left to right; substituted values are
/// copied to the output and never scanned again, so a value that itself
/// contains a token stays literal. Unknown names are left untouched.
pub fn substitute(text: &str, values: &Values, start: &str, end: &str) -> String {
    let output = substitute_bytes(text.as_bytes(), values, start, end);
    // Tokens start and end on char boundaries, so nothing is lost here.
    String::from_utf8_lossy(&output).into_owned()
}

/// Byte-level form of [`substitute`] for content that is not valid UTF-8.
pub fn substitute_bytes(text: &[u8], values: &Values, start: &str, end: &str) -> Vec<u8> {
    if start.is_empty() || values.is_empty() {
        return text.to_vec();
    }
    let (start, end) = (start.as_bytes(), end.as_bytes());

    let mut output = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = find_bytes(rest, start) {
        output.extend_from_slice(&rest[..pos]);
        let after = &rest[pos + start.len()..];
        let token = values
            .iter()
            .filter(|(name, _)| {
                after.starts_with(name.as_bytes()) && after[name.len()..].starts_with(end)
            })
            .max_by_key(|(name, _)| name.len());
        match token {
            Some((name, value)) => {
                output.extend_from_slice(value.as_bytes());
                rest = &after[name.len() + end.len()..];
            }
            None => {
                // Not a token here; the next one may start inside the delimiter.
                output.push(rest[pos]);
                rest = &rest[pos + 1..];
            }
        }
    }
    output.extend_from_slice(rest);
    output
}

/// Applies literal replacements in list order. Empty `find` strings are skipped.
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> String {
    replacements
        .iter()
        .filter(|replacement| !replacement.find.is_empty())
        .fold(text.to_string(), |content, replacement| {
            content.replace(&replacement.find, &replacement.replace_with)
        })
}

/// Byte-level form of [`apply_replacements`] for content that is not valid UTF-8.
pub fn apply_replacements_bytes(content: &[u8], replacements: &[Replacement]) -> Vec<u8> {
    replacements
        .iter()
        .filter(|replacement| !replacement.find.is_empty())
        .fold(content.to_vec(), |content, replacement| {
            let Replacement { find, replace_with } = replacement;
            replace_bytes(&content, find.as_bytes(), replace_with.as_bytes())
        })
}

fn replace_bytes(content: &[u8], find: &[u8], replace_with: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(content.len());
    let mut rest = content;
    while let Some(pos) = find_bytes(rest, find) {
        output.extend_from_slice(&rest[..pos]);
        output.extend_from_slice(replace_with);
        rest = &rest[pos + find.len()..];
    }
    output.extend_from_slice(rest);
    output
}
