//! Variable interpolation for ACTION message templates.
//!
//! Templates reference payload values with `{{dot.path}}` placeholders, e.g.
//! `"Hi {{contact.firstName}}, your invoice {{invoice.number}} is due."`.
//! Unresolved placeholders render as the empty string; template rendering
//! never raises, matching the evaluator's silent-degrade policy.

use serde_json::Value;

use crate::payload::{resolve, text_of};

/// Renders a template against a payload tree.
pub fn render(template: &str, payload: &Value) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        match after_open.find("}}") {
            Some(close) => {
                let path = after_open[..close].trim();
                if let Some(value) = resolve(payload, path) {
                    if let Some(text) = text_of(value) {
                        output.push_str(&text);
                    }
                }
                rest = &after_open[close + 2..];
            }
            None => {
                // Unterminated placeholder: keep the braces literally.
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}

/// The dot-paths a template references, in order of first appearance.
/// Lets the editor surface which payload fields a message depends on.
pub fn referenced_paths(template: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let path = after_open[..close].trim();
        if !path.is_empty() && !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
        rest = &after_open[close + 2..];
    }
    paths
}
