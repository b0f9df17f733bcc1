//! Popup content for rendered features.

use std::fmt::Write as _;

use geojson::JsonObject;
use serde_json::Value;

/// Builds the popup HTML for a feature: one `<strong>key</strong>: value<br>`
/// line per property, in property order.
///
/// String values are shown verbatim, everything else in JSON notation.
/// Keys and values are HTML-escaped.
#[must_use]
pub fn popup_content(properties: Option<&JsonObject>) -> String {
    let mut html = String::new();
    let Some(properties) = properties else {
        return html;
    };

    for (key, value) in properties {
        let value = match value {
            Value::String(s) => escape(s),
            other => escape(&other.to_string()),
        };
        let _ = write!(html, "<strong>{}</strong>: {value}<br>", escape(key));
    }
    html
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
