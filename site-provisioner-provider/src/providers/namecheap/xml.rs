//! Minimal extraction helpers for Namecheap's XML responses.
//!
//! Every value the adapter needs lives either in an attribute of a single result element
//! (`<DomainCheckResult Available="true" .../>`) or in the text of an `<Error>` element, so a
//! handful of regular expressions is enough; no document tree is built.

use regex::Regex;

use crate::traits::RawApiError;

/// Decode the five predefined XML entities.
pub fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Attribute `name` of the first `<tag ...>` element, entity-decoded.
pub fn attribute(xml: &str, tag: &str, name: &str) -> Option<String> {
    let element = Regex::new(&format!(r"<{}\b([^>]*)>", regex::escape(tag))).ok()?;
    let attrs = element.captures(xml)?.get(1)?.as_str();

    let attr = Regex::new(&format!(r#"\b{}\s*=\s*"([^"]*)""#, regex::escape(name))).ok()?;
    attr.captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| unescape(m.as_str()))
}

/// Boolean attribute (`"true"`/`"false"`, case-insensitive). Missing or malformed is `None`.
pub fn bool_attribute(xml: &str, tag: &str, name: &str) -> Option<bool> {
    match attribute(xml, tag, name)?.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Numeric attribute; empty strings are `None`.
pub fn f64_attribute(xml: &str, tag: &str, name: &str) -> Option<f64> {
    attribute(xml, tag, name).and_then(|v| v.trim().parse().ok())
}

/// `Status` of the `<ApiResponse>` root (`"OK"` or `"ERROR"`).
pub fn response_status(xml: &str) -> Option<String> {
    attribute(xml, "ApiResponse", "Status")
}

/// All `<Error Number="...">message</Error>` entries, in document order.
pub fn errors(xml: &str) -> Vec<RawApiError> {
    let Ok(re) = Regex::new(r#"<Error\b[^>]*?Number\s*=\s*"([^"]*)"[^>]*>([^<]*)</Error>"#) else {
        return Vec::new();
    };
    re.captures_iter(xml)
        .map(|c| {
            let code = c.get(1).map_or("", |m| m.as_str());
            let message = unescape(c.get(2).map_or("", |m| m.as_str()).trim());
            RawApiError::with_code(code, message)
        })
        .collect()
}
