//! HTML attribute string building.
//!
//! [`html_params`] turns a list of keyword-style attributes into the inside of a tag:
//! keys are sorted, `true` renders as a bare attribute, `false` and absent values
//! are dropped, and everything else renders as `key="escaped value"`.

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `true` renders the bare key, `false` drops the attribute
    Flag(bool),
    /// Rendered as `key="value"` with the value escaped
    Text(String),
    /// Dropped
    Absent,
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Absent, Into::into)
    }
}

/// Translate a keyword-style key into an attribute name.
///
/// Trailing underscores are stripped (`as_` becomes `as`), and keys starting with
/// `data_` or `aria_` have every underscore turned into a hyphen.
pub fn clean_key(key: &str) -> String {
    let key = key.trim_end_matches('_');
    if key.starts_with("data_") || key.starts_with("aria_") {
        key.replace('_', "-")
    } else {
        key.to_string()
    }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build an attribute string from keyword-style parameters.
///
/// Parameters are sorted by their raw key before the key is cleaned.
///
/// ```
/// use head_context::assets::html::{AttrValue, html_params};
///
/// let attrs = html_params([
///     ("src", AttrValue::from("/app.js")),
///     ("defer", AttrValue::from(true)),
///     ("async", AttrValue::from(false)),
/// ]);
/// assert_eq!(attrs, r#"defer src="/app.js""#);
/// ```
pub fn html_params<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, AttrValue)>,
{
    let mut params: Vec<(&str, AttrValue)> = params.into_iter().collect();
    params.sort_by(|a, b| a.0.cmp(b.0));

    params
        .into_iter()
        .filter_map(|(key, value)| match value {
            AttrValue::Flag(true) => Some(clean_key(key)),
            AttrValue::Flag(false) | AttrValue::Absent => None,
            AttrValue::Text(text) => Some(format!("{}=\"{}\"", clean_key(key), escape_attr(&text))),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
