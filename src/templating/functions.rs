//! Tera functions that let templates declare assets and emit the head placeholder.
//!
//! Registered by [`register`] under the names templates use:
//!
//! ```text
//! {{ push_js(src="/static/app.js", mode="defer") }}
//! {{ push_css(href="/static/app.css", integrity="sha384-...") }}
//! {{ push_preload(href="/fonts/a.woff2", as_="font", content_type="font/woff2",
//!                 crossorigin="anonymous") }}
//! {{ head_placeholder() }}
//! ```
//!
//! Tera only supports keyword arguments. The `push_*` functions evaluate to an
//! empty string; `head_placeholder()` is marked safe so autoescaping leaves the
//! token intact.

use std::collections::HashMap;
use std::str::FromStr;

use tera::{Tera, Value};

use crate::assets::{CrossOrigin, Integrity, LoadMode, Preload, PreloadAs, Script, Stylesheet};
use crate::context;
use crate::core::{HeadContextError, Result};

pub const PUSH_JS: &str = "push_js";
pub const PUSH_CSS: &str = "push_css";
pub const PUSH_PRELOAD: &str = "push_preload";
pub const HEAD_PLACEHOLDER: &str = "head_placeholder";

/// Register every head-context function on `tera`.
pub fn register(tera: &mut Tera) {
    tera.register_function(PUSH_JS, PushJs);
    tera.register_function(PUSH_CSS, PushCss);
    tera.register_function(PUSH_PRELOAD, PushPreload);
    tera.register_function(HEAD_PLACEHOLDER, HeadPlaceholder);
}

/// `push_js(src, crossorigin?, integrity?, mode?)`
pub struct PushJs;

impl tera::Function for PushJs {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let script = script_from_args(args).map_err(into_tera)?;
        context::declare_script(script).map_err(into_tera)?;
        Ok(Value::String(String::new()))
    }
}

/// `push_css(href, crossorigin?, integrity?)`
pub struct PushCss;

impl tera::Function for PushCss {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let stylesheet = stylesheet_from_args(args).map_err(into_tera)?;
        context::declare_stylesheet(stylesheet).map_err(into_tera)?;
        Ok(Value::String(String::new()))
    }
}

/// `push_preload(href, as_, content_type?, crossorigin?, integrity?)`
///
/// `as` and `type` are accepted as aliases of `as_` and `content_type`.
pub struct PushPreload;

impl tera::Function for PushPreload {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let preload = preload_from_args(args).map_err(into_tera)?;
        context::declare_preload(preload).map_err(into_tera)?;
        Ok(Value::String(String::new()))
    }
}

/// `head_placeholder()`
pub struct HeadPlaceholder;

impl tera::Function for HeadPlaceholder {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        reject_unknown(HEAD_PLACEHOLDER, args, &[]).map_err(into_tera)?;
        let token = context::head_placeholder().map_err(into_tera)?;
        Ok(Value::String(token))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

// Keep the typed error in the chain so callers can recover it
fn into_tera(error: HeadContextError) -> tera::Error {
    tera::Error::chain(error.to_string(), error)
}

pub(crate) fn script_from_args(args: &HashMap<String, Value>) -> Result<Script> {
    const F: &str = PUSH_JS;
    reject_unknown(F, args, &["src", "crossorigin", "integrity", "mode"])?;

    let mode = match optional_str(F, args, "mode")? {
        Some(mode) => parse_value::<LoadMode>(F, "mode", mode)?,
        None => LoadMode::default(),
    };

    Ok(Script::new(required_str(F, args, "src")?)
        .crossorigin(crossorigin(F, args)?)
        .integrity(integrity(F, args)?)
        .mode(mode))
}

pub(crate) fn stylesheet_from_args(args: &HashMap<String, Value>) -> Result<Stylesheet> {
    const F: &str = PUSH_CSS;
    reject_unknown(F, args, &["href", "crossorigin", "integrity"])?;

    Ok(Stylesheet::new(required_str(F, args, "href")?)
        .crossorigin(crossorigin(F, args)?)
        .integrity(integrity(F, args)?))
}

pub(crate) fn preload_from_args(args: &HashMap<String, Value>) -> Result<Preload> {
    const F: &str = PUSH_PRELOAD;
    reject_unknown(
        F,
        args,
        &["href", "as_", "as", "content_type", "type", "crossorigin", "integrity"],
    )?;

    let as_ = match (optional_str(F, args, "as_")?, optional_str(F, args, "as")?) {
        (Some(value), _) | (None, Some(value)) => parse_value::<PreloadAs>(F, "as_", value)?,
        (None, None) => {
            return Err(HeadContextError::invalid_argument(F, "as_", "missing required argument"));
        }
    };

    let mut preload = Preload::new(required_str(F, args, "href")?, as_)
        .crossorigin(crossorigin(F, args)?)
        .integrity(integrity(F, args)?);

    let content_type = match optional_str(F, args, "content_type")? {
        Some(value) => Some(value),
        None => optional_str(F, args, "type")?,
    };
    if let Some(content_type) = content_type {
        preload = preload.content_type(content_type);
    }

    Ok(preload)
}

fn reject_unknown(function: &str, args: &HashMap<String, Value>, allowed: &[&str]) -> Result<()> {
    let mut unknown: Vec<&str> =
        args.keys().map(String::as_str).filter(|key| !allowed.contains(key)).collect();
    unknown.sort_unstable();

    match unknown.first() {
        Some(first) => Err(HeadContextError::invalid_argument(
            function,
            first,
            format!("unexpected argument (accepted: {})", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

fn required_str<'a>(
    function: &str,
    args: &'a HashMap<String, Value>,
    name: &str,
) -> Result<&'a str> {
    optional_str(function, args, name)?.ok_or_else(|| {
        HeadContextError::invalid_argument(function, name, "missing required argument")
    })
}

fn optional_str<'a>(
    function: &str,
    args: &'a HashMap<String, Value>,
    name: &str,
) -> Result<Option<&'a str>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(HeadContextError::invalid_argument(
            function,
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

fn parse_value<T>(function: &str, name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| HeadContextError::invalid_argument(function, name, e.to_string()))
}

fn crossorigin(function: &str, args: &HashMap<String, Value>) -> Result<CrossOrigin> {
    match args.get("crossorigin") {
        None | Some(Value::Null) => Ok(CrossOrigin::Disabled),
        Some(Value::Bool(enabled)) => Ok(CrossOrigin::from(*enabled)),
        Some(Value::String(value)) => parse_value(function, "crossorigin", value),
        Some(other) => Err(HeadContextError::invalid_argument(
            function,
            "crossorigin",
            format!("expected a bool or string, got {other}"),
        )),
    }
}

fn integrity(function: &str, args: &HashMap<String, Value>) -> Result<Integrity> {
    match args.get("integrity") {
        None | Some(Value::Null) => Ok(Integrity::none()),
        Some(Value::String(hash)) => Ok(Integrity::from(hash.as_str())),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| {
                value.as_str().map(str::to_string).ok_or_else(|| {
                    HeadContextError::invalid_argument(
                        function,
                        "integrity",
                        format!("expected a list of strings, found {value}"),
                    )
                })
            })
            .collect::<Result<Vec<String>>>()
            .map(Integrity::from),
        Some(other) => Err(HeadContextError::invalid_argument(
            function,
            "integrity",
            format!("expected a string or list of strings, got {other}"),
        )),
    }
}
