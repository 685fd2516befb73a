//! Page-level assets that templates can declare during a render.
//!
//! An [`Asset`] is one of three closed variants, each producing its markup
//! deterministically from its fields:
//!
//! | Variant | Markup |
//! |---------|--------|
//! | [`Script`] | `<script src=".." ...></script>` |
//! | [`Stylesheet`] | `<link rel="stylesheet" href=".." ...>` |
//! | [`Preload`] | `<link rel="preload" as=".." href=".." ...>` |
//!
//! Equality is structural over every field. Two scripts with the same `src` but
//! different integrity hashes are different assets and both get rendered.
//!
//! # Examples
//!
//! ```
//! use head_context::assets::{LoadMode, Script, Stylesheet};
//!
//! let script = Script::new("/x.js").mode(LoadMode::Defer);
//! assert_eq!(script.to_markup(), r#"<script defer src="/x.js"></script>"#);
//!
//! let css = Stylesheet::new("/x.css").crossorigin(true);
//! assert_eq!(css.to_markup(), r#"<link crossorigin href="/x.css" rel="stylesheet">"#);
//! ```

pub mod html;

use std::fmt;
use std::str::FromStr;

use html::{AttrValue, html_params};

/// A string did not name a known variant of an asset option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseAssetValueError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Cross-origin policy of a fetched asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossOrigin {
    /// No `crossorigin` attribute
    #[default]
    Disabled,
    /// Bare `crossorigin` attribute
    Enabled,
    /// `crossorigin="anonymous"`
    Anonymous,
    /// `crossorigin="use-credentials"`
    UseCredentials,
}

impl CrossOrigin {
    fn attr(self) -> AttrValue {
        match self {
            CrossOrigin::Disabled => AttrValue::Flag(false),
            CrossOrigin::Enabled => AttrValue::Flag(true),
            CrossOrigin::Anonymous => AttrValue::from("anonymous"),
            CrossOrigin::UseCredentials => AttrValue::from("use-credentials"),
        }
    }
}

impl From<bool> for CrossOrigin {
    fn from(enabled: bool) -> Self {
        if enabled {
            CrossOrigin::Enabled
        } else {
            CrossOrigin::Disabled
        }
    }
}

impl FromStr for CrossOrigin {
    type Err = ParseAssetValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(CrossOrigin::Anonymous),
            "use-credentials" => Ok(CrossOrigin::UseCredentials),
            _ => Err(ParseAssetValueError {
                kind: "crossorigin",
                value: s.to_string(),
                expected: "anonymous, use-credentials",
            }),
        }
    }
}

/// Subresource integrity hashes, rendered space-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Integrity(Vec<String>);

impl Integrity {
    /// No integrity attribute.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The individual hashes.
    pub fn hashes(&self) -> &[String] {
        &self.0
    }

    /// Whether no hash is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn attr(&self) -> AttrValue {
        if self.0.is_empty() {
            AttrValue::Absent
        } else {
            AttrValue::Text(self.0.join(" "))
        }
    }
}

impl From<&str> for Integrity {
    fn from(hash: &str) -> Self {
        Self(vec![hash.to_string()])
    }
}

impl From<String> for Integrity {
    fn from(hash: String) -> Self {
        Self(vec![hash])
    }
}

impl From<Vec<String>> for Integrity {
    fn from(hashes: Vec<String>) -> Self {
        Self(hashes)
    }
}

impl<T: Into<Integrity>> From<Option<T>> for Integrity {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Integrity::none, Into::into)
    }
}

/// How a script is loaded relative to document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadMode {
    /// Parser-blocking, no attribute
    #[default]
    Blocking,
    /// `defer`
    Defer,
    /// `async`
    Async,
}

impl FromStr for LoadMode {
    type Err = ParseAssetValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defer" => Ok(LoadMode::Defer),
            "async" => Ok(LoadMode::Async),
            _ => Err(ParseAssetValueError {
                kind: "script mode",
                value: s.to_string(),
                expected: "defer, async",
            }),
        }
    }
}

/// The `as` destination of a preload link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreloadAs {
    Audio,
    Document,
    Embed,
    Fetch,
    Font,
    Image,
    Object,
    Script,
    Style,
    Track,
    Worker,
    Video,
}

impl PreloadAs {
    const EXPECTED: &'static str =
        "audio, document, embed, fetch, font, image, object, script, style, track, worker, video";

    /// The attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            PreloadAs::Audio => "audio",
            PreloadAs::Document => "document",
            PreloadAs::Embed => "embed",
            PreloadAs::Fetch => "fetch",
            PreloadAs::Font => "font",
            PreloadAs::Image => "image",
            PreloadAs::Object => "object",
            PreloadAs::Script => "script",
            PreloadAs::Style => "style",
            PreloadAs::Track => "track",
            PreloadAs::Worker => "worker",
            PreloadAs::Video => "video",
        }
    }
}

impl fmt::Display for PreloadAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreloadAs {
    type Err = ParseAssetValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "audio" => PreloadAs::Audio,
            "document" => PreloadAs::Document,
            "embed" => PreloadAs::Embed,
            "fetch" => PreloadAs::Fetch,
            "font" => PreloadAs::Font,
            "image" => PreloadAs::Image,
            "object" => PreloadAs::Object,
            "script" => PreloadAs::Script,
            "style" => PreloadAs::Style,
            "track" => PreloadAs::Track,
            "worker" => PreloadAs::Worker,
            "video" => PreloadAs::Video,
            _ => {
                return Err(ParseAssetValueError {
                    kind: "preload destination",
                    value: s.to_string(),
                    expected: Self::EXPECTED,
                });
            }
        };
        Ok(kind)
    }
}

/// A JavaScript file attached through a `<script>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Script {
    pub src: String,
    pub crossorigin: CrossOrigin,
    pub integrity: Integrity,
    pub mode: LoadMode,
}

impl Script {
    /// A blocking script with no cross-origin or integrity attributes.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            crossorigin: CrossOrigin::default(),
            integrity: Integrity::default(),
            mode: LoadMode::default(),
        }
    }

    #[must_use]
    pub fn crossorigin(mut self, crossorigin: impl Into<CrossOrigin>) -> Self {
        self.crossorigin = crossorigin.into();
        self
    }

    #[must_use]
    pub fn integrity(mut self, integrity: impl Into<Integrity>) -> Self {
        self.integrity = integrity.into();
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Keyword-style attributes, before sorting.
    pub fn html_params(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("src", AttrValue::from(self.src.as_str())),
            ("crossorigin", self.crossorigin.attr()),
            ("integrity", self.integrity.attr()),
            ("defer", AttrValue::from(self.mode == LoadMode::Defer)),
            ("async", AttrValue::from(self.mode == LoadMode::Async)),
        ]
    }

    pub fn to_markup(&self) -> String {
        format!("<script {}></script>", html_params(self.html_params()))
    }
}

/// A CSS file attached through a `<link rel="stylesheet">` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stylesheet {
    pub href: String,
    pub crossorigin: CrossOrigin,
    pub integrity: Integrity,
}

impl Stylesheet {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            crossorigin: CrossOrigin::default(),
            integrity: Integrity::default(),
        }
    }

    #[must_use]
    pub fn crossorigin(mut self, crossorigin: impl Into<CrossOrigin>) -> Self {
        self.crossorigin = crossorigin.into();
        self
    }

    #[must_use]
    pub fn integrity(mut self, integrity: impl Into<Integrity>) -> Self {
        self.integrity = integrity.into();
        self
    }

    pub fn html_params(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("rel", AttrValue::from("stylesheet")),
            ("href", AttrValue::from(self.href.as_str())),
            ("crossorigin", self.crossorigin.attr()),
            ("integrity", self.integrity.attr()),
        ]
    }

    pub fn to_markup(&self) -> String {
        format!("<link {}>", html_params(self.html_params()))
    }
}

/// A resource the browser should start fetching right away, via `<link rel="preload">`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preload {
    pub href: String,
    pub as_: PreloadAs,
    /// MIME type hint, rendered as `type`
    pub content_type: Option<String>,
    pub crossorigin: CrossOrigin,
    pub integrity: Integrity,
}

impl Preload {
    pub fn new(href: impl Into<String>, as_: PreloadAs) -> Self {
        Self {
            href: href.into(),
            as_,
            content_type: None,
            crossorigin: CrossOrigin::default(),
            integrity: Integrity::default(),
        }
    }

    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn crossorigin(mut self, crossorigin: impl Into<CrossOrigin>) -> Self {
        self.crossorigin = crossorigin.into();
        self
    }

    #[must_use]
    pub fn integrity(mut self, integrity: impl Into<Integrity>) -> Self {
        self.integrity = integrity.into();
        self
    }

    pub fn html_params(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("rel", AttrValue::from("preload")),
            ("as", AttrValue::from(self.as_.as_str())),
            ("href", AttrValue::from(self.href.as_str())),
            ("type", AttrValue::from(self.content_type.as_deref())),
            ("crossorigin", self.crossorigin.attr()),
            ("integrity", self.integrity.attr()),
        ]
    }

    pub fn to_markup(&self) -> String {
        format!("<link {}>", html_params(self.html_params()))
    }
}

/// Any asset a template can declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Script(Script),
    Stylesheet(Stylesheet),
    Preload(Preload),
}

impl Asset {
    /// The HTML markup for this asset.
    pub fn to_markup(&self) -> String {
        match self {
            Asset::Script(script) => script.to_markup(),
            Asset::Stylesheet(stylesheet) => stylesheet.to_markup(),
            Asset::Preload(preload) => preload.to_markup(),
        }
    }

    /// The URL the asset points at.
    pub fn url(&self) -> &str {
        match self {
            Asset::Script(script) => &script.src,
            Asset::Stylesheet(stylesheet) => &stylesheet.href,
            Asset::Preload(preload) => &preload.href,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

impl From<Script> for Asset {
    fn from(script: Script) -> Self {
        Asset::Script(script)
    }
}

impl From<Stylesheet> for Asset {
    fn from(stylesheet: Stylesheet) -> Self {
        Asset::Stylesheet(stylesheet)
    }
}

impl From<Preload> for Asset {
    fn from(preload: Preload) -> Self {
        Asset::Preload(preload)
    }
}
