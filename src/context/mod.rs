//! Render-scoped asset collection.
//!
//! A [`HeadContext`] lives for exactly one outermost render. Template fragments
//! declare assets into it from anywhere in the template hierarchy, and emit its
//! placeholder token where the assets should end up (normally inside `<head>`).
//! Once the outermost render has assembled its output, the token is replaced by
//! [`HeadContext::render_media`]; see [`crate::templating::render_scoped`].
//!
//! # Examples
//!
//! ```
//! use head_context::assets::{LoadMode, Script};
//! use head_context::context::{self, RenderScope};
//!
//! let scope = RenderScope::enter();
//! context::declare_script(Script::new("/app.js").mode(LoadMode::Defer)).unwrap();
//! context::declare_script(Script::new("/app.js").mode(LoadMode::Defer)).unwrap();
//!
//! let media = scope.inspect(|ctx| ctx.render_media());
//! assert_eq!(media, r#"<script defer src="/app.js"></script>"#);
//! ```

mod scope;

pub use scope::{RenderScope, is_active, with_active};

use uuid::Uuid;

use crate::assets::{Asset, Preload, Script, Stylesheet};
use crate::core::Result;

/// Ordered, de-duplicated assets declared during one render.
#[derive(Debug)]
pub struct HeadContext {
    id: Uuid,
    assets: Vec<Asset>,
    replacement_token: String,
}

impl HeadContext {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            assets: Vec::new(),
            replacement_token: format!("<!-- MEDIA_SLOT:{id} -->"),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Add `asset` unless a structurally equal one is already present.
    ///
    /// Returns `true` if the asset was added.
    pub fn push_asset(&mut self, asset: impl Into<Asset>) -> bool {
        let asset = asset.into();
        if self.assets.contains(&asset) {
            tracing::trace!("Skipping duplicate asset {}", asset.url());
            return false;
        }
        tracing::trace!("Declared asset {}", asset.url());
        self.assets.push(asset);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Declared assets in first-seen order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Newline-joined markup of every declared asset, in declaration order.
    pub fn render_media(&self) -> String {
        self.assets.iter().map(Asset::to_markup).collect::<Vec<_>>().join("\n")
    }

    /// The marker templates emit and the outermost render substitutes.
    ///
    /// An HTML comment embedding this context's id, so it cannot collide with
    /// escaped user content.
    pub fn replacement_token(&self) -> &str {
        &self.replacement_token
    }
}

impl Default for HeadContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare any asset into the active context.
///
/// # Errors
///
/// Returns [`crate::core::HeadContextError::NoActiveContext`] outside a render.
pub fn declare(asset: impl Into<Asset>) -> Result<()> {
    let asset = asset.into();
    with_active(|ctx| {
        ctx.push_asset(asset);
    })
}

/// Declare a `<script>` dependency for the current render.
pub fn declare_script(script: Script) -> Result<()> {
    declare(script)
}

/// Declare a stylesheet dependency for the current render.
pub fn declare_stylesheet(stylesheet: Stylesheet) -> Result<()> {
    declare(stylesheet)
}

/// Declare a preload hint for the current render.
pub fn declare_preload(preload: Preload) -> Result<()> {
    declare(preload)
}

/// The active context's placeholder token.
///
/// The token is infrastructure markup and must be emitted unescaped.
///
/// # Errors
///
/// Returns [`crate::core::HeadContextError::NoActiveContext`] outside a render.
pub fn head_placeholder() -> Result<String> {
    with_active(|ctx| ctx.replacement_token().to_string())
}
