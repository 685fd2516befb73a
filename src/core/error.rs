//! Error handling for head-context
//!
//! Two layers, the same way the rest of the crate treats failures:
//! 1. [`HeadContextError`] is the strongly-typed error every library function returns
//! 2. [`ErrorContext`] wraps any error with details and a suggestion for CLI users
//!
//! # Usage errors
//!
//! The render-context mechanism itself only fails on misuse, and those failures
//! are surfaced immediately rather than recovered from:
//! - [`HeadContextError::NoActiveContext`] - a declaration or `head_placeholder()`
//!   ran outside any render
//! - [`HeadContextError::UnrenderedAssets`] - the outermost render declared assets
//!   but never emitted the placeholder, so they would have been silently dropped
//!
//! # Examples
//!
//! ```rust,no_run
//! use head_context::core::{HeadContextError, user_friendly_error};
//!
//! let error = HeadContextError::UnrenderedAssets { count: 2 };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with details and a suggestion
//! ```

use colored::Colorize;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// The main error type for head-context operations.
#[derive(Error, Debug)]
pub enum HeadContextError {
    /// An asset declaration or `head_placeholder()` was invoked outside any render.
    #[error(
        "No active head context: asset declarations and head_placeholder() must run during a render"
    )]
    NoActiveContext,

    /// The outermost render declared assets but its output never contained the
    /// placeholder token.
    #[error(
        "{count} asset(s) were declared but never rendered (head_placeholder() call missing?)"
    )]
    UnrenderedAssets {
        /// Number of distinct assets that were collected
        count: usize,
    },

    /// A template function received a missing or malformed argument.
    #[error("Invalid argument '{argument}' for {function}(): {reason}")]
    InvalidArgument {
        /// Template function name
        function: String,
        /// Keyword argument name
        argument: String,
        /// What was wrong with it
        reason: String,
    },

    /// The template engine failed to parse or render a template.
    ///
    /// The Tera error chain is flattened into the message, so it is not exposed as `source()`.
    /// Errors raised by the head-context template functions stay in that chain; see
    /// [`HeadContextError::root_cause`].
    #[error("Template error: {}", format_tera_error(.0))]
    Template(tera::Error),

    /// Configuration could not be used.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },
}

impl From<tera::Error> for HeadContextError {
    fn from(error: tera::Error) -> Self {
        Self::Template(error)
    }
}

impl HeadContextError {
    /// The head-context error that actually caused this one.
    ///
    /// A `push_js(mode="eager")` failure reaches the caller as [`Self::Template`],
    /// with the [`Self::InvalidArgument`] it raised somewhere in the Tera chain.
    /// This returns that inner error, or `self` when there is none.
    pub fn root_cause(&self) -> &Self {
        let Self::Template(error) = self else {
            return self;
        };

        let mut current: Option<&(dyn StdError + 'static)> = error.source();
        while let Some(err) = current {
            if let Some(inner) = err.downcast_ref::<Self>() {
                return inner.root_cause();
            }
            current = err.source();
        }
        self
    }

    pub(crate) fn invalid_argument(
        function: &str,
        argument: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            function: function.to_string(),
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }
}

/// Flatten a Tera error and its `source()` chain into one readable message.
///
/// Tera reports a failing function call as "Failed to render 'x'" with the real
/// cause several levels down, so the whole chain is joined.
pub fn format_tera_error(error: &tera::Error) -> String {
    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn StdError> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let mut cleaned: Vec<String> = messages
        .into_iter()
        .map(|msg| {
            msg.replace("while rendering '__tera_one_off'", "")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect();
    // A function error is chained under a message carrying its own text
    cleaned.dedup();

    cleaned.join("\n  -> ")
}

/// An error with optional details and a suggestion, ready for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {:#}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion tailored to its kind.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let Some(head_error) = error.downcast_ref::<HeadContextError>() else {
        return file_error_context(error);
    };

    let (details, suggestion) = match head_error.root_cause() {
        HeadContextError::NoActiveContext => (
            "push_js, push_css, push_preload and head_placeholder only work while a template \
             is rendered through HeadRenderer",
            "Render the template with HeadRenderer::render, or wrap the call in \
             templating::render_scoped",
        ),
        HeadContextError::UnrenderedAssets { .. } => (
            "Assets were collected during the render but the output never contained the head \
             placeholder, so they would be lost",
            "Add {{ head_placeholder() }} inside <head> of the base template",
        ),
        HeadContextError::InvalidArgument { .. } => (
            "Template functions only accept keyword arguments, e.g. \
             push_js(src=\"/app.js\", mode=\"defer\")",
            "Check the argument names and values passed to the template function",
        ),
        HeadContextError::Template(_) => (
            "The template engine rejected the template or failed while evaluating it",
            "Check template syntax for unclosed tags, unknown variables or misspelled functions",
        ),
        HeadContextError::Config { .. } => (
            "The renderer configuration could not be used",
            "Check the keys and values in your configuration file",
        ),
    };

    ErrorContext::new(error).with_details(details).with_suggestion(suggestion)
}

/// Suggestions for failures reading config and context files, which are
/// reported through `anyhow` with the path attached.
fn file_error_context(error: anyhow::Error) -> ErrorContext {
    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(error)
                .with_suggestion("Check that the file or directory exists and the path is correct");
        }
        return ErrorContext::new(error)
            .with_details("A file could not be read or written")
            .with_suggestion("Check that the path exists and is accessible");
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(error)
            .with_details("The file is not valid TOML")
            .with_suggestion("Check the TOML syntax of the file");
    }

    if error.downcast_ref::<serde_json::Error>().is_some() {
        return ErrorContext::new(error)
            .with_details("The render context file is not valid JSON")
            .with_suggestion("Validate the context file, or use a .toml file instead");
    }

    ErrorContext::new(error)
}
