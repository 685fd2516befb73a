//! Test utilities for head-context
//!
//! Shared between unit tests and the integration test suite (via the
//! `test-utils` feature).

use std::path::Path;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=head_context=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A `base.html` with a head placeholder and `title`/`body` blocks.
pub const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>{% block title %}Test{% endblock title %}</title>
{{ head_placeholder() }}
</head>
<body>{% block body %}{% endblock body %}</body>
</html>
"#;

/// Write `templates` (name, source) under `dir`, creating parent directories.
pub fn write_templates(dir: &Path, templates: &[(&str, &str)]) -> std::io::Result<()> {
    for (name, source) in templates {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, source)?;
    }
    Ok(())
}
