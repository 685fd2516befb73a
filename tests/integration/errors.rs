//! Misuse is reported loudly and never leaves a stale context behind.

use anyhow::Result;
use head_context::assets::Script;
use head_context::context;
use head_context::core::{HeadContextError, format_tera_error, user_friendly_error};
use head_context::templating::HeadRenderer;
use head_context::test_utils::BASE_TEMPLATE;
use tera::Context;

fn renderer_with(templates: &[(&str, &str)]) -> Result<HeadRenderer> {
    let mut renderer = HeadRenderer::default();
    renderer.add_raw_template("test/base.html", BASE_TEMPLATE)?;
    for (name, source) in templates {
        renderer.add_raw_template(name, source)?;
    }
    Ok(renderer)
}

#[test]
fn test_assets_without_placeholder_fail() -> Result<()> {
    let renderer =
        renderer_with(&[("fragment.html", r#"{{ push_js(src="/lost.js") }}<p>hi</p>"#)])?;

    let err = renderer.render("fragment.html", &Context::new()).unwrap_err();
    assert!(
        matches!(err, HeadContextError::UnrenderedAssets { count: 1 }),
        "unexpected error: {err}"
    );
    assert!(!context::is_active());
    Ok(())
}

#[test]
fn test_template_without_assets_or_placeholder_is_untouched() -> Result<()> {
    let renderer = renderer_with(&[("plain.html", "<p>{{ greeting }}</p>")])?;
    let mut ctx = Context::new();
    ctx.insert("greeting", "hello");
    assert_eq!(renderer.render("plain.html", &ctx)?, "<p>hello</p>");
    Ok(())
}

#[test]
fn test_failed_render_does_not_leak_context() -> Result<()> {
    let renderer = renderer_with(&[
        (
            "broken.html",
            r#"{% extends "test/base.html" %}{% block body %}{{ push_js(src="/a.js") }}{{ missing_variable }}{% endblock body %}"#,
        ),
        ("ok.html", r#"{% extends "test/base.html" %}{% block body %}ok{% endblock body %}"#),
    ])?;

    let err = renderer.render("broken.html", &Context::new()).unwrap_err();
    assert!(matches!(err, HeadContextError::Template(_)));
    assert!(!context::is_active());

    // The next render on this thread gets a fresh, empty context
    let output = renderer.render("ok.html", &Context::new())?;
    assert!(!output.contains("/a.js"));
    Ok(())
}

#[test]
fn test_invalid_function_arguments() -> Result<()> {
    let renderer = renderer_with(&[
        ("no_src.html", r#"{{ push_js(mode="defer") }}{{ head_placeholder() }}"#),
        ("bad_mode.html", r#"{{ push_js(src="/a.js", mode="eager") }}{{ head_placeholder() }}"#),
        ("bad_as.html", r#"{{ push_preload(href="/a", as_="picture") }}{{ head_placeholder() }}"#),
        ("unknown.html", r#"{{ push_css(href="/a.css", media="print") }}{{ head_placeholder() }}"#),
    ])?;

    let cases = [
        ("no_src.html", "Invalid argument 'src' for push_js(): missing required argument"),
        ("bad_mode.html", "unknown script mode 'eager'"),
        ("bad_as.html", "unknown preload destination 'picture'"),
        ("unknown.html", "Invalid argument 'media' for push_css()"),
    ];

    for (name, expected) in cases {
        let err = renderer.render(name, &Context::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(expected), "{name}: expected '{expected}' in '{message}'");
        assert_eq!(message.matches(expected).count(), 1, "{name}: repeated cause in '{message}'");
        assert!(
            matches!(err.root_cause(), HeadContextError::InvalidArgument { .. }),
            "{name}: expected InvalidArgument, got {:?}",
            err.root_cause()
        );
        assert!(!context::is_active());
    }
    Ok(())
}

#[test]
fn test_bad_mode_reported_as_invalid_argument() -> Result<()> {
    let renderer = renderer_with(&[(
        "eager.html",
        r#"{% extends "test/base.html" %}{% block body %}{{ push_js(src="/a.js", mode="eager") }}{% endblock body %}"#,
    )])?;

    let err = renderer.render("eager.html", &Context::new()).unwrap_err();
    assert!(matches!(err, HeadContextError::Template(_)));
    match err.root_cause() {
        HeadContextError::InvalidArgument { function, argument, reason } => {
            assert_eq!(function, "push_js");
            assert_eq!(argument, "mode");
            assert!(reason.contains("unknown script mode 'eager'"));
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }

    let ctx = user_friendly_error(anyhow::Error::from(err));
    assert_eq!(
        ctx.suggestion.as_deref(),
        Some("Check the argument names and values passed to the template function")
    );
    Ok(())
}

#[test]
fn test_declarations_outside_render() {
    let err = context::declare_script(Script::new("/a.js")).unwrap_err();
    assert!(matches!(err, HeadContextError::NoActiveContext));

    let err = context::head_placeholder().unwrap_err();
    assert_eq!(
        err.to_string(),
        "No active head context: asset declarations and head_placeholder() must run during a render"
    );
}

#[test]
fn test_functions_on_plain_tera_report_no_context() {
    // Registering the functions without going through HeadRenderer leaves no scope
    let mut tera = tera::Tera::default();
    head_context::templating::functions::register(&mut tera);

    let err = tera.render_str("{{ head_placeholder() }}", &Context::new()).unwrap_err();
    let message = format_tera_error(&err);
    assert!(message.contains("No active head context"), "got: {message}");

    let err = HeadContextError::from(err);
    assert!(matches!(err.root_cause(), HeadContextError::NoActiveContext));
}
