//! End-to-end rendering through Tera.

use anyhow::Result;
use head_context::templating::HeadRenderer;
use head_context::test_utils::{BASE_TEMPLATE, init_test_logging};
use tera::Context;

fn renderer_with(templates: &[(&str, &str)]) -> Result<HeadRenderer> {
    init_test_logging(None);
    let mut renderer = HeadRenderer::default();
    renderer.add_raw_template("test/base.html", BASE_TEMPLATE)?;
    for (name, source) in templates {
        renderer.add_raw_template(name, source)?;
    }
    Ok(renderer)
}

#[test]
fn test_basic_rendering() -> Result<()> {
    let renderer = renderer_with(&[])?;
    let output = renderer.render("test/base.html", &Context::new())?;

    assert!(output.contains("<title>Test</title>"));
    assert!(!output.contains("MEDIA_SLOT"), "placeholder must not leak: {output}");
    Ok(())
}

#[test]
fn test_injecting_works() -> Result<()> {
    let mut renderer = renderer_with(&[])?;
    let output = renderer.render_str(
        r#"
{% extends "test/base.html" %}
{% block body %}
{{ push_js(src="/static/test.js") }}
{{ push_css(href="/static/test.css") }}
{{ push_preload(href="/static/test.png", as_="image") }}
{% endblock body %}
"#,
        &Context::new(),
    )?;

    let expected_head = concat!(
        "<script src=\"/static/test.js\"></script>\n",
        "<link href=\"/static/test.css\" rel=\"stylesheet\">\n",
        "<link as=\"image\" href=\"/static/test.png\" rel=\"preload\">",
    );
    assert!(output.contains(expected_head), "unexpected output: {output}");

    // Assets land in <head>, before the body that declared them
    let head_end = output.find("</head>").unwrap();
    assert!(output.find("/static/test.js").unwrap() < head_end);
    Ok(())
}

#[test]
fn test_asset_deduplication() -> Result<()> {
    let renderer = renderer_with(&[(
        "page.html",
        r#"{% extends "test/base.html" %}
{% block body %}
{{ push_js(src="/static/test.js") }}
{{ push_js(src="/static/test.js") }}
{% endblock body %}"#,
    )])?;

    let output = renderer.render("page.html", &Context::new())?;
    assert_eq!(output.matches("/static/test.js").count(), 1);
    Ok(())
}

#[test]
fn test_same_url_with_different_options_rendered_twice() -> Result<()> {
    let renderer = renderer_with(&[(
        "page.html",
        r#"{% extends "test/base.html" %}
{% block body %}
{{ push_js(src="/x.js") }}
{{ push_js(src="/x.js", integrity="sha256-abc") }}
{% endblock body %}"#,
    )])?;

    let output = renderer.render("page.html", &Context::new())?;
    assert!(output.contains(
        "<script src=\"/x.js\"></script>\n<script integrity=\"sha256-abc\" src=\"/x.js\"></script>"
    ));
    Ok(())
}

#[test]
fn test_included_fragment_assets_reach_outer_head() -> Result<()> {
    let renderer = renderer_with(&[
        (
            "widgets/chart.html",
            r#"{{ push_js(src="/static/chart.js", mode="defer") }}<canvas></canvas>"#,
        ),
        (
            "widgets/map.html",
            r#"{{ push_css(href="/static/map.css", crossorigin=true) }}{{ push_js(src="/static/chart.js", mode="defer") }}<div id="map"></div>"#,
        ),
        (
            "dashboard.html",
            r#"{% extends "test/base.html" %}
{% block body %}{% include "widgets/chart.html" %}{% include "widgets/map.html" %}{% endblock body %}"#,
        ),
    ])?;

    let output = renderer.render("dashboard.html", &Context::new())?;
    assert!(output.contains(
        "<script defer src=\"/static/chart.js\"></script>\n<link crossorigin href=\"/static/map.css\" rel=\"stylesheet\">"
    ));
    assert!(output.contains("<body><canvas></canvas><div id=\"map\"></div></body>"));
    Ok(())
}

#[test]
fn test_assets_declared_in_loops_and_macros() -> Result<()> {
    let renderer = renderer_with(&[
        (
            "macros.html",
            r#"{% macro icon(name) %}{{ push_css(href="/icons.css") }}<i class="{{ name }}"></i>{% endmacro icon %}"#,
        ),
        (
            "list.html",
            r#"{% extends "test/base.html" %}
{% import "macros.html" as m %}
{% block body %}{% for lib in libs %}{{ push_js(src=lib) }}{{ m::icon(name=lib) }}{% endfor %}{% endblock body %}"#,
        ),
    ])?;

    let mut context = Context::new();
    context.insert("libs", &vec!["/a.js", "/b.js"]);
    let output = renderer.render("list.html", &context)?;

    assert!(output.contains(
        "<script src=\"/a.js\"></script>\n<link href=\"/icons.css\" rel=\"stylesheet\">\n<script src=\"/b.js\"></script>"
    ));
    assert_eq!(output.matches("/icons.css").count(), 1);
    Ok(())
}

#[test]
fn test_placeholder_survives_autoescape() -> Result<()> {
    // .html templates are autoescaped; the placeholder must not become &lt;!--
    let renderer = renderer_with(&[(
        "page.html",
        r#"{% extends "test/base.html" %}{% block body %}{{ user_input }}{{ push_js(src="/a.js?x=1&y=2") }}{% endblock body %}"#,
    )])?;

    let mut context = Context::new();
    context.insert("user_input", "<!-- MEDIA_SLOT:fake -->");
    let output = renderer.render("page.html", &context)?;

    assert!(output.contains("<script src=\"/a.js?x=1&amp;y=2\"></script>"));
    assert!(output.contains("&lt;!-- MEDIA_SLOT:fake --&gt;"));
    assert_eq!(output.matches("MEDIA_SLOT").count(), 1);
    Ok(())
}

#[test]
fn test_placeholder_without_assets_renders_empty() -> Result<()> {
    let renderer = renderer_with(&[])?;
    let output = renderer.render("test/base.html", &Context::new())?;
    assert!(output.contains("</title>\n\n</head>"));
    Ok(())
}

#[test]
fn test_nested_renderer_calls_share_outer_context() -> Result<()> {
    let renderer = renderer_with(&[
        ("widget.html", r#"{{ push_js(src="/widget.js") }}<div class="widget"></div>"#),
        (
            "page.html",
            r#"{% extends "test/base.html" %}{% block body %}{{ widget | safe }}{% endblock body %}"#,
        ),
    ])?;

    // A fragment rendered to a string inside the page render joins its context
    let output = head_context::templating::render_scoped(|| {
        let widget = renderer.render("widget.html", &Context::new())?;
        assert!(!widget.contains("<script"));
        let mut context = Context::new();
        context.insert("widget", &widget);
        renderer.render("page.html", &context)
    })?;

    assert!(output.contains("<script src=\"/widget.js\"></script>"));
    assert!(output.contains("<body><div class=\"widget\"></div></body>"));
    Ok(())
}

#[test]
fn test_globals_are_visible_and_overridable() -> Result<()> {
    let mut globals = Context::new();
    globals.insert("site", "Example");
    globals.insert("title", "Default");

    let mut renderer = renderer_with(&[])?.with_globals(globals);
    let mut context = Context::new();
    context.insert("title", "Home");

    let output = renderer.render_str("{{ site }}/{{ title }}", &context)?;
    assert_eq!(output, "Example/Home");
    Ok(())
}

#[test]
fn test_template_names_sorted() -> Result<()> {
    let renderer = renderer_with(&[("b.html", "b"), ("a.html", "a")])?;
    assert_eq!(renderer.template_names(), vec!["a.html", "b.html", "test/base.html"]);
    Ok(())
}

#[test]
fn test_renderer_from_directory() -> Result<()> {
    let temp = tempfile::TempDir::new()?;
    head_context::test_utils::write_templates(
        temp.path(),
        &[
            ("base.html", BASE_TEMPLATE),
            (
                "pages/index.html",
                r#"{% extends "base.html" %}{% block body %}{{ push_css(href="/index.css") }}index{% endblock body %}"#,
            ),
        ],
    )?;

    let glob = format!("{}/**/*.html", temp.path().display());
    let renderer = HeadRenderer::new(&glob)?;
    let output = renderer.render("pages/index.html", &Context::new())?;
    assert!(output.contains("<link href=\"/index.css\" rel=\"stylesheet\">\n</head>"));
    Ok(())
}
