//! Concurrent renders each observe their own context.

use anyhow::Result;
use head_context::templating::HeadRenderer;
use head_context::test_utils::BASE_TEMPLATE;
use std::sync::Arc;
use tera::Context;

const PAGE: &str = r#"{% extends "test/base.html" %}
{% block body %}{% for i in range(end=50) %}{{ push_js(src="/" ~ worker ~ "/" ~ i ~ ".js") }}{% endfor %}{% endblock body %}"#;

fn shared_renderer() -> Result<Arc<HeadRenderer>> {
    let mut renderer = HeadRenderer::default();
    renderer.add_raw_template("test/base.html", BASE_TEMPLATE)?;
    renderer.add_raw_template("page.html", PAGE)?;
    Ok(Arc::new(renderer))
}

fn check_output(output: &str, worker: &str) {
    assert_eq!(output.matches("<script").count(), 50, "worker {worker} got: {output}");
    assert_eq!(output.matches(&format!("src=\"/{worker}/")).count(), 50);
}

#[test]
fn test_parallel_threads_do_not_share_assets() -> Result<()> {
    let renderer = shared_renderer()?;

    std::thread::scope(|scope| {
        for t in 0..8 {
            let renderer = Arc::clone(&renderer);
            scope.spawn(move || {
                let worker = format!("t{t}");
                for _ in 0..10 {
                    let mut ctx = Context::new();
                    ctx.insert("worker", &worker);
                    let output = renderer.render("page.html", &ctx).unwrap();
                    check_output(&output, &worker);
                }
            });
        }
    });
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tokio_tasks_do_not_share_assets() -> Result<()> {
    let renderer = shared_renderer()?;

    let handles: Vec<_> = (0..16)
        .map(|t| {
            let renderer = Arc::clone(&renderer);
            tokio::spawn(async move {
                let worker = format!("task{t}");
                let mut ctx = Context::new();
                ctx.insert("worker", &worker);
                tokio::task::yield_now().await;
                let output = renderer.render("page.html", &ctx)?;
                check_output(&output, &worker);
                anyhow::Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.await??;
    }
    Ok(())
}
