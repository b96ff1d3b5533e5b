//! Recorder behavior over real Handlebars templates.

use std::collections::HashSet;
use std::sync::Arc;

use plate_core::{Recorder, RenderFailure, Renderable, TemplateRenderer};
use serde_json::{json, Value};

fn recorder_for(source: &str) -> Recorder<TemplateRenderer, Value> {
    Recorder::new(Arc::new(TemplateRenderer::from_source(source).unwrap()))
}

#[test]
fn test_recorder_executes_templates() {
    let tpl = Arc::new(TemplateRenderer::from_source("Hi, {{this}}").unwrap());
    let rec = Recorder::new(Arc::clone(&tpl));
    let ctx = json!("John");

    let mut direct = Vec::new();
    let mut recorded = Vec::new();
    tpl.render(&mut direct, &ctx).unwrap();
    rec.render(&mut recorded, &ctx).unwrap();

    assert_eq!(direct, b"Hi, John");
    assert_eq!(recorded, direct);

    assert_eq!(rec.execution_count(), 1);
    let last = rec.last_execution();
    assert_eq!(last.output_str().unwrap(), "Hi, John");
    assert_eq!(last.context, ctx);
    assert!(last.error.is_none());
}

#[test]
fn test_recorder_executes_named_templates() {
    let mut tpl = TemplateRenderer::new();
    tpl.register("t2", "Hi, {{this}}").unwrap();
    let tpl = Arc::new(tpl);
    let rec = Recorder::new(Arc::clone(&tpl));
    let ctx = json!("John");

    let mut direct = Vec::new();
    let mut recorded = Vec::new();
    tpl.render_named(&mut direct, "t2", &ctx).unwrap();
    rec.render_named(&mut recorded, "t2", &ctx).unwrap();

    assert_eq!(direct, b"Hi, John");
    assert_eq!(recorded, direct);
    assert_eq!(rec.last_execution().template.as_deref(), Some("t2"));
}

#[test]
fn test_recorder_relays_errors() {
    let rec = recorder_for("Hi, {{name}} <{{email}}>");
    let ctx = json!({ "name": "John" });

    let mut direct = Vec::new();
    let mut recorded = Vec::new();
    let err1 = rec.template().render(&mut direct, &ctx);
    let err2 = rec.render(&mut recorded, &ctx);

    assert!(err1.is_err());
    assert_eq!(err1, err2);
    assert_eq!(recorded, direct);

    let last = rec.last_execution();
    assert_eq!(last.error, err2.err());
    assert_eq!(last.output, direct);
}

#[test]
fn test_recorder_records_in_call_order() {
    let mut tpl = TemplateRenderer::from_source("{{name}}").unwrap();
    tpl.register("t2", "Hi, {{email}}").unwrap();
    let rec = Recorder::new(Arc::new(tpl));
    let ctx = json!({ "name": "John" });

    let mut sink = Vec::new();
    let r0 = rec.render(&mut sink, &ctx);
    let r1 = rec.render_named(&mut sink, "t2", &ctx);
    let r2 = rec.render(&mut sink, &json!({ "name": "Jane" }));

    let history = rec.history();
    assert_eq!(history.len(), 3);
    assert_eq!(rec.execution_count(), 3);

    assert_eq!(history[0].output, b"John");
    assert_eq!(history[0].error, r0.err());
    assert!(history[0].template.is_none());

    assert_eq!(history[1].error, r1.err());
    assert!(history[1].is_failure());
    assert_eq!(history[1].template.as_deref(), Some("t2"));

    assert_eq!(history[2].output, b"Jane");
    assert_eq!(history[2].error, r2.err());
    assert_eq!(history[2].context, json!({ "name": "Jane" }));
}

#[test]
fn test_failed_executions_keep_invalid_context() {
    let rec = recorder_for("Dear {{user.name}}");
    let valid = json!({ "user": { "name": "John" } });
    let invalid = json!({ "account": { "name": "John" } });

    let mut sink = Vec::new();
    rec.render(&mut sink, &valid).unwrap();
    let _ = rec.render(&mut sink, &invalid);

    assert_eq!(rec.execution_count(), 2);
    let failed = rec.failed_executions();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].context, invalid);

    let ok = rec.successful_executions();
    assert_eq!(ok.len(), 1);
    assert_eq!(ok[0].context, valid);
}

#[test]
fn test_failed_executions_is_subsequence_of_history() {
    let rec = recorder_for("{{n}}");
    let mut sink = Vec::new();
    for i in 0..10 {
        let ctx = if i % 3 == 0 { json!({}) } else { json!({ "n": i }) };
        let _ = rec.render(&mut sink, &ctx);
    }

    let expected: Vec<_> = rec
        .history()
        .into_iter()
        .filter(|exec| exec.is_failure())
        .collect();
    assert_eq!(rec.failed_executions(), expected);
    assert_eq!(expected.len(), 4);
}

#[test]
fn test_missing_named_template_is_recorded() {
    let rec = recorder_for("root");
    let mut sink = Vec::new();
    let err = rec.render_named(&mut sink, "nope", &json!({})).unwrap_err();

    assert_eq!(err, RenderFailure::new("template not found: nope"));
    assert_eq!(rec.failed_executions().len(), 1);
    assert!(rec.last_execution().output.is_empty());
}

#[test]
#[should_panic(expected = "no executions have been recorded yet")]
fn test_last_execution_on_fresh_recorder_panics() {
    recorder_for("Hi").last_execution();
}

#[test]
fn test_reset_then_render() {
    let rec = recorder_for("Hi, {{this}}");
    let mut sink = Vec::new();
    rec.render(&mut sink, &json!("John")).unwrap();
    rec.reset();
    rec.reset();
    assert_eq!(rec.execution_count(), 0);
    assert!(rec.try_last_execution().is_err());

    rec.render(&mut sink, &json!("Jane")).unwrap();
    assert_eq!(rec.last_execution().output, b"Hi, Jane");
}

#[test]
fn test_shared_context_is_not_copied() {
    let rec: Recorder<TemplateRenderer, Arc<Value>> =
        Recorder::new(Arc::new(TemplateRenderer::from_source("Hi, {{name}}").unwrap()));
    let ctx = Arc::new(json!({ "name": "John" }));

    let mut sink = Vec::new();
    rec.render(&mut sink, &ctx).unwrap();
    rec.render_named(&mut sink, "missing", &ctx).unwrap_err();

    assert_eq!(sink, b"Hi, John");
    for exec in rec.history() {
        assert!(Arc::ptr_eq(&exec.context, &ctx));
    }
    assert!(Arc::ptr_eq(&rec.last_execution().context, &ctx));
    // The caller's handle plus one per recorded execution.
    assert_eq!(Arc::strong_count(&ctx), 3);
}

#[test]
fn test_concurrent_renders_are_all_recorded() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let rec = recorder_for("#{{id}}");

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let rec = &rec;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    let id = t * PER_THREAD + i;
                    let mut sink = Vec::new();
                    rec.render(&mut sink, &json!({ "id": id })).unwrap();
                    assert_eq!(sink, format!("#{id}").into_bytes());
                }
            });
        }
        // Readers run alongside writers and only ever see whole records.
        s.spawn(|| {
            for _ in 0..50 {
                for exec in rec.history() {
                    let id = exec.context["id"].as_u64().unwrap();
                    assert_eq!(exec.output, format!("#{id}").into_bytes());
                }
            }
        });
    });

    assert_eq!(rec.execution_count(), THREADS * PER_THREAD);
    let seen: HashSet<u64> = rec
        .history()
        .iter()
        .map(|exec| exec.context["id"].as_u64().unwrap())
        .collect();
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}
