//! Todo comment coordinator tests.

use std::sync::Arc;

use crate::helpers::analysis_helpers::*;
use lens::ide::{AnalysisHost, StaticOptions, TodoCommentCoordinator, TodoUpdate};
use lens::{CancellationToken, DocumentId};

fn host() -> AnalysisHost {
    AnalysisHost::new().with_options(Arc::new(StaticOptions::new().with_todo_tokens(["TODO:0"])))
}

fn analyze(coordinator: &TodoCommentCoordinator, host: &AnalysisHost, id: DocumentId) -> TodoUpdate {
    coordinator
        .analyze_document(id, &host.analysis(), &CancellationToken::new())
        .expect("not cancelled")
}

#[test]
fn test_empty_document_stays_silent() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let id = host.set_document_text("a.cs", "class C {}");

    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Unchanged);
    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Unchanged);
    assert!(listener.take().is_empty());
}

#[test]
fn test_results_then_cleared_once() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let id = host.set_document_text("a.cs", "// TODO one\n// TODO two\n");

    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Reported(2));
    let notifications = listener.take();
    assert_eq!(notifications.len(), 1);
    let Notification::Reported(doc, comments) = &notifications[0] else {
        panic!("expected a report, got {notifications:?}");
    };
    assert_eq!(*doc, id);
    assert_eq!(comments[1].line, 1);
    assert_eq!(comments[1].message, "TODO two");

    host.set_document_text("a.cs", "class C {}");
    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Cleared);
    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Unchanged);
    assert_eq!(listener.take(), vec![Notification::Cleared(id)]);
}

#[test]
fn test_non_empty_results_are_always_reported() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let id = host.set_document_text("a.cs", "// TODO one\n");

    analyze(&coordinator, &host, id);
    analyze(&coordinator, &host, id);
    assert_eq!(listener.take().len(), 2);
}

#[test]
fn test_remove_document() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let with_todo = host.set_document_text("a.cs", "// TODO one\n");
    let without = host.set_document_text("b.cs", "class C {}");

    analyze(&coordinator, &host, with_todo);
    analyze(&coordinator, &host, without);
    listener.take();

    coordinator.remove_document(without);
    assert!(listener.take().is_empty());

    coordinator.remove_document(with_todo);
    assert_eq!(listener.take(), vec![Notification::Cleared(with_todo)]);
    assert!(!coordinator.has_results(with_todo));

    coordinator.remove_document(with_todo);
    assert!(listener.take().is_empty());
}

#[test]
fn test_disabled_options_skip_silently() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = AnalysisHost::new().with_options(Arc::new(StaticOptions::new().without_todo()));
    let id = host.set_document_text("a.cs", "// TODO one\n");

    assert_eq!(analyze(&coordinator, &host, id), TodoUpdate::Skipped);
    assert!(listener.take().is_empty());
}

#[test]
fn test_analyze_documents_in_parallel() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let ids: Vec<DocumentId> = (0..16)
        .map(|i| {
            let text = if i % 2 == 0 { "// TODO even\n" } else { "class Odd {}\n" };
            host.set_document_text(&format!("doc{i}.cs"), text)
        })
        .collect();

    let results = coordinator.analyze_documents(&ids, &host.analysis(), &CancellationToken::new());
    assert_eq!(results.len(), 16);
    for (id, update) in results {
        let expected = if id.index() % 2 == 0 {
            TodoUpdate::Reported(1)
        } else {
            TodoUpdate::Unchanged
        };
        assert_eq!(update, Ok(expected), "{id}");
    }

    let mut reported: Vec<DocumentId> = listener
        .take()
        .into_iter()
        .map(|n| match n {
            Notification::Reported(id, _) => id,
            Notification::Cleared(id) => panic!("unexpected clear of {id}"),
        })
        .collect();
    reported.sort();
    assert_eq!(reported, ids.iter().copied().step_by(2).collect::<Vec<_>>());
}

#[test]
fn test_cancelled_analysis_changes_nothing() {
    let listener = RecordingListener::new();
    let coordinator = TodoCommentCoordinator::new(listener.clone());
    let mut host = host();
    let id = host.set_document_text("a.cs", "// TODO one\n");
    analyze(&coordinator, &host, id);
    listener.take();

    host.set_document_text("a.cs", "class C {}");
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(coordinator.analyze_document(id, &host.analysis(), &cancel).is_err());
    assert!(coordinator.has_results(id));
    assert!(listener.take().is_empty());
}
