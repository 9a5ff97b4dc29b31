//! Helpers for setting up analysis hosts and recording notifications.

use std::sync::Arc;

use parking_lot::Mutex;
use lens::ide::{AnalysisHost, TodoCommentData, TodoCommentListener};
use lens::{DocumentId, TextRange, TextSize};

/// Creates an AnalysisHost with a single document.
pub fn analysis_from_source(source: &str) -> (AnalysisHost, DocumentId) {
    analysis_from_source_at(source, "test.cs")
}

/// Creates an AnalysisHost with a single document at `path`.
pub fn analysis_from_source_at(source: &str, path: &str) -> (AnalysisHost, DocumentId) {
    let mut host = AnalysisHost::new();
    let id = host.set_document_text(path, source);
    let errors = host
        .analysis()
        .document(id)
        .map(|doc| doc.errors().to_vec())
        .unwrap_or_default();
    assert!(errors.is_empty(), "Parse errors in '{path}': {errors:?}");
    (host, id)
}

/// The span covering all of `source`.
pub fn whole(source: &str) -> TextRange {
    TextRange::up_to(TextSize::of(source))
}

/// The span of the first occurrence of `needle` in `source`.
pub fn span_of(source: &str, needle: &str) -> TextRange {
    let start = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not in source"));
    TextRange::at(TextSize::from(start as u32), TextSize::of(needle))
}

/// A notification received by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Reported(DocumentId, Vec<TodoCommentData>),
    Cleared(DocumentId),
}

/// Todo listener that records every notification in order.
#[derive(Default)]
pub struct RecordingListener {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock())
    }
}

impl TodoCommentListener for RecordingListener {
    fn report_todo_comments(&self, document: DocumentId, comments: &[TodoCommentData]) {
        self.notifications
            .lock()
            .push(Notification::Reported(document, comments.to_vec()));
    }

    fn report_cleared(&self, document: DocumentId) {
        self.notifications.lock().push(Notification::Cleared(document));
    }
}
