//! Todo comment coordination across document changes.
//!
//! The coordinator rescans a document whenever the caller says it changed and
//! tells a [`TodoCommentListener`] about the outcome. It remembers which
//! documents last reported todo comments, so a document that keeps having none
//! stays silent, and a document that loses its last one is cleared exactly
//! once.

use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::base::{CancellationToken, Cancelled, DocumentId};

use super::analysis::Analysis;
use super::todo::{TodoCommentData, TodoCommentDescriptor};

/// Receives todo comment changes.
pub trait TodoCommentListener: Send + Sync {
    /// The complete, non-empty list of todo comments of a document.
    fn report_todo_comments(&self, document: DocumentId, comments: &[TodoCommentData]);

    /// A document that had todo comments has none left, or was removed.
    fn report_cleared(&self, document: DocumentId);
}

/// What happened to a document during one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoUpdate {
    /// Todo comments were reported.
    Reported(usize),
    /// The last todo comment disappeared and the document was cleared.
    Cleared,
    /// Nothing to report.
    Unchanged,
    /// Todo scanning is turned off for the document.
    Skipped,
}

/// Parsed descriptors per exact token list.
type DescriptorCache = FxHashMap<Vec<String>, Arc<[TodoCommentDescriptor]>>;

pub struct TodoCommentCoordinator {
    listener: Arc<dyn TodoCommentListener>,
    /// Documents whose last scan found todo comments.
    with_results: Mutex<FxHashSet<DocumentId>>,
    descriptors: Mutex<DescriptorCache>,
}

impl TodoCommentCoordinator {
    pub fn new(listener: Arc<dyn TodoCommentListener>) -> Self {
        Self {
            listener,
            with_results: Mutex::new(FxHashSet::default()),
            descriptors: Mutex::new(FxHashMap::default()),
        }
    }

    /// Rescan one document and notify the listener if needed.
    ///
    /// A cancelled scan changes nothing: the last reported result stays.
    pub fn analyze_document(
        &self,
        document: DocumentId,
        analysis: &Analysis,
        cancel: &CancellationToken,
    ) -> Result<TodoUpdate, Cancelled> {
        let Some(options) = analysis.options().todo_options(document) else {
            trace!(%document, "todo comments disabled");
            return Ok(TodoUpdate::Skipped);
        };
        let Some(doc) = analysis.document(document) else {
            trace!(%document, "document not in snapshot");
            return Ok(TodoUpdate::Skipped);
        };

        let descriptors = self.descriptors_for(&options.tokens);
        let comments = analysis.todo_comments(document, &descriptors, cancel)?;

        if comments.is_empty() {
            if self.with_results.lock().remove(&document) {
                debug!(%document, "todo comments cleared");
                self.listener.report_cleared(document);
                return Ok(TodoUpdate::Cleared);
            }
            return Ok(TodoUpdate::Unchanged);
        }

        let data: Vec<TodoCommentData> = comments
            .iter()
            .map(|comment| comment.to_data(document, doc.text(), doc.line_index()))
            .collect();
        self.with_results.lock().insert(document);
        debug!(%document, count = data.len(), "todo comments reported");
        self.listener.report_todo_comments(document, &data);
        Ok(TodoUpdate::Reported(data.len()))
    }

    /// Analyze several documents in parallel. Each document is cancelled or
    /// completed on its own.
    pub fn analyze_documents(
        &self,
        documents: &[DocumentId],
        analysis: &Analysis,
        cancel: &CancellationToken,
    ) -> Vec<(DocumentId, Result<TodoUpdate, Cancelled>)> {
        documents
            .par_iter()
            .map(|&document| (document, self.analyze_document(document, analysis, cancel)))
            .collect()
    }

    /// Forget a document. Clears it first if it had todo comments.
    pub fn remove_document(&self, document: DocumentId) {
        if self.with_results.lock().remove(&document) {
            debug!(%document, "removed document had todo comments");
            self.listener.report_cleared(document);
        }
    }

    pub fn has_results(&self, document: DocumentId) -> bool {
        self.with_results.lock().contains(&document)
    }

    /// Descriptors for a token list, reparsed only when the list changed.
    fn descriptors_for(&self, tokens: &[String]) -> Arc<[TodoCommentDescriptor]> {
        let mut cache = self.descriptors.lock();
        if let Some(descriptors) = cache.get(tokens) {
            return descriptors.clone();
        }
        trace!(?tokens, "parsing todo descriptors");
        let descriptors: Arc<[TodoCommentDescriptor]> = TodoCommentDescriptor::parse_options(tokens).into();
        cache.insert(tokens.to_vec(), descriptors.clone());
        descriptors
    }
}
