//! AnalysisHost and Analysis: document state and query snapshots.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. Snapshots share the parsed documents with the host, so taking
//! one is cheap and later edits never change a snapshot already handed out.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply document changes
//! let doc = host.set_document_text("Widget.cs", text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let spans = analysis.classify(doc, span, &cancel)?;
//! let blocks = analysis.block_structure(doc, &cancel)?;
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::{CancellationToken, Cancelled, DocumentId, LineCol, LineIndex, Span, TextSize};
use crate::parser::{Parse, ParseError, parse};
use crate::semantic::{DeclarationIndex, NoSemantics, SemanticModel};
use crate::syntax::SyntaxNode;

use super::classification::{ClassificationService, ClassifiedSpan, ClassifierRegistry, default_registry};
use super::options::{OptionsProvider, StaticOptions};
use super::structure::{BlockSpan, BlockStructureReporter, StructureRules, collect_block_spans, default_rules};
use super::todo::{TodoComment, TodoCommentDescriptor, scan};

/// One parsed document and what is derived from its text.
#[derive(Debug)]
pub struct DocumentData {
    text: Arc<str>,
    parse: Parse,
    line_index: LineIndex,
    declarations: DeclarationIndex,
}

impl DocumentData {
    fn new(text: &str) -> Self {
        let parse = parse(text);
        let declarations = DeclarationIndex::build(&parse.syntax());
        Self {
            text: Arc::from(text),
            line_index: LineIndex::new(text),
            parse,
            declarations,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.parse.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn declarations(&self) -> &DeclarationIndex {
        &self.declarations
    }
}

type Documents = FxHashMap<DocumentId, Arc<DocumentData>>;

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_document_text()` and `remove_document()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    documents: Arc<Documents>,
    /// Map from document path to DocumentId
    document_ids: FxHashMap<String, DocumentId>,
    /// Reverse map from DocumentId to document path
    document_paths: FxHashMap<DocumentId, String>,
    next_id: u32,
    classification: Arc<ClassificationService>,
    structure_rules: Arc<StructureRules>,
    options: Arc<dyn OptionsProvider>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// A host with the default classifiers, structure rules and options.
    pub fn new() -> Self {
        Self {
            documents: Arc::default(),
            document_ids: FxHashMap::default(),
            document_paths: FxHashMap::default(),
            next_id: 0,
            classification: Arc::new(ClassificationService::new(default_registry())),
            structure_rules: default_rules(),
            options: Arc::new(StaticOptions::new()),
        }
    }

    pub fn with_options(mut self, options: Arc<dyn OptionsProvider>) -> Self {
        self.options = options;
        self
    }

    pub fn with_registry(mut self, registry: Arc<ClassifierRegistry>) -> Self {
        self.classification = Arc::new(ClassificationService::new(registry));
        self
    }

    pub fn with_structure_rules(mut self, rules: Arc<StructureRules>) -> Self {
        self.structure_rules = rules;
        self
    }

    /// Set the text of a document, parsing it when the text changed.
    ///
    /// New paths get the next free `DocumentId`.
    pub fn set_document_text(&mut self, path: &str, text: &str) -> DocumentId {
        let id = match self.document_ids.get(path) {
            Some(&id) => id,
            None => {
                let id = DocumentId::new(self.next_id);
                self.next_id += 1;
                self.document_ids.insert(path.to_string(), id);
                self.document_paths.insert(id, path.to_string());
                id
            }
        };

        if self.documents.get(&id).is_some_and(|doc| doc.text() == text) {
            trace!(%id, "document text unchanged");
            return id;
        }

        let data = DocumentData::new(text);
        debug!(%id, path, errors = data.errors().len(), "parsed document");
        Arc::make_mut(&mut self.documents).insert(id, Arc::new(data));
        id
    }

    /// Remove a document. Returns its id if it was open.
    pub fn remove_document(&mut self, path: &str) -> Option<DocumentId> {
        let id = self.document_ids.remove(path)?;
        self.document_paths.remove(&id);
        Arc::make_mut(&mut self.documents).remove(&id);
        Some(id)
    }

    pub fn has_document(&self, path: &str) -> bool {
        self.document_ids.contains_key(path)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Get the DocumentId for a path, if it is open.
    pub fn document_id(&self, path: &str) -> Option<DocumentId> {
        self.document_ids.get(path).copied()
    }

    /// Get the path for a DocumentId, if it is open.
    pub fn document_path(&self, id: DocumentId) -> Option<&str> {
        self.document_paths.get(&id).map(String::as_str)
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            documents: self.documents.clone(),
            classification: self.classification.clone(),
            structure_rules: self.structure_rules.clone(),
            options: self.options.clone(),
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// Queries on documents the snapshot does not know return empty results.
#[derive(Clone)]
pub struct Analysis {
    documents: Arc<Documents>,
    classification: Arc<ClassificationService>,
    structure_rules: Arc<StructureRules>,
    options: Arc<dyn OptionsProvider>,
}

impl Analysis {
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&id).map(|doc| &**doc)
    }

    /// Ids of every document in the snapshot, in ascending order.
    pub fn document_ids(&self) -> Vec<DocumentId> {
        let mut ids: Vec<_> = self.documents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn options(&self) -> &dyn OptionsProvider {
        &*self.options
    }

    pub fn classification(&self) -> &ClassificationService {
        &self.classification
    }

    pub fn line_col(&self, id: DocumentId, offset: TextSize) -> Option<LineCol> {
        Some(self.document(id)?.line_index.line_col(offset))
    }

    /// Classify the part of a document intersecting `span`.
    pub fn classify(
        &self,
        id: DocumentId,
        span: Span,
        cancel: &CancellationToken,
    ) -> Result<Vec<ClassifiedSpan>, Cancelled> {
        let Some(doc) = self.document(id) else {
            return Ok(Vec::new());
        };
        let model: &dyn SemanticModel = if self.options.classification_options(id).semantic {
            &doc.declarations
        } else {
            &NoSemantics
        };
        self.classification.classify(&doc.syntax(), span, model, cancel)
    }

    /// The outline of a whole document.
    pub fn block_structure(&self, id: DocumentId, cancel: &CancellationToken) -> Result<Vec<BlockSpan>, Cancelled> {
        match self.document(id) {
            Some(doc) => self.block_structure_in(id, doc.syntax().full_range(), cancel),
            None => Ok(Vec::new()),
        }
    }

    /// The blocks of a document intersecting `span`.
    pub fn block_structure_in(
        &self,
        id: DocumentId,
        span: Span,
        cancel: &CancellationToken,
    ) -> Result<Vec<BlockSpan>, Cancelled> {
        let Some(doc) = self.document(id) else {
            return Ok(Vec::new());
        };
        let options = self.options.structure_options(id);
        let mut out = Vec::new();
        collect_block_spans(
            &doc.syntax(),
            doc.text(),
            span,
            &self.structure_rules,
            &options,
            &mut out,
            cancel,
        )?;
        Ok(out)
    }

    /// Compute the outline of a document and hand it to `reporter`. Nothing
    /// is reported when the computation is cancelled.
    pub fn block_structure_and_report(
        &self,
        id: DocumentId,
        cancel: &CancellationToken,
        reporter: &dyn BlockStructureReporter,
    ) -> Result<(), Cancelled> {
        let spans = self.block_structure(id, cancel)?;
        reporter.report_block_spans(&spans);
        Ok(())
    }

    pub fn todo_comments(
        &self,
        id: DocumentId,
        descriptors: &[TodoCommentDescriptor],
        cancel: &CancellationToken,
    ) -> Result<Vec<TodoComment>, Cancelled> {
        match self.document(id) {
            Some(doc) => scan(&doc.syntax(), doc.text(), &doc.line_index, descriptors, cancel),
            None => Ok(Vec::new()),
        }
    }
}
