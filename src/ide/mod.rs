//! IDE features: classification, block structure and todo comments.
//!
//! This module provides the editor-facing services built on the syntax tree.
//! Each service is a synchronous, re-entrant computation that takes a
//! cancellation token and returns `Err(Cancelled)` when it was abandoned.
//!
//! ## Design Principles
//!
//! 1. **Plugins at the seams**: classifiers and structure providers are trait
//!    objects registered per syntax kind
//! 2. **No editor types**: results use our own span types, converted at the boundary
//! 3. **Cancellation is not failure**: a cancelled call reports nothing
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use lens::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let doc = host.set_document_text("Widget.cs", "class Widget {}");
//!
//! let analysis = host.analysis();
//! let blocks = analysis.block_structure(doc, &CancellationToken::new())?;
//! ```

mod analysis;
pub mod classification;
mod coordinator;
pub mod options;
pub mod pool;
pub mod structure;
pub mod todo;

pub use analysis::{Analysis, AnalysisHost, DocumentData};
pub use classification::{
    ClassificationReporter, ClassificationService, ClassifiedSpan, ClassifierRegistry, DedupSink, KindFilter,
    SyntaxClassifier, classify, default_registry,
};
pub use coordinator::{TodoCommentCoordinator, TodoCommentListener, TodoUpdate};
pub use options::{ClassificationOptions, OptionsProvider, StaticOptions, StructureOptions, TodoOptions};
pub use structure::{
    BlockSpan, BlockStructureReporter, BlockType, StructureContext, StructureProvider, StructureRules,
    collect_block_spans, default_rules,
};
pub use todo::{TodoComment, TodoCommentData, TodoCommentDescriptor};
