//! Per-document options for classification, structure and todo comments

use crate::base::DocumentId;

/// Todo comment scanning options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoOptions {
    /// Descriptor strings of the form `TEXT:priority`
    pub tokens: Vec<String>,
}

impl Default for TodoOptions {
    fn default() -> Self {
        Self {
            tokens: vec![
                "HACK:1".to_string(),
                "TODO:1".to_string(),
                "UNDONE:1".to_string(),
                "UnresolvedMergeConflict:0".to_string(),
            ],
        }
    }
}

/// Outlining and structure guide options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureOptions {
    pub show_block_structure_guides_for_declaration_level: bool,
    pub show_block_structure_guides_for_code_level: bool,
    pub show_block_structure_guides_for_comments_and_preprocessor_regions: bool,
    pub show_outlining_for_declaration_level: bool,
    pub show_outlining_for_code_level: bool,
    pub show_outlining_for_comments_and_preprocessor_regions: bool,
    /// Regions collapse along with definitions
    pub collapse_regions_when_collapsing_to_definitions: bool,
    /// Regions start collapsed when a document is opened
    pub collapse_regions_when_first_opened: bool,
    /// Import groups start collapsed when a document is opened
    pub collapse_imports_when_first_opened: bool,
    /// Banner texts longer than this (in chars) are cut and end in `...`
    pub maximum_banner_length: usize,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            show_block_structure_guides_for_declaration_level: true,
            show_block_structure_guides_for_code_level: true,
            show_block_structure_guides_for_comments_and_preprocessor_regions: true,
            show_outlining_for_declaration_level: true,
            show_outlining_for_code_level: true,
            show_outlining_for_comments_and_preprocessor_regions: true,
            collapse_regions_when_collapsing_to_definitions: false,
            collapse_regions_when_first_opened: true,
            collapse_imports_when_first_opened: false,
            maximum_banner_length: 80,
        }
    }
}

/// Classification options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationOptions {
    /// Refine identifiers with the document's declaration index
    pub semantic: bool,
}

impl Default for ClassificationOptions {
    fn default() -> Self {
        Self { semantic: true }
    }
}

/// Source of per-document options.
pub trait OptionsProvider: Send + Sync {
    /// `None` disables todo scanning for the document.
    fn todo_options(&self, document: DocumentId) -> Option<TodoOptions>;

    fn structure_options(&self, document: DocumentId) -> StructureOptions;

    fn classification_options(&self, _document: DocumentId) -> ClassificationOptions {
        ClassificationOptions::default()
    }
}

/// The same options for every document.
///
/// `StaticOptions::default()` leaves todo scanning off; `new()` turns it on
/// with the default descriptors.
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    pub todo: Option<TodoOptions>,
    pub structure: StructureOptions,
    pub classification: ClassificationOptions,
}

impl StaticOptions {
    pub fn new() -> Self {
        Self {
            todo: Some(TodoOptions::default()),
            ..Self::default()
        }
    }

    pub fn with_todo_tokens<S: Into<String>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
        self.todo = Some(TodoOptions {
            tokens: tokens.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn without_todo(mut self) -> Self {
        self.todo = None;
        self
    }

    pub fn with_structure(mut self, structure: StructureOptions) -> Self {
        self.structure = structure;
        self
    }
}

impl OptionsProvider for StaticOptions {
    fn todo_options(&self, _document: DocumentId) -> Option<TodoOptions> {
        self.todo.clone()
    }

    fn structure_options(&self, _document: DocumentId) -> StructureOptions {
        self.structure.clone()
    }

    fn classification_options(&self, _document: DocumentId) -> ClassificationOptions {
        self.classification.clone()
    }
}
