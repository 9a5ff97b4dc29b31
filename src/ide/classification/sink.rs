use indexmap::IndexSet;
use smol_str::SmolStr;

use super::ClassifiedSpan;
use crate::base::Span;
use crate::ide::pool::Poolable;

/// Ordered set of classified spans.
///
/// Adding a (span, tag) pair that is already present is a no-op, so the
/// output keeps the order in which each pair was first seen.
#[derive(Debug, Default)]
pub struct DedupSink {
    spans: IndexSet<ClassifiedSpan>,
}

impl DedupSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the pair was already present.
    pub fn add(&mut self, span: Span, tag: impl Into<SmolStr>) -> bool {
        self.insert(ClassifiedSpan::new(span, tag))
    }

    pub fn insert(&mut self, span: ClassifiedSpan) -> bool {
        self.spans.insert(span)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedSpan> {
        self.spans.iter()
    }

    pub fn to_vec(&self) -> Vec<ClassifiedSpan> {
        self.spans.iter().cloned().collect()
    }

    /// Remove every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.spans.clear();
    }
}

impl Poolable for DedupSink {
    fn reset(&mut self) {
        self.clear();
    }
}
