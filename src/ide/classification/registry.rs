//! Classifier registry with per-kind memoization.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::SyntaxClassifier;
use crate::syntax::RawSyntaxKind;

/// Classifiers applicable to one kind, in registration order.
pub type ClassifierList = Arc<[Arc<dyn SyntaxClassifier>]>;

type KindCache = RwLock<FxHashMap<RawSyntaxKind, ClassifierList>>;

/// An immutable set of classifiers.
///
/// Lookups are memoized per kind for the lifetime of the registry. The
/// registry is shared between walks through an `Arc`.
pub struct ClassifierRegistry {
    classifiers: Vec<Arc<dyn SyntaxClassifier>>,
    node_cache: KindCache,
    token_cache: KindCache,
}

impl ClassifierRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Classifiers whose node filter accepts `kind`.
    pub fn node_classifiers(&self, kind: RawSyntaxKind) -> ClassifierList {
        self.lookup(&self.node_cache, kind, |c| c.node_filter().accepts(kind))
    }

    /// Classifiers whose token filter accepts `kind`.
    pub fn token_classifiers(&self, kind: RawSyntaxKind) -> ClassifierList {
        self.lookup(&self.token_cache, kind, |c| c.token_filter().accepts(kind))
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    pub fn classifier_names(&self) -> Vec<&str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    fn lookup(
        &self,
        cache: &KindCache,
        kind: RawSyntaxKind,
        applies: impl Fn(&dyn SyntaxClassifier) -> bool,
    ) -> ClassifierList {
        if let Some(hit) = cache.read().get(&kind) {
            return hit.clone();
        }

        let computed: ClassifierList = self
            .classifiers
            .iter()
            .filter(|c| applies(c.as_ref()))
            .cloned()
            .collect();
        trace!(?kind, count = computed.len(), "classifier cache miss");

        // Another walk may have filled the slot meanwhile; keep the first entry
        cache.write().entry(kind).or_insert(computed).clone()
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRegistry")
            .field("classifiers", &self.classifier_names())
            .finish()
    }
}

/// Collects classifiers in registration order.
#[derive(Default)]
pub struct RegistryBuilder {
    classifiers: Vec<Arc<dyn SyntaxClassifier>>,
}

impl RegistryBuilder {
    pub fn register(mut self, classifier: impl SyntaxClassifier + 'static) -> Self {
        self.classifiers.push(Arc::new(classifier));
        self
    }

    pub fn register_shared(mut self, classifier: Arc<dyn SyntaxClassifier>) -> Self {
        self.classifiers.push(classifier);
        self
    }

    pub fn build(self) -> ClassifierRegistry {
        ClassifierRegistry {
            classifiers: self.classifiers,
            node_cache: RwLock::default(),
            token_cache: RwLock::default(),
        }
    }
}
