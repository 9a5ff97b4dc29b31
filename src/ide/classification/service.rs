use std::sync::Arc;

use super::registry::ClassifierRegistry;
use super::worker::{WalkerPools, Worker};
use super::ClassifiedSpan;
use crate::base::{CancellationToken, Cancelled, Span};
use crate::semantic::SemanticModel;
use crate::syntax::SyntaxNode;

/// Receives classification results. Only complete results are reported.
pub trait ClassificationReporter {
    fn report_classifications(&self, span: Span, spans: &[ClassifiedSpan]);
}

/// A classifier set plus the buffers its walks reuse.
#[derive(Debug)]
pub struct ClassificationService {
    registry: Arc<ClassifierRegistry>,
    pools: WalkerPools,
}

impl ClassificationService {
    pub fn new(registry: Arc<ClassifierRegistry>) -> Self {
        Self {
            registry,
            pools: WalkerPools::new(),
        }
    }

    pub fn registry(&self) -> &Arc<ClassifierRegistry> {
        &self.registry
    }

    pub fn classify(
        &self,
        root: &SyntaxNode,
        span: Span,
        model: &dyn SemanticModel,
        cancel: &CancellationToken,
    ) -> Result<Vec<ClassifiedSpan>, Cancelled> {
        Worker::new(&self.registry, model, &self.pools, cancel).run(root, span)
    }

    /// Classify several spans one after another. Either every span is
    /// classified or the call is cancelled as a whole.
    pub fn classify_many(
        &self,
        root: &SyntaxNode,
        spans: &[Span],
        model: &dyn SemanticModel,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<ClassifiedSpan>>, Cancelled> {
        let worker = Worker::new(&self.registry, model, &self.pools, cancel);
        spans.iter().map(|&span| worker.run(root, span)).collect()
    }

    /// Classify `span` and hand the result to `reporter`. Nothing is reported
    /// when the walk is cancelled.
    pub fn classify_and_report(
        &self,
        root: &SyntaxNode,
        span: Span,
        model: &dyn SemanticModel,
        cancel: &CancellationToken,
        reporter: &dyn ClassificationReporter,
    ) -> Result<(), Cancelled> {
        let spans = self.classify(root, span, model, cancel)?;
        reporter.report_classifications(span, &spans);
        Ok(())
    }

    /// Buffers waiting in the pools, for diagnostics.
    pub fn idle_buffers(&self) -> usize {
        self.pools.idle_buffers()
    }
}
