//! Classification tests for the IDE layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;
use lens::ide::classification::tags;
use lens::ide::{
    ClassificationReporter, ClassificationService, ClassifiedSpan, ClassifierRegistry, KindFilter,
    SyntaxClassifier, classify, default_registry,
};
use lens::parser::{SyntaxKind, parse};
use lens::semantic::{NoSemantics, SemanticModel};
use lens::syntax::{SyntaxNode, SyntaxToken};
use lens::{CancellationToken, Cancelled, Span, TextRange};

fn tags_of<'a>(spans: &'a [ClassifiedSpan], source: &'a str) -> Vec<(&'a str, &'a str)> {
    spans
        .iter()
        .map(|s| (&source[std::ops::Range::<usize>::from(s.span)], s.tag.as_str()))
        .collect()
}

// =============================================================================
// CLASSIFICATION - ORDER AND PRUNING
// =============================================================================

#[rstest]
#[case(DOCUMENTED_CLASS)]
#[case(DUPLICATE_NAMES)]
#[case(NAMESPACE_REGION_CLASS_METHOD_IF)]
#[case(TODO_LINE_COMMENTS)]
#[case(TODO_AFTER_DIRECTIVES)]
#[case(LOOPS)]
fn test_classification_is_in_source_order(#[case] source: &str) {
    let (host, id) = analysis_from_source(source);
    let spans = host
        .analysis()
        .classify(id, whole(source), &CancellationToken::new())
        .expect("not cancelled");

    assert!(!spans.is_empty());
    for pair in spans.windows(2) {
        assert!(
            pair[0].span.start() <= pair[1].span.start(),
            "{:?} emitted before {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[rstest]
#[case(DOCUMENTED_CLASS, "int count")]
#[case(DOCUMENTED_CLASS, "Widget docs")]
#[case(NAMESPACE_REGION_CLASS_METHOD_IF, "#region R")]
#[case(LOOPS, "i < 3")]
fn test_classification_stays_inside_query(#[case] source: &str, #[case] query: &str) {
    let (host, id) = analysis_from_source(source);
    let span = span_of(source, query);
    let spans = host
        .analysis()
        .classify(id, span, &CancellationToken::new())
        .expect("not cancelled");

    assert!(!spans.is_empty());
    for classified in &spans {
        assert!(
            lens::base::intersects(classified.span, span),
            "{classified:?} outside {span:?}"
        );
    }
}

#[test]
fn test_empty_query_at_caret_sees_both_sides() {
    let source = "int count;";
    let (host, id) = analysis_from_source(source);
    let caret = Span::empty(span_of(source, ";").start());
    let spans = host
        .analysis()
        .classify(id, caret, &CancellationToken::new())
        .expect("not cancelled");
    assert_eq!(
        tags_of(&spans, source),
        vec![("count", tags::FIELD_NAME), (";", tags::PUNCTUATION)]
    );
}

#[test]
fn test_default_classifiers_end_to_end() {
    let source = DOCUMENTED_CLASS;
    let (host, id) = analysis_from_source(source);
    let spans = host
        .analysis()
        .classify(id, whole(source), &CancellationToken::new())
        .expect("not cancelled");
    let found = tags_of(&spans, source);

    assert!(found.contains(&("///", tags::XML_DOC_DELIMITER)));
    assert!(found.contains(&("summary", tags::XML_DOC_NAME)));
    assert!(found.contains(&("Widget docs", tags::XML_DOC_TEXT)));
    assert!(found.contains(&("class", tags::KEYWORD)));
    assert!(found.contains(&("Widget", tags::CLASS_NAME)));
    assert!(found.contains(&("// counter", tags::COMMENT)));
    assert!(found.contains(&("42", tags::NUMBER)));
    assert!(found.contains(&("Name", tags::PROPERTY_NAME)));
    assert!(found.contains(&("get", tags::IDENTIFIER)));
}

#[test]
fn test_comment_after_directive_is_a_comment() {
    let source = TODO_AFTER_DIRECTIVES;
    let (host, id) = analysis_from_source(source);
    let spans = host
        .analysis()
        .classify(id, span_of(source, "#if DEBUG // TODO remove"), &CancellationToken::new())
        .expect("not cancelled");

    assert_eq!(
        tags_of(&spans, source),
        vec![
            ("#if", tags::PREPROCESSOR_KEYWORD),
            ("DEBUG", tags::PREPROCESSOR_TEXT),
            ("// TODO remove", tags::COMMENT),
        ]
    );
}

// =============================================================================
// CLASSIFICATION - PLUGGABLE CLASSIFIERS
// =============================================================================

/// Tags every node with its kind name.
struct NodeKinds;

impl SyntaxClassifier for NodeKinds {
    fn name(&self) -> &str {
        "node kinds"
    }

    fn node_filter(&self) -> KindFilter {
        KindFilter::All
    }

    fn classify_node(
        &self,
        node: &SyntaxNode,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<lens::ide::ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if let Some(kind) = SyntaxKind::from_raw(node.kind()) {
            out.push(ClassifiedSpan::new(node.text_range(), format!("{kind:?}")));
        }
        Ok(())
    }
}

#[test]
fn test_structured_trivia_is_walked_like_nodes() {
    let source = "/// <para>text</para>\nclass C {}";
    let root = parse(source).syntax();

    let class_keyword = root.tokens().find(|t| t.kind() == SyntaxKind::CLASS_KW).expect("class");
    assert!(class_keyword.leading_trivia().iter().any(|t| t.has_structure()));

    let registry = ClassifierRegistry::builder().register(NodeKinds).build();
    let spans = classify(&root, root.full_range(), &registry, &NoSemantics, &CancellationToken::new())
        .expect("not cancelled");
    let kinds: Vec<&str> = spans.iter().map(|s| s.tag.as_str()).collect();
    let position = |kind: &str| {
        kinds
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_else(|| panic!("{kind} not visited in {kinds:?}"))
    };

    // The doc comment hangs off the `class` keyword, so it is walked after
    // the declaration node and before the member list.
    assert_eq!(position("COMPILATION_UNIT"), 0);
    assert!(position("CLASS_DECLARATION") < position("DOC_COMMENT_ROOT"));
    assert!(position("DOC_COMMENT_ROOT") < position("XML_ELEMENT"));
    assert!(position("XML_ELEMENT") < position("XML_START_TAG"));
    assert!(position("XML_START_TAG") < position("XML_END_TAG"));
    assert!(position("XML_END_TAG") < position("MEMBER_LIST"));
}

/// Proposes the same keyword span twice and an empty tag once.
struct Noisy;

impl SyntaxClassifier for Noisy {
    fn name(&self) -> &str {
        "noisy"
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::from_kinds([SyntaxKind::CLASS_KW])
    }

    fn classify_token(
        &self,
        token: &SyntaxToken,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        out.push(ClassifiedSpan::new(token.text_range(), tags::KEYWORD));
        out.push(ClassifiedSpan::new(token.text_range(), ""));
        out.push(ClassifiedSpan::new(token.text_range(), tags::KEYWORD));
        Ok(())
    }
}

#[test]
fn test_duplicates_from_several_classifiers_collapse() {
    let source = "class C {}";
    let root = parse(source).syntax();
    let registry = ClassifierRegistry::builder()
        .register(Noisy)
        .register_shared(Arc::new(Noisy))
        .register(lens::ide::classification::SyntacticTokenClassifier)
        .build();

    let spans = classify(&root, root.full_range(), &registry, &NoSemantics, &CancellationToken::new())
        .expect("not cancelled");
    let keyword: Vec<_> = spans
        .iter()
        .filter(|s| s.span == span_of(source, "class"))
        .collect();
    assert_eq!(keyword.len(), 1);
    assert_eq!(keyword[0].tag, tags::KEYWORD);
}

// =============================================================================
// CLASSIFICATION - CANCELLATION
// =============================================================================

/// Cancels the walk after seeing a number of tokens.
struct CancelAfter {
    seen: AtomicUsize,
    limit: usize,
}

impl SyntaxClassifier for CancelAfter {
    fn name(&self) -> &str {
        "cancel after"
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::All
    }

    fn classify_token(
        &self,
        token: &SyntaxToken,
        _model: &dyn SemanticModel,
        cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 == self.limit {
            cancel.cancel();
        }
        out.push(ClassifiedSpan::new(token.text_range(), "seen"));
        Ok(())
    }
}

#[derive(Default)]
struct Reports {
    reports: Mutex<Vec<(TextRange, usize)>>,
}

impl ClassificationReporter for Reports {
    fn report_classifications(&self, span: Span, spans: &[ClassifiedSpan]) {
        self.reports.lock().push((span, spans.len()));
    }
}

fn large_source() -> String {
    let mut source = String::from("class Big\n{\n");
    for i in 0..200 {
        source.push_str(&format!("    int field{i} = {i};\n"));
    }
    source.push_str("}\n");
    source
}

#[test]
fn test_cancellation_mid_walk_reports_nothing() {
    let source = large_source();
    let root = parse(&source).syntax();
    let registry = ClassifierRegistry::builder()
        .register(CancelAfter {
            seen: AtomicUsize::new(0),
            limit: 50,
        })
        .build();
    let service = ClassificationService::new(Arc::new(registry));
    let reports = Reports::default();

    let cancel = CancellationToken::new();
    let result = service.classify_and_report(&root, root.full_range(), &NoSemantics, &cancel, &reports);

    assert_eq!(result, Err(Cancelled));
    assert!(cancel.is_cancelled());
    assert!(reports.reports.lock().is_empty());
    assert_eq!(service.idle_buffers(), 3, "pooled buffers must be returned");
}

#[test]
fn test_one_shot_classify_matches_pooled_service() {
    let source = DOCUMENTED_CLASS;
    let root = parse(source).syntax();
    let cancel = CancellationToken::new();
    let service = ClassificationService::new(default_registry());

    let pooled = service
        .classify(&root, root.full_range(), &NoSemantics, &cancel)
        .expect("not cancelled");
    let one_shot = classify(&root, root.full_range(), service.registry(), &NoSemantics, &cancel)
        .expect("not cancelled");

    assert_eq!(pooled, one_shot);
    assert_eq!(service.idle_buffers(), 3);
}

#[test]
fn test_service_reuses_buffers_after_cancellation() {
    let source = large_source();
    let root = parse(&source).syntax();
    let service = ClassificationService::new(default_registry());
    let reports = Reports::default();

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert_eq!(
        service.classify_and_report(&root, root.full_range(), &NoSemantics, &cancelled, &reports),
        Err(Cancelled)
    );

    service
        .classify_and_report(&root, root.full_range(), &NoSemantics, &CancellationToken::new(), &reports)
        .expect("not cancelled");
    let reports = reports.reports.lock();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].1 > 600);
    assert_eq!(service.idle_buffers(), 3);
}

#[test]
fn test_classify_many_matches_single_calls() {
    let source = DUPLICATE_NAMES;
    let root = parse(source).syntax();
    let service = ClassificationService::new(default_registry());
    let cancel = CancellationToken::new();
    let queries = [span_of(source, "class Shape"), span_of(source, "Outline()")];

    let many = service
        .classify_many(&root, &queries, &NoSemantics, &cancel)
        .expect("not cancelled");
    let single: Vec<_> = queries
        .iter()
        .map(|&q| service.classify(&root, q, &NoSemantics, &cancel).expect("not cancelled"))
        .collect();
    assert_eq!(many, single);
}
