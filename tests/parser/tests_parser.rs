//! Parser tests: lossless trees, trivia and recovery.

use rstest::rstest;

use crate::helpers::source_fixtures::*;
use lens::parser::{SyntaxKind, parse};
use lens::syntax::SyntaxNode;
use lens::TextSize;

fn find(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    let mut found = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if node.kind() == kind {
            found.push(node.clone());
        }
        stack.extend(node.child_nodes().cloned());
        for token in node.child_tokens() {
            let trivia = token.leading_trivia().iter().chain(token.trailing_trivia());
            stack.extend(trivia.filter_map(|t| t.structure()).cloned());
        }
    }
    found
}

#[rstest]
#[case(NAMESPACE_REGION_CLASS_METHOD_IF)]
#[case(USINGS_AND_CLASS)]
#[case(LOOPS)]
#[case(DOCUMENTED_CLASS)]
#[case(DUPLICATE_NAMES)]
#[case(TODO_LINE_COMMENTS)]
#[case(TODO_BLOCK_COMMENT)]
#[case("class { void ( } } garbage ;; #region\n")]
#[case("")]
fn test_tree_is_lossless(#[case] source: &str) {
    let root = parse(source).syntax();
    assert_eq!(root.full_text(), source);
    assert_eq!(root.full_range().end(), TextSize::of(source));
}

#[rstest]
#[case(NAMESPACE_REGION_CLASS_METHOD_IF)]
#[case(USINGS_AND_CLASS)]
#[case(LOOPS)]
#[case(DOCUMENTED_CLASS)]
#[case(DUPLICATE_NAMES)]
fn test_fixtures_parse_cleanly(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{:?}", parse.errors);
}

#[test]
fn test_region_directives_are_structured_trivia() {
    let root = parse(NAMESPACE_REGION_CLASS_METHOD_IF).syntax();
    assert_eq!(find(&root, SyntaxKind::REGION_DIRECTIVE).len(), 1);
    assert_eq!(find(&root, SyntaxKind::END_REGION_DIRECTIVE).len(), 1);
}

#[test]
fn test_doc_comment_is_structured_trivia() {
    let root = parse(DOCUMENTED_CLASS).syntax();
    let docs = find(&root, SyntaxKind::DOC_COMMENT_ROOT);
    assert_eq!(docs.len(), 1);
    assert_eq!(find(&docs[0], SyntaxKind::XML_ELEMENT).len(), 1);
}

#[test]
fn test_declarations() {
    let root = parse(DUPLICATE_NAMES).syntax();
    assert_eq!(find(&root, SyntaxKind::NAMESPACE_DECLARATION).len(), 1);
    assert_eq!(find(&root, SyntaxKind::CLASS_DECLARATION).len(), 2);
    assert_eq!(find(&root, SyntaxKind::METHOD_DECLARATION).len(), 1);
    assert_eq!(find(&root, SyntaxKind::OBJECT_CREATION).len(), 1);
}

#[test]
fn test_recovery_reports_errors_and_keeps_going() {
    let source = "class A { int ; }\n}\nclass B { }";
    let parse = parse(source);
    assert!(!parse.ok());
    assert_eq!(find(&parse.syntax(), SyntaxKind::CLASS_DECLARATION).len(), 2);
    for error in &parse.errors {
        assert!(error.range.end() <= TextSize::of(source), "{error}");
    }
}
