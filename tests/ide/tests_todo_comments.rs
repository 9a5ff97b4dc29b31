//! Todo comment tests for the IDE layer.

use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;
use lens::ide::TodoCommentDescriptor;
use lens::{CancellationToken, TextSize};

fn todo_messages(source: &str, descriptors: &[TodoCommentDescriptor]) -> Vec<String> {
    let (host, id) = analysis_from_source(source);
    host.analysis()
        .todo_comments(id, descriptors, &CancellationToken::new())
        .expect("not cancelled")
        .into_iter()
        .map(|t| t.message)
        .collect()
}

// =============================================================================
// TODO COMMENTS - MATCHING
// =============================================================================

#[rstest]
#[case("// TODONOT do this", false)]
#[case("// TODO: do this", true)]
#[case("// todo fix", true)]
#[case("//TODO", true)]
#[case("// TODO_later", false)]
#[case("// TODO2", false)]
#[case("// not a TODO", false)]
#[case("/// TODO in docs", true)]
#[case("/* todo: block */", true)]
fn test_whole_word_matching(#[case] comment: &str, #[case] matches: bool) {
    let source = format!("{comment}\nclass C {{}}\n");
    let found = todo_messages(&source, &[TodoCommentDescriptor::new("TODO", 0)]);
    assert_eq!(found.len(), usize::from(matches), "{comment}: {found:?}");
}

#[test]
fn test_line_comments_in_document_order() {
    let descriptors = [
        TodoCommentDescriptor::new("TODO", 0),
        TodoCommentDescriptor::new("HACK", 2),
    ];
    assert_eq!(
        todo_messages(TODO_LINE_COMMENTS, &descriptors),
        vec!["TODO: do this", "todo fix", "HACK keep"]
    );
}

#[test]
fn test_block_comment_line_splitting() {
    let source = TODO_BLOCK_COMMENT;
    let (host, id) = analysis_from_source(source);
    let analysis = host.analysis();
    let found = analysis
        .todo_comments(id, &[TodoCommentDescriptor::new("TODO", 0)], &CancellationToken::new())
        .expect("not cancelled");

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].position, TextSize::from(3));
    assert_eq!(found[0].message, "TODO a");
    assert_eq!(found[1].position, TextSize::from(22));
    assert_eq!(found[1].message, "TODO b");

    let doc = analysis.document(id).expect("document");
    let lines: Vec<u32> = found
        .iter()
        .map(|t| t.to_data(id, doc.text(), doc.line_index()).line)
        .collect();
    assert_eq!(lines, vec![0, 2]);
}

#[test]
fn test_todo_inside_region_message() {
    let source = "#region TODO not a comment\n// TODO real\n#endregion\n";
    assert_eq!(
        todo_messages(source, &[TodoCommentDescriptor::new("TODO", 1)]),
        vec!["TODO real"]
    );
}

#[test]
fn test_comment_after_directive() {
    let source = TODO_AFTER_DIRECTIVES;
    let (host, id) = analysis_from_source(source);
    let found = host
        .analysis()
        .todo_comments(id, &[TodoCommentDescriptor::new("TODO", 1)], &CancellationToken::new())
        .expect("not cancelled");

    let messages: Vec<&str> = found.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["TODO remove", "TODO later"]);
    assert_eq!(found[0].position, span_of(source, "TODO remove").start());
    assert_eq!(found[1].position, span_of(source, "TODO later").start());
}

#[test]
fn test_descriptors_from_default_options() {
    let tokens = lens::ide::TodoOptions::default().tokens;
    let descriptors = TodoCommentDescriptor::parse_options(&tokens);
    assert_eq!(descriptors.len(), 4);
    assert_eq!(
        todo_messages("// UNDONE: revert\n// UnresolvedMergeConflict here\n", &descriptors),
        vec!["UNDONE: revert", "UnresolvedMergeConflict here"]
    );
}

#[test]
fn test_to_data_reports_line_and_column() {
    let source = "class C\n{\n    int x; // HACK keep\n}\n";
    let (host, id) = analysis_from_source(source);
    let analysis = host.analysis();
    let found = analysis
        .todo_comments(id, &[TodoCommentDescriptor::new("HACK", 2)], &CancellationToken::new())
        .expect("not cancelled");
    let doc = analysis.document(id).expect("document");
    let data = found[0].to_data(id, doc.text(), doc.line_index());
    assert_eq!((data.line, data.column, data.priority), (2, 14, 2));
}
