//! Block structure tests for the IDE layer.

use parking_lot::Mutex;
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;
use lens::ide::{AnalysisHost, BlockSpan, BlockStructureReporter, BlockType, StaticOptions, StructureOptions};
use lens::{CancellationToken, Cancelled};

fn blocks(source: &str) -> Vec<BlockSpan> {
    let (host, id) = analysis_from_source(source);
    host.analysis()
        .block_structure(id, &CancellationToken::new())
        .expect("not cancelled")
}

fn blocks_with(source: &str, options: StructureOptions) -> Vec<BlockSpan> {
    let mut host = AnalysisHost::new().with_options(std::sync::Arc::new(StaticOptions::new().with_structure(options)));
    let id = host.set_document_text("test.cs", source);
    host.analysis()
        .block_structure(id, &CancellationToken::new())
        .expect("not cancelled")
}

fn types(blocks: &[BlockSpan]) -> Vec<BlockType> {
    blocks.iter().map(|b| b.block_type).collect()
}

// =============================================================================
// BLOCK STRUCTURE - END TO END
// =============================================================================

#[test]
fn test_namespace_region_class_method_if() {
    let result = blocks(NAMESPACE_REGION_CLASS_METHOD_IF);

    assert_eq!(
        types(&result),
        vec![
            BlockType::Namespace,
            BlockType::PreprocessorRegion,
            BlockType::Type,
            BlockType::Member,
            BlockType::Conditional,
        ]
    );

    let method = &result[3];
    assert!(method.is_collapsible);
    assert!(method.auto_collapse);
    assert_eq!(method.banner_text, "void M()");

    let if_block = &result[4];
    assert!(if_block.is_collapsible);
    assert!(!if_block.auto_collapse);
    assert_eq!(if_block.banner_text, "if (true)");

    let region = &result[1];
    assert_eq!(region.banner_text, "R");
    assert!(region.is_default_collapsed);
}

#[test]
fn test_hint_span_starts_at_header() {
    let source = NAMESPACE_REGION_CLASS_METHOD_IF;
    let class = blocks(source)
        .into_iter()
        .find(|b| b.block_type == BlockType::Type)
        .expect("class block");
    assert_eq!(class.hint_span.start(), span_of(source, "class C").start());
    assert_eq!(class.text_span.start(), span_of(source, "class C").end());
    assert_eq!(class.text_span.end(), class.hint_span.end());
}

#[test]
fn test_usings_group_into_imports() {
    let result = blocks(USINGS_AND_CLASS);
    assert_eq!(types(&result), vec![BlockType::Imports, BlockType::Type]);
    assert!(result[0].auto_collapse);
    assert!(!result[0].is_default_collapsed);
    assert_eq!(result[1].banner_text, "class Widget");
}

#[test]
fn test_loops() {
    let result = blocks(LOOPS);
    assert_eq!(
        types(&result),
        vec![BlockType::Type, BlockType::Member, BlockType::Loop, BlockType::Loop]
    );
    assert_eq!(result[2].banner_text, "while (running)");
    assert_eq!(result[3].banner_text, "for (int i = 0; i < 3; i++)");
}

#[test]
fn test_long_banner_is_cut() {
    let source = "class AVeryLongClassNameThatGoesOnAndOn\n{\n}\n";
    let options = StructureOptions {
        maximum_banner_length: 12,
        ..StructureOptions::default()
    };
    let result = blocks_with(source, options);
    assert_eq!(result[0].banner_text, "class AVeryL...");
}

// =============================================================================
// BLOCK STRUCTURE - INVARIANTS
// =============================================================================

#[rstest]
#[case(NAMESPACE_REGION_CLASS_METHOD_IF)]
#[case(USINGS_AND_CLASS)]
#[case(LOOPS)]
#[case(DOCUMENTED_CLASS)]
#[case(DUPLICATE_NAMES)]
fn test_blocks_are_sorted_and_well_nested(#[case] source: &str) {
    let result = blocks(source);
    for pair in result.windows(2) {
        assert!(pair[0].text_span.start() <= pair[1].text_span.start());
    }
    for (i, outer) in result.iter().enumerate() {
        for inner in &result[i + 1..] {
            let disjoint = inner.text_span.start() >= outer.text_span.end();
            let nested = outer.text_span.contains_range(inner.text_span);
            assert!(disjoint || nested, "{outer:?} partially overlaps {inner:?}");
        }
    }
}

#[rstest]
#[case("void M()")]
#[case("#region R")]
#[case("if (true)")]
fn test_blocks_stay_inside_query(#[case] query: &str) {
    let source = NAMESPACE_REGION_CLASS_METHOD_IF;
    let (host, id) = analysis_from_source(source);
    let span = span_of(source, query);
    let result = host
        .analysis()
        .block_structure_in(id, span, &CancellationToken::new())
        .expect("not cancelled");

    assert!(!result.is_empty());
    for block in &result {
        assert!(lens::base::intersects(block.text_span, span), "{block:?} outside {span:?}");
    }
}

#[rstest]
#[case("void M()")]
#[case("if (true)")]
#[case("#endregion")]
fn test_region_found_from_inside_its_body(#[case] query: &str) {
    let source = NAMESPACE_REGION_CLASS_METHOD_IF;
    let (host, id) = analysis_from_source(source);
    let span = span_of(source, query);
    let result = host
        .analysis()
        .block_structure_in(id, span, &CancellationToken::new())
        .expect("not cancelled");

    let regions: Vec<&BlockSpan> = result
        .iter()
        .filter(|b| b.block_type == BlockType::PreprocessorRegion)
        .collect();
    assert_eq!(regions.len(), 1, "{result:?}");
    assert!(regions[0].text_span.contains_range(span));
    assert_eq!(regions[0].banner_text, "R");
}

#[test]
fn test_query_excludes_later_blocks() {
    let source = NAMESPACE_REGION_CLASS_METHOD_IF;
    let (host, id) = analysis_from_source(source);
    let result = host
        .analysis()
        .block_structure_in(id, span_of(source, "void M()"), &CancellationToken::new())
        .expect("not cancelled");
    assert!(!types(&result).contains(&BlockType::Conditional));
    assert!(types(&result).contains(&BlockType::Member));
}

#[test]
fn test_cancelled_structure() {
    let (host, id) = analysis_from_source(LOOPS);
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(host.analysis().block_structure(id, &cancel), Err(Cancelled));
}

/// Keeps every reported outline.
#[derive(Default)]
struct Outlines {
    reports: Mutex<Vec<Vec<BlockType>>>,
}

impl BlockStructureReporter for Outlines {
    fn report_block_spans(&self, spans: &[BlockSpan]) {
        self.reports.lock().push(types(spans));
    }
}

#[test]
fn test_reporter_gets_complete_outline() {
    let (host, id) = analysis_from_source(LOOPS);
    let outlines = Outlines::default();
    host.analysis()
        .block_structure_and_report(id, &CancellationToken::new(), &outlines)
        .expect("not cancelled");

    assert_eq!(
        *outlines.reports.lock(),
        vec![vec![BlockType::Type, BlockType::Member, BlockType::Loop, BlockType::Loop]]
    );
}

#[test]
fn test_cancelled_outline_is_not_reported() {
    let (host, id) = analysis_from_source(LOOPS);
    let outlines = Outlines::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert_eq!(
        host.analysis().block_structure_and_report(id, &cancel, &outlines),
        Err(Cancelled)
    );
    assert!(outlines.reports.lock().is_empty());
}

// =============================================================================
// BLOCK STRUCTURE - OPTIONS
// =============================================================================

#[test]
fn test_code_level_outlining_off() {
    let options = StructureOptions {
        show_outlining_for_code_level: false,
        ..StructureOptions::default()
    };
    let result = blocks_with(LOOPS, options);
    assert_eq!(
        types(&result),
        vec![BlockType::Type, BlockType::Member, BlockType::Loop, BlockType::Loop]
    );
    let collapsible: Vec<bool> = result.iter().map(|b| b.is_collapsible).collect();
    assert_eq!(collapsible, vec![true, true, false, false]);
}

#[test]
fn test_declaration_guides_off() {
    let options = StructureOptions {
        show_block_structure_guides_for_declaration_level: false,
        ..StructureOptions::default()
    };
    let result = blocks_with(NAMESPACE_REGION_CLASS_METHOD_IF, options);
    assert_eq!(
        types(&result),
        vec![
            BlockType::Nonstructural,
            BlockType::PreprocessorRegion,
            BlockType::Nonstructural,
            BlockType::Nonstructural,
            BlockType::Conditional,
        ]
    );
    // Guides and outlining are separate switches
    assert!(result[0].is_collapsible);
}

#[test]
fn test_region_collapse_options() {
    let options = StructureOptions {
        collapse_regions_when_collapsing_to_definitions: true,
        collapse_regions_when_first_opened: false,
        ..StructureOptions::default()
    };
    let region = blocks_with(NAMESPACE_REGION_CLASS_METHOD_IF, options)
        .into_iter()
        .find(|b| b.block_type == BlockType::PreprocessorRegion)
        .expect("region");
    assert!(region.auto_collapse);
    assert!(!region.is_default_collapsed);
}

#[test]
fn test_imports_collapse_when_first_opened() {
    let options = StructureOptions {
        collapse_imports_when_first_opened: true,
        ..StructureOptions::default()
    };
    let result = blocks_with(USINGS_AND_CLASS, options);
    assert!(result[0].is_default_collapsed);
}
