//! `#region` / `#endregion` pairing.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::{CancellationToken, Cancelled, TextSize, check_cancelled};
use crate::parser::SyntaxKind;
use crate::syntax::SyntaxNode;

/// Matches each `#region` directive with its `#endregion`.
///
/// Regions nest: an `#endregion` closes the innermost open region. Unmatched
/// directives on either side are ignored.
#[derive(Debug, Default)]
pub struct DirectiveIndex {
    regions: Vec<SyntaxNode>,
    end_of_region: FxHashMap<TextSize, SyntaxNode>,
}

impl DirectiveIndex {
    pub fn build(root: &SyntaxNode, cancel: &CancellationToken) -> Result<Self, Cancelled> {
        let mut open: Vec<TextSize> = Vec::new();
        let mut regions = Vec::new();
        let mut end_of_region = FxHashMap::default();

        for token in root.tokens() {
            check_cancelled(cancel)?;
            let trivia = token.leading_trivia().iter().chain(token.trailing_trivia());
            for directive in trivia.filter_map(|t| t.structure()) {
                if directive.kind() == SyntaxKind::REGION_DIRECTIVE {
                    open.push(directive.text_range().start());
                    regions.push(directive.clone());
                } else if directive.kind() == SyntaxKind::END_REGION_DIRECTIVE {
                    match open.pop() {
                        Some(start) => {
                            end_of_region.insert(start, directive.clone());
                        }
                        None => trace!(at = ?directive.text_range(), "unmatched #endregion"),
                    }
                }
            }
        }

        Ok(Self { regions, end_of_region })
    }

    /// Every `#region` directive in document order, matched or not.
    pub fn regions(&self) -> &[SyntaxNode] {
        &self.regions
    }

    /// The `#endregion` closing the region that starts at `region`.
    pub fn matching_end(&self, region: &SyntaxNode) -> Option<&SyntaxNode> {
        self.end_of_region.get(&region.text_range().start())
    }

    pub fn region_count(&self) -> usize {
        self.end_of_region.len()
    }
}
