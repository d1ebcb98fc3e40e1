//! Rewrite passes over the direct children of one parent.
//!
//! Each pass rescans after every structural mutation instead of walking a
//! stale index list, so no sibling is skipped or visited twice.

pub mod arbitration;
pub mod attribution;
pub mod dedup;
pub mod disjoint;
pub mod merge;
pub mod pattern;
pub mod vacuous;

use crate::config::EngineConfig;
use crate::types::Node;

/// Element whose tag is one of the configured annotation kinds
pub(crate) fn is_span(node: &Node, config: &EngineConfig) -> bool {
    node.is_element() && config.is_annotation_kind(&node.tag)
}

/// Length in characters of the trimmed leading text
pub(crate) fn trimmed_len(node: &Node) -> usize {
    node.text.trim().chars().count()
}

/// Offset (0 or 1) of the span to drop from an adjacent pair
///
/// The shorter one loses; on a tie the first one does.
pub(crate) fn loser_offset(first: &Node, second: &Node) -> usize {
    usize::from(trimmed_len(first) > trimmed_len(second))
}

/// Index of the first adjacent pair satisfying `pred`
pub(crate) fn find_pair(children: &[Node], mut pred: impl FnMut(&Node, &Node) -> bool) -> Option<usize> {
    children
        .windows(2)
        .position(|pair| pred(&pair[0], &pair[1]))
}
