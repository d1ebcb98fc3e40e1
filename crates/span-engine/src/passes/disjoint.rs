use super::is_span;
use crate::config::EngineConfig;
use crate::error::{Result, SpanEngineError};
use crate::ownership::absorb;
use crate::types::Node;

/// Merge `target_kind` spans across a short plain-text gap element
///
/// For children `A, gap, B` where `A` and `B` are spans of `target_kind`
/// and `gap` is a leaf element that is not a span, the text from `A`'s end
/// to `B`'s leading text is joined; unless it contains sentence-ending
/// punctuation, `A` absorbs it (trimmed, behind one space) together with
/// `B`, and the gap element disappears.
pub fn merge_disjoint(parent: &mut Node, config: &EngineConfig, target_kind: &str) -> Result<usize> {
    let mut merged = 0;

    while let Some(i) = find_mergeable_triple(&parent.children, config, target_kind) {
        let mut removed: Vec<Node> = parent.children.drain(i + 1..i + 3).collect();
        let (Some(mut second), Some(gap)) = (removed.pop(), removed.pop()) else {
            return Err(SpanEngineError::invariant(format!(
                "disjoint merge lost its triple at child {i} of <{}>",
                parent.tag
            )));
        };

        let first = &mut parent.children[i];
        let joined = joined_text(first, &gap, &second);
        let separator = format!(" {}", joined.trim());

        first.tail.clear();
        second.text.clear();
        let tail = absorb(first, second, &separator);
        first.tail = tail;

        log::debug!("merged disjoint <{target_kind}> spans across <{}>", gap.tag);
        merged += 1;
    }

    Ok(merged)
}

fn find_mergeable_triple(children: &[Node], config: &EngineConfig, target_kind: &str) -> Option<usize> {
    children.windows(3).position(|triple| {
        let (first, gap, second) = (&triple[0], &triple[1], &triple[2]);
        first.tag == target_kind
            && is_span(first, config)
            && second.tag == target_kind
            && is_span(second, config)
            && is_plain_run(gap, config)
            && !ends_sentence(&joined_text(first, gap, second))
    })
}

fn is_plain_run(node: &Node, config: &EngineConfig) -> bool {
    node.is_element() && !is_span(node, config) && !node.has_element_children()
}

fn joined_text(first: &Node, gap: &Node, second: &Node) -> String {
    let mut joined = first.tail.clone();
    joined.push_str(&gap.text_content());
    joined.push_str(&gap.tail);
    joined.push_str(&second.text);
    joined
}

fn ends_sentence(text: &str) -> bool {
    text.contains(['.', '!', '?'])
}
