use super::is_span;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::ownership::{absorb, remove_child};
use crate::types::Node;

/// Fuse adjacent same-kind spans separated only by whitespace and commas
///
/// The separator is replaced by a single space inside the merged span.
/// The scan stays on the merged span, so chains collapse into one.
pub fn merge_adjacent(parent: &mut Node, config: &EngineConfig) -> Result<usize> {
    let mut merged = 0;
    let mut i = 0;

    while i + 1 < parent.children.len() {
        let current = &parent.children[i];
        let next = &parent.children[i + 1];
        let mergeable = is_span(current, config)
            && next.is_element()
            && current.tag == next.tag
            && is_trivial_separator(&current.tail);

        if !mergeable {
            i += 1;
            continue;
        }

        let separator = std::mem::take(&mut parent.children[i].tail);
        let next = remove_child(parent, i + 1)?;
        let leftover = absorb(&mut parent.children[i], next, " ");
        debug_assert!(leftover.is_empty());

        log::debug!(
            "merged adjacent <{}> spans (separator {:?})",
            parent.children[i].tag,
            separator
        );
        merged += 1;
    }

    Ok(merged)
}

fn is_trivial_separator(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == ',')
}
