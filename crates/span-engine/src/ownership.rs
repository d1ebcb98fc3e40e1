//! Text ownership bookkeeping for structural rewrites.
//!
//! Every pass that deletes, unwraps or merges a node goes through these
//! functions. The rule is always the same: text that loses its owner is
//! appended to the slot where it would have rendered had the node not
//! existed, i.e. the tail of the preceding sibling, or the parent's
//! leading text when there is no preceding sibling.

use crate::error::{Result, SpanEngineError};
use crate::types::Node;

/// Append `text` to the owner of the text slot directly before child `index`
pub fn reassign_trailing(parent: &mut Node, index: usize, text: &str) -> Result<()> {
    if index > parent.children.len() {
        return Err(SpanEngineError::invariant(format!(
            "text slot {index} out of range for <{}> with {} children",
            parent.tag,
            parent.children.len()
        )));
    }
    if text.is_empty() {
        return Ok(());
    }

    match index.checked_sub(1) {
        Some(prev) => parent.children[prev].tail.push_str(text),
        None => parent.text.push_str(text),
    }
    Ok(())
}

/// Detach child `index`, handing its tail to the preceding owner
///
/// The detached node is returned with an empty tail. Its own content goes
/// with it, so callers use this only when that content has already been
/// absorbed elsewhere.
pub fn remove_child(parent: &mut Node, index: usize) -> Result<Node> {
    check_child(parent, index)?;
    let mut removed = parent.children.remove(index);
    let tail = std::mem::take(&mut removed.tail);
    reassign_trailing(parent, index, &tail)?;
    Ok(removed)
}

/// Drop the markup of child `index` but keep everything it rendered
///
/// Leading text goes to the preceding owner, children are spliced into the
/// parent at the same position and the tail follows the last spliced child.
/// Returns the emptied node (tag and attributes only).
pub fn unwrap_child(parent: &mut Node, index: usize) -> Result<Node> {
    check_child(parent, index)?;
    let mut node = parent.children.remove(index);

    let leading = std::mem::take(&mut node.text);
    reassign_trailing(parent, index, &leading)?;

    let tail = std::mem::take(&mut node.tail);
    let children = std::mem::take(&mut node.children);
    let spliced = children.len();
    parent.children.splice(index..index, children);
    reassign_trailing(parent, index + spliced, &tail)?;

    Ok(node)
}

/// Append `separator` and the content of `other` to the end of `target`'s content
///
/// Returns the tail of `other`, which the caller must place.
pub fn absorb(target: &mut Node, mut other: Node, separator: &str) -> String {
    let mut piece = String::with_capacity(separator.len() + other.text.len());
    piece.push_str(separator);
    piece.push_str(&other.text);

    match target.children.last_mut() {
        Some(last) => last.tail.push_str(&piece),
        None => target.text.push_str(&piece),
    }
    target.children.append(&mut other.children);

    std::mem::take(&mut other.tail)
}

fn check_child(parent: &Node, index: usize) -> Result<()> {
    if index >= parent.children.len() {
        return Err(SpanEngineError::invariant(format!(
            "child {index} out of range for <{}> with {} children",
            parent.tag,
            parent.children.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(text: &str, tail: &str) -> Node {
        Node::element("character_sound").with_text(text).with_tail(tail)
    }

    fn parent(text: &str, children: Vec<Node>) -> Node {
        let mut node = Node::element("p").with_text(text).with_tail(" after");
        node.children = children;
        node
    }

    #[test]
    fn reassign_to_previous_sibling_tail() {
        let mut p = parent("A ", vec![span("x", " b "), span("y", " c")]);
        reassign_trailing(&mut p, 1, "!").unwrap();
        assert_eq!(p.children[0].tail, " b !");
        assert_eq!(p.text, "A ");
    }

    #[test]
    fn reassign_to_previous_sibling_with_empty_tail() {
        let mut p = parent("A ", vec![span("x", ""), span("y", "")]);
        reassign_trailing(&mut p, 1, "!").unwrap();
        assert_eq!(p.children[0].tail, "!");
        assert_eq!(p.children[0].text, "x");
    }

    #[test]
    fn reassign_first_slot_goes_to_parent_text() {
        let mut p = parent("A ", vec![span("x", "")]);
        reassign_trailing(&mut p, 0, "!").unwrap();
        assert_eq!(p.text, "A !");
        assert_eq!(p.tail, " after");
    }

    #[test]
    fn reassign_first_slot_with_empty_parent_text() {
        let mut p = parent("", vec![span("x", "")]);
        reassign_trailing(&mut p, 0, "!").unwrap();
        assert_eq!(p.text, "!");
        assert_eq!(p.tail, " after");
    }

    #[test]
    fn reassign_after_last_child() {
        let mut p = parent("", vec![span("x", " y")]);
        reassign_trailing(&mut p, 1, "z").unwrap();
        assert_eq!(p.children[0].tail, " yz");
    }

    #[test]
    fn reassign_out_of_range_is_invariant_violation() {
        let mut p = parent("", vec![span("x", "")]);
        let err = reassign_trailing(&mut p, 2, "z").unwrap_err();
        assert!(matches!(err, SpanEngineError::InvariantViolation(_)));
    }

    #[test]
    fn reassign_empty_text_is_noop() {
        let mut p = parent("A", vec![span("x", "")]);
        let before = p.clone();
        reassign_trailing(&mut p, 0, "").unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn remove_middle_child_moves_tail_to_previous() {
        let mut p = parent("A ", vec![span("x", " b "), span("y", " c "), span("z", " d")]);
        let removed = remove_child(&mut p, 1).unwrap();
        assert_eq!(removed.text, "y");
        assert!(removed.tail.is_empty());
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0].tail, " b  c ");
        assert_eq!(p.text_content(), "A x b  c z d");
    }

    #[test]
    fn remove_first_child_moves_tail_to_parent_text() {
        let mut p = parent("A ", vec![span("x", " b"), span("y", "")]);
        remove_child(&mut p, 0).unwrap();
        assert_eq!(p.text, "A  b");
        assert_eq!(p.text_content(), "A  by");
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut p = parent("", vec![]);
        assert!(remove_child(&mut p, 0).is_err());
    }

    #[test]
    fn unwrap_keeps_rendered_text_in_middle() {
        let mut p = parent("A ", vec![span("x", " b "), span("er", " c "), span("z", "")]);
        let before = p.text_content();
        let shell = unwrap_child(&mut p, 1).unwrap();
        assert_eq!(shell.tag, "character_sound");
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0].tail, " b er c ");
        assert_eq!(p.text_content(), before);
    }

    #[test]
    fn unwrap_first_child_keeps_rendered_text() {
        let mut p = parent("A ", vec![span("er", " c"), span("z", "")]);
        let before = p.text_content();
        unwrap_child(&mut p, 0).unwrap();
        assert_eq!(p.text, "A er c");
        assert_eq!(p.text_content(), before);
        assert_eq!(p.tail, " after");
    }

    #[test]
    fn unwrap_splices_nested_children() {
        let nested = Node::element("ambient_sound")
            .with_text("Regen ")
            .with_child(Node::element("hi").with_text("prasselt").with_tail(" laut"))
            .with_tail(" und");
        let mut p = parent("Draußen ", vec![nested, span("z", "")]);
        let before = p.text_content();

        unwrap_child(&mut p, 0).unwrap();

        assert_eq!(p.text, "Draußen Regen ");
        assert_eq!(p.children[0].tag, "hi");
        assert_eq!(p.children[0].tail, " laut und");
        assert_eq!(p.children[1].text, "z");
        assert_eq!(p.text_content(), before);
    }

    #[test]
    fn unwrap_only_child() {
        let mut p = parent("", vec![span("Oh", "!")]);
        unwrap_child(&mut p, 0).unwrap();
        assert!(p.children.is_empty());
        assert_eq!(p.text, "Oh!");
    }

    #[test]
    fn absorb_into_childless_target() {
        let mut target = span("klopft", ", ");
        let tail = absorb(&mut target, span("laut", " und"), " ");
        assert_eq!(target.text, "klopft laut");
        assert_eq!(tail, " und");
        assert_eq!(target.tail, ", ");
    }

    #[test]
    fn absorb_into_target_with_children_appends_to_last_tail() {
        let mut target = Node::element("ambient_sound")
            .with_text("Es ")
            .with_child(Node::element("hi").with_text("donnert"));
        let other = Node::element("ambient_sound")
            .with_text("grollend ")
            .with_child(Node::element("hi").with_text("fern"));

        absorb(&mut target, other, " ");

        assert_eq!(target.children.len(), 2);
        assert_eq!(target.children[0].tail, " grollend ");
        assert_eq!(target.text_content(), "Es donnert grollend fern");
    }
}
