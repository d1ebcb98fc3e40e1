use super::{find_pair, is_span, loser_offset};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::linguistic::Classifier;
use crate::ownership::unwrap_child;
use crate::types::Node;

/// Drop the shorter of two adjacent same-kind spans unless a finite verb separates them
///
/// The text between the spans is the first span's tail plus the second
/// span's leading text. A finite verb there marks two distinct events and
/// the pair is kept.
pub fn deduplicate(
    parent: &mut Node,
    config: &EngineConfig,
    classifier: &Classifier,
) -> Result<usize> {
    let mut removed = 0;

    while let Some(i) = find_pair(&parent.children, |a, b| {
        is_span(a, config)
            && is_span(b, config)
            && a.tag == b.tag
            && !classifier.has_finite_verb(&middle_text(a, b))
    }) {
        let victim = i + loser_offset(&parent.children[i], &parent.children[i + 1]);
        let shell = unwrap_child(parent, victim)?;
        log::debug!("deduplicated <{}> span", shell.tag);
        removed += 1;
    }

    Ok(removed)
}

fn middle_text(first: &Node, second: &Node) -> String {
    let mut middle = String::with_capacity(first.tail.len() + second.text.len());
    middle.push_str(&first.tail);
    middle.push_str(&second.text);
    middle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::LexiconTagger;
    use pretty_assertions::assert_eq;

    fn run(parent: &mut Node) -> usize {
        let config = EngineConfig::default();
        let classifier = Classifier::new(&config.classifier, Box::new(LexiconTagger::default()));
        deduplicate(parent, &config, &classifier).unwrap()
    }

    fn amb(text: &str, tail: &str) -> Node {
        Node::element("ambient_sound").with_text(text).with_tail(tail)
    }

    #[test]
    fn finite_verb_between_keeps_both() {
        let mut parent = Node::element("stage")
            .with_child(amb("Die Tür", " knarrt und "))
            .with_child(amb("der Wind", ""));

        assert_eq!(run(&mut parent), 0);
        assert_eq!(parent.children.len(), 2);
    }

    #[test]
    fn strong_past_verb_between_keeps_both() {
        let mut parent = Node::element("stage")
            .with_child(amb("Die Glocke", " klang und "))
            .with_child(amb("der Donner", " grollte."));

        assert_eq!(run(&mut parent), 0);
        assert_eq!(parent.children[0].text, "Die Glocke");
        assert_eq!(parent.children[1].text, "der Donner");
    }

    #[test]
    fn punctuation_only_drops_shorter() {
        let mut parent = Node::element("stage")
            .with_child(amb("Die Tür", " , "))
            .with_child(amb("das Knarren", "."));

        assert_eq!(run(&mut parent), 1);

        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].text, "das Knarren");
        assert_eq!(parent.text, "Die Tür , ");
        assert_eq!(parent.text_content(), "Die Tür , das Knarren.");
    }

    #[test]
    fn verb_inside_second_span_counts_as_separator() {
        let mut parent = Node::element("stage")
            .with_child(amb("Regen", " "))
            .with_child(amb("prasselt", ""));

        assert_eq!(run(&mut parent), 0);
    }

    #[test]
    fn auxiliary_is_not_a_separator() {
        let mut parent = Node::element("stage")
            .with_child(amb("Lärm", " ist "))
            .with_child(amb("ein Krachen", ""));

        assert_eq!(run(&mut parent), 1);
        assert_eq!(parent.children[0].text, "ein Krachen");
    }

    #[test]
    fn chain_reduces_to_longest() {
        let mut parent = Node::element("stage")
            .with_child(amb("Wind", " "))
            .with_child(amb("das Heulen", " "))
            .with_child(amb("Sturm", ""));

        assert_eq!(run(&mut parent), 2);
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].text, "das Heulen");
    }
}
