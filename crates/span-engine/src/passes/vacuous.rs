use super::is_span;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::linguistic::Classifier;
use crate::ownership::unwrap_child;
use crate::types::Node;

/// Remove the markup of one-word spans the classifier judges vacuous
pub fn remove_vacuous(
    parent: &mut Node,
    config: &EngineConfig,
    classifier: &Classifier,
) -> Result<usize> {
    let mut removed = 0;
    let mut i = 0;

    while i < parent.children.len() {
        let child = &parent.children[i];
        if is_span(child, config) && classifier.is_single_token_vacuous(&child.text) {
            let shell = unwrap_child(parent, i)?;
            log::debug!("removed vacuous <{}> span", shell.tag);
            removed += 1;
            // Spliced-in children now sit at `i`; look at them too.
            continue;
        }
        i += 1;
    }

    Ok(removed)
}
