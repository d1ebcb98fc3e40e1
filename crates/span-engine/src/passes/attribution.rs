use super::is_span;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::ownership::unwrap_child;
use crate::types::Node;

/// Strip span markup from direct children of every speaker element
///
/// Speaker labels name who talks; a sound span there is a tagging artefact.
/// The span's text stays in place.
pub fn scrub_speakers(root: &mut Node, config: &EngineConfig) -> Result<usize> {
    let mut scrubbed = 0;

    if root.is_element() && root.local_name() == config.speaker_tag {
        let mut i = 0;
        while i < root.children.len() {
            if is_span(&root.children[i], config) {
                unwrap_child(root, i)?;
                scrubbed += 1;
                continue;
            }
            i += 1;
        }
    }

    for child in &mut root.children {
        scrubbed += scrub_speakers(child, config)?;
    }

    if scrubbed > 0 && root.local_name() == config.speaker_tag {
        log::debug!("scrubbed {scrubbed} span(s) under <{}>", root.tag);
    }
    Ok(scrubbed)
}
