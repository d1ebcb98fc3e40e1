use super::{find_pair, is_span, loser_offset};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::ownership::unwrap_child;
use crate::types::Node;

/// Resolve adjacent spans of different kinds by keeping the longer one
///
/// On equal length the second span wins. Rescans from the start after every
/// removal because adjacency changes.
pub fn prefer_longer(parent: &mut Node, config: &EngineConfig) -> Result<usize> {
    let mut removed = 0;

    while let Some(i) = find_pair(&parent.children, |a, b| {
        is_span(a, config) && is_span(b, config) && a.tag != b.tag
    }) {
        let victim = i + loser_offset(&parent.children[i], &parent.children[i + 1]);
        let shell = unwrap_child(parent, victim)?;
        log::debug!("arbitration dropped shorter <{}> span", shell.tag);
        removed += 1;
    }

    Ok(removed)
}
