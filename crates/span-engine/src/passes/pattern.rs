use crate::config::PatternConfig;
use crate::error::Result;
use crate::types::Node;
use regex::Regex;

/// Compiled phrase pattern that wraps unannotated sound phrases in new spans
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    regex: Regex,
    target_kind: String,
    host_tags: Vec<String>,
}

impl PhrasePattern {
    pub fn new(config: &PatternConfig) -> Result<Self> {
        let closings = config
            .closings
            .iter()
            .map(|closing| regex::escape(closing))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?i){marker}[^<.]{{{min},{max}}}?(?:{closings})",
            marker = regex::escape(&config.marker),
            min = config.min_gap_chars,
            max = config.max_gap_chars,
        );

        Ok(Self {
            regex: Regex::new(&pattern)?,
            target_kind: config.target_kind.clone(),
            host_tags: config.host_tags.clone(),
        })
    }

    pub fn target_kind(&self) -> &str {
        &self.target_kind
    }

    /// Whether `annotate` would wrap anything in `node`
    ///
    /// Only hosts without a target-kind span anywhere below them qualify.
    pub fn applies_to(&self, node: &Node) -> bool {
        self.is_host(node)
            && !node.text.is_empty()
            && !node.has_descendant_tag(&self.target_kind)
            && self.regex.is_match(&node.text)
    }

    /// Wrap every match in `node`'s leading text
    ///
    /// Returns the number of spans created.
    pub fn annotate(&self, node: &mut Node) -> usize {
        if !self.applies_to(node) {
            return 0;
        }

        let matches: Vec<(usize, usize)> = self
            .regex
            .find_iter(&node.text)
            .map(|m| (m.start(), m.end()))
            .collect();
        let Some(&(first_start, _)) = matches.first() else {
            return 0;
        };

        let text = std::mem::take(&mut node.text);
        node.text = text[..first_start].to_string();

        let spans: Vec<Node> = matches
            .iter()
            .enumerate()
            .map(|(k, &(start, end))| {
                let tail_end = matches.get(k + 1).map_or(text.len(), |&(next, _)| next);
                Node::element(self.target_kind.as_str())
                    .with_text(&text[start..end])
                    .with_tail(&text[end..tail_end])
            })
            .collect();

        let created = spans.len();
        node.children.splice(0..0, spans);
        log::debug!(
            "wrapped {created} phrase(s) as <{}> in <{}>",
            self.target_kind,
            node.tag
        );
        created
    }

    fn is_host(&self, node: &Node) -> bool {
        node.is_element() && self.host_tags.iter().any(|tag| tag == node.local_name())
    }
}
