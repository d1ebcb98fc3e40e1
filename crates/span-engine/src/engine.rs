use crate::config::EngineConfig;
use crate::error::Result;
use crate::linguistic::{Classifier, LexiconTagger, Tagger};
use crate::passes::{arbitration, attribution, dedup, disjoint, merge, pattern::PhrasePattern, vacuous};
use crate::types::Node;
use serde::{Deserialize, Serialize};

/// Counts of structural rewrites performed by one or more consolidation runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub merged: usize,
    pub vacuous_removed: usize,
    pub arbitrated: usize,
    pub deduplicated: usize,
    pub disjoint_merged: usize,
    pub pattern_wrapped: usize,
    pub speaker_scrubbed: usize,
}

impl ConsolidationReport {
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.merged
            + self.vacuous_removed
            + self.arbitrated
            + self.deduplicated
            + self.disjoint_merged
            + self.pattern_wrapped
            + self.speaker_scrubbed
    }

    /// Add another report's counters to this one
    pub fn accumulate(&mut self, other: &Self) {
        self.merged += other.merged;
        self.vacuous_removed += other.vacuous_removed;
        self.arbitrated += other.arbitrated;
        self.deduplicated += other.deduplicated;
        self.disjoint_merged += other.disjoint_merged;
        self.pattern_wrapped += other.pattern_wrapped;
        self.speaker_scrubbed += other.speaker_scrubbed;
    }
}

/// Consolidates predicted sound spans in a document tree
///
/// Immutable after construction; one engine may serve any number of
/// documents, each consolidated independently.
pub struct SpanEngine {
    config: EngineConfig,
    classifier: Classifier,
    pattern: PhrasePattern,
}

impl SpanEngine {
    /// Create an engine backed by the built-in lexicon tagger
    pub fn new(config: EngineConfig) -> Result<Self> {
        let tagger = LexiconTagger::new(config.classifier.max_tagger_chars);
        Self::with_tagger(config, Box::new(tagger))
    }

    /// Create an engine with a caller-supplied tagger
    pub fn with_tagger(config: EngineConfig, tagger: Box<dyn Tagger>) -> Result<Self> {
        config.validate()?;
        let pattern = PhrasePattern::new(&config.pattern)?;
        let classifier = Classifier::new(&config.classifier, tagger);

        Ok(Self {
            config,
            classifier,
            pattern,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Run every pass over `root` in place
    ///
    /// Each element gets the per-node passes before its (rewritten) children
    /// are visited; speaker labels are scrubbed once at the end.
    pub fn consolidate(&self, root: &mut Node) -> Result<ConsolidationReport> {
        let mut report = ConsolidationReport::default();
        self.visit(root, &mut report)?;
        report.speaker_scrubbed = attribution::scrub_speakers(root, &self.config)?;

        log::debug!(
            "consolidated <{}>: {} change(s)",
            root.tag,
            report.total_changes()
        );
        Ok(report)
    }

    fn visit(&self, node: &mut Node, report: &mut ConsolidationReport) -> Result<()> {
        if !node.is_element() {
            return Ok(());
        }

        self.settle(node, report)?;
        self.wrap_phrases(node, report)?;

        for child in &mut node.children {
            self.visit(child, report)?;
        }
        Ok(())
    }

    /// Repeat the rewrite passes in order until a whole round changes nothing
    ///
    /// Every rewrite removes one span element, so the loop ends.
    fn settle(&self, node: &mut Node, report: &mut ConsolidationReport) -> Result<()> {
        let config = &self.config;
        loop {
            let round = ConsolidationReport {
                merged: merge::merge_adjacent(node, config)?,
                vacuous_removed: vacuous::remove_vacuous(node, config, &self.classifier)?,
                arbitrated: arbitration::prefer_longer(node, config)?,
                deduplicated: dedup::deduplicate(node, config, &self.classifier)?,
                disjoint_merged: disjoint::merge_disjoint(
                    node,
                    config,
                    &config.disjoint_merge_target_kind,
                )?,
                ..ConsolidationReport::default()
            };
            report.accumulate(&round);
            if round.total_changes() == 0 {
                return Ok(());
            }
        }
    }

    /// Wrap sound phrases, then settle the new spans against their neighbours
    ///
    /// When no new span survives settling, the node is restored as it was.
    fn wrap_phrases(&self, node: &mut Node, report: &mut ConsolidationReport) -> Result<()> {
        if !self.pattern.applies_to(node) {
            return Ok(());
        }

        let original = node.clone();
        let mut attempt = ConsolidationReport {
            pattern_wrapped: self.pattern.annotate(node),
            ..ConsolidationReport::default()
        };
        self.settle(node, &mut attempt)?;

        if node.has_descendant_tag(self.pattern.target_kind()) {
            report.accumulate(&attempt);
        } else {
            log::debug!(
                "no wrapped phrase survived in <{}>, keeping it unchanged",
                node.tag
            );
            *node = original;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SpanEngineError, TaggerError};
    use crate::linguistic::Token;
    use pretty_assertions::assert_eq;

    struct BrokenTagger;

    impl Tagger for BrokenTagger {
        fn tag(&self, text: &str) -> std::result::Result<Vec<Token>, TaggerError> {
            Err(TaggerError::TooLong {
                len: text.len(),
                max: 0,
            })
        }
    }

    fn engine() -> SpanEngine {
        SpanEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn passes_run_in_order_on_each_element() {
        let mut stage = Node::element("stage")
            .with_child(Node::element("character_sound").with_text("klopft").with_tail(", "))
            .with_child(Node::element("character_sound").with_text("laut").with_tail(" "))
            .with_child(Node::element("ambient_sound").with_text("es").with_tail("."));

        let report = engine().consolidate(&mut stage).unwrap();

        assert_eq!(report.merged, 1);
        assert_eq!(report.vacuous_removed, 1);
        assert_eq!(stage.children.len(), 1);
        assert_eq!(stage.children[0].text, "klopft laut");
        assert_eq!(stage.children[0].tail, " es.");
    }

    #[test]
    fn descends_into_rewritten_children() {
        let mut text = Node::element("text").with_child(
            Node::element("body").with_child(
                Node::element("p").with_text("Die Geräusche der Straße waren deutlich gewesen."),
            ),
        );

        let report = engine().consolidate(&mut text).unwrap();

        assert_eq!(report.pattern_wrapped, 1);
        let p = &text.children[0].children[0];
        assert_eq!(p.children[0].tag, "ambient_sound");
    }

    #[test]
    fn wrapped_phrase_is_settled_in_the_same_run() {
        let engine = engine();
        let mut p = Node::element("p")
            .with_text("Die Geräusche der Straße waren laut gewesen ")
            .with_child(Node::element("character_sound").with_text("hustet").with_tail("."));

        let first = engine.consolidate(&mut p).unwrap();
        assert_eq!(first.pattern_wrapped, 1);
        assert_eq!(first.arbitrated, 1);
        assert_eq!(p.children.len(), 1);
        assert_eq!(p.children[0].tail, " hustet.");

        let once = p.clone();
        assert_eq!(engine.consolidate(&mut p).unwrap().total_changes(), 0);
        assert_eq!(p, once);
    }

    #[test]
    fn wrap_that_loses_arbitration_is_undone() {
        let phrase = "Die Geräusche der Straße waren laut gewesen";
        let engine = engine();
        let mut stage = Node::element("stage")
            .with_child(Node::element("ambient_sound").with_text(phrase).with_tail(" "))
            .with_child(Node::element("character_sound").with_text(phrase));

        let first = engine.consolidate(&mut stage).unwrap();
        assert_eq!(first.arbitrated, 1);
        assert_eq!(first.pattern_wrapped, 0);
        assert_eq!(stage.text, format!("{phrase} "));
        assert_eq!(stage.children.len(), 1);
        assert_eq!(stage.children[0].tag, "character_sound");

        let once = stage.clone();
        assert_eq!(engine.consolidate(&mut stage).unwrap(), ConsolidationReport::default());
        assert_eq!(stage, once);
    }

    #[test]
    fn rounds_repeat_until_nothing_changes() {
        // Arbitration drops the empty span and leaves two character spans
        // side by side; only the next round can merge them.
        let mut stage = Node::element("stage")
            .with_child(Node::element("character_sound").with_text("klopft").with_tail(" "))
            .with_child(Node::element("ambient_sound"))
            .with_child(Node::element("character_sound").with_text("ruft"));

        let report = engine().consolidate(&mut stage).unwrap();

        assert_eq!(report.arbitrated, 1);
        assert_eq!(report.deduplicated, 0);
        assert_eq!(report.merged, 1);
        assert_eq!(stage.children.len(), 1);
        assert_eq!(stage.children[0].text, "klopft ruft");
    }

    #[test]
    fn speaker_scrub_is_counted() {
        let mut sp = Node::element("sp").with_child(
            Node::element("speaker").with_child(Node::element("character_sound").with_text("Wächter")),
        );

        let report = engine().consolidate(&mut sp).unwrap();
        assert_eq!(report.speaker_scrubbed, 1);
        assert_eq!(report.total_changes(), 1);
        assert_eq!(sp.text_content(), "Wächter");
    }

    #[test]
    fn broken_tagger_degrades_conservatively() {
        let engine =
            SpanEngine::with_tagger(EngineConfig::default(), Box::new(BrokenTagger)).unwrap();
        let mut stage = Node::element("stage")
            .with_child(Node::element("character_sound").with_text("er").with_tail("; "))
            .with_child(Node::element("character_sound").with_text("seufzt"));

        let report = engine.consolidate(&mut stage).unwrap();

        assert_eq!(report.vacuous_removed, 0);
        // No finite verb detected, so the pair collapses to the longer span.
        assert_eq!(report.deduplicated, 1);
        assert_eq!(stage.children[0].text, "seufzt");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            annotation_kinds: vec!["sound".to_string()],
            ..EngineConfig::default()
        };
        assert!(matches!(
            SpanEngine::new(config),
            Err(SpanEngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn reports_accumulate() {
        let mut total = ConsolidationReport::default();
        let one = ConsolidationReport {
            merged: 2,
            pattern_wrapped: 1,
            ..ConsolidationReport::default()
        };
        total.accumulate(&one);
        total.accumulate(&one);
        assert_eq!(total.merged, 4);
        assert_eq!(total.total_changes(), 6);
    }

    #[test]
    fn report_serializes_with_counter_names() {
        let report = ConsolidationReport {
            vacuous_removed: 3,
            ..ConsolidationReport::default()
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["vacuous_removed"], 3);
        assert_eq!(json["speaker_scrubbed"], 0);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpanEngine>();
    }
}
