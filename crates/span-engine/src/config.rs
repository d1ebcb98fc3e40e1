use crate::error::{Result, SpanEngineError};
use crate::linguistic::{LexiconTagger, PartOfSpeech};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CHARACTER_SOUND: &str = "character_sound";
pub const AMBIENT_SOUND: &str = "ambient_sound";

/// Configuration of the consolidation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Tags that mark sound annotations (exactly two)
    pub annotation_kinds: Vec<String>,

    /// Kind whose spans are merged across short plain-text gaps
    pub disjoint_merge_target_kind: String,

    /// Tag of speaker labels, whose nested spans are stripped
    pub speaker_tag: String,

    pub classifier: ClassifierConfig,

    pub pattern: PatternConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            annotation_kinds: vec![CHARACTER_SOUND.to_string(), AMBIENT_SOUND.to_string()],
            disjoint_merge_target_kind: AMBIENT_SOUND.to_string(),
            speaker_tag: "speaker".to_string(),
            classifier: ClassifierConfig::default(),
            pattern: PatternConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Whether `tag` names a sound annotation
    #[must_use]
    pub fn is_annotation_kind(&self, tag: &str) -> bool {
        self.annotation_kinds.iter().any(|kind| kind == tag)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.annotation_kinds.len() != 2 {
            return Err(SpanEngineError::invalid_config(format!(
                "annotation_kinds must name exactly two tags, got {}",
                self.annotation_kinds.len()
            )));
        }
        if self.annotation_kinds.iter().any(|k| k.trim().is_empty()) {
            return Err(SpanEngineError::invalid_config(
                "annotation_kinds must not contain empty tags",
            ));
        }
        if self.annotation_kinds[0] == self.annotation_kinds[1] {
            return Err(SpanEngineError::invalid_config(format!(
                "annotation_kinds must be distinct, got '{}' twice",
                self.annotation_kinds[0]
            )));
        }
        if !self.is_annotation_kind(&self.disjoint_merge_target_kind) {
            return Err(SpanEngineError::invalid_config(format!(
                "disjoint_merge_target_kind '{}' is not an annotation kind",
                self.disjoint_merge_target_kind
            )));
        }
        if !self.is_annotation_kind(&self.pattern.target_kind) {
            return Err(SpanEngineError::invalid_config(format!(
                "pattern.target_kind '{}' is not an annotation kind",
                self.pattern.target_kind
            )));
        }
        if self.speaker_tag.trim().is_empty() {
            return Err(SpanEngineError::invalid_config("speaker_tag must not be empty"));
        }

        self.classifier.validate()?;
        self.pattern.validate()
    }
}

/// Rules for judging one-word spans vacuous
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Words that are never a meaningful annotation (case-insensitive)
    pub stoplist: Vec<String>,

    /// Word classes that make a one-word span vacuous
    pub vacuous_pos_classes: Vec<PartOfSpeech>,

    /// One-word spans shorter than this (in characters) are vacuous
    pub min_token_length: usize,

    /// Longest text handed to the tagger
    pub max_tagger_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            stoplist: [
                "und",
                "in",
                "weil",
                "da",
                "wie",
                "so",
                "auch",
                "schon",
                "die",
                "der",
                "das",
                "auf die achsel",
                "wann",
                "er",
                "sie",
                "neben die",
                "seine rumpelkammer",
                "lampen",
                "denke",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            vacuous_pos_classes: vec![
                PartOfSpeech::Pron,
                PartOfSpeech::Det,
                PartOfSpeech::Part,
                PartOfSpeech::Sconj,
                PartOfSpeech::Intj,
            ],
            min_token_length: 4,
            max_tagger_chars: LexiconTagger::DEFAULT_MAX_CHARS,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_tagger_chars == 0 {
            return Err(SpanEngineError::invalid_config(
                "classifier.max_tagger_chars must be > 0",
            ));
        }
        Ok(())
    }
}

/// Lexical pattern for wrapping unannotated sound phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Kind of the spans created for matches
    pub target_kind: String,

    /// Phrase opening (matched case-insensitively)
    pub marker: String,

    /// Phrase endings, any of which closes a match
    pub closings: Vec<String>,

    /// Characters allowed between marker and closing
    pub min_gap_chars: usize,
    pub max_gap_chars: usize,

    /// Elements (local names) whose leading text is scanned
    pub host_tags: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            target_kind: AMBIENT_SOUND.to_string(),
            marker: "Die Geräusche".to_string(),
            closings: [
                "vernehmlich",
                "hörbar",
                "zu hören",
                "deutlich gewesen",
                "laut gewesen",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            min_gap_chars: 10,
            max_gap_chars: 300,
            host_tags: vec!["p".to_string(), "stage".to_string()],
        }
    }
}

impl PatternConfig {
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            return Err(SpanEngineError::invalid_config("pattern.marker must not be empty"));
        }
        if self.closings.is_empty() || self.closings.iter().any(|c| c.trim().is_empty()) {
            return Err(SpanEngineError::invalid_config(
                "pattern.closings must list at least one non-empty phrase",
            ));
        }
        if self.min_gap_chars > self.max_gap_chars {
            return Err(SpanEngineError::invalid_config(format!(
                "pattern.min_gap_chars ({}) cannot exceed pattern.max_gap_chars ({})",
                self.min_gap_chars, self.max_gap_chars
            )));
        }
        Ok(())
    }
}
