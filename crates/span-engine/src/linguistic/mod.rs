//! Part-of-speech tagging and the vacuity / finite-verb heuristics built on it.

mod classifier;
mod lexicon;

pub use classifier::Classifier;
pub use lexicon::LexiconTagger;

use crate::error::TaggerError;
use serde::{Deserialize, Serialize};

/// Universal part-of-speech classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    #[serde(alias = "adjective")]
    Adj,
    #[serde(alias = "adposition")]
    Adp,
    #[serde(alias = "adverb")]
    Adv,
    #[serde(alias = "auxiliary")]
    Aux,
    #[serde(alias = "coordinating_conjunction")]
    Cconj,
    #[serde(alias = "determiner")]
    Det,
    #[serde(alias = "interjection")]
    Intj,
    #[serde(alias = "noun")]
    Noun,
    #[serde(alias = "numeral")]
    Num,
    #[serde(alias = "particle")]
    Part,
    #[serde(alias = "pronoun")]
    Pron,
    #[serde(alias = "proper_noun")]
    Propn,
    #[serde(alias = "punctuation")]
    Punct,
    #[serde(alias = "subordinating_conjunction")]
    Sconj,
    #[serde(alias = "symbol")]
    Sym,
    #[serde(alias = "verb")]
    Verb,
    X,
}

impl PartOfSpeech {
    /// Universal Dependencies label
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::X => "X",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Morphological verb form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbForm {
    /// Finite (inflected for person/number/tense)
    Fin,
    /// Infinitive
    Inf,
    /// Participle
    Part,
}

/// A tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    /// Only set for verbs and auxiliaries
    pub verb_form: Option<VerbForm>,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            text: text.into(),
            pos,
            verb_form: None,
        }
    }

    #[must_use]
    pub fn with_verb_form(mut self, form: VerbForm) -> Self {
        self.verb_form = Some(form);
        self
    }

    /// Full verb (not auxiliary) with finite morphology
    #[must_use]
    pub fn is_finite_verb(&self) -> bool {
        self.pos == PartOfSpeech::Verb && self.verb_form == Some(VerbForm::Fin)
    }
}

/// Part-of-speech tagger
///
/// Implementations must be deterministic. Errors are reported, not panicked
/// on; callers decide how to degrade.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggerError>;
}
