use super::{PartOfSpeech, Tagger, Token};
use crate::config::ClassifierConfig;
use std::collections::HashSet;

/// Stateless linguistic judgements over span and gap texts
///
/// Whatever the tagger reports as an error is logged and answered
/// conservatively: the text is not vacuous and contains no finite verb.
pub struct Classifier {
    tagger: Box<dyn Tagger>,
    stoplist: HashSet<String>,
    vacuous_pos: HashSet<PartOfSpeech>,
    min_token_length: usize,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig, tagger: Box<dyn Tagger>) -> Self {
        Self {
            tagger,
            stoplist: config.stoplist.iter().map(|w| w.to_lowercase()).collect(),
            vacuous_pos: config.vacuous_pos_classes.iter().copied().collect(),
            min_token_length: config.min_token_length,
        }
    }

    /// Tag `text`; empty on tagger failure
    pub fn pos_tags(&self, text: &str) -> Vec<Token> {
        self.try_tag(text).unwrap_or_default()
    }

    /// One-token text that is stoplisted, of a vacuous word class, or too short
    pub fn is_single_token_vacuous(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let Some(tokens) = self.try_tag(trimmed) else {
            return false;
        };
        let [token] = tokens.as_slice() else {
            return false;
        };

        self.stoplist.contains(&trimmed.to_lowercase())
            || self.vacuous_pos.contains(&token.pos)
            || trimmed.chars().count() < self.min_token_length
    }

    /// Whether any token is a full verb in finite form
    pub fn has_finite_verb(&self, text: &str) -> bool {
        self.try_tag(text)
            .is_some_and(|tokens| tokens.iter().any(Token::is_finite_verb))
    }

    fn try_tag(&self, text: &str) -> Option<Vec<Token>> {
        match self.tagger.tag(text) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                log::warn!("Tagger failed, classifying conservatively: {e}");
                None
            }
        }
    }
}
