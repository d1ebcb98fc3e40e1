use super::{PartOfSpeech, Tagger, Token, VerbForm};
use crate::error::TaggerError;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

const PARTICLES: &[&str] = &["nicht", "zu", "allzu"];

const SUBORDINATORS: &[&str] = &[
    "dass", "daß", "weil", "wenn", "ob", "obwohl", "obgleich", "damit", "während", "bevor",
    "ehe", "nachdem", "indem", "sobald", "solange", "falls", "da", "als", "sodass",
];

const COORDINATORS: &[&str] = &["und", "oder", "aber", "denn", "sondern", "doch", "sowie"];

const INTERJECTIONS: &[&str] = &[
    "ach", "oh", "o", "ah", "ha", "haha", "he", "hei", "hm", "hmm", "ei", "au", "aua", "pst",
    "pfui", "juchhe", "holla", "heda", "weh", "aha", "oho", "hui", "huch", "nanu", "ja", "nein",
    "hurra", "hallo", "oje", "autsch", "bravo",
];

const PRONOUNS: &[&str] = &[
    "ich", "du", "er", "sie", "es", "wir", "ihr", "mich", "dich", "sich", "uns", "euch", "mir",
    "dir", "ihm", "ihn", "ihnen", "man", "jemand", "niemand", "nichts", "etwas", "alles", "wer",
    "was", "wen", "wem", "wessen", "einander", "jedermann", "deren", "dessen",
];

const DETERMINERS: &[&str] = &[
    "der", "die", "das", "dem", "den", "des", "ein", "eine", "einen", "einem", "einer", "eines",
    "kein", "keine", "keinen", "keinem", "keiner", "keines", "mein", "meine", "meinen", "meinem",
    "meiner", "meines", "dein", "deine", "deinen", "deinem", "deiner", "deines", "sein", "seine",
    "seinen", "seinem", "seiner", "seines", "ihre", "ihren", "ihrem", "ihrer", "ihres", "unser",
    "unsere", "unseren", "unserem", "unserer", "unseres", "euer", "eure", "euren", "eurem",
    "eurer", "eures", "dieser", "diese", "dieses", "diesem", "diesen", "jener", "jene", "jenes",
    "jenem", "jenen", "jeder", "jede", "jedes", "jedem", "jeden", "alle", "aller", "allen",
    "welche", "welcher", "welches", "welchem", "welchen", "manche", "mancher", "manchen",
    "einige", "einigen", "solche", "solchen",
];

const ADPOSITIONS: &[&str] = &[
    "in", "im", "ins", "an", "am", "ans", "auf", "aus", "bei", "beim", "mit", "nach", "von",
    "vom", "vor", "zum", "zur", "über", "unter", "hinter", "neben", "zwischen", "durch",
    "gegen", "ohne", "um", "für", "seit", "bis", "trotz", "wegen", "statt",
];

const FINITE_AUXILIARIES: &[&str] = &[
    "bin", "bist", "ist", "sind", "seid", "war", "warst", "waren", "wart", "wäre", "wärest",
    "wären", "wärt", "sei", "seiest", "seien", "habe", "hast", "hat", "habt", "hatte",
    "hattest", "hatten", "hattet", "hätte", "hättest", "hätten", "werde", "wirst", "wird",
    "werdet", "wurde", "wurdest", "wurden", "würde", "würdest", "würden", "kann", "kannst",
    "könnt", "konnte", "konntest", "konnten", "könnte", "könnten", "muss", "muß", "musst",
    "mußt", "müsst", "musste", "mußte", "mussten", "mußten", "müsste", "müßte", "darf",
    "darfst", "dürft", "durfte", "durften", "dürfte", "soll", "sollst", "sollt", "sollte",
    "sollten", "will", "willst", "wollt", "wollte", "wollten", "mag", "magst", "mögt", "mochte",
    "mochten", "möchte", "möchten",
];

const INFINITE_AUXILIARIES: &[&str] = &[
    "haben", "werden", "können", "müssen", "dürfen", "sollen", "wollen", "mögen",
];

const PARTICIPLE_AUXILIARIES: &[&str] = &["gewesen", "geworden", "gehabt"];

const ADVERBS: &[&str] = &[
    "so", "auch", "schon", "noch", "nur", "sehr", "dann", "hier", "dort", "jetzt", "nun",
    "immer", "wieder", "oft", "sonst", "fast", "bald", "gleich", "heute", "gestern", "morgen",
    "plötzlich", "endlich", "kaum", "eben", "gerade", "ganz", "mehr", "wohl", "zwar", "zuerst",
    "zuletzt", "erst", "bereits", "stets", "nie", "niemals", "vielleicht", "hinaus", "heraus",
    "herein", "hinein", "dabei", "darauf", "davon", "dahin", "daher", "draußen", "drinnen",
    "oben", "unten", "vorn", "hinten", "weg", "fort", "zurück", "allein", "selbst", "wie", "wo",
    "wann", "warum", "weshalb", "also", "etwa", "mal", "einmal", "manchmal", "meist", "nebenan",
];

/// Strong and irregular preterites (1st/3rd person singular)
///
/// None of these carry the weak `-te` ending, so inflection rules alone
/// cannot find them.
const STRONG_PRETERITES: &[&str] = &[
    "klang", "sang", "sprang", "rang", "drang", "schwang", "sank", "trank", "stank", "fand",
    "schwand", "gelang", "ging", "fing", "hing", "rief", "lief", "schlief", "fiel", "hieß",
    "ließ", "stieß", "blies", "wies", "blieb", "schrieb", "trieb", "rieb", "stieg", "schwieg",
    "schrie", "spie", "pfiff", "griff", "kniff", "schliff", "riss", "riß", "biss", "biß",
    "schmiss", "schlug", "trug", "grub", "fuhr", "wuchs", "zog", "flog", "bog", "schob", "hob",
    "schoss", "schoß", "goss", "goß", "floss", "floß", "schloss", "schloß", "roch", "kroch",
    "scholl", "quoll", "schwoll", "schmolz", "sprach", "brach", "stach", "erschrak", "geschah",
    "gab", "nahm", "kam", "sah", "lag", "saß", "aß", "las", "vergaß", "stand", "warf", "half",
    "starb", "barst", "verlor", "fror", "schwor", "befahl", "empfahl", "lud",
];

const INSEPARABLE_PREFIXES: &[&str] = &["be", "emp", "ent", "er", "miss", "ver", "zer"];

/// Open-class words whose endings would otherwise read as verb inflection
const ADJECTIVES: &[&str] = &[
    "laut", "leicht", "sanft", "zart", "hart", "kalt", "breit", "weit", "fest", "recht",
    "schlecht", "echt", "sacht", "matt", "satt", "glatt", "platt", "flott", "dicht", "schlicht",
    "bunt", "gut", "wüst", "entfernt", "offen", "trocken", "eigen", "golden", "silbern",
    "hölzern", "erhaben", "verborgen",
];

const SYMBOL_CHARS: &str = "§$€£%&+=<>|~^#@*";

const ADJECTIVE_SUFFIXES: &[&str] = &["ig", "lich", "isch", "bar", "sam", "haft", "los", "voll"];

const ADJECTIVE_INFLECTIONS: &[&str] = &["em", "en", "er", "es", "e"];

const SEPARABLE_PREFIXES: &[&str] = &[
    "heraus", "herein", "hinaus", "herab", "herauf", "nieder", "zurück", "ab", "an", "auf",
    "aus", "ein", "mit", "vor", "zu", "weg", "los", "hin", "her",
];

/// Lexicon- and morphology-driven German part-of-speech tagger
///
/// Closed word classes are looked up in fixed lexicons; capitalized
/// open-class words are nouns; lower-case open-class words are classified
/// by their inflection and the preceding token.
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, (PartOfSpeech, Option<VerbForm>)>,
    preterites: HashSet<String>,
    max_chars: usize,
}

impl LexiconTagger {
    pub const DEFAULT_MAX_CHARS: usize = 10_000;

    /// Create a tagger rejecting input longer than `max_chars`
    pub fn new(max_chars: usize) -> Self {
        let mut lexicon = HashMap::new();
        // Earlier classes win for ambiguous forms.
        let classes: [(&[&str], PartOfSpeech, Option<VerbForm>); 11] = [
            (PARTICLES, PartOfSpeech::Part, None),
            (SUBORDINATORS, PartOfSpeech::Sconj, None),
            (COORDINATORS, PartOfSpeech::Cconj, None),
            (INTERJECTIONS, PartOfSpeech::Intj, None),
            (PRONOUNS, PartOfSpeech::Pron, None),
            (DETERMINERS, PartOfSpeech::Det, None),
            (ADPOSITIONS, PartOfSpeech::Adp, None),
            (FINITE_AUXILIARIES, PartOfSpeech::Aux, Some(VerbForm::Fin)),
            (INFINITE_AUXILIARIES, PartOfSpeech::Aux, Some(VerbForm::Inf)),
            (PARTICIPLE_AUXILIARIES, PartOfSpeech::Aux, Some(VerbForm::Part)),
            (ADVERBS, PartOfSpeech::Adv, None),
        ];
        for (words, pos, form) in classes {
            for word in words {
                lexicon.entry(*word).or_insert((pos, form));
            }
        }
        for word in ADJECTIVES {
            lexicon.entry(*word).or_insert((PartOfSpeech::Adj, None));
        }

        let preterites = STRONG_PRETERITES
            .iter()
            .flat_map(|singular| [singular.to_string(), preterite_plural(singular)])
            .collect();

        Self {
            lexicon,
            preterites,
            max_chars,
        }
    }

    /// Strong preterite, bare or behind one verb prefix (`erklang`, `aufschrie`)
    fn is_strong_preterite(&self, lower: &str) -> bool {
        self.preterites.contains(lower)
            || INSEPARABLE_PREFIXES
                .iter()
                .chain(SEPARABLE_PREFIXES)
                .filter_map(|prefix| lower.strip_prefix(prefix))
                .any(|rest| self.preterites.contains(rest))
    }

    fn classify(&self, word: &str, prev: Option<PartOfSpeech>) -> Token {
        if !word.chars().any(char::is_alphanumeric) {
            let pos = if word.chars().any(|c| SYMBOL_CHARS.contains(c)) {
                PartOfSpeech::Sym
            } else {
                PartOfSpeech::Punct
            };
            return Token::new(word, pos);
        }

        if word
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
        {
            return Token::new(word, PartOfSpeech::Num);
        }

        let lower = word.to_lowercase();
        if let Some(&(pos, form)) = self.lexicon.get(lower.as_str()) {
            let token = Token::new(word, pos);
            return match form {
                Some(form) => token.with_verb_form(form),
                None => token,
            };
        }

        if word.chars().next().is_some_and(char::is_uppercase) {
            return Token::new(word, PartOfSpeech::Noun);
        }

        if self.is_strong_preterite(&lower) {
            return Token::new(word, PartOfSpeech::Verb).with_verb_form(VerbForm::Fin);
        }

        classify_open_class(word, &lower, prev)
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CHARS)
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggerError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(TaggerError::TooLong {
                len,
                max: self.max_chars,
            });
        }
        if let Some(bad) = text
            .chars()
            .find(|c| c.is_control() && !matches!(*c, '\n' | '\r' | '\t'))
        {
            return Err(TaggerError::Malformed(format!(
                "control character U+{:04X}",
                u32::from(bad)
            )));
        }

        let mut tokens: Vec<Token> = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let prev = tokens.last().map(|t| t.pos);
            tokens.push(self.classify(segment, prev));
        }
        Ok(tokens)
    }
}

fn classify_open_class(word: &str, lower: &str, prev: Option<PartOfSpeech>) -> Token {
    let attributive = matches!(prev, Some(PartOfSpeech::Det | PartOfSpeech::Adp));
    if attributive && ADJECTIVE_INFLECTIONS.iter().any(|e| lower.ends_with(e)) {
        return Token::new(word, PartOfSpeech::Adj);
    }

    if lower.ends_with("end") && lower.chars().count() > 5 {
        return Token::new(word, PartOfSpeech::Adj);
    }

    if has_adjective_suffix(lower) {
        return Token::new(word, PartOfSpeech::Adj);
    }

    if is_participle(lower) {
        return Token::new(word, PartOfSpeech::Verb).with_verb_form(VerbForm::Part);
    }

    if lower.ends_with("en") || lower.ends_with("ern") || lower.ends_with("eln") {
        let has_subject = matches!(
            prev,
            Some(PartOfSpeech::Pron | PartOfSpeech::Noun | PartOfSpeech::Propn)
        );
        let form = if has_subject {
            VerbForm::Fin
        } else {
            VerbForm::Inf
        };
        return Token::new(word, PartOfSpeech::Verb).with_verb_form(form);
    }

    if lower.ends_with('t') || lower.ends_with("te") {
        return Token::new(word, PartOfSpeech::Verb).with_verb_form(VerbForm::Fin);
    }

    if lower.ends_with('e') {
        if prev == Some(PartOfSpeech::Pron) {
            return Token::new(word, PartOfSpeech::Verb).with_verb_form(VerbForm::Fin);
        }
        return Token::new(word, PartOfSpeech::Adj);
    }

    Token::new(word, PartOfSpeech::Adv)
}

fn preterite_plural(singular: &str) -> String {
    if singular.ends_with("ie") {
        format!("{singular}n")
    } else {
        format!("{singular}en")
    }
}

fn has_adjective_suffix(lower: &str) -> bool {
    let stem = ADJECTIVE_INFLECTIONS
        .iter()
        .find_map(|e| lower.strip_suffix(e))
        .unwrap_or(lower);
    [lower, stem].iter().any(|candidate| {
        ADJECTIVE_SUFFIXES
            .iter()
            .any(|s| candidate.ends_with(s) && candidate.len() > s.len() + 2)
    })
}

fn is_participle(lower: &str) -> bool {
    let stem = SEPARABLE_PREFIXES
        .iter()
        .find_map(|p| {
            lower
                .strip_prefix(p)
                .filter(|rest| rest.starts_with("ge"))
        })
        .unwrap_or(lower);
    stem.starts_with("ge")
        && stem.chars().count() >= 6
        && (stem.ends_with('t') || stem.ends_with("en"))
}
