use std::collections::{HashMap, HashSet};

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use crate::model::TokenSets;

/// Maps a token to its dictionary base form.
pub trait Lemmatize: Send + Sync {
    fn lemma(&self, token: &str) -> String;
}

/// Rule-based Portuguese lemmatizer: a lexicon of common irregular verb
/// forms, then deterministic suffix rules for regular inflection.
/// Tokens it cannot resolve come back lowercased but otherwise intact,
/// so punctuation and stop words always map to themselves.
pub struct PortugueseLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
}

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    // ser
    ("é", "ser"), ("são", "ser"), ("era", "ser"), ("eram", "ser"),
    ("foi", "ser"), ("foram", "ser"), ("sendo", "ser"), ("sido", "ser"),
    ("seria", "ser"), ("será", "ser"),
    // estar
    ("está", "estar"), ("estão", "estar"), ("estava", "estar"),
    ("estavam", "estar"), ("esteve", "estar"), ("estando", "estar"),
    // ter
    ("tem", "ter"), ("têm", "ter"), ("tinha", "ter"), ("tinham", "ter"),
    ("teve", "ter"), ("tiveram", "ter"), ("tendo", "ter"), ("tido", "ter"),
    // haver
    ("há", "haver"), ("havia", "haver"), ("houve", "haver"),
    // ir
    ("vai", "ir"), ("vão", "ir"), ("ia", "ir"), ("iam", "ir"), ("indo", "ir"),
    // fazer
    ("faz", "fazer"), ("fez", "fazer"), ("fazem", "fazer"),
    ("fizeram", "fazer"), ("feito", "fazer"), ("fazendo", "fazer"),
    // poder
    ("pode", "poder"), ("podem", "poder"), ("podia", "poder"),
    ("pôde", "poder"), ("puderam", "poder"),
    // dizer
    ("diz", "dizer"), ("disse", "dizer"), ("dizem", "dizer"),
    ("disseram", "dizer"), ("dito", "dizer"),
    // ver
    ("vê", "ver"), ("viu", "ver"), ("visto", "ver"), ("viram", "ver"),
    // vir
    ("vem", "vir"), ("veio", "vir"), ("vieram", "vir"), ("vindo", "vir"),
    // dar
    ("dá", "dar"), ("deu", "dar"), ("dão", "dar"), ("deram", "dar"),
    // saber / querer
    ("sabe", "saber"), ("soube", "saber"),
    ("quer", "querer"), ("quis", "querer"), ("querem", "querer"),
];

/// Suffix rewrites tried longest-first; the first whose result is still
/// at least two characters wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    // gerunds and participles back to the infinitive
    ("ando", "ar"), ("endo", "er"), ("indo", "ir"),
    ("adas", "ar"), ("ados", "ar"), ("ada", "ar"), ("ado", "ar"),
    ("idas", "ir"), ("idos", "ir"), ("ida", "ir"), ("ido", "ir"),
    // common finite forms
    ("aram", "ar"), ("eram", "er"), ("iram", "ir"),
    ("avam", "ar"), ("ava", "ar"),
    ("amos", "ar"), ("emos", "er"), ("imos", "ir"),
    // nominal plurals
    ("ções", "ção"), ("ões", "ão"), ("ães", "ão"),
    ("ais", "al"), ("éis", "el"), ("óis", "ol"),
    ("ns", "m"), ("res", "r"), ("zes", "z"),
];

impl PortugueseLemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
        }
    }
}

impl Default for PortugueseLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatize for PortugueseLemmatizer {
    fn lemma(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        if let Some(base) = self.irregular.get(lower.as_str()) {
            return (*base).to_string();
        }
        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stripped) = lower.strip_suffix(suffix) {
                if stripped.chars().count() >= 2 {
                    return format!("{stripped}{replacement}");
                }
            }
        }
        // plain plural, e.g. "filmes" -> "filme"
        if let Some(stripped) = lower.strip_suffix('s') {
            if stripped.chars().count() >= 3 && stripped.ends_with(|c: char| "aeiou".contains(c)) {
                return stripped.to_string();
            }
        }
        lower
    }
}

/// The text-normalization pipeline: tokenize, filter, stem, lemmatize.
/// Built once with its language resources and passed by reference; the
/// stemmer and stop-word list are both Portuguese.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    stemmer: Stemmer,
    lemmatizer: Box<dyn Lemmatize>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::with_lemmatizer(Box::new(PortugueseLemmatizer::new()))
    }

    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatize>) -> Self {
        let stop_words = stop_words::get(stop_words::LANGUAGE::Portuguese)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self {
            stop_words,
            stemmer: Stemmer::create(Algorithm::Portuguese),
            lemmatizer,
        }
    }

    /// Word-level tokens, punctuation included, whitespace dropped.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_word_bounds()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Produce the three derived sequences for `text`.
    ///
    /// `stems` parallels `filtered_tokens`; `lemmas` covers the whole
    /// unfiltered token stream, one entry per token. That asymmetry is
    /// deliberate: lemmatization is a morphological lookup that applies
    /// to every token, stemming only to content-bearing ones.
    pub fn normalize(&self, text: &str) -> TokenSets {
        let tokens = self.tokenize(text);

        let filtered_tokens: Vec<String> = tokens
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !self.stop_words.contains(t) && !is_punctuation(t))
            .collect();

        let stems = filtered_tokens
            .iter()
            .map(|t| self.stemmer.stem(t).to_string())
            .collect();

        let lemmas = tokens.iter().map(|t| self.lemmatizer.lemma(t)).collect();

        TokenSets {
            filtered_tokens,
            stems,
            lemmas,
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_punctuation(token: &str) -> bool {
    token.chars().all(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_sequences() {
        let n = TextNormalizer::new();
        let sets = n.normalize("");
        assert!(sets.filtered_tokens.is_empty());
        assert!(sets.stems.is_empty());
        assert!(sets.lemmas.is_empty());
    }

    #[test]
    fn stop_words_and_punctuation_filtered() {
        let n = TextNormalizer::new();
        let sets = n.normalize("A fotografia é impecável.");
        assert!(sets.filtered_tokens.contains(&"fotografia".to_string()));
        assert!(!sets.filtered_tokens.contains(&"a".to_string()));
        assert!(!sets.filtered_tokens.contains(&"é".to_string()));
        assert!(!sets.filtered_tokens.contains(&".".to_string()));
        // lemmas keep one entry per raw token, stop words included
        assert_eq!(sets.lemmas.len(), 5);
        assert_eq!(sets.lemmas[2], "ser");
    }

    #[test]
    fn stems_parallel_filtered_not_raw() {
        let n = TextNormalizer::new();
        let sets = n.normalize("As atuações foram incríveis, sem dúvida.");
        assert_eq!(sets.stems.len(), sets.filtered_tokens.len());
        assert!(sets.lemmas.len() > sets.filtered_tokens.len());
        let stemmer = Stemmer::create(Algorithm::Portuguese);
        for (token, stem) in sets.filtered_tokens.iter().zip(&sets.stems) {
            assert_eq!(stem, &stemmer.stem(token).to_string());
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let n = TextNormalizer::new();
        let first = n.normalize("A direção surpreende em cada cena do filme.");
        let rejoined = first.filtered_tokens.join(" ");
        let second = n.normalize(&rejoined);
        assert_eq!(second.filtered_tokens, first.filtered_tokens);
    }

    #[test]
    fn lemmatizer_handles_regular_inflection() {
        let l = PortugueseLemmatizer::new();
        assert_eq!(l.lemma("filmes"), "filme");
        assert_eq!(l.lemma("atuações"), "atuação");
        assert_eq!(l.lemma("assistindo"), "assistir");
        assert_eq!(l.lemma("gostaram"), "gostar");
        assert_eq!(l.lemma("foi"), "ser");
        // unknown tokens come back lowercased, nothing more
        assert_eq!(l.lemma("Buscapé"), "buscapé");
        assert_eq!(l.lemma(","), ",");
    }
}
