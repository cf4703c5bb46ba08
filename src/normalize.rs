//! Text normalization: the `TextNormalizer` seam and a rule-based English
//! implementation built on the word lists in `lexicon`.

use crate::lexicon::{is_stopword, lemmatize};
use regex::Regex;
use std::sync::OnceLock;

/// Turns free text into the space-joined, lowercased base forms of its
/// alphabetic, non-stopword tokens, in input order.
///
/// Implementations must be deterministic and must return `""` for `""`.
pub trait TextNormalizer {
    fn normalize(&self, text: &str) -> String;
}

impl<T: TextNormalizer + ?Sized> TextNormalizer for &T {
    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}

/// Default normalizer: regex tokenizer, English stopword list and a
/// suffix-rule lemmatizer.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexiconNormalizer;

impl LexiconNormalizer {
    pub fn new() -> Self {
        Self
    }
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // URLs first so they stay one (non-alphabetic) token.
        Regex::new(r"(?i)https?://\S+|www\.\S+|[\p{L}\p{M}\p{N}_]+(?:['’][\p{L}\p{M}\p{N}_]+)*|\S")
            .expect("static token regex")
    })
}

/// Split off a trailing possessive so `"voter's"` yields `"voter"`.
fn strip_possessive(token: &str) -> &str {
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("’s"))
        .or_else(|| token.strip_suffix("'S"))
        .unwrap_or(token)
}

#[inline]
fn is_alpha(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

impl TextNormalizer for LexiconNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        for m in token_regex().find_iter(text) {
            let token = strip_possessive(m.as_str());
            if !is_alpha(token) {
                continue;
            }
            let lower = token.to_lowercase();
            if is_stopword(&lower) {
                continue;
            }
            let lemma = lemmatize(&lower);
            if is_stopword(&lemma) {
                continue;
            }
            out.push(lemma);
        }
        out.join(" ")
    }
}
