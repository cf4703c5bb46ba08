//! English word lists used by the default normalizer: stopwords, irregular
//! inflections and words that look inflected but are not.

use ahash::{AHashMap, AHashSet};
use std::sync::OnceLock;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "first", "five", "for", "former",
    "formerly", "forty", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly",
    "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding", "same",
    "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
    "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "third", "this", "those", "though",
    "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
    "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon", "us", "used",
    "using", "various", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
    // contraction fragments
    "'d", "'ll", "'m", "'re", "'s", "'ve", "n't", "’d", "’ll", "’m", "’re", "’s", "’ve", "n’t",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"), ("men", "man"), ("women", "woman"), ("mice", "mouse"),
    ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"), ("lives", "life"),
    ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"), ("wolves", "wolf"),
    ("went", "go"), ("gone", "go"), ("ran", "run"), ("saw", "see"), ("seen", "see"),
    ("said", "say"), ("says", "say"), ("took", "take"), ("taken", "take"), ("gave", "give"),
    ("given", "give"), ("got", "get"), ("gotten", "get"), ("came", "come"), ("knew", "know"),
    ("known", "know"), ("thought", "think"), ("told", "tell"), ("found", "find"),
    ("left", "leave"), ("felt", "feel"), ("kept", "keep"), ("began", "begin"),
    ("begun", "begin"), ("brought", "bring"), ("bought", "buy"), ("wrote", "write"),
    ("written", "write"), ("spoke", "speak"), ("spoken", "speak"), ("chose", "choose"),
    ("chosen", "choose"), ("ate", "eat"), ("eaten", "eat"), ("drove", "drive"),
    ("driven", "drive"), ("won", "win"), ("lost", "lose"), ("paid", "pay"), ("sold", "sell"),
    ("held", "hold"), ("stood", "stand"), ("understood", "understand"), ("met", "meet"),
    ("led", "lead"), ("fought", "fight"), ("taught", "teach"), ("caught", "catch"),
    ("sent", "send"), ("spent", "spend"), ("built", "build"), ("meant", "mean"),
    ("heard", "hear"), ("fell", "fall"), ("fallen", "fall"), ("grew", "grow"),
    ("grown", "grow"), ("threw", "throw"), ("thrown", "throw"), ("broke", "break"),
    ("broken", "break"), ("forgot", "forget"), ("forgotten", "forget"), ("rose", "rise"),
    ("risen", "rise"), ("better", "good"), ("best", "good"), ("worse", "bad"),
    ("worst", "bad"), ("data", "datum"),
];

/// Words ending in `s`, `ed` or `ing` that are already base forms.
const INVARIANT: &[&str] = &[
    "news", "series", "species", "politics", "economics", "physics", "mathematics", "ethics",
    "bias", "chaos", "alias", "atlas", "canvas", "texas", "christmas", "lens", "gas", "yes",
    "thus", "bus", "virus", "status", "census", "focus", "bonus", "campus", "consensus",
    "always", "perhaps", "sometimes", "whereas", "besides", "towards", "afterwards",
    "thing", "nothing", "something", "anything", "everything", "king", "ring", "sing", "wing",
    "bring", "spring", "string", "swing", "sting", "during", "morning", "evening", "ceiling",
    "building", "meeting", "wedding", "feeling", "red", "bed", "need", "speed", "seed", "feed",
    "weed", "breed", "greed", "hundred", "sacred", "naked", "wicked", "shed", "bled", "fled",
];

fn stopword_set() -> &'static AHashSet<&'static str> {
    static SET: OnceLock<AHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

fn irregular_map() -> &'static AHashMap<&'static str, &'static str> {
    static MAP: OnceLock<AHashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| IRREGULAR.iter().copied().collect())
}

fn invariant_set() -> &'static AHashSet<&'static str> {
    static SET: OnceLock<AHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| INVARIANT.iter().copied().collect())
}

/// `word` must already be lowercase.
#[inline]
pub fn is_stopword(word: &str) -> bool {
    stopword_set().contains(word)
}

/// Base form of a lowercase word. Applied until nothing changes, so the
/// result is stable under a second call.
///
/// Terminates: every irregular base is already a fixed point and every suffix
/// rule returns a strictly shorter word.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();
    loop {
        let next = lemmatize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn lemmatize_once(w: &str) -> String {
    if let Some(base) = irregular_map().get(w) {
        return (*base).to_string();
    }
    if invariant_set().contains(w) || w.chars().count() <= 3 {
        return w.to_string();
    }

    // nouns
    if let Some(stem) = w.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = w.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    for suffix in ["xes", "ches", "shes"] {
        if let Some(stem) = w.strip_suffix(suffix) {
            let kept = &suffix[..suffix.len() - 2];
            return format!("{stem}{kept}");
        }
    }
    if w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") && !w.ends_with("is") {
        let stem = &w[..w.len() - 1];
        if stem.len() >= 3 {
            return stem.to_string();
        }
    }

    // verbs
    if let Some(stem) = w.strip_suffix("ied") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = w.strip_suffix(suffix) {
            if stem.chars().count() >= 3 && stem.chars().any(is_vowel) {
                return restore_stem(stem);
            }
        }
    }
    w.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undo consonant doubling (`runn` -> `run`) or put back a silent `e`
/// (`vot` -> `vote`) after an inflectional suffix was removed.
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];

    if last == prev && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }
    let needs_e = matches!(last, 'v' | 'c')
        || stem.ends_with("iz")
        || stem.ends_with("dg")
        || stem.ends_with("rg")
        || (n >= 5 && stem.ends_with("at"))
        || (n == 3
            && !is_vowel(chars[0])
            && is_vowel(chars[1])
            && !is_vowel(last)
            && !matches!(last, 'w' | 'x' | 'y'));
    if needs_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}
