//! Rule-based sentiment scoring over a valence lexicon
//!
//! Scores follow the VADER heuristics: booster words scale a neighbouring
//! valence, negations flip and damp it, ALL-CAPS words are emphasised when
//! the rest of the text is not shouting, "but" shifts weight to the second
//! clause, and trailing `!`/`?` amplify the total. The summed valence is
//! normalised into a compound score in [-1, 1].

use super::lexicon::Lexicon;
use crate::error::Result;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

/// Scalar added or removed by a booster word
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
/// Emphasis added to an ALL-CAPS sentiment word
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence
const N_SCALAR: f64 = -0.74;
/// Normalisation constant approximating the maximum expected sum
const NORMALIZE_ALPHA: f64 = 15.0;

const NEGATE: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOST_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping", "flippin",
    "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully", "fuckin",
    "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely", "incredible",
    "incredibly", "intensely", "major", "majorly", "more", "most", "particularly", "purely",
    "quite", "really", "remarkably", "so", "substantially", "thoroughly", "total", "totally",
    "tremendous", "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly", "very",
];

const BOOST_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof", "kind-of", "less",
    "little", "marginal", "marginally", "occasional", "occasionally", "partly", "scarce",
    "scarcely", "slight", "slightly", "somewhat", "sort of", "sorta", "sortof", "sort-of",
];

/// Multi-word expressions whose valence overrides their parts
const SPECIAL_CASES: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
];

fn booster(word: &str) -> Option<f64> {
    if BOOST_UP.contains(&word) {
        Some(B_INCR)
    } else if BOOST_DOWN.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn special_case(phrase: &str) -> Option<f64> {
    SPECIAL_CASES
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, v)| *v)
}

fn negated(word: &str) -> bool {
    NEGATE.contains(&word) || word.contains("n't")
}

/// Uppercase in the `str.isupper` sense: at least one cased char, none lowercase
fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Some, but not all, words are in ALL CAPS
fn allcap_differential(words: &[String]) -> bool {
    let allcap = words.iter().filter(|w| is_upper(w)).count();
    let differential = words.len() - allcap;
    differential > 0 && differential < words.len()
}

/// Strip surrounding ASCII punctuation unless that leaves two chars or fewer
/// (keeps emoticons like `:)` intact)
fn strip_punctuation(token: &str) -> String {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token.to_string()
    } else {
        stripped.to_string()
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations * 0.292 + question_amp
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZE_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

/// Anything that maps comment text to a compound polarity in [-1, 1]
pub trait SentimentScorer: Send + Sync {
    /// Compound polarity score
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Lexicon-driven scorer
#[derive(Debug, Clone)]
pub struct VaderScorer {
    lexicon: Lexicon,
}

impl VaderScorer {
    /// Create a scorer over a loaded lexicon
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// The lexicon backing this scorer
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Compound polarity, rounded to four decimals
    pub fn compound(&self, text: &str) -> f64 {
        let words: Vec<String> = text.split_whitespace().map(strip_punctuation).collect();
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let is_cap_diff = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let skip = booster(&lower[i]).is_some()
                || (lower[i] == "kind" && lower.get(i + 1).map(String::as_str) == Some("of"));
            if skip {
                sentiments.push(0.0);
            } else {
                sentiments.push(self.word_valence(&words, &lower, i, is_cap_diff));
            }
        }

        but_check(&lower, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let amplifier = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += amplifier;
        } else {
            sum -= amplifier;
        }

        (normalize(sum) * 10_000.0).round() / 10_000.0
    }

    fn word_valence(&self, words: &[String], lower: &[String], i: usize, is_cap_diff: bool) -> f64 {
        let Some(base) = self.lexicon.valence(&lower[i]) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before a rated word negates it rather than scoring itself
        if lower[i] == "no" && lower.get(i + 1).is_some_and(|next| self.lexicon.contains(next)) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_upper(&words[i]) && is_cap_diff {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start_i in 0..3 {
            if i <= start_i {
                break;
            }
            let prev = i - (start_i + 1);
            if self.lexicon.contains(&lower[prev]) {
                continue;
            }
            let mut scalar = scalar_inc_dec(&words[prev], &lower[prev], valence, is_cap_diff);
            if start_i == 1 {
                scalar *= 0.95;
            } else if start_i == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lower, start_i, i);
            if start_i == 2 {
                valence = special_idioms_check(valence, lower, i);
            }
        }

        self.least_check(valence, lower, i)
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 1 && lower[i - 1] == "least" && !self.lexicon.contains(&lower[i - 1]) {
            if lower[i - 2] != "at" && lower[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && lower[i - 1] == "least" && !self.lexicon.contains(&lower[i - 1]) {
            return valence * N_SCALAR;
        }
        valence
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        self.compound(text)
    }
}

fn scalar_inc_dec(word: &str, word_lower: &str, valence: f64, is_cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(word_lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if is_upper(word) && is_cap_diff {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
    let so_or_this = |w: &str| w == "so" || w == "this";
    match start_i {
        0 if negated(&lower[i - 1]) => valence * N_SCALAR,
        1 => {
            if lower[i - 2] == "never" && so_or_this(&lower[i - 1]) {
                valence * 1.25
            } else if lower[i - 2] == "without" && lower[i - 1] == "doubt" {
                valence
            } else if negated(&lower[i - 2]) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        2 => {
            if lower[i - 3] == "never" && (so_or_this(&lower[i - 2]) || so_or_this(&lower[i - 1])) {
                valence * 1.25
            } else if lower[i - 3] == "without" && (lower[i - 2] == "doubt" || lower[i - 1] == "doubt") {
                valence
            } else if negated(&lower[i - 3]) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        _ => valence,
    }
}

fn special_idioms_check(mut valence: f64, lower: &[String], i: usize) -> f64 {
    let one_zero = format!("{} {}", lower[i - 1], lower[i]);
    let two_one_zero = format!("{} {} {}", lower[i - 2], lower[i - 1], lower[i]);
    let two_one = format!("{} {}", lower[i - 2], lower[i - 1]);
    let three_two_one = format!("{} {} {}", lower[i - 3], lower[i - 2], lower[i - 1]);
    let three_two = format!("{} {}", lower[i - 3], lower[i - 2]);

    for seq in [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two] {
        if let Some(v) = special_case(seq) {
            valence = v;
            break;
        }
    }

    if lower.len() - 1 > i {
        let zero_one = format!("{} {}", lower[i], lower[i + 1]);
        if let Some(v) = special_case(&zero_one) {
            valence = v;
        }
    }
    if lower.len() - 1 > i + 1 {
        let zero_one_two = format!("{} {} {}", lower[i], lower[i + 1], lower[i + 2]);
        if let Some(v) = special_case(&zero_one_two) {
            valence = v;
        }
    }

    for n_gram in [&three_two_one, &three_two, &two_one] {
        if let Some(b) = booster(n_gram) {
            valence += b;
        }
    }
    valence
}

/// Halve sentiment before the first "but", boost it by half after
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(bi) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (si, sentiment) in sentiments.iter_mut().enumerate() {
        if si < bi {
            *sentiment *= 0.5;
        } else if si > bi {
            *sentiment *= 1.5;
        }
    }
}

/// Source of the lexicon for a [`LazyScorer`]
pub type LexiconLoader = Box<dyn Fn() -> Result<Lexicon> + Send + Sync>;

/// Scorer whose lexicon is loaded at most once, on first use
///
/// Concurrent first callers block on the same initialisation; after that
/// every call is a lock-free read. A failed load is returned to the caller
/// and retried on the next call.
pub struct LazyScorer {
    loader: LexiconLoader,
    cell: OnceCell<VaderScorer>,
}

impl LazyScorer {
    /// Create a lazy scorer with a custom lexicon loader
    pub fn new(loader: impl Fn() -> Result<Lexicon> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Lazy scorer over the lexicon compiled into the binary
    pub fn bundled() -> Self {
        Self::new(Lexicon::bundled)
    }

    /// The initialised scorer, loading the lexicon if needed
    pub fn get(&self) -> Result<&VaderScorer> {
        self.cell.get_or_try_init(|| {
            debug!("Loading sentiment lexicon");
            let lexicon = (self.loader)()?;
            info!(
                "Sentiment lexicon ready: {} entries ({})",
                lexicon.len(),
                lexicon.fingerprint()
            );
            Ok(VaderScorer::new(lexicon))
        })
    }

    /// Whether the lexicon has been loaded
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for LazyScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyScorer")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
