//! Lexicon-based polarity scoring for news text.
//!
//! Each known word carries a polarity in [-1, 1]. An intensifier scales the next scored word,
//! and a negation within [`NEGATION_WINDOW`] tokens flips and damps it. The text's polarity is
//! the mean of the scored words.

mod lexicon;

use std::collections::HashMap;
use std::sync::OnceLock;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "neither", "without", "cannot"];

struct Tables {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables {
        words: lexicon::WORDS.iter().copied().collect(),
        intensifiers: lexicon::INTENSIFIERS.iter().copied().collect(),
    })
}

/// Polarity of `text` in [-1.0, 1.0]. Blank text and text without any known word score 0.0.
pub fn polarity(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let tables = tables();
    let mut scores: Vec<f64> = Vec::new();
    let mut multiplier: Option<f64> = None;
    let mut negation_left: usize = 0;

    for token in tokenize(text) {
        if is_negation(&token) {
            negation_left = NEGATION_WINDOW;
            multiplier = None;
            continue;
        }

        if let Some(&m) = tables.intensifiers.get(token.as_str()) {
            multiplier = Some(multiplier.unwrap_or(1.0) * m);
            continue;
        }

        if let Some(&p) = tables.words.get(token.as_str()) {
            let mut score = p * multiplier.take().unwrap_or(1.0);
            if negation_left > 0 {
                score *= NEGATION_FACTOR;
                negation_left = 0;
            }
            scores.push(score.clamp(-1.0, 1.0));
            continue;
        }

        multiplier = None;
        negation_left = negation_left.saturating_sub(1);
    }

    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.replace('\u{2019}', "'").trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}
