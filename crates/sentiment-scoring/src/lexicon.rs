use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use regex::Regex;
use statement_core::numeric::round3;
use statement_core::{Contribution, EngineResult, HeadlineScore, SentimentScorer};

/// Domain-specific terms with signed weights. Multi-word entries are
/// matched as phrases before the word-level pass.
const LEXICON: &[(&str, f64)] = &[
    // Strong positive indicators
    ("record high", 1.0),
    ("all-time high", 1.0),
    ("breakout", 0.8),
    ("surge", 0.7),
    ("rally", 0.7),
    ("soar", 0.7),
    ("bullish", 0.6),
    ("upgrade", 0.6),
    ("outperform", 0.6),
    ("boost", 0.5),
    // Labor and dispute context
    ("strike", -0.6),
    ("strike authorization", -0.5),
    ("labor dispute", -0.4),
    ("walkout", -0.5),
    ("unionize", -0.3),
    ("union", -0.2),
    ("protest", -0.4),
    ("picket", -0.4),
    ("work stoppage", -0.5),
    ("labor tension", -0.4),
    ("contract dispute", -0.4),
    // Positive resolution terms
    ("agreement reached", 0.5),
    ("deal reached", 0.5),
    ("settlement", 0.4),
    ("resolution", 0.4),
    ("contract approved", 0.5),
    // Strong negative indicators
    ("plunge", -0.8),
    ("crash", -0.8),
    ("tumble", -0.7),
    ("slump", -0.7),
    ("bearish", -0.6),
    ("downgrade", -0.6),
    ("underperform", -0.6),
    ("drops", -0.4),
    ("falls", -0.4),
    // Price movement context
    ("reverses", -0.3),
    ("pulls back", -0.3),
    ("rebounds", 0.4),
    ("recovers", 0.4),
    // Rating context
    ("buy", 0.5),
    ("strong buy", 0.7),
    ("sell", -0.5),
    ("strong sell", -0.7),
    // Mildly positive business terms
    ("partners", 0.2),
    ("deploys", 0.2),
];

/// Modifiers that only carry sentiment immediately before "target".
const PRICE_MODIFIERS: &[(&str, f64)] = &[
    ("higher", 0.3),
    ("raised", 0.3),
    ("increased", 0.3),
    ("lifted", 0.3),
    ("lower", -0.3),
    ("cut", -0.3),
    ("reduced", -0.3),
    ("slashed", -0.4),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("strongly", 1.5),
    ("sharply", 1.3),
    ("significantly", 1.3),
    ("substantially", 1.3),
    ("massively", 1.4),
    ("slightly", 0.7),
    ("marginally", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "neither", "nor", "nobody", "nowhere",
    "without", "fails", "fail", "failed",
];

/// How far back a negation flips a term's sign.
const NEGATION_WINDOW: usize = 3;
/// How far back intensifiers multiply a term's weight.
const INTENSIFIER_WINDOW: usize = 2;

/// Direction words that turn an extracted percentage into a signed move.
const UP_WORDS: &[&str] = &["gain", "up", "rise", "higher", "rally"];
const DOWN_WORDS: &[&str] = &["drop", "down", "fall", "lower", "decline"];

/// Hand-built lexicon strategy: phrase and word weights, intensifier and
/// negation context, percentage-move extraction, tanh normalization to
/// [-1, 1].
pub struct LexiconScorer {
    phrases: Vec<(&'static str, f64)>,
    words: HashMap<&'static str, f64>,
    price_modifiers: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    percentage: Option<Regex>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        let (phrases, singles): (Vec<_>, Vec<_>) =
            LEXICON.iter().partition(|(term, _)| term.contains(' '));
        Self {
            phrases: phrases.into_iter().copied().collect(),
            words: singles.into_iter().copied().collect(),
            price_modifiers: PRICE_MODIFIERS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            percentage: Regex::new(r"(\d+(?:\.\d+)?)%").ok(),
        }
    }

    pub fn score(&self, headline: &str) -> HeadlineScore {
        let lower = headline.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let mut value = 0.0;
        let mut contributions = Vec::new();

        // Percentage movements, signed by direction words and capped at
        // one full point.
        if let Some(pct) = self.extract_percentage(&lower) {
            let magnitude = (pct / 20.0).min(1.0);
            if UP_WORDS.iter().any(|w| lower.contains(w)) {
                value += magnitude;
                contributions.push(Contribution {
                    term: format!("{}% move", pct),
                    weight: magnitude,
                });
            } else if DOWN_WORDS.iter().any(|w| lower.contains(w)) {
                value -= magnitude;
                contributions.push(Contribution {
                    term: format!("{}% move", pct),
                    weight: -magnitude,
                });
            }
        }

        // Multi-word phrases first so "record high" is not scored as a
        // bare "high".
        for (phrase, weight) in &self.phrases {
            if lower.contains(phrase) {
                value += weight;
                contributions.push(Contribution {
                    term: phrase.to_string(),
                    weight: *weight,
                });
            }
        }

        for (i, word) in words.iter().enumerate() {
            // Price-target context: the modifier before "target" carries
            // the sentiment.
            if word.contains("target") && i > 0 {
                if let Some(weight) = self.price_modifiers.get(words[i - 1]) {
                    value += weight;
                    contributions.push(Contribution {
                        term: format!("{} target", words[i - 1]),
                        weight: *weight,
                    });
                }
            }

            let Some(&base) = self.words.get(word) else {
                continue;
            };
            let weight = base * self.intensity(&words, i);
            let weight = if self.negated(&words, i) { -weight } else { weight };
            value += weight;
            if weight != 0.0 {
                contributions.push(Contribution {
                    term: word.to_string(),
                    weight,
                });
            }
        }

        HeadlineScore {
            sentiment: round3(value.tanh()),
            contributions,
        }
    }

    fn extract_percentage(&self, text: &str) -> Option<f64> {
        self.percentage
            .as_ref()?
            .captures(text)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    }

    fn negated(&self, words: &[&str], index: usize) -> bool {
        let start = index.saturating_sub(NEGATION_WINDOW);
        words[start..index].iter().any(|w| self.negations.contains(w))
    }

    fn intensity(&self, words: &[&str], index: usize) -> f64 {
        let start = index.saturating_sub(INTENSIFIER_WINDOW);
        words[start..index]
            .iter()
            .filter_map(|w| self.intensifiers.get(w))
            .product()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    async fn score_headline(&self, headline: &str) -> EngineResult<HeadlineScore> {
        Ok(self.score(headline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_terms_score_with_expected_sign() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("Shares surge after earnings beat").sentiment > 0.0);
        assert!(scorer.score("Stock falls on weak guidance").sentiment < 0.0);
        assert!(scorer.score("Shares tumble as outlook darkens").sentiment < 0.0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let scorer = LexiconScorer::new();
        let piled_on = scorer.score("surge rally soar breakout bullish upgrade outperform");
        assert!(piled_on.sentiment <= 1.0);
        assert!(piled_on.sentiment > 0.9);
    }

    #[test]
    fn negation_flips_a_term() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("Analysts see a rally ahead");
        let negated = scorer.score("Analysts see no rally ahead");
        assert!(plain.sentiment > 0.0);
        assert!(negated.sentiment < 0.0);
    }

    #[test]
    fn intensifier_amplifies_a_term() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("Shares tumble on results");
        let intense = scorer.score("Shares sharply tumble on results");
        assert!(intense.sentiment < plain.sentiment);
    }

    #[test]
    fn phrase_weights_apply() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("Stock hits record high after results");
        assert!(score.sentiment > 0.5);
        assert!(score
            .contributions
            .iter()
            .any(|c| c.term == "record high"));
    }

    #[test]
    fn percentage_moves_are_signed_and_capped() {
        let scorer = LexiconScorer::new();
        let up = scorer.score("Shares up 10% on report");
        let down = scorer.score("Shares down 10% on report");
        assert!(up.sentiment > 0.0);
        assert!(down.sentiment < 0.0);

        // 60% caps at a full point before normalization.
        let capped = scorer.score("Shares up 60% on report");
        assert!(capped.sentiment <= 1.0);
    }

    #[test]
    fn price_target_modifier_context() {
        let scorer = LexiconScorer::new();
        let raised = scorer.score("Bank raised target to $250");
        let slashed = scorer.score("Bank slashed target to $90");
        assert!(raised.sentiment > 0.0);
        assert!(slashed.sentiment < 0.0);
    }

    #[test]
    fn neutral_headline_scores_zero() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("Company announces quarterly report date");
        assert_eq!(score.sentiment, 0.0);
        assert!(score.contributions.is_empty());
    }
}
