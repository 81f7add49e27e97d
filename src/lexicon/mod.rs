//! Lexicon and rule based sentiment scoring.
//!
//! A pretrained valence lexicon plus a small rule set (negation, booster
//! words, exclamation emphasis) produce a compound polarity score in
//! [-1, 1] directly from text, with no training step. As a method adapter
//! the scorer accepts training indices for interface symmetry and ignores
//! them.

use crate::error::Result;
use crate::features::tokenize;
use crate::label::Label;
use crate::traits::{EvalInput, MethodAdapter};
use std::collections::{HashMap, HashSet};

/// Damping applied when a negator precedes a lexicon word.
const NEGATION_FACTOR: f64 = -0.74;

/// Valence added per exclamation mark (capped at 4).
const EXCLAIM_BOOST: f64 = 0.292;

/// Normalization constant for the compound score.
const NORM_ALPHA: f64 = 15.0;

/// How many preceding tokens are scanned for negators and boosters.
const CONTEXT_WINDOW: usize = 3;

/// Booster damping by distance from the scored word (1, 2, 3 back).
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

/// Word valences on a [-4, 4] scale.
const VALENCE_TABLE: &[(&str, f64)] = &[
    ("abysmal", -3.1),
    ("adore", 2.9),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoying", -1.9),
    ("appalling", -2.9),
    ("awesome", 3.1),
    ("awful", -2.9),
    ("bad", -2.5),
    ("beautiful", 2.6),
    ("best", 3.2),
    ("better", 1.9),
    ("bland", -1.2),
    ("boring", -1.8),
    ("brilliant", 3.0),
    ("broken", -2.0),
    ("celebrate", 2.4),
    ("charming", 2.2),
    ("cheerful", 2.3),
    ("crap", -2.4),
    ("creepy", -1.8),
    ("cry", -1.9),
    ("delight", 2.6),
    ("delightful", 2.8),
    ("disappointed", -2.2),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("disgusting", -2.9),
    ("dreadful", -2.8),
    ("dull", -1.5),
    ("enjoy", 2.2),
    ("enjoyable", 2.3),
    ("excellent", 3.0),
    ("excited", 2.4),
    ("exciting", 2.4),
    ("fail", -2.3),
    ("failure", -2.5),
    ("fantastic", 3.0),
    ("favorite", 2.4),
    ("fear", -2.2),
    ("fine", 1.0),
    ("flawless", 3.0),
    ("fun", 2.3),
    ("garbage", -2.6),
    ("glad", 2.1),
    ("good", 1.9),
    ("gorgeous", 2.7),
    ("great", 3.1),
    ("happy", 2.7),
    ("hate", -2.7),
    ("hideous", -2.6),
    ("hope", 1.9),
    ("horrible", -2.9),
    ("hurt", -2.1),
    ("impressive", 2.4),
    ("incredible", 2.8),
    ("inferior", -1.9),
    ("interesting", 1.7),
    ("joy", 2.8),
    ("lame", -1.7),
    ("laugh", 2.2),
    ("like", 1.5),
    ("lose", -1.8),
    ("loser", -2.1),
    ("love", 3.2),
    ("lovely", 2.7),
    ("mediocre", -1.2),
    ("mess", -1.7),
    ("miserable", -2.7),
    ("nasty", -2.5),
    ("nice", 1.8),
    ("pathetic", -2.5),
    ("perfect", 2.9),
    ("pleasant", 2.2),
    ("pleased", 2.2),
    ("poor", -1.9),
    ("problem", -1.6),
    ("recommend", 1.9),
    ("regret", -2.0),
    ("rubbish", -2.2),
    ("ruin", -2.3),
    ("sad", -2.1),
    ("scam", -2.8),
    ("smile", 2.1),
    ("stunning", 2.7),
    ("stupid", -2.4),
    ("succeed", 2.2),
    ("success", 2.4),
    ("sucks", -2.3),
    ("superb", 3.0),
    ("terrible", -3.0),
    ("terrific", 2.9),
    ("thank", 1.9),
    ("thanks", 1.9),
    ("trash", -2.3),
    ("ugly", -2.3),
    ("useless", -2.2),
    ("waste", -2.2),
    ("welcome", 1.9),
    ("win", 2.4),
    ("winner", 2.6),
    ("wonderful", 2.9),
    ("worse", -2.6),
    ("worst", -3.3),
    ("worthless", -2.5),
    ("wow", 2.6),
    ("wrong", -1.8),
];

/// Negation markers; a negator within the context window flips valence.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "can't", "don't", "doesn't", "didn't",
    "isn't", "wasn't", "aren't", "weren't", "won't", "wouldn't", "shouldn't", "couldn't",
    "without", "hardly", "barely",
];

/// Degree modifiers and the valence increment they contribute.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("really", 0.267),
    ("so", 0.293),
    ("totally", 0.293),
    ("truly", 0.293),
    ("utterly", 0.293),
    ("very", 0.293),
    ("almost", -0.293),
    ("kinda", -0.293),
    ("marginally", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
    ("sort", -0.293),
];

/// Rule and dictionary based sentiment scorer requiring no training data.
///
/// # Examples
///
/// ```
/// use sentir::lexicon::LexiconScorer;
///
/// let scorer = LexiconScorer::new();
/// assert!(scorer.polarity("what a great movie") > 0.0);
/// assert!(scorer.polarity("this was a terrible waste") < 0.0);
/// assert_eq!(scorer.polarity("the chair is in the room"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valence: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
    boosters: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    /// Creates a scorer with the built-in lexicon and rule set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            valence: VALENCE_TABLE.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    /// Computes the compound polarity of a text, in [-1, 1].
    ///
    /// Each lexicon word contributes its valence, adjusted by boosters and
    /// negators in the preceding context window. Exclamation marks amplify
    /// the total in its sign direction. The adjusted sum is normalized by
    /// `x / sqrt(x^2 + alpha)`.
    #[must_use]
    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut total = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.valence.get(token.as_str()) else {
                continue;
            };
            let mut valence = base;

            let window_start = i.saturating_sub(CONTEXT_WINDOW);
            for (back, prior) in tokens[window_start..i].iter().rev().enumerate() {
                if let Some(&boost) = self.boosters.get(prior.as_str()) {
                    let damped = boost * BOOSTER_DAMPING[back.min(2)];
                    valence += valence.signum() * damped;
                }
                if self.negators.contains(prior.as_str()) {
                    valence *= NEGATION_FACTOR;
                }
            }

            total += valence;
        }

        if total != 0.0 {
            let exclaims = text.matches('!').count().min(4) as f64;
            total += total.signum() * exclaims * EXCLAIM_BOOST;
        }

        let compound = total / (total * total + NORM_ALPHA).sqrt();
        compound.clamp(-1.0, 1.0)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodAdapter for LexiconScorer {
    fn fit_predict(
        &self,
        _train_idx: &[usize],
        test_idx: &[usize],
        input: &EvalInput<'_>,
    ) -> Result<Vec<Label>> {
        test_idx
            .iter()
            .map(|&idx| {
                let score = self.polarity(&input.records[idx].text);
                input.scheme.categorize(score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Record;
    use crate::features::{build_dfm, DfmBuilder};
    use crate::label::LabelScheme;

    fn records(texts: &[&str]) -> Vec<Record> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Record {
                id: i as i64,
                sentiment: 0.0,
                text: (*t).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_positive_and_negative_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("great wonderful excellent") > 0.5);
        assert!(scorer.polarity("horrible awful worst") < -0.5);
    }

    #[test]
    fn test_neutral_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity("the table has four legs"), 0.0);
        assert_eq!(scorer.polarity(""), 0.0);
    }

    #[test]
    fn test_negation_flips_valence() {
        let scorer = LexiconScorer::new();
        let plain = scorer.polarity("this is good");
        let negated = scorer.polarity("this is not good");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_booster_amplifies() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("very good") > scorer.polarity("good"));
        assert!(scorer.polarity("slightly good") < scorer.polarity("good"));
    }

    #[test]
    fn test_exclamation_amplifies() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("good!!!") > scorer.polarity("good"));
        assert!(scorer.polarity("bad!!!") < scorer.polarity("bad"));
    }

    #[test]
    fn test_exclamation_alone_does_not_score() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity("the table!!!"), 0.0);
    }

    #[test]
    fn test_compound_bounded() {
        let scorer = LexiconScorer::new();
        let long_praise = "love love love great great great best best best";
        let p = scorer.polarity(long_praise);
        assert!(p > 0.9 && p <= 1.0);
    }

    #[test]
    fn test_adapter_ignores_training_indices() {
        let recs = records(&["what a great day", "awful terrible mess", "neutral words here"]);
        let (dfm, labels) =
            build_dfm(&recs, LabelScheme::Three, &DfmBuilder::new().with_min_doc_freq(1)).unwrap();
        let input = EvalInput {
            records: &recs,
            dfm: &dfm,
            labels: &labels,
            scheme: LabelScheme::Three,
        };

        let scorer = LexiconScorer::new();
        let with_train = scorer.fit_predict(&[0, 1], &[0, 1, 2], &input).unwrap();
        let without_train = scorer.fit_predict(&[], &[0, 1, 2], &input).unwrap();
        assert_eq!(with_train, without_train);
        assert_eq!(with_train, vec![1, -1, 0]);
    }

    #[test]
    fn test_predictions_in_universe() {
        let recs = records(&["great!!!", "worst garbage ever", "ok"]);
        let (dfm, labels) =
            build_dfm(&recs, LabelScheme::Five, &DfmBuilder::new().with_min_doc_freq(1)).unwrap();
        let input = EvalInput {
            records: &recs,
            dfm: &dfm,
            labels: &labels,
            scheme: LabelScheme::Five,
        };
        let preds = LexiconScorer::new()
            .fit_predict(&[], &[0, 1, 2], &input)
            .unwrap();
        for p in preds {
            assert!(LabelScheme::Five.index_of(p).is_some());
        }
    }
}
