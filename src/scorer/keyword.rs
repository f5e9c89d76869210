// Keyword toxicity scorer — the rule-based path.
//
// Scores text by counting trigger phrases from fixed word lists. Each list
// entry found anywhere in the lowercased input (substring match, once per
// entry) adds a weight of 2; the sum is divided by 10 and clipped at 1.0,
// so a category saturates at five distinct matches. Two categories are
// derived by scaling the already-clipped parents, and sexual_explicit is
// always 0.0. The constants are kept as-is for compatibility with the
// model path's consumers — they have no deeper rationale.

use anyhow::Result;
use async_trait::async_trait;

use super::{CategoryScores, ToxicityScorer};

/// Weight added per matching trigger phrase.
const MATCH_WEIGHT: f64 = 2.0;
/// Divisor applied to the summed weights before clipping.
const SCORE_DIVISOR: f64 = 10.0;
/// obscene is scaled from toxicity.
const OBSCENE_SCALE: f64 = 0.7;
/// identity_attack is scaled from insult.
const IDENTITY_ATTACK_SCALE: f64 = 0.8;

const TOXICITY_PHRASES: [&str; 5] = ["hate", "stupid", "idiot", "dumb", "ugly"];
const SEVERE_TOXICITY_PHRASES: [&str; 4] = ["kill", "die", "death", "murder"];
const INSULT_PHRASES: [&str; 4] = ["idiot", "moron", "retard", "loser"];
const THREAT_PHRASES: [&str; 3] = ["kill you", "hurt you", "destroy you"];

/// Rule-based scorer used when the ONNX model isn't available. Stateless
/// and pure — safe to share across requests without synchronization.
pub struct KeywordScorer;

impl KeywordScorer {
    /// Score a text across all seven categories. Never fails; empty input
    /// yields all zeros.
    pub fn score(&self, text: &str) -> CategoryScores {
        let lowered = text.to_lowercase();

        let toxicity = phrase_score(&lowered, &TOXICITY_PHRASES);
        let severe_toxicity = phrase_score(&lowered, &SEVERE_TOXICITY_PHRASES);
        let insult = phrase_score(&lowered, &INSULT_PHRASES);
        let threat = phrase_score(&lowered, &THREAT_PHRASES);

        // Derived categories read the clipped parent scores, so clipping
        // happens exactly once, upstream.
        CategoryScores {
            toxicity,
            severe_toxicity,
            obscene: toxicity * OBSCENE_SCALE,
            identity_attack: insult * IDENTITY_ATTACK_SCALE,
            insult,
            threat,
            sexual_explicit: 0.0,
        }
    }
}

/// Count trigger phrases present in the lowercased text (each list entry
/// counts once regardless of how often it occurs), weight, and clip.
fn phrase_score(lowered: &str, phrases: &[&str]) -> f64 {
    let matches = phrases.iter().filter(|p| lowered.contains(*p)).count();
    (matches as f64 * MATCH_WEIGHT / SCORE_DIVISOR).min(1.0)
}

#[async_trait]
impl ToxicityScorer for KeywordScorer {
    async fn score_text(&self, text: &str) -> Result<CategoryScores> {
        Ok(self.score(text))
    }
}
