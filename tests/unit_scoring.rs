// Unit tests for the keyword scoring path through the public API.
//
// Covers the ToxicityScorer trait surface, saturation and derivation
// behavior, and the invariant that every score stays in [0.0, 1.0]
// regardless of input.

use sift::scorer::keyword::KeywordScorer;
use sift::scorer::{Category, ToxicityScorer};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-10,
        "expected {expected}, got {actual}"
    );
}

// ============================================================
// Trait surface — async score_text matches the sync score
// ============================================================

#[tokio::test]
async fn trait_score_text_matches_direct_score() {
    let text = "you stupid idiot";
    let via_trait = KeywordScorer.score_text(text).await.unwrap();
    let direct = KeywordScorer.score(text);

    for category in Category::ALL {
        assert_eq!(via_trait.get(category), direct.get(category));
    }
}

#[tokio::test]
async fn trait_never_errors_on_odd_input() {
    let long = "a".repeat(100_000);
    for text in ["", " ", "\n\t", "🔥💀🔥", long.as_str()] {
        let result = KeywordScorer.score_text(text).await;
        assert!(result.is_ok(), "scoring should be infallible");
    }
}

// ============================================================
// Saturation and derivation
// ============================================================

#[test]
fn category_saturates_at_five_matches() {
    // all five toxicity triggers present — score caps at exactly 1.0
    let scores = KeywordScorer.score("hate stupid idiot dumb ugly");
    assert_close(scores.toxicity, 1.0);

    // four triggers — just below saturation
    let scores = KeywordScorer.score("hate stupid dumb ugly");
    assert_close(scores.toxicity, 0.8);
}

#[test]
fn obscene_is_seventy_percent_of_toxicity() {
    for text in ["", "stupid", "stupid dumb", "hate stupid idiot dumb ugly"] {
        let scores = KeywordScorer.score(text);
        assert_close(scores.obscene, scores.toxicity * 0.7);
    }
}

#[test]
fn identity_attack_is_eighty_percent_of_insult() {
    for text in ["", "moron", "moron loser", "idiot moron retard loser"] {
        let scores = KeywordScorer.score(text);
        assert_close(scores.identity_attack, scores.insult * 0.8);
    }
}

#[test]
fn sexual_explicit_is_constant_zero() {
    for text in ["", "hate kill murder", "idiot moron kill you hurt you"] {
        assert_eq!(KeywordScorer.score(text).sexual_explicit, 0.0);
    }
}

// ============================================================
// Range invariant
// ============================================================

#[test]
fn scores_bounded_for_arbitrary_inputs() {
    let inputs = [
        "".to_string(),
        "perfectly pleasant message".to_string(),
        "hate hate hate hate hate".to_string(),
        "hate stupid idiot dumb ugly kill die death murder moron retard loser \
         kill you hurt you destroy you"
            .repeat(50),
        "ÅÄÖ ünïcödé ẗëẍẗ 漢字".to_string(),
    ];

    for text in &inputs {
        let scores = KeywordScorer.score(text);
        for category in Category::ALL {
            let s = scores.get(category);
            assert!(
                (0.0..=1.0).contains(&s),
                "{category} = {s} out of range for input {:?}",
                sift::output::truncate_chars(text, 40)
            );
        }
    }
}
