// Lexicon sentiment scoring via VADER.
//
// Every /predict response carries an overall sentiment_score alongside the
// toxicity categories. VADER's compound score is already normalized to
// [-1.0, 1.0], so we expose it directly. The analyzer's lexicon is loaded
// once and never mutated — safe to share across requests.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Wraps the VADER analyzer behind a small API: text in, compound score out.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// VADER compound score in [-1.0, 1.0]. Empty or neutral text scores 0.0.
    pub fn compound_score(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
