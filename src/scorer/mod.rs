// Toxicity scoring — trait-based abstraction over two scoring paths.
//
// The ToxicityScorer trait defines the interface. OnnxScorer implements it
// with a local sequence-classification model; KeywordScorer is the rule-based
// path used when the model isn't available (or when explicitly configured).
// Which path runs is decided once at startup by select_scorer — there is no
// silent per-request fallback.

pub mod download;
pub mod keyword;
pub mod onnx;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, ScorerBackend};

/// The seven toxicity sub-categories, in the order the ONNX model
/// emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Toxicity,
    SevereToxicity,
    Obscene,
    IdentityAttack,
    Insult,
    Threat,
    SexualExplicit,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Toxicity,
        Category::SevereToxicity,
        Category::Obscene,
        Category::IdentityAttack,
        Category::Insult,
        Category::Threat,
        Category::SexualExplicit,
    ];

    /// The wire name for this category (JSON key in the /predict response).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Toxicity => "toxicity",
            Category::SevereToxicity => "severe_toxicity",
            Category::Obscene => "obscene",
            Category::IdentityAttack => "identity_attack",
            Category::Insult => "insult",
            Category::Threat => "threat",
            Category::SexualExplicit => "sexual_explicit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category scores for a single piece of text, all in [0.0, 1.0].
///
/// Serializes with the category wire names as keys, so it can be flattened
/// straight into the /predict response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryScores {
    pub toxicity: f64,
    pub severe_toxicity: f64,
    pub obscene: f64,
    pub identity_attack: f64,
    pub insult: f64,
    pub threat: f64,
    pub sexual_explicit: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Toxicity => self.toxicity,
            Category::SevereToxicity => self.severe_toxicity,
            Category::Obscene => self.obscene,
            Category::IdentityAttack => self.identity_attack,
            Category::Insult => self.insult,
            Category::Threat => self.threat,
            Category::SexualExplicit => self.sexual_explicit,
        }
    }
}

/// Trait for scoring text toxicity. Async because the model path offloads
/// inference to a blocking thread; the keyword path resolves immediately.
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Score a single text across all seven categories.
    async fn score_text(&self, text: &str) -> Result<CategoryScores>;
}

/// Which scoring path the process is running with. Decided at startup,
/// reported by /health as `model_loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerMode {
    Model,
    Keyword,
}

impl ScorerMode {
    pub fn model_loaded(&self) -> bool {
        matches!(self, ScorerMode::Model)
    }
}

/// Why the ONNX model couldn't be used. Surfaced at startup so the
/// operator sees exactly what's missing instead of a silent fallback.
#[derive(Debug)]
pub enum ModelUnavailable {
    /// model_quantized.onnx or tokenizer.json not found in the model dir
    FilesMissing(PathBuf),
    /// Files exist but the session or tokenizer failed to load
    LoadFailed(String),
}

impl fmt::Display for ModelUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelUnavailable::FilesMissing(dir) => write!(
                f,
                "model files not found in {} (run `sift download-model`)",
                dir.display()
            ),
            ModelUnavailable::LoadFailed(e) => write!(f, "model failed to load: {e}"),
        }
    }
}

/// Try to load the ONNX scorer, returning a typed reason on failure.
fn try_load_model(config: &Config) -> Result<onnx::OnnxScorer, ModelUnavailable> {
    if !download::model_files_present(&config.model_dir) {
        return Err(ModelUnavailable::FilesMissing(config.model_dir.clone()));
    }
    onnx::OnnxScorer::load(&config.model_dir)
        .map_err(|e| ModelUnavailable::LoadFailed(format!("{e:#}")))
}

/// Select the scoring path for the process lifetime.
///
/// Backend `onnx` requires the model and fails hard if it can't load.
/// Backend `keyword` never touches the model. Backend `auto` prefers the
/// model and falls back to keyword scoring, logging the typed reason.
pub fn select_scorer(config: &Config) -> Result<(Arc<dyn ToxicityScorer>, ScorerMode)> {
    match config.scorer_backend {
        ScorerBackend::Onnx => {
            let scorer = try_load_model(config)
                .map_err(|reason| anyhow::anyhow!("SIFT_SCORER=onnx but {reason}"))?;
            info!("Using ONNX toxicity model from {}", config.model_dir.display());
            Ok((Arc::new(scorer), ScorerMode::Model))
        }
        ScorerBackend::Keyword => {
            info!("Using keyword toxicity scorer (SIFT_SCORER=keyword)");
            Ok((Arc::new(keyword::KeywordScorer), ScorerMode::Keyword))
        }
        ScorerBackend::Auto => match try_load_model(config) {
            Ok(scorer) => {
                info!("Using ONNX toxicity model from {}", config.model_dir.display());
                Ok((Arc::new(scorer), ScorerMode::Model))
            }
            Err(reason) => {
                warn!(%reason, "ONNX model unavailable, using keyword scorer");
                Ok((Arc::new(keyword::KeywordScorer), ScorerMode::Keyword))
            }
        },
    }
}
