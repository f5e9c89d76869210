// Local ONNX toxicity scorer — the model path.
//
// Runs Detoxify's unbiased-toxic-roberta entirely on the local CPU: no API
// calls, no rate limits, no network dependency at request time. The model
// emits seven logits whose order matches Category::ALL exactly, so mapping
// to CategoryScores is positional.
//
// Model: protectai/unbiased-toxic-roberta-onnx (quantized, ~126MB)

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::{Category, CategoryScores, ToxicityScorer};
use crate::output::truncate_chars;

pub const MODEL_FILE: &str = "model_quantized.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// RoBERTa's position embedding limit. Longer inputs must be truncated at
/// tokenization time or the forward pass rejects them.
const MAX_SEQUENCE_LENGTH: usize = 512;

/// ONNX-based toxicity scorer. Holds the model session and tokenizer behind
/// Arc<Mutex> so inference can be offloaded to spawn_blocking without
/// blocking the async runtime.
pub struct OnnxScorer {
    // Arc+Mutex because:
    // 1. ort::Session::run takes &mut self, so we need interior mutability
    // 2. spawn_blocking requires 'static, so we need Arc for shared ownership
    // 3. We need Send+Sync for the ToxicityScorer trait
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxScorer {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in
    /// `model_dir`. Call `download::download_model()` first if they don't.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        configure_truncation(&mut tokenizer)?;

        debug!("Loaded ONNX toxicity model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl ToxicityScorer for OnnxScorer {
    /// Tokenize, run one forward pass, apply sigmoid to the seven logits,
    /// and map them positionally to CategoryScores.
    ///
    /// The CPU-bound tokenization and inference are offloaded to
    /// spawn_blocking so they don't block the tokio runtime.
    async fn score_text(&self, text: &str) -> Result<CategoryScores> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> =
                encoding.get_attention_mask().iter().map(|&m| m as i64).collect();

            let shape = [1i64, input_ids.len() as i64];

            let input_ids_tensor = Tensor::from_array((shape, input_ids))
                .context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                    .context("ONNX inference failed")?;

                // Output shape: [1, 7] — raw logits (pre-sigmoid)
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;

                data.to_vec()
            };

            if logits.len() < Category::ALL.len() {
                anyhow::bail!(
                    "Model returned {} logits, expected {}",
                    logits.len(),
                    Category::ALL.len()
                );
            }

            let probs: Vec<f64> = logits
                .iter()
                .take(Category::ALL.len())
                .map(|&logit| sigmoid(logit as f64))
                .collect();
            let scores = scores_from_model_output(&probs);

            debug!(
                toxicity = scores.toxicity,
                severe_toxicity = scores.severe_toxicity,
                threat = scores.threat,
                text_preview = %truncate_chars(&text, 50),
                "ONNX scored text"
            );

            Ok(scores)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Cap tokenized sequences at the model's position limit. The shipped
/// tokenizer.json carries no truncation config, so arbitrarily long text
/// would otherwise overflow the position embeddings and fail inference.
fn configure_truncation(tokenizer: &mut Tokenizer) -> Result<()> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQUENCE_LENGTH,
            ..Default::default()
        }))
        .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;
    Ok(())
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Map the model's seven sigmoid outputs (in Category::ALL order) to
/// CategoryScores.
fn scores_from_model_output(probs: &[f64]) -> CategoryScores {
    CategoryScores {
        toxicity: probs[0],
        severe_toxicity: probs[1],
        obscene: probs[2],
        identity_attack: probs[3],
        insult: probs[4],
        threat: probs[5],
        sexual_explicit: probs[6],
    }
}
