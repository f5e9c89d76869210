use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which toxicity scoring backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerBackend {
    /// Prefer the ONNX model, fall back to keyword scoring if unavailable (default)
    Auto,
    /// Local ONNX model only — startup fails if the model can't load
    Onnx,
    /// Keyword scorer only — never touches the model
    Keyword,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. All values
/// are read once and held immutably for the process lifetime.
pub struct Config {
    /// Which toxicity scorer to use (SIFT_SCORER: auto | onnx | keyword)
    pub scorer_backend: ScorerBackend,
    /// Directory containing the ONNX model files (SIFT_MODEL_DIR)
    pub model_dir: PathBuf,
    /// Port the HTTP server listens on (SIFT_PORT, default 8000)
    pub port: u16,
    /// Address the HTTP server binds to (SIFT_BIND, default 0.0.0.0)
    pub bind: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let scorer_backend = parse_backend(env::var("SIFT_SCORER").ok().as_deref())?;
        let port = parse_port(env::var("SIFT_PORT").ok().as_deref())?;

        let model_dir = env::var("SIFT_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::scorer::download::default_model_dir());

        Ok(Self {
            scorer_backend,
            model_dir,
            port,
            bind: env::var("SIFT_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
        })
    }
}

/// Parse the SIFT_SCORER value. Unset defaults to auto.
fn parse_backend(raw: Option<&str>) -> Result<ScorerBackend> {
    match raw {
        Some("onnx") => Ok(ScorerBackend::Onnx),
        Some("keyword") => Ok(ScorerBackend::Keyword),
        Some("auto") | None => Ok(ScorerBackend::Auto),
        Some(other) => anyhow::bail!(
            "Invalid SIFT_SCORER value: {other:?} (expected auto, onnx, or keyword)"
        ),
    }
}

/// Parse the SIFT_PORT value. Unset defaults to 8000.
fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid SIFT_PORT value: {raw:?}")),
        None => Ok(8000),
    }
}
