use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use sift::config::{Config, ScorerBackend};
use sift::scorer;
use sift::sentiment::SentimentAnalyzer;
use sift::web::{run_server, AppState};

/// sift: toxicity classification service.
///
/// Classifies text into seven toxicity sub-categories plus a sentiment
/// score, using a local ONNX model with a keyword-based fallback.
#[derive(Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP classification API
    Serve {
        /// Port to listen on (overrides SIFT_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides SIFT_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score a single text in the terminal
    Score {
        /// The text to classify
        text: String,
    },

    /// Download the ONNX toxicity model (~126 MB)
    DownloadModel,

    /// Show configured backend and model availability
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sift=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let (scorer, mode) = scorer::select_scorer(&config)?;

            let state = AppState {
                scorer,
                sentiment: Arc::new(SentimentAnalyzer::new()),
                mode,
            };

            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let port = port.unwrap_or(config.port);
            run_server(state, &bind, port).await?;
        }

        Commands::Score { text } => {
            let config = Config::load()?;
            let (scorer, mode) = scorer::select_scorer(&config)?;

            let scores = scorer.score_text(&text).await?;
            let sentiment = SentimentAnalyzer::new().compound_score(&text);

            sift::output::display_scores(&text, &scores, sentiment);
            if !mode.model_loaded() {
                println!(
                    "\n{}",
                    "Scored with the keyword fallback. Run `sift download-model` for model-based scores."
                        .dimmed()
                );
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX toxicity model...");
            println!("  Destination: {}", model_dir.display());

            scorer::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `sift serve` or `sift score <text>`.");
        }

        Commands::Status => {
            let config = Config::load()?;

            let backend = match config.scorer_backend {
                ScorerBackend::Auto => "auto",
                ScorerBackend::Onnx => "onnx",
                ScorerBackend::Keyword => "keyword",
            };
            println!("Scorer backend: {backend}");
            println!("Model directory: {}", config.model_dir.display());

            if scorer::download::model_files_present(&config.model_dir) {
                println!("Model files: {}", "present".bold());
            } else {
                println!("Model files: not downloaded");
                println!("  Run `sift download-model` to fetch them");
            }
        }
    }

    Ok(())
}
