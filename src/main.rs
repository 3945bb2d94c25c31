//! `coop-mcda` - rank cooperative branches from a JSON export.
//!
//! Reads branch records, runs the TOPSIS analysis and prints the result as
//! JSON on stdout. Logs go to stderr. Exits with status 1 when the input
//! cannot be read or the analysis fails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use secrecy::ExposeSecret;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use coop_mcda::adapters::{
    JsonFileBranchSource, LlmRecommendationWriter, OpenAIConfig, OpenAIProvider,
};
use coop_mcda::application::{AnalyzeBranchesHandler, CriteriaStore};
use coop_mcda::config::{AppConfig, FeatureFlags};
use coop_mcda::ports::ReportContext;

/// Ranks cooperative branches by performance using TOPSIS.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// (file path) JSON array of branch records, or an object with a `branches` array.
    #[clap(value_parser)]
    input: PathBuf,

    /// Reporting period label passed to generated recommendations, e.g. "Q3 2024".
    #[clap(long, value_parser)]
    period: Option<String>,

    /// Free-form analyst notes passed to generated recommendations.
    #[clap(long, value_parser)]
    notes: Option<String>,

    /// Print compact JSON instead of pretty-printed JSON.
    #[clap(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("coop-mcda: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.features);

    if let Err(err) = config.validate() {
        error!(error = %err, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let criteria = match config.mcda.criteria_config() {
        Ok(criteria) => criteria,
        Err(err) => {
            error!(error = %err, "Invalid criterion weights");
            return ExitCode::FAILURE;
        }
    };

    let handler = build_handler(&config, CriteriaStore::new(criteria));
    let source = JsonFileBranchSource::new(&args.input);
    let context = ReportContext {
        period: args.period,
        notes: args.notes,
    };

    let result = handler.handle_source(&source, context).await;

    let output = if args.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(err) => {
            error!(error = %err, "Failed to serialize analysis result");
            return ExitCode::FAILURE;
        }
    }

    if result.success {
        info!(branches = result.ranked_branches.len(), "Analysis written");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initializes the global subscriber: `RUST_LOG` filter, stderr output.
fn init_tracing(features: &FeatureFlags) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coop_mcda=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if features.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_handler(config: &AppConfig, store: CriteriaStore) -> AnalyzeBranchesHandler {
    let handler = AnalyzeBranchesHandler::new(store);

    if !config.llm_recommendations_enabled() {
        return handler;
    }

    let Some(api_key) = config.ai.openai_api_key.as_ref() else {
        return handler;
    };

    let openai = OpenAIConfig::new(api_key.expose_secret().clone())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);

    match OpenAIProvider::new(openai) {
        Ok(provider) => {
            info!(model = %config.ai.model, "LLM recommendations enabled");
            handler.with_writer(
                Arc::new(LlmRecommendationWriter::new(Arc::new(provider))),
                config.mcda.recommendation_timeout(),
            )
        }
        Err(err) => {
            warn!(error = %err, "OpenAI provider unavailable, using rule-based recommendations");
            handler
        }
    }
}
