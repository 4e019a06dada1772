//! Analyze one query with an orchestration project and print the prediction.
//!
//! The orchestration project's top intent is expected to route to a
//! downstream project (for example LUIS); its raw response is printed too.
//!
//! Environment:
//!   AZURE_CONVERSATIONS_ENDPOINT          endpoint of the language resource
//!   AZURE_CONVERSATIONS_KEY               subscription key
//!   AZURE_CONVERSATIONS_WORKFLOW_PROJECT  orchestration project name
//!   AZURE_CONVERSATIONS_DEPLOYMENT        deployment name (default: production)
//!   RUST_LOG                              log filter (logs go to stderr)
//!
//! Usage:
//!   cargo run --bin analyze-orchestration

use conversation_analysis::{AnalysisRequest, ClientConfig, ConversationAnalysisClient, Report};
use tracing_subscriber::EnvFilter;

const QUERY: &str = "book me a flight ticket to Bali";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> conversation_analysis::Result<()> {
    let config = ClientConfig::from_env()?;
    let client = ConversationAnalysisClient::from_config(&config)?;

    let request = AnalysisRequest::new(QUERY, &config.project_name, &config.deployment_name)?;
    let result = client.analyze(&request).await?;

    print!("{}", Report::new(&result));
    Ok(())
}
