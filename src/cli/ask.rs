//! Ask command - one-shot question answering from the terminal

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Args)]
pub struct AskArgs {
    /// The question to answer
    pub query: String,
}

/// Answer a single question and print the result to stdout
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;
    let answer = state.pipeline.answer(&args.query).await;

    println!("{answer}");

    Ok(())
}
