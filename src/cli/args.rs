use anyhow::Result;
use clap::Parser;

use super::commands;

/// Entry point for the `blogsmith` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "blogsmith",
    about = "Multi-agent marketing blog post generator",
    version,
    long_about = None
)]
pub struct Cli {
    /// Interactive first-time setup
    #[arg(long = "setup")]
    pub setup: bool,

    /// Show or update configuration
    #[arg(long)]
    pub config: bool,

    /// Set the primary API key for the configured provider
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the optional secondary (Groq) API key
    #[arg(long)]
    pub groq_api_key: Option<String>,

    /// Select the LLM provider (openai or groq)
    #[arg(long)]
    pub provider: Option<String>,

    /// Set the chat model
    #[arg(long)]
    pub model: Option<String>,

    /// Set timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set max tokens per stage completion
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
