use anyhow::Result;

use crate::config::Config;

use super::args::Cli;
use super::util::mask_api_key;

pub(crate) async fn handle_config_direct(args: &Cli, config: &mut Config) -> Result<()> {
    let mut existing_config = if Config::config_path()?.exists() {
        Config::load_unvalidated()?
    } else {
        config.clone()
    };

    if let Some(ref provider) = args.provider {
        let parsed = provider.parse::<crate::config::LlmProvider>()?;
        if existing_config.llm.provider != parsed {
            existing_config.llm.provider = parsed;
            existing_config.llm.base_url = parsed.default_base_url().to_string();
        }
    }

    if let Some(ref api_key) = args.api_key {
        existing_config.llm.api_key = api_key.clone();
    }

    if let Some(ref groq_key) = args.groq_api_key {
        existing_config.llm.secondary_api_key = Some(groq_key.clone());
    }

    if let Some(timeout) = args.timeout {
        existing_config.llm.timeout_secs = timeout;
    }

    if let Some(max_tokens) = args.max_tokens {
        existing_config.models.max_tokens = max_tokens;
    }

    if let Some(ref model) = args.model {
        existing_config.models.model = model.clone();
    }

    existing_config.save()?;
    *config = existing_config.clone();

    println!(
        "✅ Configuration saved to {}",
        Config::config_path()?.display()
    );
    println!("📋 Current configuration:");
    println!(
        "   Provider: {}",
        existing_config.llm.provider.display_name()
    );
    println!("   API Key: {}", mask_api_key(&existing_config.llm.api_key));
    println!(
        "   Groq Key: {}",
        existing_config
            .llm
            .secondary_api_key
            .as_deref()
            .map(mask_api_key)
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("   Timeout: {}s", existing_config.llm.timeout_secs);
    println!("   Model: {}", existing_config.models.model);
    println!("   Max Tokens: {}", existing_config.models.max_tokens);

    Ok(())
}
