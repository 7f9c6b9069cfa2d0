use anyhow::Result;
use std::io::{self, Write};

use crate::config::Config;

use super::providers::{prompt_api_key_for_provider, prompt_provider_interactive};
use super::util::{mask_api_key, prompt_string_with_default, prompt_timeout, prompt_u32_with_default};

pub(crate) async fn run_setup() -> Result<()> {
    println!("🚀 Welcome to blogsmith Setup!");
    println!("Let's configure your AI provider.\n");

    let provider = prompt_provider_interactive(None)?;
    let api_key = prompt_api_key_for_provider(provider, None)?;
    let secondary = prompt_optional_groq_key()?;
    let timeout = prompt_timeout(120)?;

    let mut config = Config::builder().build()?;
    config.llm.provider = provider;
    config.llm.base_url = provider.default_base_url().to_string();
    config.llm.api_key = api_key;
    config.llm.secondary_api_key = secondary;
    config.llm.timeout_secs = timeout;

    let default_model = config.models.model.clone();
    let default_max_tokens = config.models.max_tokens;
    config.models.model = prompt_string_with_default("🤖 Enter chat model ID", &default_model)?;
    config.models.max_tokens =
        prompt_u32_with_default("🔢 Enter max tokens per stage completion", default_max_tokens)?;

    config.validate()?;
    config.save()?;

    println!(
        "\n✅ Configuration saved to {}",
        Config::config_path()?.display()
    );
    println!("📋 Your configuration:");
    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!(
        "   Groq Key: {}",
        config
            .llm
            .secondary_api_key
            .as_deref()
            .map(mask_api_key)
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("   Base URL: {}", config.llm.base_url);
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Model: {}", config.models.model);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("\n🎉 Setup complete! Run 'blogsmith' to generate a blog post.\n");

    Ok(())
}

fn prompt_optional_groq_key() -> Result<Option<String>> {
    print!("🔑 Enter your Groq API key (optional, press Enter to skip): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let key = input.trim();

    if key.is_empty() {
        Ok(None)
    } else {
        Ok(Some(key.to_string()))
    }
}
