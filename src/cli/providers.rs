use anyhow::Result;
use std::io::{self, Write};

use crate::config::LlmProvider;

const PROVIDER_CHOICES: &[LlmProvider] = &[LlmProvider::OpenAi, LlmProvider::Groq];

fn provider_description(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => "OpenAI hosted chat models",
        LlmProvider::Groq => "Groq OpenAI-compatible inference",
    }
}

pub(crate) fn prompt_provider_interactive(current: Option<LlmProvider>) -> Result<LlmProvider> {
    println!("\n🌐 Available Providers:\n");
    for (idx, provider) in PROVIDER_CHOICES.iter().enumerate() {
        let marker = if Some(*provider) == current {
            " (current)"
        } else {
            ""
        };
        println!(
            "  {}. {}{} - {}",
            idx + 1,
            provider.display_name(),
            marker,
            provider_description(*provider)
        );
    }

    loop {
        print!("\nSelect provider (1-{}): ", PROVIDER_CHOICES.len());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();

        match trimmed.parse::<usize>() {
            Ok(num) if num >= 1 && num <= PROVIDER_CHOICES.len() => {
                return Ok(PROVIDER_CHOICES[num - 1]);
            }
            _ => println!(
                "❌ Please enter a number between 1 and {}.",
                PROVIDER_CHOICES.len()
            ),
        }
    }
}

pub(crate) fn prompt_api_key_for_provider(
    provider: LlmProvider,
    existing: Option<&str>,
) -> Result<String> {
    loop {
        print!(
            "🔑 Enter your {} API key{}: ",
            provider.display_name(),
            existing
                .map(|_| " (leave blank to keep current)")
                .unwrap_or("")
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let key = input.trim();

        if key.is_empty() {
            if let Some(existing) = existing {
                return Ok(existing.to_string());
            }
            println!("❌ API key cannot be empty. Please try again.");
            continue;
        }

        if provider == LlmProvider::OpenAi && !key.starts_with("sk-") {
            println!("⚠️  OpenAI API keys typically start with 'sk-'. Are you sure this is correct?");
            print!("Continue anyway? [y/N]: ");
            io::stdout().flush()?;

            let mut confirm = String::new();
            io::stdin().read_line(&mut confirm)?;
            if confirm.trim().to_lowercase() != "y" {
                continue;
            }
        }

        return Ok(key.to_string());
    }
}
