use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".blogsmith/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load without enforcing the API-key precondition. The interactive form
    /// checks it itself via `validate` so it can render an inline error
    /// instead of aborting.
    pub fn load_unvalidated() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;
        builder.build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let raw: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        Ok(raw.apply(builder))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        let builder = builder.with_llm(|llm| {
            if let Some(provider) = self.llm.provider.clone() {
                if let Ok(parsed) = provider.parse::<super::types::LlmProvider>() {
                    if llm.provider != parsed {
                        llm.provider = parsed;
                        llm.base_url = parsed.default_base_url().to_string();
                    }
                }
            }
            if let Some(api_key) = self.llm.api_key.clone() {
                llm.api_key = api_key;
            }
            if let Some(secondary) = self.llm.secondary_api_key.clone() {
                llm.secondary_api_key = Some(secondary);
            }
            if let Some(timeout) = self.llm.timeout_secs {
                llm.timeout_secs = timeout;
            }
            if let Some(base_url) = self.llm.base_url.clone() {
                llm.base_url = base_url;
            }
            if let Some(user_agent) = self.llm.user_agent.clone() {
                llm.user_agent = user_agent;
            }
        });

        let builder = if let Some(models) = self.models {
            builder.with_models(|settings| {
                if let Some(model) = models.model.clone() {
                    settings.model = model;
                }
                if let Some(max_tokens) = models.max_tokens {
                    settings.max_tokens = max_tokens;
                }
                if let Some(temperature) = models.temperature {
                    settings.temperature = temperature;
                }
            })
        } else {
            builder
        };

        if let Some(pipeline) = self.pipeline {
            builder.with_pipeline(|settings| {
                if let Some(path) = pipeline.document_path.clone() {
                    settings.document_path = path;
                }
                if let Some(enabled) = pipeline.researcher_document_search {
                    settings.researcher_document_search = enabled;
                }
            })
        } else {
            builder
        }
    }
}
