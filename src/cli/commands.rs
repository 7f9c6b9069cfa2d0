use anyhow::Result;

use crate::config::Config;

use super::args::Cli;
use super::config_cmd;
use super::form;
use super::setup;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    // Setup needs no existing config
    if cli.setup {
        return setup::run_setup().await;
    }

    let mut config = Config::load_unvalidated()?;

    if cli.config
        || cli.api_key.is_some()
        || cli.groq_api_key.is_some()
        || cli.provider.is_some()
        || cli.model.is_some()
        || cli.timeout.is_some()
        || cli.max_tokens.is_some()
    {
        return config_cmd::handle_config_direct(&cli, &mut config).await;
    }

    form::run(config).await
}
