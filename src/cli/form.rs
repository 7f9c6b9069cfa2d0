use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::LlmClient;
use crate::config::Config;
use crate::pipeline::{OptimizationChoice, PipelineRunner, TemplateVars, build_pipeline};
use crate::tools::{DocumentIndex, DuckDuckGoSearch, ToolSet};

use super::util::{prompt_string, prompt_string_with_default};

const DEFAULT_COMPANY: &str = "theDevMasters";
const DEFAULT_LOCATION: &str = "Irvine, California";
const DEFAULT_TOPIC: &str = "Artificial Intelligence in Real Estate, Fashion, and Healthcare";

/// The interactive form: collects the run inputs, enforces the credential and
/// document preconditions, ingests the PDF, runs the pipeline, and renders
/// the joined stage outputs.
pub(crate) async fn run(config: Config) -> Result<()> {
    println!("{}", "📝 Multi-Agent Blogpost Generator".bold());
    println!();

    if config.llm.api_key.trim().is_empty() {
        println!(
            "{}",
            format!(
                "⚠️  No {} API key configured. Set {} or run 'blogsmith --setup'.",
                config.llm.provider.display_name(),
                config.llm.provider.api_key_env_var()
            )
            .yellow()
        );
    } else {
        println!(
            "{}",
            format!("✅ {} API key configured.", config.llm.provider.display_name()).green()
        );
    }
    println!();

    let company = prompt_string_with_default("🏢 Company Name", DEFAULT_COMPANY)?;
    let location = prompt_string_with_default("📍 Company Location", DEFAULT_LOCATION)?;
    let topic = prompt_string_with_default("💡 Blog Topic", DEFAULT_TOPIC)?;
    let document = prompt_string("📄 Path to a PDF for research")?;
    let choice_raw = prompt_string_with_default("🔍 Optimize Blog for [SEO/GEO]", "SEO")?;
    let choice = OptimizationChoice::parse(&choice_raw);

    // Hard preconditions: both must hold before any external call is made.
    if let Err(error) = config.validate() {
        println!("{}", format!("❌ {error}").red());
        return Ok(());
    }

    let source_path = PathBuf::from(document.trim());
    if document.trim().is_empty() || !source_path.is_file() {
        println!(
            "{}",
            "❌ Please provide an existing PDF file for the research!".red()
        );
        return Ok(());
    }

    // Persist the upload to the fixed path, overwriting any previous one.
    persist_upload(&source_path, &config.pipeline.document_path)?;

    let index = DocumentIndex::open(&config.pipeline.document_path)?;
    println!(
        "{}",
        format!(
            "✅ PDF uploaded and indexed ({} sections).",
            index.chunk_count()
        )
        .green()
    );

    let web = DuckDuckGoSearch::new(config.llm.timeout_secs, &config.llm.user_agent)?;
    let tools = ToolSet::new(Arc::new(web), Some(Arc::new(index)));

    let stages = build_pipeline(choice, true, config.pipeline.researcher_document_search)?;
    let runner = PipelineRunner::new(stages);
    let client = LlmClient::new(
        &config.llm,
        &config.models.model,
        config.models.max_tokens,
        config.models.temperature,
    )?;

    println!(
        "\n⏳ Generating blog post ({} optimization, {} stages). This may take a while...",
        choice,
        runner.stage_count()
    );

    let vars = TemplateVars::new(company, location, topic);
    let run = runner.run(&client, &tools, vars).await?;

    println!("{}", "\n✅ Blog post generated successfully!".green());
    println!("\n{}", "=== Generated Blog Post ===".bold());
    println!("{}", run.report());

    Ok(())
}

/// Copies the upload to the fixed document path. Paths are resolved before
/// copying: two spellings of the same file must not truncate it, since
/// `fs::copy` opens the destination with truncate first.
fn persist_upload(source: &Path, destination: &Path) -> Result<()> {
    let resolved_source = fs::canonicalize(source)
        .with_context(|| format!("Failed to resolve {}", source.display()))?;
    if let Ok(resolved_destination) = fs::canonicalize(destination) {
        if resolved_source == resolved_destination {
            return Ok(());
        }
    }

    fs::copy(source, destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_upload_keeps_same_file_intact_across_spellings() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("uploaded_document.pdf");
        std::fs::write(&destination, b"pdf bytes").unwrap();

        // Same file reached through a dotted spelling.
        let spelled = dir.path().join(".").join("uploaded_document.pdf");
        assert_ne!(spelled, destination);

        persist_upload(&spelled, &destination).unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), b"pdf bytes");
    }

    #[test]
    fn persist_upload_copies_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("brochure.pdf");
        let destination = dir.path().join("uploaded_document.pdf");
        std::fs::write(&source, b"fresh upload").unwrap();
        std::fs::write(&destination, b"previous upload").unwrap();

        persist_upload(&source, &destination).unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), b"fresh upload");
    }

    #[test]
    fn persist_upload_errors_for_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.pdf");
        let destination = dir.path().join("uploaded_document.pdf");

        let err = persist_upload(&missing, &destination).unwrap_err();
        assert!(err.to_string().contains("Failed to resolve"));
    }
}
