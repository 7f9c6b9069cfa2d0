use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use crate::agents::{AgentProfile, ToolKind};
use crate::client::LlmClient;
use crate::tools::ToolSet;

use super::context::{PipelineContext, PipelineRun};
use super::stages::{StageKind, StageSpec};
use super::vars::{TemplateVars, has_unrendered_placeholders};

/// Seam between the runner and the LLM provider, so tests can script
/// completions without a network.
#[async_trait]
pub trait CompletionAdapter: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl CompletionAdapter for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        LlmClient::complete(self, system, user).await
    }
}

/// Executes the stages strictly sequentially, one blocking LLM call per
/// stage. Prior outputs are threaded forward explicitly through each stage's
/// declared dependencies; there is no retry and no partial-result recovery.
pub struct PipelineRunner {
    stages: Vec<StageSpec>,
}

impl PipelineRunner {
    pub fn new(stages: Vec<StageSpec>) -> Self {
        Self { stages }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub async fn run(
        &self,
        completion: &dyn CompletionAdapter,
        tools: &ToolSet,
        vars: TemplateVars,
    ) -> Result<PipelineRun> {
        let mut context = PipelineContext::new(vars);

        for (index, stage) in self.stages.iter().enumerate() {
            context.record_stage_start(stage.kind);
            match self.execute_stage(index, stage, &mut context, completion, tools).await {
                Ok(text) => {
                    context.record_output(index, stage.kind, text);
                    context.record_stage_end(stage.kind);
                }
                Err(error) => {
                    context.record_stage_failure(stage.kind, error.to_string());
                    return Err(error.context(format!("Stage '{}' failed", stage.kind)));
                }
            }
        }

        Ok(context.into_run())
    }

    async fn execute_stage(
        &self,
        index: usize,
        stage: &StageSpec,
        context: &mut PipelineContext,
        completion: &dyn CompletionAdapter,
        tools: &ToolSet,
    ) -> Result<String> {
        let system = render_checked(&context.vars, &system_prompt(&stage.agent))?;
        let description = render_checked(&context.vars, &stage.description)?;

        let mut sections = vec![description];

        for &dep in &stage.depends_on {
            let output = context.output(dep).ok_or_else(|| {
                anyhow!("Stage '{}' depends on stage {} which produced no output", stage.kind, dep)
            })?;
            sections.push(format!(
                "Output of the {} stage:\n{}",
                output.kind, output.text
            ));
        }

        if stage.agent.has_tool(ToolKind::WebSearch) {
            let query = web_query(&context.vars);
            context.record_tool_query(stage.kind, ToolKind::WebSearch, query.clone());
            let findings = tools
                .web
                .search(&query)
                .await
                .context("Web search capability failed")?;
            sections.push(format!("Web search findings for \"{query}\":\n{findings}"));
        }

        if stage.agent.has_tool(ToolKind::DocumentSearch) {
            let document = tools.document.as_ref().ok_or_else(|| {
                anyhow!(
                    "Stage '{}' requires the document-search capability but none was provided",
                    stage.kind
                )
            })?;
            let query = document_query(stage.kind, &context.vars);
            context.record_tool_query(stage.kind, ToolKind::DocumentSearch, query.clone());
            let excerpts = document
                .search(&query)
                .await
                .context("Document search capability failed")?;
            sections.push(format!("Excerpts from the uploaded document:\n{excerpts}"));
        }

        sections.push(format!("Expected output: {}", stage.expected_output));

        let user = sections.join("\n\n");
        completion
            .complete(&system, &user)
            .await
            .with_context(|| format!("LLM call for stage {} ('{}') failed", index + 1, stage.kind))
    }
}

fn system_prompt(agent: &AgentProfile) -> String {
    format!(
        "You are the {role}.\n\nGoal: {goal}\n\nBackstory: {backstory}",
        role = agent.role,
        goal = agent.goal,
        backstory = agent.backstory
    )
}

fn render_checked(vars: &TemplateVars, template: &str) -> Result<String> {
    let rendered = vars.render(template);
    if has_unrendered_placeholders(&rendered) {
        return Err(anyhow!("Template placeholder survived substitution: {rendered}"));
    }
    Ok(rendered)
}

fn web_query(vars: &TemplateVars) -> String {
    format!(
        "{} ({}) products, services, history, customer testimonials; statistics about {}",
        vars.company, vars.location, vars.topic
    )
}

fn document_query(stage: StageKind, vars: &TemplateVars) -> String {
    match stage {
        StageKind::Optimize => format!(
            "statistics and quotations about {} and {}",
            vars.company, vars.topic
        ),
        _ => format!(
            "{} products services history customer testimonials {}",
            vars.company, vars.topic
        ),
    }
}
