use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::agents::ToolKind;
use crate::tools::{DocumentSearch, ToolSet, WebSearch};

use super::context::PipelineEvent;
use super::runner::{CompletionAdapter, PipelineRunner};
use super::stages::{OptimizationChoice, StageKind, build_pipeline};
use super::vars::{TemplateVars, has_unrendered_placeholders};

fn sample_vars() -> TemplateVars {
    TemplateVars::new("Acme", "Springfield", "Cloud Security")
}

#[derive(Default)]
struct ScriptedCompletion {
    calls: Mutex<Vec<(String, String)>>,
    counter: AtomicUsize,
    fail_at: Option<usize>,
}

impl ScriptedCompletion {
    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    fn recorded(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionAdapter for ScriptedCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        if self.fail_at == Some(index) {
            return Err(anyhow!("scripted completion failure"));
        }
        Ok(format!("stage-{index}-output"))
    }
}

#[derive(Default)]
struct StubWebSearch {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl WebSearch for StubWebSearch {
    async fn search(&self, query: &str) -> Result<String> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(format!("web snippets for: {query}"))
    }
}

#[derive(Default)]
struct StubDocumentSearch {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl DocumentSearch for StubDocumentSearch {
    async fn search(&self, query: &str) -> Result<String> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(format!("document excerpts for: {query}"))
    }
}

fn toolset_with_document() -> (ToolSet, Arc<StubWebSearch>, Arc<StubDocumentSearch>) {
    let web = Arc::new(StubWebSearch::default());
    let document = Arc::new(StubDocumentSearch::default());
    let tools = ToolSet::new(web.clone(), Some(document.clone()));
    (tools, web, document)
}

#[tokio::test]
async fn seo_run_produces_six_ordered_outputs() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);
    assert_eq!(runner.stage_count(), 6);

    let completion = ScriptedCompletion::default();
    let (tools, _web, _document) = toolset_with_document();

    let run = runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    assert_eq!(run.outputs.len(), 6);
    let indices: Vec<usize> = run.outputs.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);

    let kinds: Vec<StageKind> = run.outputs.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StageKind::Research,
            StageKind::Plan,
            StageKind::Write,
            StageKind::LegalReview,
            StageKind::EthicsReview,
            StageKind::Optimize,
        ]
    );

    let calls = completion.recorded();
    assert!(calls[5].0.contains("Search Engine Optimization Specialist"));

    assert_eq!(
        run.report(),
        "stage-0-output\nstage-1-output\nstage-2-output\nstage-3-output\nstage-4-output\nstage-5-output"
    );
}

#[tokio::test]
async fn geo_run_swaps_only_the_final_stage() {
    let stages = build_pipeline(OptimizationChoice::Geo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);

    let completion = ScriptedCompletion::default();
    let (tools, _web, document) = toolset_with_document();

    let run = runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    assert_eq!(run.outputs.len(), 6);
    assert_eq!(run.outputs[5].kind, StageKind::Optimize);

    let calls = completion.recorded();
    assert!(calls[5].0.contains("Generative Engine Optimization Specialist"));
    assert!(!calls[5].0.contains("Search Engine Optimization Specialist"));

    // Research and the GEO optimizer both query the document.
    assert_eq!(document.queries.lock().unwrap().len(), 2);
}

#[test]
fn geo_requires_document_capability_at_build_time() {
    let err = build_pipeline(OptimizationChoice::Geo, false, true).unwrap_err();
    assert!(err.to_string().contains("requires a document-search"));
}

#[test]
fn non_geo_literals_default_to_seo() {
    assert_eq!(OptimizationChoice::parse("GEO"), OptimizationChoice::Geo);
    assert_eq!(OptimizationChoice::parse("geo"), OptimizationChoice::Geo);
    assert_eq!(OptimizationChoice::parse("SEO"), OptimizationChoice::Seo);
    assert_eq!(OptimizationChoice::parse(""), OptimizationChoice::Seo);
    assert_eq!(OptimizationChoice::parse("both"), OptimizationChoice::Seo);
    assert_eq!(OptimizationChoice::parse("geo-ish"), OptimizationChoice::Seo);
}

#[tokio::test]
async fn every_stage_receives_fully_substituted_bindings() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);

    let completion = ScriptedCompletion::default();
    let (tools, _web, _document) = toolset_with_document();

    runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    let calls = completion.recorded();
    assert_eq!(calls.len(), 6);
    for (system, user) in &calls {
        assert!(!has_unrendered_placeholders(system), "system: {system}");
        assert!(!has_unrendered_placeholders(user), "user: {user}");
    }

    // The same bindings reach the first and the last stage.
    assert!(calls[0].1.contains("Acme"));
    assert!(calls[0].1.contains("Springfield"));
    assert!(calls[5].1.contains("Cloud Security") || calls[5].0.contains("Cloud Security"));
}

#[tokio::test]
async fn stage_failure_aborts_with_no_partial_output() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);

    let completion = ScriptedCompletion::failing_at(2);
    let (tools, _web, _document) = toolset_with_document();

    let err = runner
        .run(&completion, &tools, sample_vars())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Stage 'write' failed"));
    // Stages after the failure never ran.
    assert_eq!(completion.recorded().len(), 3);
}

#[tokio::test]
async fn writer_reads_the_planner_output() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);

    let completion = ScriptedCompletion::default();
    let (tools, _web, _document) = toolset_with_document();

    runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    let calls = completion.recorded();
    assert!(calls[2].1.contains("stage-1-output"));
    // Both reviews read the written post, not each other.
    assert!(calls[3].1.contains("stage-2-output"));
    assert!(calls[4].1.contains("stage-2-output"));
    assert!(!calls[4].1.contains("stage-3-output"));
    // The optimizer reads the post and both reviews.
    assert!(calls[5].1.contains("stage-2-output"));
    assert!(calls[5].1.contains("stage-3-output"));
    assert!(calls[5].1.contains("stage-4-output"));
}

#[tokio::test]
async fn researcher_document_access_is_configurable() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, false).unwrap();
    assert!(!stages[0].agent.has_tool(ToolKind::DocumentSearch));
    assert!(stages[0].agent.has_tool(ToolKind::WebSearch));

    let runner = PipelineRunner::new(stages);
    let completion = ScriptedCompletion::default();
    let (tools, web, document) = toolset_with_document();

    runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    assert_eq!(web.queries.lock().unwrap().len(), 1);
    assert!(document.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn events_trace_stage_progress_and_tool_queries() {
    let stages = build_pipeline(OptimizationChoice::Seo, true, true).unwrap();
    let runner = PipelineRunner::new(stages);

    let completion = ScriptedCompletion::default();
    let (tools, _web, _document) = toolset_with_document();

    let run = runner
        .run(&completion, &tools, sample_vars())
        .await
        .expect("pipeline should succeed");

    assert!(matches!(
        run.events.as_slice(),
        [PipelineEvent::StageStarted(StageKind::Research), ..]
    ));
    assert!(run.events.iter().any(|event| matches!(
        event,
        PipelineEvent::ToolQueried {
            stage: StageKind::Research,
            tool: ToolKind::WebSearch,
            ..
        }
    )));
    assert!(run.events.contains(&PipelineEvent::StageCompleted(StageKind::Optimize)));
}
