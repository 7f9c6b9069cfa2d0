use crate::agents::ToolKind;

use super::stages::StageKind;
use super::vars::TemplateVars;

/// Text produced by one stage. Read-only after creation; `index` matches the
/// pipeline definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub index: usize,
    pub kind: StageKind,
    pub text: String,
}

/// Structured audit events emitted while progressing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageFailed {
        stage: StageKind,
        error: String,
    },
    ToolQueried {
        stage: StageKind,
        tool: ToolKind,
        query: String,
    },
}

/// Mutable state threaded through the stages: the shared variable bindings,
/// the outputs produced so far, and the event log.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub vars: TemplateVars,
    outputs: Vec<StageOutput>,
    events: Vec<PipelineEvent>,
}

impl PipelineContext {
    pub fn new(vars: TemplateVars) -> Self {
        Self {
            vars,
            outputs: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn output(&self, index: usize) -> Option<&StageOutput> {
        self.outputs.iter().find(|output| output.index == index)
    }

    pub fn record_stage_start(&mut self, stage: StageKind) {
        self.events.push(PipelineEvent::StageStarted(stage));
    }

    pub fn record_stage_end(&mut self, stage: StageKind) {
        self.events.push(PipelineEvent::StageCompleted(stage));
    }

    pub fn record_stage_failure(&mut self, stage: StageKind, error: impl Into<String>) {
        self.events.push(PipelineEvent::StageFailed {
            stage,
            error: error.into(),
        });
    }

    pub fn record_tool_query(&mut self, stage: StageKind, tool: ToolKind, query: impl Into<String>) {
        self.events.push(PipelineEvent::ToolQueried {
            stage,
            tool,
            query: query.into(),
        });
    }

    pub fn record_output(&mut self, index: usize, kind: StageKind, text: String) {
        self.outputs.push(StageOutput { index, kind, text });
    }

    pub fn into_run(self) -> PipelineRun {
        let PipelineContext {
            outputs, events, ..
        } = self;
        PipelineRun { outputs, events }
    }
}

/// Completed run: all stage outputs in definition order plus the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub outputs: Vec<StageOutput>,
    pub events: Vec<PipelineEvent>,
}

impl PipelineRun {
    /// The stage texts joined by newlines, in stage order.
    pub fn report(&self) -> String {
        self.outputs
            .iter()
            .map(|output| output.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
