pub mod context;
pub mod runner;
pub mod stages;
pub mod vars;

pub use runner::PipelineRunner;
pub use stages::{OptimizationChoice, build_pipeline};
pub use vars::TemplateVars;

#[cfg(test)]
mod tests;
