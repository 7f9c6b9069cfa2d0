//! Capability adapters the pipeline agents can query: web search and
//! single-document search. Agents receive these by reference; which agent may
//! use which capability is declared on its profile.

mod document;
mod web;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

pub use document::DocumentIndex;
pub use web::DuckDuckGoSearch;

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Returns ranked snippet text for the query.
    async fn search(&self, query: &str) -> Result<String>;
}

#[async_trait]
pub trait DocumentSearch: Send + Sync {
    /// Returns relevant excerpt text from the one ingested document.
    async fn search(&self, query: &str) -> Result<String>;
}

/// Capabilities available to one pipeline run. The document capability is
/// optional; GEO runs refuse to build without it.
#[derive(Clone)]
pub struct ToolSet {
    pub web: Arc<dyn WebSearch>,
    pub document: Option<Arc<dyn DocumentSearch>>,
}

impl ToolSet {
    pub fn new(web: Arc<dyn WebSearch>, document: Option<Arc<dyn DocumentSearch>>) -> Self {
        Self { web, document }
    }
}
