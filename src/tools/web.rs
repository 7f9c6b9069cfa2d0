use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::WebSearch;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";
const MAX_SNIPPETS: usize = 8;

/// Web search over the DuckDuckGo Instant Answer API. No credential needed.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl DuckDuckGoSearch {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let sanitized_base = base_url.into().trim_end_matches('/').to_string();
        if sanitized_base.is_empty() {
            return Err(anyhow!("Base URL cannot be empty"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build web search HTTP client")?;

        Ok(Self {
            http,
            base_url: sanitized_base,
            user_agent: user_agent.to_string(),
        })
    }

    async fn query(&self, query: &str) -> Result<InstantAnswer> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .context("Failed to send web search request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Web search error (status {}): {}", status, error_text));
        }

        response
            .json::<InstantAnswer>()
            .await
            .context("Failed to parse web search response JSON")
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Web search query cannot be empty"));
        }

        let answer = self.query(trimmed).await?;
        let snippets = answer.into_snippets(MAX_SNIPPETS);

        if snippets.is_empty() {
            return Ok(format!("No web results found for \"{trimmed}\"."));
        }

        Ok(snippets.join("\n"))
    }
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
    Group {
        #[serde(rename = "Topics", default)]
        topics: Vec<RelatedTopic>,
    },
}

impl InstantAnswer {
    fn into_snippets(self, limit: usize) -> Vec<String> {
        let mut snippets = Vec::new();

        if !self.abstract_text.trim().is_empty() {
            let mut line = self.abstract_text.trim().to_string();
            if !self.abstract_url.trim().is_empty() {
                line.push_str(&format!(" ({})", self.abstract_url.trim()));
            }
            snippets.push(line);
        }

        let mut stack = self.related_topics;
        stack.reverse();
        while let Some(topic) = stack.pop() {
            if snippets.len() >= limit {
                break;
            }
            match topic {
                RelatedTopic::Entry { text, first_url } => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    let mut line = format!("- {}", text.trim());
                    if !first_url.trim().is_empty() {
                        line.push_str(&format!(" ({})", first_url.trim()));
                    }
                    snippets.push(line);
                }
                RelatedTopic::Group { mut topics } => {
                    topics.reverse();
                    stack.extend(topics);
                }
            }
        }

        snippets.truncate(limit);
        snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn search_collects_abstract_and_related_snippets() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .query_param("q", "Acme Springfield products")
                    .query_param("format", "json");

                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "AbstractText": "Acme Corporation sells quality anvils.",
                        "AbstractURL": "https://acme.example/about",
                        "RelatedTopics": [
                            {
                                "Text": "Acme anvil reviews",
                                "FirstURL": "https://acme.example/reviews"
                            },
                            {
                                "Topics": [
                                    {
                                        "Text": "Acme company history",
                                        "FirstURL": "https://acme.example/history"
                                    }
                                ]
                            }
                        ]
                    }));
            })
            .await;

        let search = DuckDuckGoSearch::with_base_url(30, "blogsmith/test", server.base_url()).unwrap();
        let results = search.search("Acme Springfield products").await.unwrap();

        assert!(results.contains("quality anvils"));
        assert!(results.contains("- Acme anvil reviews (https://acme.example/reviews)"));
        assert!(results.contains("- Acme company history"));
        _mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_reports_empty_results() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "AbstractText": "",
                        "AbstractURL": "",
                        "RelatedTopics": []
                    }));
            })
            .await;

        let search = DuckDuckGoSearch::with_base_url(30, "blogsmith/test", server.base_url()).unwrap();
        let results = search.search("obscure query").await.unwrap();

        assert!(results.contains("No web results found"));
        _mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_rejects_empty_query() {
        let search = DuckDuckGoSearch::with_base_url(30, "blogsmith/test", "http://localhost:1").unwrap();
        let err = search.search("   ").await.unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[tokio::test]
    async fn search_propagates_http_errors() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(503).body("overloaded");
            })
            .await;

        let search = DuckDuckGoSearch::with_base_url(30, "blogsmith/test", server.base_url()).unwrap();
        let err = search.search("anything").await.unwrap_err();
        assert!(err.to_string().contains("Web search error"));
        _mock.assert_async().await;
    }
}
