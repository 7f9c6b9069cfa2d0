use std::path::Path;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use super::DocumentSearch;

const MAX_CHUNK_CHARS: usize = 1200;
const MAX_EXCERPTS: usize = 3;

/// Keyword-excerpt index over one ingested PDF. Built once per run from the
/// persisted upload; read-only afterward.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    source: String,
    chunks: Vec<String>,
}

impl DocumentIndex {
    /// Extracts text from the PDF at `path` and chunks it for excerpt search.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Document not found at {}", path.display()));
        }

        let text = pdf_extract::extract_text(path)
            .with_context(|| format!("Failed to extract text from {}", path.display()))?;

        Self::from_text(&path.display().to_string(), &text)
    }

    pub fn from_text(source: &str, text: &str) -> Result<Self> {
        let chunks = chunk_text(text);
        if chunks.is_empty() {
            return Err(anyhow!("Document '{source}' contains no extractable text"));
        }

        Ok(Self {
            source: source.to_string(),
            chunks,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn top_excerpts(&self, query: &str) -> Vec<&str> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &String)> = self
            .chunks
            .iter()
            .map(|chunk| {
                let haystack = chunk.to_lowercase();
                let score = terms
                    .iter()
                    .map(|term| haystack.matches(term.as_str()).count())
                    .sum::<usize>();
                (score, chunk)
            })
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort keeps document order among equally relevant chunks.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_EXCERPTS)
            .map(|(_, chunk)| chunk.as_str())
            .collect()
    }
}

#[async_trait]
impl DocumentSearch for DocumentIndex {
    async fn search(&self, query: &str) -> Result<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Document search query cannot be empty"));
        }

        let excerpts = self.top_excerpts(trimmed);
        if excerpts.is_empty() {
            return Ok(format!(
                "No relevant excerpts found in {} for \"{trimmed}\".",
                self.source
            ));
        }

        Ok(excerpts.join("\n\n"))
    }
}

/// One chunk per paragraph; oversized paragraphs are split on word
/// boundaries so no chunk exceeds `MAX_CHUNK_CHARS` by more than a word.
fn chunk_text(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .flat_map(split_oversized)
        .collect()
}

fn split_oversized(paragraph: &str) -> Vec<String> {
    if paragraph.len() <= MAX_CHUNK_CHARS {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    for word in paragraph.split_whitespace() {
        if !piece.is_empty() && piece.len() + word.len() + 1 > MAX_CHUNK_CHARS {
            pieces.push(std::mem::take(&mut piece));
        }
        if !piece.is_empty() {
            piece.push(' ');
        }
        piece.push_str(word);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.len() > 2)
        .map(|term| term.to_string())
        .collect()
}
