use std::fmt;

use anyhow::{Result, anyhow};

use crate::agents::{self, AgentProfile};

/// Logical stages in the content pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Research,
    Plan,
    Write,
    LegalReview,
    EthicsReview,
    Optimize,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Research => "research",
            StageKind::Plan => "plan",
            StageKind::Write => "write",
            StageKind::LegalReview => "legal-review",
            StageKind::EthicsReview => "ethics-review",
            StageKind::Optimize => "optimize",
        };
        write!(f, "{label}")
    }
}

/// Which specialist occupies the final pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationChoice {
    #[default]
    Seo,
    Geo,
}

impl OptimizationChoice {
    /// SEO is the default branch: anything other than the literal GEO value
    /// selects SEO.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("geo") {
            OptimizationChoice::Geo
        } else {
            OptimizationChoice::Seo
        }
    }
}

impl fmt::Display for OptimizationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationChoice::Seo => write!(f, "SEO"),
            OptimizationChoice::Geo => write!(f, "GEO"),
        }
    }
}

/// One unit of pipeline work: a task description, the expected output, the
/// agent that performs it, and the prior stages whose outputs it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub kind: StageKind,
    pub description: String,
    pub expected_output: String,
    pub agent: AgentProfile,
    pub depends_on: Vec<usize>,
}

/// The branch-selected final stage. Exactly one variant is ever constructed
/// per run; the inactive branch's agent is never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalStage {
    Seo(StageSpec),
    Geo(StageSpec),
}

impl FinalStage {
    pub fn into_spec(self) -> StageSpec {
        match self {
            FinalStage::Seo(spec) | FinalStage::Geo(spec) => spec,
        }
    }
}

/// Builds the ordered six-stage pipeline. `document_available` reflects
/// whether a document-search capability exists for this run; the GEO branch
/// refuses to build without it. `researcher_document_search` controls whether
/// the research stage keeps document access (always subject to availability).
pub fn build_pipeline(
    choice: OptimizationChoice,
    document_available: bool,
    researcher_document_search: bool,
) -> Result<Vec<StageSpec>> {
    let final_stage = build_final_stage(choice, document_available)?;

    let researcher = agents::researcher(document_available && researcher_document_search);

    let mut stages = vec![
        StageSpec {
            kind: StageKind::Research,
            description: "Perform research about the company {company} in {location}. Gather \
                          relevant information about their products, services, company's history, \
                          and any customer testimonials from both the company website and \
                          associated documents. Focus on extracting details that can be used to \
                          effectively advertise the company's offerings. Additionally, provide \
                          statistics about {topic}."
                .to_string(),
            expected_output: "Detailed report of key information gathered from the company's \
                              website and documents, organized in bullet points."
                .to_string(),
            agent: researcher,
            depends_on: vec![],
        },
        StageSpec {
            kind: StageKind::Plan,
            description: "Using the research provided, develop a comprehensive content plan for a \
                          blog article that advertises {company}'s products and services while \
                          covering the topic: {topic}. Your plan should include a clear structure, \
                          key points to be discussed, and any relevant examples or data that \
                          should be included."
                .to_string(),
            expected_output: "A detailed content plan outlining the blog structure, key points, \
                              and suggested content for each section."
                .to_string(),
            agent: agents::planner(),
            depends_on: vec![0],
        },
        StageSpec {
            kind: StageKind::Write,
            description: "Write a persuasive and factually accurate blog post based on the \
                          content plan provided by the Content Planner. The blog post should \
                          highlight the company's products and services while thoroughly \
                          discussing the topic: {topic}. Ensure the tone is engaging, avoid \
                          complex language, and make the content accessible to a wide audience."
                .to_string(),
            expected_output: "A full blog post of at least 4 paragraphs, adhering to the content \
                              plan and effectively advertising the company."
                .to_string(),
            agent: agents::writer(),
            depends_on: vec![1],
        },
        StageSpec {
            kind: StageKind::LegalReview,
            description: "Review the blog post to ensure it adheres to legal standards and is \
                          free from any potential legal issues. Focus on avoiding any false \
                          claims, ensuring copyright compliance, and making sure the content \
                          aligns with advertising standards."
                .to_string(),
            expected_output: "A concise review of the blog post in 3 bullet points, outlining any \
                              legal concerns or confirming compliance."
                .to_string(),
            agent: agents::legal_reviewer(),
            depends_on: vec![2],
        },
        StageSpec {
            kind: StageKind::EthicsReview,
            description: "Review the blog post to ensure it adheres to ethical standards. This \
                          includes checking for any misleading information, ensuring the content \
                          respects all cultural and social sensitivities, and confirming that the \
                          content does not exploit or harm any individuals or groups."
                .to_string(),
            expected_output: "A concise review of the blog post in 3 bullet points, outlining any \
                              ethical concerns or confirming ethical soundness."
                .to_string(),
            agent: agents::ethics_reviewer(),
            depends_on: vec![2],
        },
    ];

    stages.push(final_stage.into_spec());
    Ok(stages)
}

fn build_final_stage(choice: OptimizationChoice, document_available: bool) -> Result<FinalStage> {
    match choice {
        OptimizationChoice::Geo => {
            if !document_available {
                return Err(anyhow!(
                    "GEO optimization requires a document-search capability; upload a document first"
                ));
            }

            Ok(FinalStage::Geo(StageSpec {
                kind: StageKind::Optimize,
                description: "Optimize the blog post for keywords and ensure that it maximizes \
                              reach and visibility within Generative AI Engines such as ChatGPT, \
                              Claude, SGE, Gemini, and Perplexity. Focus on enhancing the \
                              content's discoverability by incorporating unique words, keyword \
                              stuffing, ensuring it is easy to understand, has technical terms, \
                              and add quotations or statistics from the document. Overall, \
                              rewrite the blog post with the optimized keywords and improvements."
                    .to_string(),
                expected_output: "A detailed and optimized blog post with at least 4 paragraphs \
                                  designed to perform well in generative engine rankings, \
                                  including keyword stuffing, statistics/quotations, and \
                                  readability improvements."
                    .to_string(),
                agent: agents::geo_optimizer(),
                depends_on: vec![2, 3, 4],
            }))
        }
        OptimizationChoice::Seo => Ok(FinalStage::Seo(StageSpec {
            kind: StageKind::Optimize,
            description: "Optimize the blog post for search engines (SEO). Ensure that it \
                          includes relevant keywords, meta descriptions, alt texts for images, \
                          and is structured with headings and subheadings that align with SEO \
                          best practices. Improve readability and ensure that the content is \
                          highly engaging and accessible."
                .to_string(),
            expected_output: "A detailed SEO-optimized blog post with at least 4 paragraphs that \
                              follow SEO guidelines for better search engine visibility."
                .to_string(),
            agent: agents::seo_optimizer(),
            depends_on: vec![2, 3, 4],
        })),
    }
}
