/// End-user template variables substituted into every stage's text. All six
/// stages receive the same bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub company: String,
    pub location: String,
    pub topic: String,
}

const PLACEHOLDERS: [&str; 3] = ["{company}", "{location}", "{topic}"];

impl TemplateVars {
    pub fn new(
        company: impl Into<String>,
        location: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into().trim().to_string(),
            location: location.into().trim().to_string(),
            topic: topic.into().trim().to_string(),
        }
    }

    pub fn render(&self, template: &str) -> String {
        template
            .replace("{company}", &self.company)
            .replace("{location}", &self.location)
            .replace("{topic}", &self.topic)
    }
}

/// True when a known placeholder survived substitution.
pub fn has_unrendered_placeholders(text: &str) -> bool {
    PLACEHOLDERS.iter().any(|placeholder| text.contains(placeholder))
}
