use serde::{Deserialize, Serialize};

/// Fixed taxonomy for requirement grouping in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementCategory {
    Hardware,
    Software,
    Performance,
    Electrical,
    Physical,
    Environmental,
    Connectivity,
    Certification,
    Quality,
    /// Requirements extracted without a category (plain mode, or lines the
    /// model emitted off-format).
    Unspecified,
}

impl RequirementCategory {
    /// The nine taggable categories, in prompt order. `Unspecified` is a
    /// parser fallback, never requested from the model.
    pub const TOKENS: [RequirementCategory; 9] = [
        RequirementCategory::Hardware,
        RequirementCategory::Software,
        RequirementCategory::Performance,
        RequirementCategory::Electrical,
        RequirementCategory::Physical,
        RequirementCategory::Environmental,
        RequirementCategory::Connectivity,
        RequirementCategory::Certification,
        RequirementCategory::Quality,
    ];

    /// Canonical upper-case token, as it appears in model output.
    pub fn token(&self) -> &'static str {
        match self {
            RequirementCategory::Hardware => "HARDWARE",
            RequirementCategory::Software => "SOFTWARE",
            RequirementCategory::Performance => "PERFORMANCE",
            RequirementCategory::Electrical => "ELECTRICAL",
            RequirementCategory::Physical => "PHYSICAL",
            RequirementCategory::Environmental => "ENVIRONMENTAL",
            RequirementCategory::Connectivity => "CONNECTIVITY",
            RequirementCategory::Certification => "CERTIFICATION",
            RequirementCategory::Quality => "QUALITY",
            RequirementCategory::Unspecified => "UNSPECIFIED",
        }
    }

    /// Parse a category token case-insensitively. Surrounding whitespace
    /// and a leading list marker are the caller's problem; this matches
    /// the bare token only.
    pub fn from_token(token: &str) -> Option<Self> {
        let upper = token.trim().to_uppercase();
        Self::TOKENS.iter().copied().find(|c| c.token() == upper)
    }
}

impl std::fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// One technical requirement derived from the tender document.
///
/// Never mutated after parsing; `id` is the ordinal position in the
/// extraction output and drives report row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Ordinal position (0-based), stable for the whole run.
    pub id: usize,
    pub category: RequirementCategory,
    /// What is required, e.g. "Processor".
    pub description: String,
    /// The required value or criteria, e.g. "Intel i7 10th gen".
    pub specification: String,
    /// The text shown in the report row and sent to the classifier.
    pub full_text: String,
}

impl Requirement {
    /// An uncategorized requirement holding one stripped output line.
    /// A "description: specification" line still splits into its parts;
    /// `full_text` keeps the line verbatim either way.
    pub fn plain(id: usize, full_text: impl Into<String>) -> Self {
        let full_text = full_text.into();
        let (description, specification) = match full_text.split_once(':') {
            Some((description, specification)) => (
                description.trim().to_string(),
                specification.trim().to_string(),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            id,
            category: RequirementCategory::Unspecified,
            description,
            specification,
            full_text,
        }
    }

    /// A categorized requirement; `full_text` is derived as
    /// "description: specification".
    pub fn categorized(
        id: usize,
        category: RequirementCategory,
        description: impl Into<String>,
        specification: impl Into<String>,
    ) -> Self {
        let description = description.into();
        let specification = specification.into();
        let full_text = format!("{description}: {specification}");
        Self {
            id,
            category,
            description,
            specification,
            full_text,
        }
    }
}
