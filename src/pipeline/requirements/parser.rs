use super::types::{Requirement, RequirementCategory};

/// Parse the model's free-form requirement listing into requirement records.
///
/// The listing is untrusted: the model was asked for one requirement per
/// line, bullet- or category-prefixed, but parsing tolerates anything and
/// simply drops lines that don't look like requirements. Deterministic and
/// idempotent — the same text always yields the same sequence, in input
/// line order. An empty result is a valid outcome ("no requirements
/// found"); the caller decides whether that aborts the run.
pub fn parse_requirements(response: &str, category_mode: bool) -> Vec<Requirement> {
    let mut requirements = Vec::new();

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        // A requirement line is bullet-prefixed or colon-delimited.
        let qualifies =
            line.starts_with('-') || line.starts_with('•') || line.contains(':');
        if !qualifies {
            continue;
        }

        let stripped = line.trim_start_matches(['-', '•', ' ']).trim();
        if stripped.is_empty() {
            continue;
        }

        let id = requirements.len();
        if category_mode {
            if let Some(requirement) = parse_categorized_line(id, stripped) {
                requirements.push(requirement);
                continue;
            }
        }
        requirements.push(Requirement::plain(id, stripped));
    }

    requirements
}

/// Try to read a line as `CATEGORY: description: specification`.
///
/// Qualifies only when one of the nine category tokens appears somewhere in
/// the line and splitting on ':' yields three parts. A line that names a
/// token without leading with one keeps its parts but falls back to the
/// UNSPECIFIED category.
fn parse_categorized_line(id: usize, line: &str) -> Option<Requirement> {
    let upper = line.to_uppercase();
    let has_token = RequirementCategory::TOKENS
        .iter()
        .any(|category| upper.contains(category.token()));
    if !has_token {
        return None;
    }

    let parts: Vec<&str> = line.splitn(3, ':').collect();
    if parts.len() < 3 {
        return None;
    }

    let category = RequirementCategory::from_token(parts[0])
        .unwrap_or(RequirementCategory::Unspecified);
    Some(Requirement::categorized(
        id,
        category,
        parts[1].trim(),
        parts[2].trim(),
    ))
}
