use super::escape::latex_escape;
use crate::pipeline::compliance::{ComplianceMatrix, ComplianceStatus};
use crate::pipeline::requirements::Requirement;

/// Rendering knobs for the compliance table.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Wrap each verdict cell in a green/red `\textcolor`.
    pub color_by_status: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            color_by_status: true,
        }
    }
}

/// Render the table body: one row per requirement, one verdict cell per
/// proposal, with a separating rule between adjacent rows whose categories
/// differ.
///
/// Requirement text is escaped; verdict cells are renderer-emitted markup
/// and must not be. Row order follows the requirement sequence — category
/// grouping relies on the extractor emitting categories adjacently, and no
/// re-sorting happens here.
pub fn render_table_rows(
    requirements: &[Requirement],
    matrix: &ComplianceMatrix,
    options: &ReportOptions,
) -> String {
    let mut lines = Vec::with_capacity(requirements.len());

    for (i, (requirement, row)) in requirements.iter().zip(&matrix.rows).enumerate() {
        let mut cells = Vec::with_capacity(row.verdicts.len() + 1);
        cells.push(latex_escape(&requirement.full_text));
        for verdict in &row.verdicts {
            cells.push(render_cell(verdict.status, options));
        }
        lines.push(format!("{} \\\\", cells.join(" & ")));

        if let Some(next) = requirements.get(i + 1) {
            if next.category != requirement.category {
                lines.push("\\hline".to_string());
            }
        }
    }

    lines.join("\n")
}

fn render_cell(status: ComplianceStatus, options: &ReportOptions) -> String {
    if options.color_by_status {
        let color = match status {
            ComplianceStatus::Complied => "green",
            ComplianceStatus::NotComplied => "red",
        };
        format!("\\textcolor{{{color}}}{{{status}}}")
    } else {
        status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compliance::{ComplianceVerdict, MatrixRow};
    use crate::pipeline::requirements::RequirementCategory;

    fn matrix_for(requirements: &[Requirement], statuses: &[&[ComplianceStatus]]) -> ComplianceMatrix {
        let proposal_count = statuses.first().map_or(0, |row| row.len());
        ComplianceMatrix {
            proposal_names: (0..proposal_count).map(|i| format!("Firm {}", i + 1)).collect(),
            rows: requirements
                .iter()
                .zip(statuses)
                .map(|(req, row)| MatrixRow {
                    requirement_id: req.id,
                    verdicts: row
                        .iter()
                        .enumerate()
                        .map(|(j, status)| ComplianceVerdict {
                            requirement_id: req.id,
                            proposal_index: j,
                            status: *status,
                            reason: None,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    use super::ComplianceStatus::{Complied, NotComplied};

    #[test]
    fn one_row_per_requirement_with_colored_cells() {
        let reqs = vec![Requirement::plain(0, "CPU: Intel i7")];
        let matrix = matrix_for(&reqs, &[&[Complied, NotComplied]]);

        let rows = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        assert_eq!(
            rows,
            "CPU: Intel i7 & \\textcolor{green}{Complied} & \\textcolor{red}{Not Complied} \\\\"
        );
    }

    #[test]
    fn uncolored_cells_are_bare_status_tokens() {
        let reqs = vec![Requirement::plain(0, "CPU: Intel i7")];
        let matrix = matrix_for(&reqs, &[&[Complied]]);

        let rows = render_table_rows(
            &reqs,
            &matrix,
            &ReportOptions {
                color_by_status: false,
            },
        );
        assert_eq!(rows, "CPU: Intel i7 & Complied \\\\");
    }

    #[test]
    fn requirement_text_is_escaped_but_markup_is_not() {
        let reqs = vec![Requirement::plain(0, "R&D share: 5% of $100")];
        let matrix = matrix_for(&reqs, &[&[Complied]]);

        let rows = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        assert!(rows.contains("R\\&D share: 5\\% of \\$100"));
        // The cell separator and \textcolor stay raw.
        assert!(rows.contains(" & \\textcolor{green}{Complied}"));
    }

    #[test]
    fn category_break_inserts_one_rule_between_differing_neighbors() {
        let reqs = vec![
            Requirement::categorized(0, RequirementCategory::Hardware, "CPU", "i7"),
            Requirement::categorized(1, RequirementCategory::Hardware, "RAM", "16GB"),
            Requirement::categorized(2, RequirementCategory::Software, "OS", "Linux"),
        ];
        let matrix = matrix_for(&reqs, &[&[Complied], &[Complied], &[Complied]]);

        let rows = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        let lines: Vec<&str> = rows.lines().collect();

        assert_eq!(lines.len(), 4, "3 rows + 1 rule: {rows}");
        assert_eq!(lines[2], "\\hline");
        assert_eq!(rows.matches("\\hline").count(), 1);
    }

    #[test]
    fn no_rule_after_the_last_row() {
        let reqs = vec![
            Requirement::categorized(0, RequirementCategory::Hardware, "CPU", "i7"),
            Requirement::categorized(1, RequirementCategory::Software, "OS", "Linux"),
        ];
        let matrix = matrix_for(&reqs, &[&[Complied], &[Complied]]);

        let rows = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        assert!(!rows.trim_end().ends_with("\\hline"), "got: {rows}");
        assert_eq!(rows.matches("\\hline").count(), 1);
    }

    #[test]
    fn uncategorized_requirements_get_no_rules() {
        let reqs = vec![
            Requirement::plain(0, "CPU: i7"),
            Requirement::plain(1, "RAM: 16GB"),
        ];
        let matrix = matrix_for(&reqs, &[&[Complied], &[NotComplied]]);

        let rows = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        assert_eq!(rows.matches("\\hline").count(), 0);
    }

    #[test]
    fn rendering_is_deterministic() {
        let reqs = vec![
            Requirement::categorized(0, RequirementCategory::Hardware, "CPU", "i7"),
            Requirement::plain(1, "RAM: 16GB"),
        ];
        let matrix = matrix_for(&reqs, &[&[Complied, NotComplied], &[NotComplied, Complied]]);

        let first = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        let second = render_table_rows(&reqs, &matrix, &ReportOptions::default());
        assert_eq!(first, second);
    }
}
