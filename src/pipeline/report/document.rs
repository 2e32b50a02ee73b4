use std::path::Path;

use tracing::info;

use super::escape::latex_escape;
use super::table::{render_table_rows, ReportOptions};
use super::ReportError;
use crate::pipeline::compliance::ComplianceMatrix;
use crate::pipeline::requirements::Requirement;

/// Render the complete LaTeX report document.
///
/// The data table is embedded between fixed boilerplate sections (summary,
/// methodology, legend, recommendations). Output is a pure function of the
/// inputs — no timestamps, no randomness — so the same matrix always
/// produces a byte-identical document.
pub fn render_report(
    requirements: &[Requirement],
    matrix: &ComplianceMatrix,
    options: &ReportOptions,
) -> String {
    let table_rows = render_table_rows(requirements, matrix, options);
    let column_spec = column_spec(matrix.proposal_count());
    let header_row = header_row(&matrix.proposal_names);

    format!(
        r#"\documentclass[12pt]{{article}}
\usepackage{{longtable}}
\usepackage{{array}}
\usepackage[table]{{xcolor}}
\usepackage[a4paper, margin=0.8in]{{geometry}}
\usepackage{{titlesec}}
\renewcommand{{\arraystretch}}{{1.3}}
\setlength{{\parskip}}{{6pt}}
\titleformat{{\section}}{{\normalfont\Large\bfseries}}{{}}{{0pt}}{{}}

\begin{{document}}

\begin{{center}}
    \LARGE \textbf{{Tender document comparison}}\\
\end{{center}}

\vspace{{1cm}}

\section*{{Executive Summary}}
This report presents a compliance analysis of tender requirements against the specifications submitted by each firm. Every requirement has been evaluated with AI-assisted analysis to determine its compliance status.

\section*{{Methodology}}
\begin{{itemize}}
    \item \textbf{{Requirement Extraction:}} AI-assisted extraction of technical requirements from the tender document
    \item \textbf{{Compliance Evaluation:}} Systematic comparison of firm specifications against each requirement
    \item \textbf{{Scoring:}} Binary compliance assessment (Complied / Not Complied)
\end{{itemize}}

\section*{{Compliance Analysis Results}}

\begin{{longtable}}{{{column_spec}}}
\hline
\rowcolor{{blue!20}}
{header_row}
\hline
\endfirsthead

\hline
\rowcolor{{blue!20}}
{header_row}
\hline
\endhead

{table_rows}

\hline
\end{{longtable}}

\section*{{Legend}}
\begin{{itemize}}
    \item \textbf{{Complied:}} Firm's specification meets or exceeds the tender requirement
    \item \textbf{{Not Complied:}} Firm's specification does not meet the tender requirement or the information is missing
\end{{itemize}}

\section*{{Recommendations}}
Based on this automated compliance analysis, decision-makers should:
\begin{{enumerate}}
    \item Review firms with the highest compliance rates
    \item Manually verify critical requirements marked as "Not Complied"
    \item Consider requesting clarifications for ambiguous specifications
    \item Evaluate cost-benefit for over-specified solutions
\end{{enumerate}}

\end{{document}}
"#
    )
}

/// Render the report and write it to `path`.
pub fn write_report(
    path: &Path,
    requirements: &[Requirement],
    matrix: &ComplianceMatrix,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    let report = render_report(requirements, matrix, options);
    std::fs::write(path, &report).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = report.len(), "Report written");
    Ok(())
}

/// Longtable column layout: a wide ragged-right requirement column plus one
/// centered column per proposal.
fn column_spec(proposal_count: usize) -> String {
    let mut spec = String::from("|>{\\raggedright\\arraybackslash}p{7cm}|");
    for _ in 0..proposal_count {
        spec.push_str(">{\\centering\\arraybackslash}p{2.5cm}|");
    }
    spec
}

/// Bold header row titled with the (escaped) proposal names.
fn header_row(proposal_names: &[String]) -> String {
    let mut cells = vec!["\\textbf{Technical Requirement}".to_string()];
    for name in proposal_names {
        cells.push(format!("\\textbf{{{}}}", latex_escape(name)));
    }
    format!("{} \\\\", cells.join(" & "))
}
