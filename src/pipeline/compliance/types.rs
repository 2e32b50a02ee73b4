use serde::{Deserialize, Serialize};

/// Binary compliance verdict for one (requirement, proposal) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Complied,
    NotComplied,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complied => write!(f, "Complied"),
            Self::NotComplied => write!(f, "Not Complied"),
        }
    }
}

/// Response shape requested from the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictFormat {
    /// The model answers with the bare token `Complied` or `Not Complied`.
    Terse,
    /// The model answers with `STATUS:` and `REASON:` lines; the reason is
    /// carried into the report.
    Structured,
}

/// How tolerant verdict parsing is of off-format responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStrictness {
    /// A response counts as Complied when it contains "complied" anywhere
    /// and "not" nowhere. Verbose answers that avoid the word "not" while
    /// meaning it (e.g. "cannot be considered compliant") can slip through
    /// as Complied — this matches the established evaluation behavior.
    Lenient,
    /// Only a response that is exactly the token `Complied` counts;
    /// everything else is Not Complied.
    Exact,
}

/// What happens when a single cell's classification call fails outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFailurePolicy {
    /// Abort the run, naming the failed cell.
    FailFast,
    /// Record Not Complied with a failure reason and keep going.
    MarkNotComplied,
}

/// Verdict for one cell of the compliance matrix. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub requirement_id: usize,
    /// Column position, in proposal upload order.
    pub proposal_index: usize,
    pub status: ComplianceStatus,
    /// Present in structured mode (or when a failed cell was marked).
    pub reason: Option<String>,
}

/// One proposal's extracted text plus the name used as its column title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalText {
    pub name: String,
    pub text: String,
}

impl ProposalText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One matrix row: verdicts for a single requirement, one per proposal,
/// in proposal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub requirement_id: usize,
    pub verdicts: Vec<ComplianceVerdict>,
}

/// The full requirement × proposal verdict grid.
///
/// Rows are in requirement order and every row holds exactly one verdict
/// per proposal, so the cell count is always |requirements| × |proposals|.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceMatrix {
    pub proposal_names: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl ComplianceMatrix {
    pub fn proposal_count(&self) -> usize {
        self.proposal_names.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.verdicts.len()).sum()
    }

    /// Per-proposal compliance statistics, recomputed from the verdicts on
    /// every call so they can never drift from the matrix.
    pub fn summaries(&self) -> Vec<ProposalSummary> {
        let total = self.rows.len();
        self.proposal_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let complied = self
                    .rows
                    .iter()
                    .filter(|row| {
                        row.verdicts
                            .get(index)
                            .is_some_and(|v| v.status == ComplianceStatus::Complied)
                    })
                    .count();
                ProposalSummary::new(index, name.clone(), complied, total)
            })
            .collect()
    }
}

/// Compliance counts for one proposal, derived from the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub proposal_index: usize,
    pub proposal_name: String,
    pub complied: usize,
    pub total: usize,
    /// Percentage of complied requirements, rounded to one decimal.
    pub percent: f64,
}

impl ProposalSummary {
    fn new(proposal_index: usize, proposal_name: String, complied: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (complied as f64 / total as f64 * 1000.0).round() / 10.0
        };
        Self {
            proposal_index,
            proposal_name,
            complied,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(req: usize, prop: usize, status: ComplianceStatus) -> ComplianceVerdict {
        ComplianceVerdict {
            requirement_id: req,
            proposal_index: prop,
            status,
            reason: None,
        }
    }

    fn three_by_two() -> ComplianceMatrix {
        use super::ComplianceStatus::{Complied, NotComplied};
        ComplianceMatrix {
            proposal_names: vec!["Firm 1".into(), "Firm 2".into()],
            rows: vec![
                MatrixRow {
                    requirement_id: 0,
                    verdicts: vec![verdict(0, 0, Complied), verdict(0, 1, NotComplied)],
                },
                MatrixRow {
                    requirement_id: 1,
                    verdicts: vec![verdict(1, 0, Complied), verdict(1, 1, NotComplied)],
                },
                MatrixRow {
                    requirement_id: 2,
                    verdicts: vec![verdict(2, 0, NotComplied), verdict(2, 1, Complied)],
                },
            ],
        }
    }

    #[test]
    fn cell_count_is_rows_times_proposals() {
        assert_eq!(three_by_two().cell_count(), 6);
    }

    #[test]
    fn summaries_round_to_one_decimal() {
        let summaries = three_by_two().summaries();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].proposal_name, "Firm 1");
        assert_eq!(summaries[0].complied, 2);
        assert_eq!(summaries[0].total, 3);
        assert!((summaries[0].percent - 66.7).abs() < f64::EPSILON);

        assert_eq!(summaries[1].complied, 1);
        assert!((summaries[1].percent - 33.3).abs() < f64::EPSILON);
    }

    #[test]
    fn summaries_of_empty_matrix_report_zero_percent() {
        let matrix = ComplianceMatrix {
            proposal_names: vec!["Firm 1".into()],
            rows: vec![],
        };
        let summaries = matrix.summaries();
        assert_eq!(summaries[0].total, 0);
        assert_eq!(summaries[0].percent, 0.0);
    }

    #[test]
    fn status_display_matches_report_vocabulary() {
        assert_eq!(ComplianceStatus::Complied.to_string(), "Complied");
        assert_eq!(ComplianceStatus::NotComplied.to_string(), "Not Complied");
    }

    #[test]
    fn matrix_round_trips_through_json() {
        let matrix = three_by_two();
        let json = serde_json::to_string(&matrix).unwrap();
        let back: ComplianceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
        assert_eq!(back.summaries(), matrix.summaries());
    }
}
