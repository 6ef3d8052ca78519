// Boundary mapping: solve outcomes → serializable reports

use serde::Serialize;

use crate::domain::{FlowError, SolveResult, SolveStatus};

/// Status label of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Optimal,
    Infeasible,
    Unbounded,
    SolverFailure,
    /// The request could not be turned into a model at all
    InvalidRequest,
}

impl From<SolveStatus> for ReportStatus {
    fn from(status: SolveStatus) -> Self {
        match status {
            SolveStatus::Optimal => ReportStatus::Optimal,
            SolveStatus::Infeasible => ReportStatus::Infeasible,
            SolveStatus::Unbounded => ReportStatus::Unbounded,
            SolveStatus::SolverFailure => ReportStatus::SolverFailure,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub source: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SolveResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub retryable: bool,
}

impl SolveReport {
    pub fn from_outcome(source: impl Into<String>, outcome: Result<SolveResult, FlowError>) -> Self {
        match outcome {
            Ok(result) => Self {
                source: source.into(),
                status: result.status.into(),
                result: Some(result),
                message: None,
                retryable: false,
            },
            Err(err) => Self {
                source: source.into(),
                status: err
                    .status()
                    .map_or(ReportStatus::InvalidRequest, ReportStatus::from),
                result: None,
                message: Some(err.to_string()),
                retryable: err.is_retryable(),
            },
        }
    }

    /// Report for input that never reached the solver
    pub fn invalid(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status: ReportStatus::InvalidRequest,
            result: None,
            message: Some(message.into()),
            retryable: false,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == ReportStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_report_carries_the_result() {
        let report = SolveReport::from_outcome("a.json", Ok(SolveResult::optimal(6.0)));
        assert!(report.is_optimal());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "optimal");
        assert_eq!(json["result"]["objective_value"], 6.0);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn errors_become_labelled_messages() {
        let report = SolveReport::from_outcome(
            "b.json",
            Err(FlowError::SolverFailure("engine crashed".into())),
        );
        assert_eq!(report.status, ReportStatus::SolverFailure);
        assert!(report.retryable);
        assert!(report.message.unwrap().contains("engine crashed"));

        let report = SolveReport::from_outcome(
            "c.json",
            Err(FlowError::ModelConstruction("duplicate node id 'x'".into())),
        );
        assert_eq!(report.status, ReportStatus::InvalidRequest);
        assert!(!report.retryable);
    }
}
