// Domain service interface for LP engines, plus the error taxonomy of a solve

use super::models::{SolverConfig, SolverStatistics};
use super::value_objects::SolveStatus;
use crate::model::LpModel;

/// Error types for a network solve
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    /// Malformed network reached the builder; the caller broke its contract
    #[error("Model construction failed: {0}")]
    ModelConstruction(String),

    #[error("Network is infeasible: {0}")]
    Infeasible(String),

    #[error("Objective is unbounded: {0}")]
    Unbounded(String),

    /// Transient engine fault; the same request may be retried unchanged
    #[error("Solver failure: {0}")]
    SolverFailure(String),

    #[error("Solver not available: {0}")]
    EngineUnavailable(String),
}

impl FlowError {
    /// Solve status this error stands for; `None` when the request itself
    /// was unusable and no solve outcome exists
    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            FlowError::Infeasible(_) => Some(SolveStatus::Infeasible),
            FlowError::Unbounded(_) => Some(SolveStatus::Unbounded),
            FlowError::SolverFailure(_) => Some(SolveStatus::SolverFailure),
            FlowError::ModelConstruction(_) | FlowError::EngineUnavailable(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::SolverFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;

/// How an engine run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    Optimal,
    Infeasible,
    Unbounded,
    TimeLimit,
    Failed(String),
}

/// Raw engine output, indexed like [`LpModel::columns`]
#[derive(Debug, Clone)]
pub struct EngineSolution {
    pub termination: Termination,
    pub column_values: Vec<f64>,
    pub statistics: SolverStatistics,
}

impl EngineSolution {
    pub fn optimal(column_values: Vec<f64>) -> Self {
        Self {
            termination: Termination::Optimal,
            column_values,
            statistics: SolverStatistics::default(),
        }
    }

    pub fn terminated(termination: Termination) -> Self {
        Self {
            termination,
            column_values: Vec::new(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }
}

/// Contract every LP engine adapter follows.
///
/// Engines are created fresh for each solve and dropped afterwards, so an
/// implementation may keep per-solve workspace without any locking.
pub trait LpEngine: Send + Sync {
    /// Solve a model, maximizing its objective
    fn solve(&self, model: &LpModel, config: &SolverConfig) -> EngineSolution;

    /// Check a model before handing it to the engine
    fn validate(&self, model: &LpModel) -> Result<()> {
        let mut errors = Vec::new();
        let num_columns = model.num_columns();

        for (i, column) in model.columns.iter().enumerate() {
            if !column.objective.is_finite() {
                errors.push(format!("column {} has objective coefficient {}", i, column.objective));
            }
            if let Some(upper) = column.upper_bound {
                if !upper.is_finite() || upper < 0.0 {
                    errors.push(format!("column {} has upper bound {}", i, upper));
                }
            }
        }

        for (i, row) in model.rows.iter().enumerate() {
            if !row.bound.is_finite() {
                errors.push(format!("row {} ({}) has bound {}", i, row.name, row.bound));
            }
            for (column, coefficient) in &row.terms {
                if column.0 >= num_columns {
                    errors.push(format!(
                        "row {} ({}) references column {} but model has {} columns",
                        i, row.name, column.0, num_columns
                    ));
                }
                if !coefficient.is_finite() {
                    errors.push(format!(
                        "row {} ({}) has coefficient {}",
                        i, row.name, coefficient
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FlowError::ModelConstruction(errors.join("; ")))
        }
    }

    /// Get the name of this engine
    fn name(&self) -> &str;
}
