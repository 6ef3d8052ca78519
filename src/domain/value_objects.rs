// Domain value objects shared by the builder, the engines and the driver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper limit on a quantity: a finite bound or no limit at all.
///
/// Serialized as a plain number, with `null` (or an absent field) meaning
/// [`Capacity::Unlimited`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Capacity {
    Limited(f64),
    #[default]
    Unlimited,
}

impl Capacity {
    pub fn limited(value: f64) -> Self {
        Capacity::Limited(value)
    }

    /// The finite bound, if any.
    pub fn limit(&self) -> Option<f64> {
        match self {
            Capacity::Limited(value) => Some(*value),
            Capacity::Unlimited => None,
        }
    }
}

impl From<Option<f64>> for Capacity {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Capacity::Unlimited, Capacity::Limited)
    }
}

impl From<Capacity> for Option<f64> {
    fn from(value: Capacity) -> Self {
        value.limit()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Limited(value) => write!(f, "{}", value),
            Capacity::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Which linear expression the solve maximizes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    /// Sink revenue minus supply, transport and processing cost
    #[default]
    MaxProfit,
    /// Total flow delivered into all sinks
    MaxFlow,
    /// Flow delivered into a single sink
    MaxFlowTo { sink: String },
}

impl ObjectiveMode {
    pub fn max_flow_to(sink: impl Into<String>) -> Self {
        ObjectiveMode::MaxFlowTo { sink: sink.into() }
    }

    /// Flow objectives ignore every cost/revenue field and sink demand caps.
    pub fn is_flow(&self) -> bool {
        !matches!(self, ObjectiveMode::MaxProfit)
    }
}

impl fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveMode::MaxProfit => write!(f, "max_profit"),
            ObjectiveMode::MaxFlow => write!(f, "max_flow"),
            ObjectiveMode::MaxFlowTo { sink } => write!(f, "max_flow_to({})", sink),
        }
    }
}

/// Type of a row comparison in the LP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// Whether `lhs` satisfies the comparison against `rhs` within `tolerance`.
    pub fn holds(&self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            ConstraintType::LessThanOrEqual => lhs <= rhs + tolerance,
            ConstraintType::Equal => (lhs - rhs).abs() <= tolerance,
            ConstraintType::GreaterThanOrEqual => lhs >= rhs - tolerance,
        }
    }
}

/// Terminal status reported to the boundary layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Found optimal solution
    Optimal,
    /// Network constraints admit no valid flow
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Engine failed to return a definitive status
    SolverFailure,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::SolverFailure => write!(f, "Solver Failure"),
        }
    }
}

/// LP engine to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Pure Rust simplex shipped with good_lp
    #[default]
    #[serde(rename = "microlp")]
    MicroLp,
    /// COIN-OR CBC through good_lp
    CoinCbc,
    /// HiGHS
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::MicroLp => write!(f, "microlp"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_reads_null_as_unlimited() {
        let caps: Vec<Capacity> = serde_json::from_str("[3.5, null]").unwrap();
        assert_eq!(caps, vec![Capacity::Limited(3.5), Capacity::Unlimited]);
        assert_eq!(serde_json::to_string(&caps).unwrap(), "[3.5,null]");
    }

    #[test]
    fn objective_mode_parses_snake_case() {
        let mode: ObjectiveMode = serde_json::from_str("\"max_flow\"").unwrap();
        assert_eq!(mode, ObjectiveMode::MaxFlow);

        let mode: ObjectiveMode =
            serde_json::from_str(r#"{"max_flow_to": {"sink": "market"}}"#).unwrap();
        assert_eq!(mode, ObjectiveMode::max_flow_to("market"));
        assert!(mode.is_flow());
        assert!(!ObjectiveMode::MaxProfit.is_flow());
    }

    #[test]
    fn constraint_type_tolerance() {
        assert!(ConstraintType::LessThanOrEqual.holds(1.0 + 1e-9, 1.0, 1e-6));
        assert!(!ConstraintType::GreaterThanOrEqual.holds(0.5, 1.0, 1e-6));
        assert!(ConstraintType::Equal.holds(2.0, 2.0, 0.0));
    }
}
