use super::value_objects::{SolveStatus, SolverBackend};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Configuration threaded into every build/solve call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Values within this distance of zero are reported as exactly zero
    pub zero_tolerance: f64,
    /// Capacity limits with at most this much slack are reported as tight
    pub tight_tolerance: f64,
    /// Wall-clock limit for a single solve, in seconds
    pub time_limit_secs: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::MicroLp,
            zero_tolerance: 1e-9,
            tight_tolerance: 1e-6,
            time_limit_secs: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64)
    }

    /// Clamp solver noise around zero to exactly zero.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.abs() <= self.zero_tolerance {
            0.0
        } else {
            value
        }
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStatistics {
    pub solver_backend: String,
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

/// Which capacity limit a [`TightConstraint`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    ArcCapacity,
    SupplyAvailable,
    SinkDemand,
    ProcessCapacity,
}

impl LimitKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            LimitKind::ArcCapacity => "arc_capacity",
            LimitKind::SupplyAvailable => "supply_available",
            LimitKind::SinkDemand => "sink_demand",
            LimitKind::ProcessCapacity => "process_capacity",
        }
    }
}

/// A capacity limit that binds in the optimal solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TightConstraint {
    pub kind: LimitKind,
    /// Arc or node id the limit belongs to
    pub id: String,
    pub slack: f64,
}

impl TightConstraint {
    /// `"<kind>:<id>"`, e.g. `arc_capacity:e1`
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind.prefix(), self.id)
    }
}

/// Optimal flow assignment for one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub objective_value: f64,
    pub flows: BTreeMap<String, f64>,
    pub process_runs: BTreeMap<String, f64>,
    pub sink_delivered: BTreeMap<String, f64>,
    pub tight_constraints: Vec<TightConstraint>,
    pub statistics: SolverStatistics,
}

impl SolveResult {
    pub fn optimal(objective_value: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value,
            flows: BTreeMap::new(),
            process_runs: BTreeMap::new(),
            sink_delivered: BTreeMap::new(),
            tight_constraints: Vec::new(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn flow(&self, arc_id: &str) -> Option<f64> {
        self.flows.get(arc_id).copied()
    }

    pub fn process_run(&self, node_id: &str) -> Option<f64> {
        self.process_runs.get(node_id).copied()
    }

    pub fn delivered(&self, sink_id: &str) -> Option<f64> {
        self.sink_delivered.get(sink_id).copied()
    }

    pub fn is_tight(&self, kind: LimitKind, id: &str) -> bool {
        self.tight_constraints
            .iter()
            .any(|t| t.kind == kind && t.id == id)
    }
}
