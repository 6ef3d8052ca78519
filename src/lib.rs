// Domain layer: network model, configuration, results and errors
pub mod domain;

// LP model and the network-to-LP builder
pub mod model;

// Application layer: solve driver and result extraction
pub mod application;

// Engine adapters: concrete implementations of LpEngine
pub mod solver;

// Infrastructure layer: file input, async worker, reports
pub mod infrastructure;

#[cfg(feature = "cli")]
pub mod logging;

// Re-export commonly used types
pub use domain::{
    Arc, Capacity, FlowError, LimitKind, LpEngine, Network, Node, NodeKind, ObjectiveMode,
    Process, Sink, SolveResult, SolveStatus, SolverBackend, SolverConfig, Supply,
    TightConstraint,
};

pub use application::{solve, solve_with_engine};
pub use model::{build_model, LpModel};
pub use solver::{EngineFactory, GoodLpEngine};

pub use infrastructure::{solve_batch, solve_detached, SolveJob, SolveReport};
