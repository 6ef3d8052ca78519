// Runs blocking solves on tokio's blocking pool, one engine per job

use futures::future::join_all;
use tokio::task;
use tracing::{debug, warn};

use crate::application::solve;
use crate::domain::{FlowError, Network, ObjectiveMode, Result, SolveResult, SolverConfig};

/// One network to solve, labelled for reporting
#[derive(Debug, Clone)]
pub struct SolveJob {
    pub label: String,
    pub network: Network,
    pub objective: ObjectiveMode,
}

impl SolveJob {
    pub fn new(label: impl Into<String>, network: Network, objective: ObjectiveMode) -> Self {
        Self {
            label: label.into(),
            network,
            objective,
        }
    }
}

/// Solve on the blocking pool without stalling the async runtime.
///
/// With `config.time_limit_secs` set, the wait is abandoned after that limit
/// and a [`FlowError::SolverFailure`] is returned. The abandoned solve keeps
/// running on its blocking thread until the engine returns; its result is
/// dropped.
pub async fn solve_detached(
    network: Network,
    objective: ObjectiveMode,
    config: SolverConfig,
) -> Result<SolveResult> {
    let limit = config.time_limit();
    let handle = task::spawn_blocking(move || solve(&network, &objective, &config));

    let joined = match limit {
        Some(limit) => match tokio::time::timeout(limit, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(?limit, "solve exceeded its time limit, abandoning it");
                return Err(FlowError::SolverFailure(format!(
                    "solve did not finish within {:?}",
                    limit
                )));
            }
        },
        None => handle.await,
    };

    joined.map_err(|e| FlowError::SolverFailure(format!("solve task did not complete: {}", e)))?
}

/// Solve every job concurrently; results come back in job order.
pub async fn solve_batch(
    jobs: Vec<SolveJob>,
    config: &SolverConfig,
) -> Vec<(String, Result<SolveResult>)> {
    debug!(jobs = jobs.len(), "starting solve batch");

    let solves = jobs.into_iter().map(|job| {
        let config = config.clone();
        async move {
            let outcome = solve_detached(job.network, job.objective, config).await;
            (job.label, outcome)
        }
    });

    join_all(solves).await
}
