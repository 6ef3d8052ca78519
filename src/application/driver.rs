// Solver driver: build → solve → interpret termination → extract

use tracing::{debug, info, instrument, warn};

use super::extract::extract_solution;
use crate::domain::{
    FlowError, LpEngine, Network, ObjectiveMode, Result, SolveResult, SolverConfig, Termination,
};
use crate::model::{build_model, LpModel};
use crate::solver::EngineFactory;

/// Solve `network` under `objective` with a fresh engine for `config.backend`.
///
/// Blocking; no state survives the call.
#[instrument(
    skip_all,
    fields(
        objective = %objective,
        backend = %config.backend,
        nodes = network.num_nodes(),
        arcs = network.num_arcs()
    )
)]
pub fn solve(
    network: &Network,
    objective: &ObjectiveMode,
    config: &SolverConfig,
) -> Result<SolveResult> {
    let engine = EngineFactory::create(config.backend)?;
    solve_with_engine(network, objective, config, engine.as_ref())
}

/// Same as [`solve`] with a caller-supplied engine.
pub fn solve_with_engine(
    network: &Network,
    objective: &ObjectiveMode,
    config: &SolverConfig,
    engine: &dyn LpEngine,
) -> Result<SolveResult> {
    let model = build_model(network, objective)?;
    solve_model(network, &model, objective, config, engine)
}

/// Run `engine` on an already built model and extract the result.
pub fn solve_model(
    network: &Network,
    model: &LpModel,
    objective: &ObjectiveMode,
    config: &SolverConfig,
    engine: &dyn LpEngine,
) -> Result<SolveResult> {
    if let Some(row) = model.trivially_violated_row() {
        debug!(row = %row.name, "row has no terms and cannot hold");
        return Err(FlowError::Infeasible(format!(
            "{} cannot be met: no arc feeds it",
            row.name
        )));
    }

    if model.is_empty() {
        debug!("model has no columns, skipping the engine");
        return extract_solution(network, model, objective, &[], config);
    }

    engine.validate(model)?;

    let solution = engine.solve(model, config);
    let statistics = solution.statistics;

    match solution.termination {
        Termination::Optimal => {
            let result = extract_solution(network, model, objective, &solution.column_values, config)?
                .with_statistics(statistics);
            info!(
                objective_value = result.objective_value,
                engine = engine.name(),
                solve_time_ms = result.statistics.solve_time_ms,
                "optimal flow found"
            );
            Ok(result)
        }
        Termination::Infeasible => {
            debug!(engine = engine.name(), "model is infeasible");
            Err(FlowError::Infeasible(
                "no flow satisfies every supply, demand and capacity constraint".to_string(),
            ))
        }
        Termination::Unbounded => {
            debug!(engine = engine.name(), "model is unbounded");
            Err(FlowError::Unbounded(
                "flow can grow without limit; look for unlimited capacities on a profitable path or cycle"
                    .to_string(),
            ))
        }
        Termination::TimeLimit => {
            warn!(engine = engine.name(), "engine reached its time limit");
            Err(FlowError::SolverFailure(format!(
                "{} reached its time limit",
                engine.name()
            )))
        }
        Termination::Failed(message) => {
            warn!(engine = engine.name(), %message, "engine failed");
            Err(FlowError::SolverFailure(message))
        }
    }
}
