//! Turns raw engine column values into a [`SolveResult`].
//!
//! Values within `zero_tolerance` of zero are clamped to exactly zero before
//! anything else reads them. Lookups go through the [`ModelIndex`] column
//! positions and resolved arc endpoints; arc and node ids are only used as
//! result keys.
//!
//! [`ModelIndex`]: crate::model::ModelIndex

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{
    FlowError, LimitKind, Network, NodeKind, ObjectiveMode, Result, SolveResult, SolverConfig,
    TightConstraint,
};
use crate::model::LpModel;

pub fn extract_solution(
    network: &Network,
    model: &LpModel,
    objective: &ObjectiveMode,
    column_values: &[f64],
    config: &SolverConfig,
) -> Result<SolveResult> {
    if column_values.len() != model.num_columns() {
        return Err(FlowError::SolverFailure(format!(
            "engine returned {} values for {} columns",
            column_values.len(),
            model.num_columns()
        )));
    }

    let mut result = SolveResult::optimal(config.clamp(model.objective_value(column_values)));

    let mut arc_flows = vec![0.0; network.num_arcs()];
    for (arc, column) in model.index.arc_columns() {
        arc_flows[arc.0] = config.clamp(column_values[column.0]);
    }
    let mut runs = vec![None; network.num_nodes()];
    for (node, column) in model.index.process_columns() {
        runs[node.0] = Some(config.clamp(column_values[column.0]));
    }

    let mut inflow = vec![0.0; network.num_nodes()];
    let mut outflow = vec![0.0; network.num_nodes()];
    for (arc, from, to) in model.index.arc_endpoints() {
        outflow[from.0] += arc_flows[arc.0];
        inflow[to.0] += arc_flows[arc.0];
    }

    let mut tight = Vec::new();
    let mut note_limit = |kind: LimitKind, id: &str, limit: Option<f64>, used: f64| {
        if let Some(limit) = limit {
            let slack = limit - used;
            if slack <= config.tight_tolerance {
                tight.push(TightConstraint {
                    kind,
                    id: id.to_string(),
                    slack,
                });
            }
        }
    };

    for (arc, flow) in network.arcs().iter().zip(&arc_flows) {
        result.flows.insert(arc.id.clone(), *flow);
        note_limit(LimitKind::ArcCapacity, &arc.id, arc.capacity.limit(), *flow);
    }

    for (i, node) in network.nodes().iter().enumerate() {
        match &node.kind {
            NodeKind::Supply(supply) => {
                note_limit(
                    LimitKind::SupplyAvailable,
                    &node.id,
                    supply.available.limit(),
                    outflow[i],
                );
            }
            NodeKind::Process(process) => {
                let run = runs[i].unwrap_or(0.0);
                result.process_runs.insert(node.id.clone(), run);
                note_limit(
                    LimitKind::ProcessCapacity,
                    &node.id,
                    process.capacity.limit(),
                    run,
                );
            }
            NodeKind::Sink(sink) => {
                let delivered = config.clamp(inflow[i]);
                result.sink_delivered.insert(node.id.clone(), delivered);
                if !objective.is_flow() {
                    note_limit(LimitKind::SinkDemand, &node.id, sink.demand.limit(), delivered);
                }
            }
        }
    }

    tight.sort_by(|a, b| {
        a.slack
            .partial_cmp(&b.slack)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.id.cmp(&b.id))
    });
    result.tight_constraints = tight;

    Ok(result)
}

/// Flow balance per process node: `(inflow, outflow)` keyed by node id.
///
/// Used to audit conservation on a finished result.
pub fn process_balances(network: &Network, result: &SolveResult) -> BTreeMap<String, (f64, f64)> {
    let mut balances: BTreeMap<String, (f64, f64)> = network
        .nodes()
        .iter()
        .filter(|node| matches!(node.kind, NodeKind::Process(_)))
        .map(|node| (node.id.clone(), (0.0, 0.0)))
        .collect();

    for arc in network.arcs() {
        let flow = result.flow(&arc.id).unwrap_or(0.0);
        if let Some(balance) = balances.get_mut(&arc.to) {
            balance.0 += flow;
        }
        if let Some(balance) = balances.get_mut(&arc.from) {
            balance.1 += flow;
        }
    }
    balances
}
