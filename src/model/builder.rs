//! Translation of a [`Network`] into an [`LpModel`].
//!
//! Columns: one flow column per arc (declaration order), then one run column
//! per process node (node order). Rows, per node in declaration order:
//!
//! - supply with a finite `available`: `Σ out ≤ available`
//! - sink: `Σ in ≤ demand` (profit mode, finite demand) and `Σ in ≥ required`
//! - process: `Σ in − run = 0` and `Σ out − ratio·run = 0`
//!
//! Process capacity bounds the run column, i.e. the intake of the node.

use std::collections::HashMap;

use tracing::debug;

use super::lp::{Column, ColumnIndex, ColumnOwner, LpModel, Row, RowOwner};
use crate::domain::{
    Arc, ArcIndex, Capacity, ConstraintType, FlowError, Network, NodeIndex, NodeKind,
    ObjectiveMode, Result,
};

/// Build the LP for `network` under `objective`.
///
/// Deterministic: the same network always yields the same column and row
/// order. A network with no supply or no sink produces a well-formed model
/// whose optimum is zero.
pub fn build_model(network: &Network, objective: &ObjectiveMode) -> Result<LpModel> {
    let topology = Topology::new(network)?;
    check_quantities(network)?;
    check_objective(network, objective, &topology)?;

    let mut model = LpModel::default();

    let arcs = network.arcs().iter().zip(&topology.endpoints);
    for (i, (arc, &(from, to))) in arcs.enumerate() {
        let column = ColumnIndex(model.columns.len());
        model.columns.push(Column {
            owner: ColumnOwner::Arc(ArcIndex(i)),
            upper_bound: arc.capacity.limit(),
            objective: arc_coefficient(network, from, to, arc, objective),
            name: format!("flow[{}]", arc.id),
        });
        model.index.push_arc(column, from, to);
    }

    for (i, node) in network.nodes().iter().enumerate() {
        if let NodeKind::Process(process) = &node.kind {
            let column = ColumnIndex(model.columns.len());
            let coefficient = match objective {
                ObjectiveMode::MaxProfit => -process.unit_cost,
                _ => 0.0,
            };
            model.columns.push(Column {
                owner: ColumnOwner::Process(NodeIndex(i)),
                upper_bound: process.capacity.limit(),
                objective: coefficient,
                name: format!("run[{}]", node.id),
            });
            model.index.push_process(NodeIndex(i), column);
        }
    }

    for (i, node) in network.nodes().iter().enumerate() {
        let index = NodeIndex(i);
        let outflow = unit_terms(&model, &topology.outgoing[i]);
        let inflow = unit_terms(&model, &topology.incoming[i]);

        match &node.kind {
            NodeKind::Supply(supply) => {
                if let Some(available) = supply.available.limit() {
                    push_row(
                        &mut model,
                        Row {
                            owner: RowOwner::SupplyAvailable(index),
                            constraint_type: ConstraintType::LessThanOrEqual,
                            terms: outflow,
                            bound: available,
                            name: format!("supply[{}]", node.id),
                        },
                    );
                }
            }
            NodeKind::Sink(sink) => {
                if let (false, Some(demand)) = (objective.is_flow(), sink.demand.limit()) {
                    push_row(
                        &mut model,
                        Row {
                            owner: RowOwner::SinkDemand(index),
                            constraint_type: ConstraintType::LessThanOrEqual,
                            terms: inflow.clone(),
                            bound: demand,
                            name: format!("demand[{}]", node.id),
                        },
                    );
                }
                if sink.required > 0.0 {
                    push_row(
                        &mut model,
                        Row {
                            owner: RowOwner::SinkRequired(index),
                            constraint_type: ConstraintType::GreaterThanOrEqual,
                            terms: inflow,
                            bound: sink.required,
                            name: format!("required[{}]", node.id),
                        },
                    );
                }
            }
            NodeKind::Process(process) => {
                let Some(run) = model.index.process_column(index) else {
                    return Err(FlowError::ModelConstruction(format!(
                        "process node '{}' has no run column",
                        node.id
                    )));
                };

                let mut intake = inflow;
                intake.push((run, -1.0));
                push_row(
                    &mut model,
                    Row {
                        owner: RowOwner::ProcessIntake(index),
                        constraint_type: ConstraintType::Equal,
                        terms: intake,
                        bound: 0.0,
                        name: format!("intake[{}]", node.id),
                    },
                );

                let mut output = outflow;
                output.push((run, -process.ratio));
                push_row(
                    &mut model,
                    Row {
                        owner: RowOwner::ProcessOutput(index),
                        constraint_type: ConstraintType::Equal,
                        terms: output,
                        bound: 0.0,
                        name: format!("output[{}]", node.id),
                    },
                );
            }
        }
    }

    debug!(
        objective = %objective,
        columns = model.num_columns(),
        rows = model.num_rows(),
        "built LP model"
    );

    Ok(model)
}

/// Node lookup, arc endpoints and adjacency, in arc declaration order
struct Topology<'a> {
    lookup: HashMap<&'a str, NodeIndex>,
    endpoints: Vec<(NodeIndex, NodeIndex)>,
    outgoing: Vec<Vec<ArcIndex>>,
    incoming: Vec<Vec<ArcIndex>>,
}

impl<'a> Topology<'a> {
    fn new(network: &'a Network) -> Result<Self> {
        let mut errors = Vec::new();
        let mut lookup = HashMap::with_capacity(network.num_nodes());

        for (i, node) in network.nodes().iter().enumerate() {
            if node.id.is_empty() {
                errors.push(format!("node {} has an empty id", i));
            }
            if lookup.insert(node.id.as_str(), NodeIndex(i)).is_some() {
                errors.push(format!("duplicate node id '{}'", node.id));
            }
        }

        let mut arc_ids = HashMap::with_capacity(network.num_arcs());
        let mut endpoints = Vec::with_capacity(network.num_arcs());
        let mut outgoing = vec![Vec::new(); network.num_nodes()];
        let mut incoming = vec![Vec::new(); network.num_nodes()];

        for (i, arc) in network.arcs().iter().enumerate() {
            if arc_ids.insert(arc.id.as_str(), i).is_some() {
                errors.push(format!("duplicate arc id '{}'", arc.id));
            }

            let from = lookup.get(arc.from.as_str()).copied();
            let to = lookup.get(arc.to.as_str()).copied();
            if from.is_none() {
                errors.push(format!("arc '{}' references missing node '{}'", arc.id, arc.from));
            }
            if to.is_none() {
                errors.push(format!("arc '{}' references missing node '{}'", arc.id, arc.to));
            }
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };

            if from == to {
                errors.push(format!("arc '{}' is a self-loop on '{}'", arc.id, arc.from));
                continue;
            }
            if network.node(from).is_sink() {
                errors.push(format!("arc '{}' leaves sink node '{}'", arc.id, arc.from));
            }
            if network.node(to).is_supply() {
                errors.push(format!("arc '{}' enters supply node '{}'", arc.id, arc.to));
            }

            endpoints.push((from, to));
            outgoing[from.0].push(ArcIndex(i));
            incoming[to.0].push(ArcIndex(i));
        }

        if errors.is_empty() {
            Ok(Self {
                lookup,
                endpoints,
                outgoing,
                incoming,
            })
        } else {
            Err(FlowError::ModelConstruction(errors.join("; ")))
        }
    }

    fn kind_of(&self, network: &'a Network, id: &str) -> Option<&'a NodeKind> {
        self.lookup.get(id).map(|i| &network.node(*i).kind)
    }
}

fn check_quantities(network: &Network) -> Result<()> {
    let mut errors = Vec::new();

    let mut check_capacity = |what: &str, id: &str, capacity: &Capacity| {
        if let Some(limit) = capacity.limit() {
            if !limit.is_finite() || limit < 0.0 {
                errors.push(format!("{} '{}' has invalid limit {}", what, id, limit));
            }
        }
    };

    for node in network.nodes() {
        match &node.kind {
            NodeKind::Supply(supply) => check_capacity("supply", &node.id, &supply.available),
            NodeKind::Process(process) => check_capacity("process", &node.id, &process.capacity),
            NodeKind::Sink(sink) => check_capacity("sink", &node.id, &sink.demand),
        }
    }
    for arc in network.arcs() {
        check_capacity("arc", &arc.id, &arc.capacity);
    }

    for node in network.nodes() {
        match &node.kind {
            NodeKind::Supply(supply) => {
                if !supply.unit_cost.is_finite() {
                    errors.push(format!("supply '{}' has unit cost {}", node.id, supply.unit_cost));
                }
            }
            NodeKind::Process(process) => {
                if !process.ratio.is_finite() || process.ratio <= 0.0 {
                    errors.push(format!(
                        "process '{}' has conversion ratio {}",
                        node.id, process.ratio
                    ));
                }
                if !process.unit_cost.is_finite() {
                    errors.push(format!(
                        "process '{}' has unit cost {}",
                        node.id, process.unit_cost
                    ));
                }
            }
            NodeKind::Sink(sink) => {
                if !sink.unit_revenue.is_finite() {
                    errors.push(format!(
                        "sink '{}' has unit revenue {}",
                        node.id, sink.unit_revenue
                    ));
                }
                if !sink.required.is_finite() || sink.required < 0.0 {
                    errors.push(format!(
                        "sink '{}' has required quantity {}",
                        node.id, sink.required
                    ));
                } else if let Some(demand) = sink.demand.limit() {
                    if sink.required > demand {
                        errors.push(format!(
                            "sink '{}' requires {} but accepts at most {}",
                            node.id, sink.required, demand
                        ));
                    }
                }
            }
        }
    }
    for arc in network.arcs() {
        if !arc.unit_cost.is_finite() {
            errors.push(format!("arc '{}' has unit cost {}", arc.id, arc.unit_cost));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FlowError::ModelConstruction(errors.join("; ")))
    }
}

fn check_objective(network: &Network, objective: &ObjectiveMode, topology: &Topology) -> Result<()> {
    if let ObjectiveMode::MaxFlowTo { sink } = objective {
        match topology.kind_of(network, sink) {
            Some(NodeKind::Sink(_)) => {}
            Some(kind) => {
                return Err(FlowError::ModelConstruction(format!(
                    "objective target '{}' is a {} node, not a sink",
                    sink,
                    kind.label()
                )))
            }
            None => {
                return Err(FlowError::ModelConstruction(format!(
                    "objective target '{}' does not exist",
                    sink
                )))
            }
        }
    }
    Ok(())
}

fn arc_coefficient(
    network: &Network,
    from: NodeIndex,
    to: NodeIndex,
    arc: &Arc,
    objective: &ObjectiveMode,
) -> f64 {
    let from = &network.node(from).kind;
    let to = &network.node(to).kind;

    match objective {
        ObjectiveMode::MaxProfit => {
            let revenue = match to {
                NodeKind::Sink(sink) => sink.unit_revenue,
                _ => 0.0,
            };
            let procurement = match from {
                NodeKind::Supply(supply) => supply.unit_cost,
                _ => 0.0,
            };
            revenue - procurement - arc.unit_cost
        }
        ObjectiveMode::MaxFlow => match to {
            NodeKind::Sink(_) => 1.0,
            _ => 0.0,
        },
        ObjectiveMode::MaxFlowTo { sink } => {
            if arc.to == *sink {
                1.0
            } else {
                0.0
            }
        }
    }
}

fn unit_terms(model: &LpModel, arcs: &[ArcIndex]) -> Vec<(ColumnIndex, f64)> {
    arcs.iter()
        .map(|arc| (model.index.arc_column(*arc), 1.0))
        .collect()
}

/// Rows without terms are dropped when zero satisfies them and kept otherwise,
/// so the driver can report the model as infeasible.
fn push_row(model: &mut LpModel, row: Row) {
    if row.terms.is_empty() && !row.is_violated_when_empty() {
        return;
    }
    model.rows.push(row);
}
