// Production network: tagged nodes, directed arcs and the immutable graph

use super::value_objects::Capacity;
use serde::{Deserialize, Serialize};

/// Position of a node in [`Network::nodes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// Position of an arc in [`Network::arcs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcIndex(pub usize);

/// Raw material entering the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub available: Capacity,
    #[serde(default)]
    pub unit_cost: f64,
}

impl Supply {
    pub fn new(available: Capacity) -> Self {
        Self {
            available,
            unit_cost: 0.0,
        }
    }

    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }
}

/// Conversion step: every unit taken in yields `ratio` units out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub ratio: f64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub capacity: Capacity,
}

impl Process {
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            unit_cost: 0.0,
            capacity: Capacity::Unlimited,
        }
    }

    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Final consumer of flow
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sink {
    #[serde(default)]
    pub demand: Capacity,
    /// Firm quantity that has to be delivered
    #[serde(default)]
    pub required: f64,
    #[serde(default)]
    pub unit_revenue: f64,
}

impl Sink {
    pub fn new(demand: Capacity) -> Self {
        Self {
            demand,
            required: 0.0,
            unit_revenue: 0.0,
        }
    }

    pub fn with_unit_revenue(mut self, unit_revenue: f64) -> Self {
        self.unit_revenue = unit_revenue;
        self
    }

    pub fn with_required(mut self, required: f64) -> Self {
        self.required = required;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Supply(Supply),
    Process(Process),
    Sink(Sink),
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Supply(_) => "supply",
            NodeKind::Process(_) => "process",
            NodeKind::Sink(_) => "sink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
        }
    }

    pub fn supply(id: impl Into<String>, supply: Supply) -> Self {
        Self::new(id, NodeKind::Supply(supply))
    }

    pub fn process(id: impl Into<String>, process: Process) -> Self {
        Self::new(id, NodeKind::Process(process))
    }

    pub fn sink(id: impl Into<String>, sink: Sink) -> Self {
        Self::new(id, NodeKind::Sink(sink))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_supply(&self) -> bool {
        matches!(self.kind, NodeKind::Supply(_))
    }

    pub fn is_sink(&self) -> bool {
        matches!(self.kind, NodeKind::Sink(_))
    }
}

/// Directed connection carrying flow from `from` to `to`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub unit_cost: f64,
}

impl Arc {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            capacity: Capacity::Unlimited,
            unit_cost: 0.0,
        }
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }
}

/// Complete production network handed to the builder.
///
/// Parallel arcs between the same ordered pair are allowed; each one keeps its
/// own flow and their capacities add up. Declaration order is preserved and
/// drives the column/row order of the LP.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    arcs: Vec<Arc>,
}

impl Network {
    pub fn new(nodes: Vec<Node>, arcs: Vec<Arc>) -> Self {
        Self { nodes, arcs }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub fn find_node(&self, id: &str) -> Option<(NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.id == id)
            .map(|(i, node)| (NodeIndex(i), node))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn num_processes(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Process(_)))
            .count()
    }
}
