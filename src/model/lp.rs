// In-memory linear program emitted by the builder and consumed by the engines

use crate::domain::{ArcIndex, ConstraintType, NodeIndex};

/// Position of a column in [`LpModel::columns`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(pub usize);

/// What a column stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOwner {
    /// Flow on an arc
    Arc(ArcIndex),
    /// Run level (intake) of a process node
    Process(NodeIndex),
}

/// Continuous decision variable, lower bound fixed at 0
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub owner: ColumnOwner,
    pub upper_bound: Option<f64>,
    pub objective: f64,
    pub name: String,
}

/// Which node-level rule a row encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOwner {
    SupplyAvailable(NodeIndex),
    SinkDemand(NodeIndex),
    SinkRequired(NodeIndex),
    ProcessIntake(NodeIndex),
    ProcessOutput(NodeIndex),
}

/// Linear row `Σ coefficient·column  (≤ | = | ≥)  bound`
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub owner: RowOwner,
    pub constraint_type: ConstraintType,
    pub terms: Vec<(ColumnIndex, f64)>,
    pub bound: f64,
    pub name: String,
}

impl Row {
    /// A row without terms that the zero vector violates
    pub fn is_violated_when_empty(&self) -> bool {
        self.terms.is_empty() && !self.constraint_type.holds(0.0, self.bound, 0.0)
    }
}

/// Maps columns back to the arcs and process nodes they belong to, and arcs
/// to their resolved endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelIndex {
    arc_columns: Vec<ColumnIndex>,
    arc_endpoints: Vec<(NodeIndex, NodeIndex)>,
    run_columns: Vec<Option<ColumnIndex>>,
}

impl ModelIndex {
    pub(crate) fn push_arc(&mut self, column: ColumnIndex, from: NodeIndex, to: NodeIndex) {
        self.arc_columns.push(column);
        self.arc_endpoints.push((from, to));
    }

    pub(crate) fn push_process(&mut self, node: NodeIndex, column: ColumnIndex) {
        if self.run_columns.len() <= node.0 {
            self.run_columns.resize(node.0 + 1, None);
        }
        self.run_columns[node.0] = Some(column);
    }

    /// Column of each arc, in arc order
    pub fn arc_columns(&self) -> impl Iterator<Item = (ArcIndex, ColumnIndex)> + '_ {
        self.arc_columns
            .iter()
            .enumerate()
            .map(|(i, column)| (ArcIndex(i), *column))
    }

    pub fn arc_column(&self, arc: ArcIndex) -> ColumnIndex {
        self.arc_columns[arc.0]
    }

    /// `(from, to)` node of each arc, in arc order
    pub fn arc_endpoints(&self) -> impl Iterator<Item = (ArcIndex, NodeIndex, NodeIndex)> + '_ {
        self.arc_endpoints
            .iter()
            .enumerate()
            .map(|(i, (from, to))| (ArcIndex(i), *from, *to))
    }

    /// Run column of each process node, in node order
    pub fn process_columns(&self) -> impl Iterator<Item = (NodeIndex, ColumnIndex)> + '_ {
        self.run_columns
            .iter()
            .enumerate()
            .filter_map(|(i, column)| column.map(|column| (NodeIndex(i), column)))
    }

    pub fn process_column(&self, node: NodeIndex) -> Option<ColumnIndex> {
        self.run_columns.get(node.0).copied().flatten()
    }
}

/// Linear program to maximize
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub index: ModelIndex,
}

impl LpModel {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Objective value of a column assignment
    pub fn objective_value(&self, column_values: &[f64]) -> f64 {
        self.columns
            .iter()
            .zip(column_values)
            .map(|(column, value)| column.objective * value)
            .sum()
    }

    /// First row that no assignment can satisfy because it has no terms
    pub fn trivially_violated_row(&self) -> Option<&Row> {
        self.rows.iter().find(|row| row.is_violated_when_empty())
    }
}
