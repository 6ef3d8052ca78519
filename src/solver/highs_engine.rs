// HiGHS adapter
// Translates an LpModel into a HiGHS RowProblem (columns first, then rows)

use crate::domain::{
    models::{SolverConfig, SolverStatistics},
    solver_service::{EngineSolution, LpEngine, Termination},
    value_objects::ConstraintType,
};
use crate::model::LpModel;
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsEngine;

impl HighsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LpEngine for HighsEngine {
    fn solve(&self, model: &LpModel, config: &SolverConfig) -> EngineSolution {
        let start_time = Instant::now();

        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(model.num_columns());

        for column in &model.columns {
            let upper = column.upper_bound.unwrap_or(f64::INFINITY);
            cols.push(pb.add_column(column.objective, 0.0..upper));
        }

        for row in &model.rows {
            let terms: Vec<_> = row
                .terms
                .iter()
                .filter(|(_, coefficient)| *coefficient != 0.0)
                .map(|(column, coefficient)| (cols[column.0], *coefficient))
                .collect();

            match row.constraint_type {
                ConstraintType::LessThanOrEqual => pb.add_row(..=row.bound, &terms),
                ConstraintType::Equal => pb.add_row(row.bound..=row.bound, &terms),
                ConstraintType::GreaterThanOrEqual => pb.add_row(row.bound.., &terms),
            }
        }

        let mut highs_model = pb.optimise(Sense::Maximise);
        if !config.verbose {
            highs_model.make_quiet();
        }
        if let Some(secs) = config.time_limit_secs {
            highs_model.set_option("time_limit", secs);
        }

        let solved = highs_model.solve();

        let statistics = SolverStatistics {
            solver_backend: self.name().to_string(),
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: model.num_columns() as u32,
            num_constraints: model.num_rows() as u32,
        };

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                EngineSolution::optimal(solved.get_solution().columns().to_vec())
            }
            // nothing to optimize: every column sits at its zero lower bound
            HighsModelStatus::ModelEmpty => EngineSolution::optimal(vec![0.0; model.num_columns()]),
            HighsModelStatus::Infeasible => EngineSolution::terminated(Termination::Infeasible),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                EngineSolution::terminated(Termination::Unbounded)
            }
            HighsModelStatus::ReachedTimeLimit => {
                EngineSolution::terminated(Termination::TimeLimit)
            }
            status => EngineSolution::terminated(Termination::Failed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        };

        solution.with_statistics(statistics)
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
