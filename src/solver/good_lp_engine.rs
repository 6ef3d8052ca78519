// good_lp adapter
// Translates an LpModel into good_lp variables/constraints and runs one of the
// good_lp solver backends on it

use crate::domain::{
    models::{SolverConfig, SolverStatistics},
    solver_service::{EngineSolution, LpEngine, Termination},
    value_objects::ConstraintType,
};
use crate::model::LpModel;
use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution as GoodLpSolutionTrait,
    SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    MicroLp,
    #[cfg(feature = "cbc")]
    CoinCbc,
}

pub struct GoodLpEngine {
    backend: Backend,
}

impl GoodLpEngine {
    /// Pure Rust simplex, always available
    pub fn microlp() -> Self {
        Self {
            backend: Backend::MicroLp,
        }
    }

    #[cfg(feature = "cbc")]
    pub fn coin_cbc() -> Self {
        Self {
            backend: Backend::CoinCbc,
        }
    }
}

impl Default for GoodLpEngine {
    fn default() -> Self {
        Self::microlp()
    }
}

impl LpEngine for GoodLpEngine {
    #[cfg_attr(not(feature = "cbc"), allow(unused_variables))]
    fn solve(&self, model: &LpModel, config: &SolverConfig) -> EngineSolution {
        let start_time = Instant::now();

        let mut vars = ProblemVariables::new();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(model.num_columns());

        for column in &model.columns {
            let definition = match column.upper_bound {
                Some(upper) => variable().min(0.0).max(upper),
                None => variable().min(0.0),
            };
            lp_variables.push(vars.add(definition));
        }

        let mut objective: Expression = 0.into();
        for (column, &var) in model.columns.iter().zip(&lp_variables) {
            if column.objective != 0.0 {
                objective += column.objective * var;
            }
        }

        let problem = vars.maximise(objective);
        let (termination, column_values) = match self.backend {
            Backend::MicroLp => run(
                problem.using(good_lp::solvers::microlp::microlp),
                model,
                &lp_variables,
            ),
            #[cfg(feature = "cbc")]
            Backend::CoinCbc => {
                let mut lp_model = problem.using(good_lp::solvers::coin_cbc::coin_cbc);
                if !config.verbose {
                    lp_model.set_parameter("log", "0");
                }
                if let Some(secs) = config.time_limit_secs {
                    lp_model.set_parameter("seconds", &secs.to_string());
                }
                run(lp_model, model, &lp_variables)
            }
        };

        let statistics = SolverStatistics {
            solver_backend: self.name().to_string(),
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: model.num_columns() as u32,
            num_constraints: model.num_rows() as u32,
        };

        EngineSolution {
            termination,
            column_values,
            statistics,
        }
    }

    fn name(&self) -> &str {
        match self.backend {
            Backend::MicroLp => "microlp",
            #[cfg(feature = "cbc")]
            Backend::CoinCbc => "COIN-OR CBC",
        }
    }
}

fn run<M>(mut lp_model: M, model: &LpModel, lp_variables: &[GoodLpVariable]) -> (Termination, Vec<f64>)
where
    M: SolverModel<Error = ResolutionError>,
{
    for row in &model.rows {
        let mut lhs: Expression = 0.into();
        for (column, coefficient) in &row.terms {
            if *coefficient != 0.0 {
                lhs += *coefficient * lp_variables[column.0];
            }
        }

        lp_model = match row.constraint_type {
            ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(row.bound)),
            ConstraintType::Equal => lp_model.with(lhs.eq(row.bound)),
            ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(row.bound)),
        };
    }

    match lp_model.solve() {
        Ok(sol) => {
            let values = lp_variables.iter().map(|&var| sol.value(var)).collect();
            (Termination::Optimal, values)
        }
        Err(ResolutionError::Infeasible) => (Termination::Infeasible, Vec::new()),
        Err(ResolutionError::Unbounded) => (Termination::Unbounded, Vec::new()),
        Err(e) => (Termination::Failed(format!("{:?}", e)), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeIndex;
    use crate::model::{Column, ColumnIndex, ColumnOwner, Row, RowOwner};
    use approx::assert_relative_eq;

    fn column(upper_bound: Option<f64>, objective: f64) -> Column {
        Column {
            owner: ColumnOwner::Process(NodeIndex(0)),
            upper_bound,
            objective,
            name: String::new(),
        }
    }

    fn row(constraint_type: ConstraintType, terms: Vec<(ColumnIndex, f64)>, bound: f64) -> Row {
        Row {
            owner: RowOwner::SupplyAvailable(NodeIndex(0)),
            constraint_type,
            terms,
            bound,
            name: String::new(),
        }
    }

    #[test]
    fn maximizes_against_bounds_and_rows() {
        // max 3x + 2y  s.t. x + y <= 4, x <= 3
        let model = LpModel {
            columns: vec![column(Some(3.0), 3.0), column(None, 2.0)],
            rows: vec![row(
                ConstraintType::LessThanOrEqual,
                vec![(ColumnIndex(0), 1.0), (ColumnIndex(1), 1.0)],
                4.0,
            )],
            ..Default::default()
        };

        let solution = GoodLpEngine::microlp().solve(&model, &SolverConfig::default());

        assert_eq!(solution.termination, Termination::Optimal);
        assert_relative_eq!(solution.column_values[0], 3.0, epsilon = 1e-6);
        assert_relative_eq!(solution.column_values[1], 1.0, epsilon = 1e-6);
        assert_eq!(solution.statistics.solver_backend, "microlp");
        assert_eq!(solution.statistics.num_variables, 2);
    }

    #[test]
    fn microlp_ignores_engine_tuning() {
        let model = LpModel {
            columns: vec![column(Some(2.5), 1.0)],
            ..Default::default()
        };
        let config = SolverConfig {
            verbose: true,
            time_limit_secs: Some(0.5),
            ..Default::default()
        };

        let solution = GoodLpEngine::microlp().solve(&model, &config);
        assert_eq!(solution.termination, Termination::Optimal);
        assert_relative_eq!(solution.column_values[0], 2.5, epsilon = 1e-6);
    }

    #[test]
    fn reports_infeasible() {
        let model = LpModel {
            columns: vec![column(Some(1.0), 1.0)],
            rows: vec![row(
                ConstraintType::GreaterThanOrEqual,
                vec![(ColumnIndex(0), 1.0)],
                2.0,
            )],
            ..Default::default()
        };

        let solution = GoodLpEngine::microlp().solve(&model, &SolverConfig::default());
        assert_eq!(solution.termination, Termination::Infeasible);
        assert!(solution.column_values.is_empty());
    }

    #[test]
    fn reports_unbounded() {
        let model = LpModel {
            columns: vec![column(None, 1.0)],
            ..Default::default()
        };

        let solution = GoodLpEngine::microlp().solve(&model, &SolverConfig::default());
        assert_eq!(solution.termination, Termination::Unbounded);
    }
}
