// Application layer: solve orchestration and result extraction

pub mod driver;
pub mod extract;

pub use driver::{solve, solve_model, solve_with_engine};
pub use extract::{extract_solution, process_balances};
