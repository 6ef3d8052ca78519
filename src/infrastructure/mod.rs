// Infrastructure: input readers, the async worker and report mapping

pub mod input;
pub mod report;
pub mod worker;

pub use input::{parse_network, read_config, read_network, InputError};
pub use report::{ReportStatus, SolveReport};
pub use worker::{solve_batch, solve_detached, SolveJob};
