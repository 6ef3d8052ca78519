// Domain module: network data model, configuration, results and errors

pub mod models;
pub mod network;
pub mod solver_service;
pub mod value_objects;

pub use models::*;
pub use network::*;
pub use solver_service::*;
pub use value_objects::*;
