// LP model: representation and the network-to-LP builder

pub mod builder;
pub mod lp;

pub use builder::build_model;
pub use lp::*;
