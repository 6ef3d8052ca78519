// Engine adapters: concrete implementations of LpEngine

pub mod factory;
pub mod good_lp_engine;
#[cfg(feature = "highs")]
pub mod highs_engine;

pub use factory::EngineFactory;
pub use good_lp_engine::GoodLpEngine;
#[cfg(feature = "highs")]
pub use highs_engine::HighsEngine;
