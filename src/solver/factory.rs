use crate::domain::{
    solver_service::{FlowError, LpEngine, Result},
    value_objects::SolverBackend,
};
use crate::solver::GoodLpEngine;

/// Factory for creating one engine per solve based on configuration
pub struct EngineFactory;

impl EngineFactory {
    /// Create a fresh engine for a specific backend
    pub fn create(backend: SolverBackend) -> Result<Box<dyn LpEngine>> {
        match backend {
            SolverBackend::MicroLp => Ok(Box::new(GoodLpEngine::microlp())),
            #[cfg(feature = "cbc")]
            SolverBackend::CoinCbc => Ok(Box::new(GoodLpEngine::coin_cbc())),
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Box::new(crate::solver::HighsEngine::new())),
            #[allow(unreachable_patterns)]
            other => Err(FlowError::EngineUnavailable(format!(
                "{} support was not compiled in (enable the matching cargo feature)",
                other
            ))),
        }
    }

    /// Backends usable in this build
    pub fn available() -> Vec<SolverBackend> {
        let mut backends = vec![SolverBackend::MicroLp];
        if cfg!(feature = "cbc") {
            backends.push(SolverBackend::CoinCbc);
        }
        if cfg!(feature = "highs") {
            backends.push(SolverBackend::Highs);
        }
        backends
    }
}
