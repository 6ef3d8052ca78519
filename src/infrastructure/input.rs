// Readers for network documents (JSON) and solver configuration (TOML)

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Network, SolverConfig};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid network document {}: {source}", .path.display())]
    Network {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid solver config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn read_text(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a `{ "nodes": [...], "arcs": [...] }` document
pub fn parse_network(text: &str) -> serde_json::Result<Network> {
    serde_json::from_str(text)
}

pub fn read_network(path: &Path) -> Result<Network, InputError> {
    let text = read_text(path)?;
    parse_network(&text).map_err(|source| InputError::Network {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a TOML solver config; absent keys keep their defaults
pub fn read_config(path: &Path) -> Result<SolverConfig, InputError> {
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|source| InputError::Config {
        path: path.to_path_buf(),
        source,
    })
}
