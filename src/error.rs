use crate::config::ConfigError;
use crate::electron::ElectronBinsError;
use crate::requirements::RequirementError;

/// Erreur remontée par une commande du bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Requirement(#[from] RequirementError),
    #[error(transparent)]
    ElectronBins(#[from] ElectronBinsError),
    #[error("Failed to download: {}", .0.join(", "))]
    DownloadsFailed(Vec<String>),
    #[error("Background task failed: {0}")]
    Task(String),
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("Failed to serialize diagnostics: {0}")]
    Serialize(#[from] serde_json::Error),
}
