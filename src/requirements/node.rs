use super::{leading_major, run_version_command, RequirementError};

/// Etat du runtime node détecté.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    /// Node 6 ou plus.
    Supported(String),
    /// Node 4 ou 5: toléré mais déprécié.
    Deprecated(String),
}

impl NodeStatus {
    pub fn version(&self) -> &str {
        match self {
            Self::Supported(version) | Self::Deprecated(version) => version,
        }
    }

    /// Avertissement à afficher après la ligne `Node:`, pour node 4 et 5.
    pub fn deprecation_warning(&self) -> Option<&'static str> {
        match self {
            Self::Supported(_) => None,
            Self::Deprecated(_) => Some(
                "\tWarning: Building on Node below version 6 is deprecated. Please use Node 6.x+ to build.",
            ),
        }
    }
}

/// Classe une version de node déjà débarrassée de son préfixe `v`.
pub fn check_node_version(full_version: &str) -> Result<NodeStatus, RequirementError> {
    match leading_major(full_version) {
        Some(major) if major >= 6 => Ok(NodeStatus::Supported(full_version.to_string())),
        Some(major) if major >= 4 => Ok(NodeStatus::Deprecated(full_version.to_string())),
        _ => Err(RequirementError::NodeTooOld {
            version: full_version.to_string(),
        }),
    }
}

/// Lance `node --version` et valide le résultat.
pub fn verify_node(node_binary: &str) -> Result<NodeStatus, RequirementError> {
    let raw = run_version_command(node_binary, &["--version"]).map_err(|detail| {
        RequirementError::NodeUnavailable {
            binary: node_binary.to_string(),
            detail,
        }
    })?;
    let full_version = raw.trim().trim_start_matches('v').to_string();
    let status = check_node_version(&full_version)?;
    log::debug!("node v{} accepted ({:?})", status.version(), status);
    Ok(status)
}
