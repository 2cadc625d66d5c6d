//! Vérification des prérequis machine avant un build: node, npm puis Python.

mod node;
mod npm;

use std::process::Command;

use crate::config::{node_bin_path, BootstrapConfig};
use crate::interpreter::{self, Environment, ResolveError};
use crate::utils::process::{configure_command_no_window, sanitize_cmd_error};

pub use node::{check_node_version, verify_node, NodeStatus};
pub use npm::{check_npm_version, minimum_npm_major, verify_npm};

/// Prérequis non satisfait. Toutes les variantes sont fatales.
#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    #[error("node v4+ is required to build. node v{version} is installed.")]
    NodeTooOld { version: String },
    #[error("Unable to run node ('{binary}'): {detail}")]
    NodeUnavailable { binary: String, detail: String },
    #[error("npm v{minimum}+ is required to build. npm v{version} was detected.")]
    NpmTooOld { minimum: u32, version: String },
    #[error("Unable to run npm ('{binary}'): {detail}")]
    NpmUnavailable { binary: String, detail: String },
    #[error(transparent)]
    Python(#[from] ResolveError),
    #[error("Machine requirements check timed out after {secs}s")]
    TimedOut { secs: u64 },
}

/// Versions retenues pour chaque prérequis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineReport {
    pub node: NodeStatus,
    pub npm: String,
    pub python: String,
}

/// Premier composant numérique d'une version `x.y.z`.
pub(crate) fn leading_major(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

/// Lance `binary args...` et retourne stdout, ou un message d'erreur lisible.
pub(crate) fn run_version_command(binary: &str, args: &[&str]) -> Result<String, String> {
    let mut cmd = Command::new(binary);
    cmd.args(args);
    configure_command_no_window(&mut cmd);
    let output = cmd.output().map_err(|e| e.to_string())?;
    if !output.status.success() {
        return Err(sanitize_cmd_error(&output));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Vérifie node, npm et Python dans cet ordre, en s'arrêtant au premier échec.
///
/// Chaque prérequis validé est affiché sur stdout dès qu'il est confirmé.
pub fn verify_machine_requirements(
    config: &BootstrapConfig,
    env: &impl Environment,
) -> Result<MachineReport, RequirementError> {
    let node = verify_node(&node_bin_path(env))?;
    println!("Node:\tv{}", node.version());
    if let Some(warning) = node.deprecation_warning() {
        log::warn!("{}", warning);
    }

    let npm = verify_npm(&config.npm_bin_path(env), config.ci)?;
    println!("Npm:\tv{}", npm);

    let python = interpreter::resolve_interpreter(env)?;
    println!("Python:\tv{}", python.version);

    Ok(MachineReport {
        node,
        npm,
        python: python.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_major_reads_first_component() {
        assert_eq!(leading_major("14.17.0"), Some(14));
        assert_eq!(leading_major("7"), Some(7));
        assert_eq!(leading_major("v14.17.0"), None);
        assert_eq!(leading_major(""), None);
    }

    #[test]
    fn python_errors_keep_their_message() {
        let err = RequirementError::from(ResolveError::NoAcceptableInterpreter);
        assert_eq!(
            err.to_string(),
            ResolveError::NoAcceptableInterpreter.to_string()
        );
    }
}
