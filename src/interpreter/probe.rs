use std::process::Command;

use crate::utils::process::{
    classify_spawn_error, configure_command_no_window, first_non_empty_line, SpawnFailure,
};

use super::candidates::CandidateBinary;

/// Script passe a l'interpreteur pour qu'il affiche sa version sur stdout.
pub const PYTHON_VERSION_SCRIPT: &str = "import platform\nprint(platform.python_version())";

/// Echec d'une probe. Jamais fatal: le candidat est simplement ecarte.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Binary not found")]
    Missing,
    #[error("{0}")]
    NotExecutable(String),
    #[error("{0}")]
    ExecFailed(String),
    #[error("Binary produced no output")]
    EmptyOutput,
}

impl ProbeError {
    /// Resultat stable reporte dans les tentatives de diagnostic.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotExecutable(_) => "not_executable",
            Self::ExecFailed(_) | Self::EmptyOutput => "exec_failed",
        }
    }
}

/// Primitive d'execution: lance un candidat et renvoie sa sortie standard brute.
pub trait VersionProbe {
    fn probe(&self, candidate: &CandidateBinary) -> Result<String, ProbeError>;
}

impl<F> VersionProbe for F
where
    F: Fn(&CandidateBinary) -> Result<String, ProbeError>,
{
    fn probe(&self, candidate: &CandidateBinary) -> Result<String, ProbeError> {
        self(candidate)
    }
}

/// Probe reelle: lance le binaire avec l'environnement du process courant.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandProbe;

impl CommandProbe {
    /// Arguments complets passes au candidat, drapeau eventuel en tete.
    pub fn args_for(candidate: &CandidateBinary) -> Vec<&'static str> {
        let mut args = Vec::with_capacity(3);
        if let Some(flag) = candidate.prepend_flag {
            args.push(flag);
        }
        args.extend(["-c", PYTHON_VERSION_SCRIPT]);
        args
    }
}

impl VersionProbe for CommandProbe {
    fn probe(&self, candidate: &CandidateBinary) -> Result<String, ProbeError> {
        let mut cmd = Command::new(&candidate.binary);
        cmd.args(Self::args_for(candidate));
        configure_command_no_window(&mut cmd);

        let output = cmd.output().map_err(|error| match classify_spawn_error(&error) {
            SpawnFailure::Missing => ProbeError::Missing,
            SpawnFailure::NotExecutable(detail) => ProbeError::NotExecutable(detail),
            SpawnFailure::ExecFailed(detail) => ProbeError::ExecFailed(detail),
        })?;

        if !output.status.success() {
            let detail = first_non_empty_line(&String::from_utf8_lossy(&output.stderr));
            return Err(ProbeError::ExecFailed(if detail.is_empty() {
                format!("Binary exited with {}", output.status)
            } else {
                detail
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if stdout.trim().is_empty() {
            return Err(ProbeError::EmptyOutput);
        }
        Ok(stdout)
    }
}
