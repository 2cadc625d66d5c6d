use super::candidates::{candidates_for, CandidateBinary, Environment};
use super::diagnostics::{InterpreterDebugInfo, ProbeAttempt};
use super::probe::{CommandProbe, VersionProbe};
use super::version::{normalize_version, parse_major_minor, PythonVersion};

/// Interpreteur retenu: premier candidat dont la version est acceptee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedInterpreter {
    /// Binaire tel qu'il a ete lance.
    pub binary: String,
    /// Version normalisee rapportee par le binaire.
    pub version: String,
    pub parsed: PythonVersion,
}

/// Echec fatal de resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(
        "NODE_GYP_FORCE_PYTHON is set to: \"{value}\", but this is not a valid Python.\n\
         Please set NODE_GYP_FORCE_PYTHON to something valid, or unset it entirely.\n\
         (Python 2.7 or 3.5+ is required to build.)"
    )]
    ForcedOverrideRejected { value: String },
    #[error(
        "Python 2.7 or 3.5+ is required to build.\n\
         Unable to find such a version of Python.\n\
         Set the PYTHON env var to e.g. 'C:/path/to/Python27/python.exe'\n\
         if your Python is installed in a non-default location."
    )]
    NoAcceptableInterpreter,
}

impl ResolveError {
    /// Code d'erreur stable.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ForcedOverrideRejected { .. } => "FORCED_PYTHON_REJECTED",
            Self::NoAcceptableInterpreter => "PYTHON_NOT_FOUND",
        }
    }
}

fn attempt(candidate: &CandidateBinary, outcome: &str, detail: Option<String>) -> ProbeAttempt {
    ProbeAttempt {
        candidate: candidate.binary.clone(),
        source: candidate.source.as_key().to_string(),
        outcome: outcome.to_string(),
        detail,
    }
}

/// Probe un candidat et decide s'il est accepte.
fn evaluate(
    candidate: &CandidateBinary,
    probe: &impl VersionProbe,
) -> Result<AcceptedInterpreter, ProbeAttempt> {
    let raw = probe
        .probe(candidate)
        .map_err(|err| attempt(candidate, err.outcome(), Some(err.to_string())))?;

    let version = normalize_version(&raw);
    let parsed = parse_major_minor(&version)
        .ok_or_else(|| attempt(candidate, "unparsable", Some(version.clone())))?;

    if !parsed.is_supported() {
        return Err(attempt(candidate, "rejected", Some(version)));
    }

    Ok(AcceptedInterpreter {
        binary: candidate.binary.clone(),
        version,
        parsed,
    })
}

/// Essaie les candidats dans l'ordre et s'arrete au premier accepte.
///
/// Un candidat force refuse termine la resolution sans essayer les suivants.
/// Retourne aussi l'historique des tentatives effectuees.
pub fn resolve_with_attempts(
    candidates: &[CandidateBinary],
    probe: &impl VersionProbe,
) -> (Result<AcceptedInterpreter, ResolveError>, Vec<ProbeAttempt>) {
    let mut attempts = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match evaluate(candidate, probe) {
            Ok(accepted) => {
                log::debug!(
                    "python candidate '{}' accepted (v{})",
                    candidate.binary,
                    accepted.version
                );
                attempts.push(attempt(candidate, "ok", Some(accepted.version.clone())));
                return (Ok(accepted), attempts);
            }
            Err(rejected) => {
                log::debug!(
                    "python candidate '{}' ({}) skipped: {}",
                    candidate.binary,
                    rejected.source,
                    rejected.outcome
                );
                attempts.push(rejected);
                if candidate.is_forced() {
                    let err = ResolveError::ForcedOverrideRejected {
                        value: candidate.binary.clone(),
                    };
                    return (Err(err), attempts);
                }
            }
        }
    }

    (Err(ResolveError::NoAcceptableInterpreter), attempts)
}

/// Resout l'interpreteur a partir d'une liste de candidats et d'une probe.
pub fn resolve(
    candidates: &[CandidateBinary],
    probe: &impl VersionProbe,
) -> Result<AcceptedInterpreter, ResolveError> {
    resolve_with_attempts(candidates, probe).0
}

/// Resout l'interpreteur pour `env` en lancant reellement les candidats.
pub fn resolve_interpreter(env: &impl Environment) -> Result<AcceptedInterpreter, ResolveError> {
    resolve(&candidates_for(env), &CommandProbe)
}

/// Retourne un diagnostic complet de resolution.
pub fn resolve_interpreter_debug(
    env: &impl Environment,
    probe: &impl VersionProbe,
) -> InterpreterDebugInfo {
    match resolve_with_attempts(&candidates_for(env), probe) {
        (Ok(accepted), attempts) => InterpreterDebugInfo {
            resolved_version: Some(accepted.version),
            resolved_binary: Some(accepted.binary),
            error_code: None,
            error_details: None,
            attempts,
        },
        (Err(err), attempts) => InterpreterDebugInfo {
            resolved_version: None,
            resolved_binary: None,
            error_code: Some(err.code().to_string()),
            error_details: Some(err.to_string()),
            attempts,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::interpreter::candidates::{CandidateSource, FixedEnvironment, PlatformFamily};
    use crate::interpreter::probe::ProbeError;
    use crate::interpreter::{FORCE_PYTHON_ENV, PYTHON_ENV};

    /// Probe scriptee: renvoie une version par binaire et note chaque appel.
    struct ScriptedProbe {
        versions: HashMap<&'static str, &'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedProbe {
        fn new(versions: &[(&'static str, &'static str)]) -> Self {
            Self {
                versions: versions.iter().copied().collect(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl VersionProbe for ScriptedProbe {
        fn probe(&self, candidate: &CandidateBinary) -> Result<String, ProbeError> {
            self.calls.borrow_mut().push(candidate.binary.clone());
            self.versions
                .get(candidate.binary.as_str())
                .map(|v| format!("{v}\n"))
                .ok_or(ProbeError::Missing)
        }
    }

    fn named(names: &[&str]) -> Vec<CandidateBinary> {
        names
            .iter()
            .map(|name| CandidateBinary::new(*name, CandidateSource::DefaultName))
            .collect()
    }

    #[test]
    fn first_acceptable_candidate_wins_and_stops_probing() {
        let probe = ScriptedProbe::new(&[("second", "3.6.0"), ("third", "3.9.1")]);
        let accepted = resolve(&named(&["first", "second", "third"]), &probe).unwrap();

        assert_eq!(accepted.binary, "second");
        assert_eq!(accepted.version, "3.6.0");
        assert_eq!(probe.calls(), ["first", "second"]);
    }

    #[test]
    fn rejected_versions_fall_through_to_later_candidates() {
        let probe = ScriptedProbe::new(&[("python", "2.6.1"), ("python2", "3.4.9"), ("python3", "2.7.18+")]);
        let accepted = resolve(&named(&["python", "python2", "python3"]), &probe).unwrap();
        assert_eq!(accepted.version, "2.7.18");
        assert_eq!(accepted.parsed, PythonVersion { major: 2, minor: 7 });
    }

    #[test]
    fn rejected_force_override_fails_without_trying_defaults() {
        let env = FixedEnvironment::new(PlatformFamily::Unix).with_var(FORCE_PYTHON_ENV, "/opt/old-python");
        let probe = ScriptedProbe::new(&[("/opt/old-python", "2.5.0"), ("python", "3.8.0")]);

        let err = resolve(&candidates_for(&env), &probe).unwrap_err();

        assert_eq!(
            err,
            ResolveError::ForcedOverrideRejected {
                value: "/opt/old-python".to_string()
            }
        );
        assert!(err.to_string().contains("\"/opt/old-python\""));
        assert!(err.to_string().contains("2.7 or 3.5+"));
        assert_eq!(probe.calls(), ["/opt/old-python"]);
    }

    #[test]
    fn unlaunchable_force_override_also_fails() {
        let env = FixedEnvironment::new(PlatformFamily::Unix).with_var(FORCE_PYTHON_ENV, "missing");
        let probe = ScriptedProbe::new(&[("python", "3.8.0")]);
        let err = resolve(&candidates_for(&env), &probe).unwrap_err();
        assert_eq!(err.code(), "FORCED_PYTHON_REJECTED");
    }

    #[test]
    fn accepted_force_override_is_used() {
        let env = FixedEnvironment::new(PlatformFamily::Unix)
            .with_var(FORCE_PYTHON_ENV, "/opt/py38")
            .with_var(PYTHON_ENV, "/opt/py37");
        let probe = ScriptedProbe::new(&[("/opt/py38", "3.8.2rc1"), ("/opt/py37", "3.7.0")]);
        let accepted = resolve(&candidates_for(&env), &probe).unwrap();
        assert_eq!(accepted.version, "3.8.2");
        assert_eq!(probe.calls(), ["/opt/py38"]);
    }

    #[test]
    fn exhausted_list_reports_python_env_hint() {
        let env = FixedEnvironment::new(PlatformFamily::Windows);
        let probe = ScriptedProbe::new(&[("python", "3.4.0")]);
        let err = resolve(&candidates_for(&env), &probe).unwrap_err();

        assert_eq!(err, ResolveError::NoAcceptableInterpreter);
        assert!(err.to_string().contains("Set the PYTHON env var"));
        assert_eq!(probe.calls().len(), 6);
    }

    #[test]
    fn closures_can_act_as_probes() {
        let probe = |candidate: &CandidateBinary| -> Result<String, ProbeError> {
            match candidate.binary.as_str() {
                "python3" => Ok("3.12.0".to_string()),
                _ => Err(ProbeError::EmptyOutput),
            }
        };
        let accepted = resolve(&named(&["python", "python3"]), &probe).unwrap();
        assert_eq!(accepted.version, "3.12.0");
    }

    #[test]
    fn resolution_is_repeatable() {
        let env = FixedEnvironment::new(PlatformFamily::Unix).with_var(PYTHON_ENV, "custom");
        let probe = ScriptedProbe::new(&[("custom", "3.0.0"), ("python2", "2.7.1")]);

        let first = resolve_interpreter_debug(&env, &probe);
        let second = resolve_interpreter_debug(&env, &probe);

        assert_eq!(first.resolved_version, second.resolved_version);
        assert_eq!(first.attempts, second.attempts);
        assert_eq!(first.resolved_version.as_deref(), Some("2.7.1"));
    }

    #[test]
    fn debug_info_records_every_attempt() {
        let env = FixedEnvironment::new(PlatformFamily::Unix);
        let probe = ScriptedProbe::new(&[("python", "garbage"), ("python2", "2.6.9")]);
        let info = resolve_interpreter_debug(&env, &probe);

        assert_eq!(info.error_code.as_deref(), Some("PYTHON_NOT_FOUND"));
        let outcomes: Vec<&str> = info.attempts.iter().map(|a| a.outcome.as_str()).collect();
        assert_eq!(outcomes, ["unparsable", "rejected", "missing"]);
        assert!(info.attempts.iter().all(|a| a.source == "default_name"));
    }
}
