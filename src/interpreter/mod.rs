//! Resolution de l'interpreteur Python utilise par les scripts de build natifs.
//!
//! Les candidats sont essayes dans un ordre fixe; le premier dont la version
//! satisfait `2.7` ou `3.5+` est retenu et la resolution s'arrete.

mod candidates;
mod diagnostics;
mod probe;
mod resolver;
mod version;

pub use candidates::{
    candidates_for, CandidateBinary, CandidateSource, Environment, FixedEnvironment, PlatformFamily,
    ProcessEnvironment, FORCE_PYTHON_ENV, PYTHON_ENV,
};
pub use diagnostics::{InterpreterDebugInfo, ProbeAttempt};
pub use probe::{CommandProbe, ProbeError, VersionProbe};
pub use resolver::{
    resolve, resolve_interpreter, resolve_interpreter_debug, resolve_with_attempts,
    AcceptedInterpreter, ResolveError,
};
pub use version::{normalize_version, parse_major_minor, PythonVersion};
