use crate::error::BootstrapError;
use crate::interpreter::{self, CommandProbe, InterpreterDebugInfo, ProcessEnvironment};

/// Commande `diagnose-python`: détaille chaque candidat essayé.
pub fn diagnose_python() -> InterpreterDebugInfo {
    interpreter::resolve_interpreter_debug(&ProcessEnvironment, &CommandProbe)
}

/// Sérialise le diagnostic en JSON lisible.
pub fn render_diagnostics(info: &InterpreterDebugInfo) -> Result<String, BootstrapError> {
    Ok(serde_json::to_string_pretty(info)?)
}
