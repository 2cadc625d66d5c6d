use std::io::ErrorKind;

/// Configure la commande pour éviter l'ouverture d'une fenêtre console sur Windows.
pub fn configure_command_no_window(cmd: &mut std::process::Command) {
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = cmd;
    }
}

/// Extrait un message d'erreur lisible depuis la sortie d'un process.
pub fn sanitize_cmd_error(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    format!("process exited with {}", output.status)
}

/// Retourne la première ligne non vide d'un texte.
pub fn first_non_empty_line(text: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| text.trim().to_string())
}

/// Cause d'un échec de lancement de process.
#[derive(Debug, PartialEq, Eq)]
pub enum SpawnFailure {
    Missing,
    NotExecutable(String),
    ExecFailed(String),
}

/// Classe une erreur de lancement de process en résultat applicatif stable.
pub fn classify_spawn_error(error: &std::io::Error) -> SpawnFailure {
    if error.kind() == ErrorKind::NotFound {
        return SpawnFailure::Missing;
    }

    if error.kind() == ErrorKind::PermissionDenied {
        return SpawnFailure::NotExecutable("Permission denied while executing binary".to_string());
    }

    let msg = error.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("exec format error")
        || lower.contains("bad cpu type")
        || lower.contains("cannot execute")
    {
        return SpawnFailure::NotExecutable(msg);
    }

    SpawnFailure::ExecFailed(msg)
}
