use super::{leading_major, run_version_command, RequirementError};

/// Version majeure minimale de npm selon le contexte.
pub fn minimum_npm_major(ci: bool) -> u32 {
    if ci {
        6
    } else {
        3
    }
}

/// Valide une version npm brute (`6.14.8`).
pub fn check_npm_version(full_version: &str, ci: bool) -> Result<String, RequirementError> {
    let minimum = minimum_npm_major(ci);
    match leading_major(full_version) {
        Some(major) if major >= minimum => Ok(full_version.to_string()),
        _ => Err(RequirementError::NpmTooOld {
            minimum,
            version: full_version.to_string(),
        }),
    }
}

/// Lance `npm --version` et valide le résultat.
pub fn verify_npm(npm_binary: &str, ci: bool) -> Result<String, RequirementError> {
    let raw = run_version_command(npm_binary, &["--version"]).map_err(|detail| {
        RequirementError::NpmUnavailable {
            binary: npm_binary.to_string(),
            detail,
        }
    })?;
    check_npm_version(raw.trim(), ci)
}
