use std::time::Duration;

use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::interpreter::ProcessEnvironment;
use crate::requirements::{self, MachineReport, RequirementError};

/// Commande `verify-requirements`: vérifie node, npm et Python.
///
/// Avec un timeout, la vérification tourne dans un thread bloquant pour qu'un
/// binaire figé ne bloque pas le bootstrap indéfiniment.
pub async fn verify_requirements(
    config: BootstrapConfig,
    timeout_secs: Option<u64>,
) -> Result<MachineReport, BootstrapError> {
    let Some(secs) = timeout_secs else {
        return Ok(requirements::verify_machine_requirements(
            &config,
            &ProcessEnvironment,
        )?);
    };

    let check = tokio::time::timeout(
        Duration::from_secs(secs),
        tokio::task::spawn_blocking(move || {
            requirements::verify_machine_requirements(&config, &ProcessEnvironment)
        }),
    )
    .await;

    match check {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(e)) => Err(BootstrapError::Task(e.to_string())),
        Err(_) => Err(RequirementError::TimedOut { secs }.into()),
    }
}
