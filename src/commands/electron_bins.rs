use crate::config::BootstrapConfig;
use crate::electron::{self, RefreshMode, RefreshReport};
use crate::error::BootstrapError;
use crate::interpreter::ProcessEnvironment;

/// Commandes `redownload-electron-bins` et `reinstall-electron-bins`.
///
/// Échoue si au moins un des téléchargements s'est terminé en erreur.
pub async fn refresh(
    config: &BootstrapConfig,
    mode: RefreshMode,
) -> Result<RefreshReport, BootstrapError> {
    let report = electron::refresh_electron_bins(config, &ProcessEnvironment, mode).await?;
    let failed = report.failed();
    if !failed.is_empty() {
        return Err(BootstrapError::DownloadsFailed(
            failed.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(report)
}
