use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::config::{node_bin_path, BootstrapConfig, ConfigError};
use crate::interpreter::Environment;

/// Version Electron pour laquelle les binaires auxiliaires ont été téléchargés.
pub const ELECTRON_CUSTOM_VERSION_ENV: &str = "ELECTRON_CUSTOM_VERSION";

/// Binaire auxiliaire livré par un paquet npm et son script de téléchargement.
#[derive(Clone, Copy, Debug)]
pub struct AuxiliaryBinary {
    pub name: &'static str,
    pub package: &'static str,
    pub script: &'static str,
}

pub const AUXILIARY_BINARIES: [AuxiliaryBinary; 2] = [
    AuxiliaryBinary {
        name: "chromedriver",
        package: "electron-chromedriver",
        script: "download-chromedriver.js",
    },
    AuxiliaryBinary {
        name: "mksnapshot",
        package: "electron-mksnapshot",
        script: "download-mksnapshot.js",
    },
];

/// Variante du script de rafraîchissement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshMode {
    /// Utilise `node` du PATH, sortie des téléchargements ignorée.
    Redownload,
    /// Utilise le node qui a lancé npm et relaie la sortie des téléchargements.
    Reinstall,
}

impl RefreshMode {
    fn node_binary(&self, env: &impl Environment) -> String {
        match self {
            Self::Redownload => "node".to_string(),
            Self::Reinstall => node_bin_path(env),
        }
    }

    fn streams_output(&self) -> bool {
        matches!(self, Self::Reinstall)
    }

    fn mismatch_message(&self, current: &str, wanted: &str) -> String {
        match self {
            Self::Reinstall => format!(
                "env var {ELECTRON_CUSTOM_VERSION_ENV} is either not set,\n\
                 or doesn't match electronVersion in package.json.\n\
                 (is: \"{current}\", wanted: \"{wanted}\").\n\
                 re-downloading chromedriver and mksnapshot."
            ),
            Self::Redownload => format!(
                "env var {ELECTRON_CUSTOM_VERSION_ENV} is not set,\n\
                 or doesn't match electronVersion in package.json.\n\
                 (is: \"{current}\", wanted: \"{wanted}\").\n\
                 Setting, and re-downloading chromedriver and mksnapshot."
            ),
        }
    }

    fn up_to_date_message(&self) -> String {
        let state = match self {
            Self::Redownload => "is already set correctly",
            Self::Reinstall => "was set correctly",
        };
        format!(
            "env var \"{ELECTRON_CUSTOM_VERSION_ENV}\" {state}.\n\
             (No need to re-download chromedriver or mksnapshot). Skipping."
        )
    }
}

/// Erreur bloquante avant le lancement des téléchargements.
#[derive(Debug, thiserror::Error)]
pub enum ElectronBinsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Cannot find module '{package}/{script}' from '{root}'")]
    MissingDownloader {
        package: String,
        script: String,
        root: String,
    },
}

/// Statut de fin d'un téléchargement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadStatus {
    Success,
    Error,
}

impl DownloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadResult {
    pub name: &'static str,
    pub status: DownloadStatus,
}

/// Résultat global d'un rafraîchissement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshReport {
    /// La variable correspond déjà à la version épinglée.
    UpToDate { version: String },
    /// Les téléchargements ont été relancés.
    Refreshed {
        version: String,
        results: Vec<DownloadResult>,
    },
}

impl RefreshReport {
    /// Noms des binaires dont le téléchargement a échoué.
    pub fn failed(&self) -> Vec<&'static str> {
        match self {
            Self::UpToDate { .. } => Vec::new(),
            Self::Refreshed { results, .. } => results
                .iter()
                .filter(|r| r.status == DownloadStatus::Error)
                .map(|r| r.name)
                .collect(),
        }
    }
}

/// Cherche `node_modules/<package>/<file>` depuis `start` puis dans chaque parent.
pub fn resolve_node_module(start: &Path, package: &str, file: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("node_modules").join(package).join(file))
        .find(|candidate| candidate.is_file())
}

/// Relaie chaque ligne d'un flux de sortie enfant vers le logger.
async fn forward_lines<R>(reader: Option<R>, level: log::Level, name: &str)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        log::log!(level, "[{}] {}", name, line);
    }
}

/// Lance un script de téléchargement et attend sa fin.
async fn run_download(
    node: &str,
    script: &Path,
    version: &str,
    binary: AuxiliaryBinary,
    mode: RefreshMode,
) -> DownloadResult {
    let mut cmd = Command::new(node);
    cmd.arg(script)
        .env(ELECTRON_CUSTOM_VERSION_ENV, version)
        .stdin(Stdio::null());
    if mode.streams_output() {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = match cmd.spawn() {
        Ok(mut child) => {
            let stdout = child.stdout.take();
            let stderr = child.stderr.take();
            let (_, _, exit) = tokio::join!(
                forward_lines(stdout, log::Level::Info, binary.name),
                forward_lines(stderr, log::Level::Error, binary.name),
                child.wait()
            );
            match exit {
                Ok(exit) if exit.success() => DownloadStatus::Success,
                Ok(_) => DownloadStatus::Error,
                Err(e) => {
                    log::error!("Failed to wait for {} download: {}", binary.name, e);
                    DownloadStatus::Error
                }
            }
        }
        Err(e) => {
            log::error!("Failed to start {} download with '{}': {}", binary.name, node, e);
            DownloadStatus::Error
        }
    };

    log::info!(
        "Done re-downloading {}. Status: {}",
        binary.name,
        status.as_str()
    );
    DownloadResult {
        name: binary.name,
        status,
    }
}

/// Compare `ELECTRON_CUSTOM_VERSION` à la version épinglée et relance les
/// téléchargements de chromedriver et mksnapshot en parallèle si besoin.
pub async fn refresh_electron_bins(
    config: &BootstrapConfig,
    env: &impl Environment,
    mode: RefreshMode,
) -> Result<RefreshReport, ElectronBinsError> {
    let wanted = config.electron_version()?;
    let current = env.var(ELECTRON_CUSTOM_VERSION_ENV);

    if current.as_deref() == Some(wanted.as_str()) {
        log::info!("{}", mode.up_to_date_message());
        return Ok(RefreshReport::UpToDate { version: wanted });
    }

    log::info!(
        "{}",
        mode.mismatch_message(current.as_deref().unwrap_or("undefined"), &wanted)
    );

    let [chromedriver, mksnapshot] = AUXILIARY_BINARIES;
    let locate = |binary: AuxiliaryBinary| {
        resolve_node_module(&config.repository_root, binary.package, binary.script).ok_or_else(
            || ElectronBinsError::MissingDownloader {
                package: binary.package.to_string(),
                script: binary.script.to_string(),
                root: config.repository_root.to_string_lossy().to_string(),
            },
        )
    };
    let chromedriver_script = locate(chromedriver)?;
    let mksnapshot_script = locate(mksnapshot)?;

    let node = mode.node_binary(env);
    let (chromedriver_result, mksnapshot_result) = tokio::join!(
        run_download(&node, &chromedriver_script, &wanted, chromedriver, mode),
        run_download(&node, &mksnapshot_script, &wanted, mksnapshot, mode)
    );

    Ok(RefreshReport::Refreshed {
        version: wanted,
        results: vec![chromedriver_result, mksnapshot_result],
    })
}
