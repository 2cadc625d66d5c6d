//! Configuration du bootstrap: racine du dépôt, mode CI et métadonnées du `package.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::interpreter::{Environment, PlatformFamily};

/// Chemin explicite vers npm, prioritaire sur toute détection.
pub const NPM_BIN_PATH_ENV: &str = "NPM_BIN_PATH";
/// Chemin du runtime node qui exécute le script npm courant.
pub const NODE_EXEC_PATH_ENV: &str = "npm_node_execpath";

/// Erreur de chargement de la configuration du projet.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{path}' does not declare an electronVersion")]
    MissingElectronVersion { path: String },
}

/// Sous-ensemble du `package.json` lu par le bootstrap.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Version Electron épinglée par le projet.
    pub electron_version: Option<String>,
}

impl AppMetadata {
    /// Lit et désérialise un `package.json`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

/// Paramètres d'une invocation du bootstrap.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    /// Racine du dépôt (contient `package.json` et `script/`).
    pub repository_root: PathBuf,
    /// Exécution en intégration continue.
    pub ci: bool,
}

impl BootstrapConfig {
    pub fn new(repository_root: impl Into<PathBuf>, ci: bool) -> Self {
        Self {
            repository_root: repository_root.into(),
            ci,
        }
    }

    /// Chemin du manifeste `package.json` du projet.
    pub fn package_json_path(&self) -> PathBuf {
        self.repository_root.join("package.json")
    }

    pub fn load_app_metadata(&self) -> Result<AppMetadata, ConfigError> {
        AppMetadata::load(&self.package_json_path())
    }

    /// Version Electron épinglée, erreur si le manifeste ne la déclare pas.
    pub fn electron_version(&self) -> Result<String, ConfigError> {
        self.load_app_metadata()?
            .electron_version
            .map(|version| version.trim().to_string())
            .filter(|version| !version.is_empty())
            .ok_or_else(|| ConfigError::MissingElectronVersion {
                path: self.package_json_path().to_string_lossy().to_string(),
            })
    }

    /// Retourne le binaire npm à utiliser pour les vérifications.
    ///
    /// `NPM_BIN_PATH` l'emporte; hors CI, le npm local de `script/node_modules`
    /// est préféré s'il existe; sinon le npm du PATH.
    pub fn npm_bin_path(&self, env: &impl Environment) -> String {
        if let Some(path) = env.var(NPM_BIN_PATH_ENV).filter(|p| !p.is_empty()) {
            return path;
        }

        let npm_bin_name = match env.platform() {
            PlatformFamily::Windows => "npm.cmd",
            PlatformFamily::Unix => "npm",
        };
        let local_npm = self
            .repository_root
            .join("script")
            .join("node_modules")
            .join(".bin")
            .join(npm_bin_name);

        if !self.ci && local_npm.exists() {
            local_npm.to_string_lossy().to_string()
        } else {
            npm_bin_name.to_string()
        }
    }
}

/// Runtime node à utiliser: celui qui a lancé npm si connu, sinon `node`.
pub fn node_bin_path(env: &impl Environment) -> String {
    env.var(NODE_EXEC_PATH_ENV)
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| "node".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::FixedEnvironment;

    #[test]
    fn reads_electron_version_from_package_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "atom", "version": "1.60.0", "electronVersion": " 9.4.4 " }"#,
        )
        .unwrap();

        let config = BootstrapConfig::new(dir.path(), false);
        let metadata = config.load_app_metadata().unwrap();
        assert_eq!(metadata.name.as_deref(), Some("atom"));
        assert_eq!(config.electron_version().unwrap(), "9.4.4");
    }

    #[test]
    fn missing_electron_version_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "atom" }"#).unwrap();
        let err = BootstrapConfig::new(dir.path(), false)
            .electron_version()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingElectronVersion { .. }));
    }

    #[test]
    fn unreadable_or_invalid_manifest_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = BootstrapConfig::new(dir.path(), false);
        assert!(matches!(
            config.load_app_metadata().unwrap_err(),
            ConfigError::Read { .. }
        ));

        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        assert!(matches!(
            config.load_app_metadata().unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn npm_path_prefers_env_then_local_then_path() {
        let dir = tempfile::tempdir().unwrap();
        let unix = FixedEnvironment::new(PlatformFamily::Unix);

        let config = BootstrapConfig::new(dir.path(), false);
        assert_eq!(config.npm_bin_path(&unix), "npm");

        let bin_dir = dir.path().join("script").join("node_modules").join(".bin");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::write(bin_dir.join("npm"), "").unwrap();
        assert_eq!(
            config.npm_bin_path(&unix),
            bin_dir.join("npm").to_string_lossy()
        );

        let ci_config = BootstrapConfig::new(dir.path(), true);
        assert_eq!(ci_config.npm_bin_path(&unix), "npm");

        let overridden = unix.clone().with_var(NPM_BIN_PATH_ENV, "/custom/npm");
        assert_eq!(ci_config.npm_bin_path(&overridden), "/custom/npm");
    }

    #[test]
    fn windows_uses_npm_cmd() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FixedEnvironment::new(PlatformFamily::Windows);
        assert_eq!(
            BootstrapConfig::new(dir.path(), true).npm_bin_path(&windows),
            "npm.cmd"
        );
    }

    #[test]
    fn node_path_falls_back_to_node() {
        let env = FixedEnvironment::new(PlatformFamily::Unix);
        assert_eq!(node_bin_path(&env), "node");
        let env = env.with_var(NODE_EXEC_PATH_ENV, "/usr/local/bin/node");
        assert_eq!(node_bin_path(&env), "/usr/local/bin/node");
    }
}
