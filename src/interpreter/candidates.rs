use std::collections::HashMap;

/// Variable qui impose un interpreteur: s'il est refuse, la resolution echoue.
pub const FORCE_PYTHON_ENV: &str = "NODE_GYP_FORCE_PYTHON";
/// Variable qui propose un interpreteur avant les noms par defaut.
pub const PYTHON_ENV: &str = "PYTHON";

const SYSTEM_DRIVE_ENV: &str = "SystemDrive";
const DEFAULT_SYSTEM_DRIVE: &str = "C:";

/// Famille de plateforme qui determine la liste des candidats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

impl PlatformFamily {
    /// Famille de la plateforme de compilation courante.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Acces aux variables d'environnement et a la plateforme.
pub trait Environment {
    /// Valeur d'une variable, `None` si absente ou non UTF-8.
    fn var(&self, name: &str) -> Option<String>;

    /// Famille de plateforme courante.
    fn platform(&self) -> PlatformFamily;
}

/// Environnement du process courant.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn platform(&self) -> PlatformFamily {
        PlatformFamily::current()
    }
}

/// Environnement fige, utilise pour rejouer une resolution a l'identique.
#[derive(Clone, Debug)]
pub struct FixedEnvironment {
    pub vars: HashMap<String, String>,
    pub platform: PlatformFamily,
}

impl FixedEnvironment {
    pub fn new(platform: PlatformFamily) -> Self {
        Self {
            vars: HashMap::new(),
            platform,
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for FixedEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn platform(&self) -> PlatformFamily {
        self.platform
    }
}

/// Origine d'un candidat dans la liste ordonnee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateSource {
    ForceOverride,
    EnvOverride,
    DefaultName,
    WindowsLauncher,
    WindowsFallback,
}

impl CandidateSource {
    /// Cle stable utilisee dans les diagnostics.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::ForceOverride => "force_override",
            Self::EnvOverride => "env_override",
            Self::DefaultName => "default_name",
            Self::WindowsLauncher => "windows_launcher",
            Self::WindowsFallback => "windows_fallback",
        }
    }
}

/// Binaire candidat et drapeau eventuel a placer avant les arguments de probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateBinary {
    pub binary: String,
    pub prepend_flag: Option<&'static str>,
    pub source: CandidateSource,
}

impl CandidateBinary {
    pub fn new(binary: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            binary: binary.into(),
            prepend_flag: None,
            source,
        }
    }

    pub fn with_flag(mut self, flag: &'static str) -> Self {
        self.prepend_flag = Some(flag);
        self
    }

    /// Un echec de ce candidat termine la resolution.
    pub fn is_forced(&self) -> bool {
        self.source == CandidateSource::ForceOverride
    }
}

/// Lit une variable en ignorant les valeurs vides.
fn non_empty_var(env: &impl Environment, name: &str) -> Option<String> {
    env.var(name).filter(|value| !value.is_empty())
}

/// Candidats communs a toutes les plateformes, dans l'ordre d'essai.
fn common_candidates(env: &impl Environment) -> Vec<CandidateBinary> {
    let mut candidates = Vec::new();

    if let Some(forced) = non_empty_var(env, FORCE_PYTHON_ENV) {
        candidates.push(CandidateBinary::new(forced, CandidateSource::ForceOverride));
    }
    if let Some(python) = non_empty_var(env, PYTHON_ENV) {
        candidates.push(CandidateBinary::new(python, CandidateSource::EnvOverride));
    }

    candidates.extend(
        ["python", "python2", "python3"]
            .into_iter()
            .map(|name| CandidateBinary::new(name, CandidateSource::DefaultName)),
    );
    candidates
}

/// Candidats propres a Windows: lanceur `py.exe` puis installations par defaut.
fn windows_candidates(env: &impl Environment) -> Vec<CandidateBinary> {
    let drive = non_empty_var(env, SYSTEM_DRIVE_ENV).unwrap_or_else(|| DEFAULT_SYSTEM_DRIVE.into());

    vec![
        CandidateBinary::new("py.exe", CandidateSource::WindowsLauncher).with_flag("-2"),
        CandidateBinary::new(
            format!("{drive}\\Python27\\python.exe"),
            CandidateSource::WindowsFallback,
        ),
        CandidateBinary::new(
            format!("{drive}\\Python37\\python.exe"),
            CandidateSource::WindowsFallback,
        ),
    ]
}

/// Retourne la liste ordonnee des candidats pour l'environnement donne.
pub fn candidates_for(env: &impl Environment) -> Vec<CandidateBinary> {
    match env.platform() {
        PlatformFamily::Unix => common_candidates(env),
        PlatformFamily::Windows => {
            let mut candidates = common_candidates(env);
            candidates.extend(windows_candidates(env));
            candidates
        }
    }
}
