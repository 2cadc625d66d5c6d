use regex::Regex;

lazy_static::lazy_static! {
    /// Marqueur de release candidate (`rc1`, `RC2`...) et tout ce qui suit.
    static ref RELEASE_CANDIDATE_SUFFIX: Regex = Regex::new(r"(?is)rc.*$").unwrap();
}

/// Couple majeur/mineur extrait de la version rapportee par un interpreteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    /// Python 2.7, ou Python 3.5 et plus.
    pub fn is_supported(&self) -> bool {
        (self.major == 2 && self.minor == 7) || (self.major == 3 && self.minor >= 5)
    }
}

/// Normalise la sortie brute d'un interpreteur.
///
/// Supprime tous les `+`, coupe un suffixe `rc<...>` (insensible a la casse)
/// puis retire les espaces autour.
pub fn normalize_version(raw: &str) -> String {
    let without_plus = raw.replace('+', "");
    RELEASE_CANDIDATE_SUFFIX
        .replace(without_plus.trim(), "")
        .trim()
        .to_string()
}

/// Extrait `(majeur, mineur)` d'une version deja normalisee.
pub fn parse_major_minor(normalized: &str) -> Option<PythonVersion> {
    let mut tokens = normalized.split('.');
    let major = tokens.next()?.trim().parse::<u32>().ok()?;
    let minor = tokens.next()?.trim().parse::<u32>().ok()?;
    Some(PythonVersion { major, minor })
}
