/// Decrit une tentative de probe d'un interpreteur candidat.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProbeAttempt {
    /// Binaire tente.
    pub candidate: String,
    /// Origine du candidat (variable forcee, PATH, chemin Windows...).
    pub source: String,
    /// Resultat de la tentative.
    pub outcome: String,
    /// Version normalisee ou detail de l'erreur.
    pub detail: Option<String>,
}

/// Information de debug complete exposee pour diagnostic.
#[derive(Clone, Debug, serde::Serialize)]
pub struct InterpreterDebugInfo {
    /// Version retenue si succes.
    pub resolved_version: Option<String>,
    /// Binaire retenu si succes.
    pub resolved_binary: Option<String>,
    /// Code d'erreur en cas d'echec.
    pub error_code: Option<String>,
    /// Detail d'erreur en cas d'echec.
    pub error_details: Option<String>,
    /// Liste des tentatives effectuees.
    pub attempts: Vec<ProbeAttempt>,
}
