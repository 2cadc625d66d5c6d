/// Diagnostic de résolution de l'interpréteur Python.
pub mod diagnostics;
/// Rafraîchissement des binaires auxiliaires Electron.
pub mod electron_bins;
/// Vérification des prérequis machine.
pub mod verify;
