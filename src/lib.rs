//! Bootstrap de build: vérifie les prérequis machine (node, npm, Python) et
//! rafraîchit les binaires auxiliaires Electron.
//!
//! Cette unité reste volontairement mince: elle déclare les modules de domaine
//! puis délègue l'exécution à `app::run()`.

mod app;
pub mod commands;
pub mod config;
pub mod electron;
pub mod error;
pub mod interpreter;
pub mod requirements;
mod utils;

/// Lance le bootstrap et retourne le code de sortie du process.
pub fn run() -> std::process::ExitCode {
    app::run()
}
