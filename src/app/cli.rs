use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ligne de commande du bootstrap.
#[derive(Parser, Debug)]
#[command(
    name = "build-bootstrap",
    version,
    about = "Checks build prerequisites and refreshes bundled Electron helper binaries"
)]
pub struct Cli {
    /// Racine du dépôt (contient package.json)
    #[arg(long, global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Augmente la verbosité des logs (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Commandes exposées par le binaire.
#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Vérifie les versions de node, npm et Python
    VerifyRequirements {
        /// Exigences CI (npm 6+, npm local ignoré)
        #[arg(long)]
        ci: bool,
        /// Abandonne la vérification après ce nombre de secondes
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Re-télécharge chromedriver et mksnapshot avec le node du PATH
    RedownloadElectronBins,
    /// Re-télécharge chromedriver et mksnapshot avec le node de npm, sortie relayée
    ReinstallElectronBins,
    /// Affiche en JSON chaque interpréteur Python essayé
    DiagnosePython,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verify_flags() {
        let cli = Cli::parse_from([
            "build-bootstrap",
            "--repo",
            "/src/app",
            "verify-requirements",
            "--ci",
            "--timeout-secs",
            "30",
        ]);
        assert_eq!(cli.repo, PathBuf::from("/src/app"));
        match cli.cmd {
            Cmd::VerifyRequirements { ci, timeout_secs } => {
                assert!(ci);
                assert_eq!(timeout_secs, Some(30));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verbosity_is_counted_after_subcommand() {
        let cli = Cli::parse_from(["build-bootstrap", "diagnose-python", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.cmd, Cmd::DiagnosePython));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
