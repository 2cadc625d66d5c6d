use std::process::ExitCode;

use clap::Parser;

use crate::commands;
use crate::config::BootstrapConfig;
use crate::electron::RefreshMode;
use crate::error::BootstrapError;

mod cli;

pub use cli::{Cli, Cmd};

/// Initialise le logger; `RUST_LOG` reste prioritaire sur `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Exécute la commande demandée.
async fn dispatch(cli: Cli) -> Result<(), BootstrapError> {
    match cli.cmd {
        Cmd::VerifyRequirements { ci, timeout_secs } => {
            let config = BootstrapConfig::new(cli.repo, ci);
            commands::verify::verify_requirements(config, timeout_secs).await?;
        }
        Cmd::RedownloadElectronBins => {
            let config = BootstrapConfig::new(cli.repo, false);
            commands::electron_bins::refresh(&config, RefreshMode::Redownload).await?;
        }
        Cmd::ReinstallElectronBins => {
            let config = BootstrapConfig::new(cli.repo, false);
            commands::electron_bins::refresh(&config, RefreshMode::Reinstall).await?;
        }
        Cmd::DiagnosePython => {
            let info = commands::diagnostics::diagnose_python();
            println!("{}", commands::diagnostics::render_diagnostics(&info)?);
        }
    }
    Ok(())
}

/// Parse la ligne de commande, exécute la commande et traduit le résultat en code de sortie.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => {
            let result = runtime.block_on(dispatch(cli));
            // Une vérification expirée peut laisser un thread bloqué sur un binaire figé.
            runtime.shutdown_background();
            result
        }
        Err(e) => Err(BootstrapError::Runtime(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
