//! Re-téléchargement de chromedriver et mksnapshot quand la version Electron change.

mod bins;

pub use bins::{
    refresh_electron_bins, resolve_node_module, AuxiliaryBinary, DownloadResult, DownloadStatus,
    ElectronBinsError, RefreshMode, RefreshReport, AUXILIARY_BINARIES,
    ELECTRON_CUSTOM_VERSION_ENV,
};
