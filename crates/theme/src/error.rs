use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme file name is empty")]
    EmptyFilename,
    #[error("failed to open theme {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("saving themes is not implemented (requested {path})")]
    SaveNotImplemented { path: PathBuf },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
