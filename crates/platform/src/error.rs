use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Failure to read or decode a resolved status source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed throttled value {value:?} in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Path of the status file that failed.
    pub fn path(&self) -> &Path {
        match self {
            Error::Read { path, .. } | Error::Parse { path, .. } => path,
        }
    }

    /// True when the status file disappeared after discovery.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
