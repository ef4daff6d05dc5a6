use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("failed to read {}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a stored string could not be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("value is empty")]
    Empty,
    #[error("invalid boolean: {text:?}")]
    InvalidBool { text: String },
    #[error("invalid number: {text:?}")]
    InvalidNumber { text: String },
}
