use std::path::PathBuf;

use thiserror::Error;

/// A poet directory whose name cannot be split into name and pinyin.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("malformed poet directory name: {name}")]
    MalformedDirName { name: String },
}

/// A poem file that could not be turned into a `Poem`. Non-fatal: the file is
/// skipped and the poet keeps its other poems.
#[derive(Debug, Error)]
pub enum PoemError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl PoemError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}
