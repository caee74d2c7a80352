//! Error types shared by the mash crates

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a mash session
#[derive(Error, Debug)]
pub enum Error {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("could not determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("No items found.")]
    EmptyResult,

    #[error("display error: {0}")]
    Display(#[from] io::Error),

    #[error("failed to execute `{command}`: {source}")]
    Exec {
        command: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
