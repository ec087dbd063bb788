use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error reading input file {}: {source}", path.display())]
    InputFile { path: PathBuf, source: io::Error },
    #[error("Error writing output file {}: {source}", path.display())]
    OutputFile { path: PathBuf, source: io::Error },
    #[error("{0} is left recursive, eliminate left recursion first")]
    LeftRecursion(String),
    #[error("Error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}
