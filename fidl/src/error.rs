use std::io;

use franca::error::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FidlError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
