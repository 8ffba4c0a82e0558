//! Error type for spark-prompt widgets.

use std::io;
use thiserror::Error;

/// Errors a widget call can end with.
#[derive(Error, Debug)]
pub enum Error {
    /// The operator pressed a cancel chord where cancelling differs from
    /// answering no.
    #[error("User cancelled")]
    UserCancelled,

    /// The terminal backend failed (raw mode, writes, event reads).
    #[error("terminal error: {source}")]
    Terminal {
        #[from]
        source: io::Error,
    },
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
