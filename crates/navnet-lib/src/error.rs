use std::path::PathBuf;

use thiserror::Error;

use crate::network::NodeRef;

/// Convenient result alias for the navnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An input table could not be opened or read at all.
    #[error("input file {path} is unavailable: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when a query names a node reference absent from the network.
    #[error("unknown node reference: {reference}")]
    UnknownReference { reference: NodeRef },

    /// Raised when no mode-compatible route joins two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: NodeRef, goal: NodeRef },

    /// Raised when a recognised command was given unusable arguments.
    #[error("invalid arguments for {command}: {message}")]
    InvalidArguments { command: String, message: String },

    /// Wrapper for CSV reader errors that are not tied to a single row.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
