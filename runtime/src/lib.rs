#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]
//! Fn_runtime implements the configuration-function runner: given a function config document and
//! a stream of candidate documents, it scopes the candidates, packages them into a ResourceList
//! envelope, runs a container (or an in-process test hook) as the function, and reintegrates the
//! container's output back into the stream.
//!
//! The entry point is [`filter::run`]. The other modules are its components, each named after the
//! role it plays in that pipeline.

use std::process::ExitStatus;

pub use api::{
    ContainerSpec, Document, FunctionSpec, MountType, NetworkSpec, ResourceList, StorageMount,
};

pub mod envelope;
pub mod filter;
pub mod identity;
pub mod invoke;
pub mod options;
pub mod pathdefault;
pub mod results;
pub mod scope;
pub mod spec;
pub mod stream;
mod util;

#[cfg(test)]
pub mod testing;

/// Prelude re-exports the types most call sites of this crate need.
pub mod prelude {
    pub use crate::{
        filter::{run, RunOutcome},
        options::RunOptions,
        Document, Error, FunctionSpec, Result,
    };
}

/// Default_network is the `--network` value used when a function does not request network
/// access.
pub static DEFAULT_NETWORK: &str = "none";

/// Error enumerates every way a run of the function runner can fail.
///
/// When more than one failure applies to the same run, [`Error::ResultsFile`] supersedes
/// [`Error::ContainerExit`] (a results file that can't be written is reported even if the
/// container that produced those results also exited non-zero).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// ResultsFile indicates the configured results file could not be created, opened, or
    /// written.
    #[error("open {path}: {source}")]
    ResultsFile {
        /// Path is the results file path that could not be written.
        path: String,
        /// Source is the underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// ContainerExit indicates the container ran to completion with a non-zero exit status.
    #[error("exit status {}", format_status(.0))]
    ContainerExit(ExitStatus),
    /// Envelope indicates the container's stdout did not parse as a ResourceList.
    #[error("envelope error: {0}")]
    Envelope(#[from] api::Error),
    /// Spec indicates a function config was missing a required field, e.g. `container.image`.
    #[error("function spec error: {0}")]
    Spec(String),
    /// Io indicates an I/O failure writing the container's stdin or reading its stdout/stderr.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Other is a catch-all for failures that don't fit the categories above.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

fn format_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// Result is this crate's typedef, defaulting the error to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
