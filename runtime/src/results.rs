//! Results implements the Results Sink: surfacing a function's diagnostic output and, if
//! configured, persisting it to a file — with file-write failures superseding a non-zero
//! container exit.

use std::path::Path;
use std::process::ExitStatus;

use api::Document;
use tracing::warn;

use crate::{Error, Result};

/// Results is the in-memory handle the sink hands back to the caller, regardless of whether the
/// invocation ultimately errored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Results {
    /// Items are the diagnostic documents the function returned, in the order it returned them.
    pub items: Vec<Document>,
}

/// Sink writes `results` to `results_file` if configured, then checks `status`. A results-file
/// write failure takes precedence over a non-zero exit status, per the documented error
/// precedence.
pub fn sink(results: Vec<Document>, results_file: Option<&Path>, status: ExitStatus) -> Result<Results> {
    let results = Results { items: results };

    if let Some(path) = results_file {
        write_file(path, &results.items)?;
    }

    if !status.success() {
        warn!(code = ?status.code(), "container exited non-zero");
        return Err(Error::ContainerExit(status));
    }

    Ok(results)
}

fn write_file(path: &Path, items: &[Document]) -> Result<()> {
    let yaml = serde_yaml::to_string(items).map_err(api::Error::from)?;
    std::fs::write(path, yaml).map_err(|source| Error::ResultsFile {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{doc_with_path, test};
    use pretty_assertions::assert_eq;
    use std::os::unix::process::ExitStatusExt;

    fn ok_status() -> ExitStatus {
        ExitStatus::from_raw(0)
    }

    fn failed_status() -> ExitStatus {
        ExitStatus::from_raw(1 << 8)
    }

    #[test]
    fn results_are_returned_and_written_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.yaml");
        let items = vec![doc_with_path("ObjectError", "err", None)];

        let results = sink(items.clone(), Some(&path), ok_status()).unwrap();
        assert_eq!(results.items, items);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.trim().starts_with("- apiVersion"));
    }

    #[test]
    fn non_zero_exit_errors_but_still_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.yaml");
        let items = vec![doc_with_path("ObjectError", "err", None)];

        let err = sink(items, Some(&path), failed_status()).unwrap_err();
        assert_eq!(err.to_string(), "exit status 1");
        assert!(path.exists());
    }

    #[test]
    fn results_file_error_supersedes_a_non_zero_exit() {
        let err = sink(Vec::new(), Some(Path::new("/not/real/file")), failed_status()).unwrap_err();
        assert!(matches!(err, Error::ResultsFile { .. }));
        assert!(err.to_string().starts_with("open /not/real/file:"));
    }

    #[test]
    fn no_results_file_configured_is_a_no_op_on_success() {
        let results = sink(Vec::new(), None, ok_status()).unwrap();
        assert!(results.items.is_empty());
    }
}
