//! Spec implements the FunctionSpec Extractor: locating a document's container invocation
//! parameters under the annotation-based or legacy metadata-based location.

use api::{ContainerSpec, FunctionSpec};
use tracing::trace;

use crate::{Error, Result};

/// Extract looks up a document's FunctionSpec, preferring the annotation form
/// (`config.kubernetes.io/function`) over the legacy form (`metadata.configFn`), and returns
/// `Ok(None)` if neither is present (the document is data, not a function).
pub fn extract(doc: &api::Document) -> Result<Option<FunctionSpec>> {
    if let Some(text) = doc.function_annotation() {
        trace!(kind = doc.kind(), "function spec found in annotation form");
        return FunctionSpec::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Spec(format!("annotation form: {e}")));
    }
    if let Some(value) = doc.legacy_config_fn() {
        trace!(kind = doc.kind(), "function spec found in legacy form");
        return FunctionSpec::from_value(value)
            .map(Some)
            .map_err(|e| Error::Spec(format!("legacy form: {e}")));
    }
    Ok(None)
}

/// Require_image checks that a container spec carries a non-empty `image`, for callers that are
/// about to invoke a real container runtime and cannot proceed without one.
pub fn require_image(container: &ContainerSpec) -> Result<&str> {
    if container.image.is_empty() {
        return Err(Error::Spec("function spec is missing container.image".to_string()));
    }
    Ok(container.image.as_str())
}
