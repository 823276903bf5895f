#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]
//! Fn_api contains the wire data model shared by the function runner: the `Document` tree type,
//! the `FunctionSpec`/`StorageMount` types extracted from it, and the `ResourceList` envelope that
//! carries both across a container boundary.
//!
//! This crate plays the role of the "document library" that the runner treats as a dependency
//! rather than reimplementing inline: callers of `fn-runtime` never reach into `serde_yaml`
//! directly, they go through the accessors here.

mod document;
mod envelope;
mod spec;

pub use document::Document;
pub use envelope::ResourceList;
pub use spec::{ContainerSpec, FunctionSpec, MountType, NetworkSpec, StorageMount};

/// Path_annotation is the well-known annotation key naming a document's origin/destination file.
pub static PATH_ANNOTATION: &str = "config.kubernetes.io/path";
/// Index_annotation is the transient annotation key recording a document's position in the input
/// stream, assigned before a function runs and stripped afterward unless the caller opts to keep it.
pub static INDEX_ANNOTATION: &str = "config.kubernetes.io/index";
/// Function_annotation is the annotation key holding an inline, literal-block FunctionSpec.
pub static FUNCTION_ANNOTATION: &str = "config.kubernetes.io/function";
/// Legacy_function_key is the `metadata` subkey holding an inline FunctionSpec in documents
/// written before the annotation form existed.
pub static LEGACY_FUNCTION_KEY: &str = "configFn";

/// Resource_list_api_version is the `apiVersion` every ResourceList envelope carries.
pub static RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1alpha1";
/// Resource_list_kind is the `kind` every ResourceList envelope carries.
pub static RESOURCE_LIST_KIND: &str = "ResourceList";

/// Error enumerates the failures this crate's data model can produce: a document that doesn't
/// parse as a mapping, or is missing a field a caller asked for unconditionally.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Yaml indicates the underlying text failed to parse, or a typed value failed to convert.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// NotAMapping indicates a document's root node was a scalar or sequence, not a mapping.
    #[error("document root is not a mapping")]
    NotAMapping,
    /// MissingField indicates a required field (e.g. `kind`) was absent from a document.
    #[error("document is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Result is this crate's typedef, defaulting the error to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
