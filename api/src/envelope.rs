//! Envelope defines [`ResourceList`], the wire format exchanged with a function over stdin/stdout.

use serde::{Deserialize, Serialize};

use crate::{Document, RESOURCE_LIST_API_VERSION, RESOURCE_LIST_KIND};

/// ResourceList is the ResourceList envelope: a function's input or output, carrying the in-scope
/// items, the function config that was run, and (on output only) a results sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourceList {
    /// Api_version is always [`RESOURCE_LIST_API_VERSION`] for envelopes this crate produces;
    /// on decode it is read but not enforced, matching "unknown top-level keys are ignored".
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Kind is always [`RESOURCE_LIST_KIND`] for envelopes this crate produces.
    pub kind: String,
    /// Items is the in-scope document sequence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Document>,
    /// Function_config is the function config document, if any.
    #[serde(rename = "functionConfig", skip_serializing_if = "Option::is_none")]
    pub function_config: Option<Document>,
    /// Results is the optional diagnostics sequence a function emits on output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Document>,
}

impl ResourceList {
    /// New builds an empty envelope with the well-known `apiVersion`/`kind` already set.
    pub fn new() -> Self {
        ResourceList {
            api_version: RESOURCE_LIST_API_VERSION.to_string(),
            kind: RESOURCE_LIST_KIND.to_string(),
            items: Vec::new(),
            function_config: None,
            results: Vec::new(),
        }
    }
}
