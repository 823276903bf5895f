//! Options defines [`RunOptions`], the knobs that control one Orchestrator invocation.

use std::path::PathBuf;

/// RunOptions controls scoping, annotation retention, results persistence, network policy, and
/// envelope rendering for one [`crate::filter::run`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Global_scope places every input document in scope, bypassing path-based scoping.
    pub global_scope: bool,
    /// Keep_reader_annotations preserves the transient `index` annotation on final output.
    pub keep_reader_annotations: bool,
    /// Results_file, if set, is the path the Results Sink writes diagnostics to.
    pub results_file: Option<PathBuf>,
    /// Network, if set, overrides the default `"none"` network policy for the container.
    pub network: Option<String>,
    /// Flow_style_config renders the envelope's `functionConfig` subtree as a single line.
    pub flow_style_config: bool,
}

impl RunOptions {
    /// With_global_scope sets [`RunOptions::global_scope`].
    pub fn with_global_scope(mut self, value: bool) -> Self {
        self.global_scope = value;
        self
    }

    /// With_keep_reader_annotations sets [`RunOptions::keep_reader_annotations`].
    pub fn with_keep_reader_annotations(mut self, value: bool) -> Self {
        self.keep_reader_annotations = value;
        self
    }

    /// With_results_file sets [`RunOptions::results_file`].
    pub fn with_results_file(mut self, value: impl Into<PathBuf>) -> Self {
        self.results_file = Some(value.into());
        self
    }

    /// With_network sets [`RunOptions::network`].
    pub fn with_network(mut self, value: impl Into<String>) -> Self {
        self.network = Some(value.into());
        self
    }

    /// With_flow_style_config sets [`RunOptions::flow_style_config`].
    pub fn with_flow_style_config(mut self, value: bool) -> Self {
        self.flow_style_config = value;
        self
    }

    /// Network_or_default returns the configured network, or the default `"none"`.
    pub fn network_or_default(&self) -> &str {
        self.network.as_deref().unwrap_or(crate::DEFAULT_NETWORK)
    }
}
