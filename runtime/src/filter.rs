//! Filter implements the Orchestrator: the end-to-end composition of scoping, envelope
//! construction, container invocation, and output reintegration.

use api::Document;
use tracing::instrument;

use crate::envelope;
use crate::identity;
use crate::invoke::{self, DockerRuntime, Exec};
use crate::options::RunOptions;
use crate::pathdefault;
use crate::results::{self, Results};
use crate::scope;
use crate::spec;
use crate::Result;

/// RunOutcome is the merged document sequence and diagnostic results of one orchestrator run.
pub struct RunOutcome {
    /// Items is the full merged output sequence: transformed in-scope items spliced back among
    /// untouched out-of-scope items.
    pub items: Vec<Document>,
    /// Results are the diagnostics the function emitted, if any.
    pub results: Results,
}

/// Run executes the full scope → envelope → invoke → reintegrate sequence against `candidates`,
/// using `function_config` to discover the container invocation and the scope directory.
/// `exec` is the Container Invoker seam; production callers pass [`DockerRuntime`], tests
/// substitute [`crate::invoke::TestExec`].
#[instrument(skip(function_config, candidates, options, exec), fields(function = function_config.kind()))]
pub fn run(
    function_config: &Document,
    candidates: Vec<Document>,
    options: &RunOptions,
    exec: &dyn Exec,
) -> Result<RunOutcome> {
    let function_spec = spec::extract(function_config)?;
    let container = function_spec.and_then(|s| s.container).unwrap_or_default();
    if exec.requires_image() {
        spec::require_image(&container)?;
    }

    let scope::Scoped {
        mut in_scope,
        out_of_scope,
        mask,
    } = scope::scope(function_config, candidates, options.global_scope);

    identity::assign(&mut in_scope);

    let stdin = envelope::encode(&in_scope, function_config, options.flow_style_config)?;
    let network = if container.network.required {
        options.network_or_default()
    } else {
        crate::DEFAULT_NETWORK
    };
    let invocation = invoke::run(exec, &container, network, stdin.as_bytes())?;

    let stdout = String::from_utf8_lossy(&invocation.stdout);
    let (mut items, diagnostics) = envelope::decode(&stdout)?;

    pathdefault::apply(&mut items, function_config);

    let mut merged = splice(mask, items.drain(..).collect(), out_of_scope);
    identity::strip(&mut merged, options.keep_reader_annotations);

    let results = results::sink(diagnostics, options.results_file.as_deref(), invocation.status)?;

    Ok(RunOutcome {
        items: merged,
        results,
    })
}

/// Splice reconstructs the original relative ordering: out-of-scope items keep their original
/// positions; transformed in-scope items fill the remaining positions in the order the function
/// returned them. If the function returned fewer items than went in, trailing in-scope slots go
/// unfilled; if it returned more, the extras are appended at the tail.
fn splice(mask: Vec<bool>, transformed: Vec<Document>, out_of_scope: Vec<Document>) -> Vec<Document> {
    let mut transformed = transformed.into_iter();
    let mut out_of_scope = out_of_scope.into_iter();
    let mut merged = Vec::with_capacity(mask.len());

    for was_in_scope in mask {
        if was_in_scope {
            if let Some(item) = transformed.next() {
                merged.push(item);
            }
        } else if let Some(item) = out_of_scope.next() {
            merged.push(item);
        }
    }
    merged.extend(transformed);
    merged
}

/// Default_exec returns the reference `docker run` invoker.
pub fn default_exec() -> DockerRuntime {
    DockerRuntime
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::TestExec;
    use crate::testing::{doc_with_path, test};
    use crate::Error;

    fn candidates() -> Vec<Document> {
        vec![
            doc_with_path("Deployment", "deployment-foo", None),
            doc_with_path("Service", "service-foo", None),
        ]
    }

    #[test]
    fn add_path_annotation_for_an_identity_function() {
        let cfg = doc_with_path("ConfigMap", "fn", None);
        let exec = TestExec(vec!["cat".to_string()]);
        let outcome = run(&cfg, candidates(), &RunOptions::default(), &exec).unwrap();
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(
            outcome.items[0].path().as_deref(),
            Some("deployment_deployment-foo.yaml")
        );
        assert_eq!(
            outcome.items[1].path().as_deref(),
            Some("service_service-foo.yaml")
        );
        assert!(outcome.items[0].index().is_none());
    }

    #[test]
    fn scope_missing_leaves_items_untouched_but_indexed() {
        let cfg = doc_with_path("ConfigMap", "fn", Some("foo/bar.yaml"));
        let exec = TestExec(vec!["cat".to_string()]);
        let outcome = run(&cfg, candidates(), &RunOptions::default(), &exec).unwrap();
        assert_eq!(outcome.items.len(), 2);
        // nothing was in scope, so nothing was sent through the function; paths stay absent,
        // since path defaulting only ever touches decoded (formerly in-scope) items. See the
        // scope-vs-path-annotation Open Question in DESIGN.md for why a path-less candidate is
        // treated as out of scope here rather than swept in.
        assert!(outcome.items[0].path().is_none());
    }

    #[test]
    fn global_scope_overrides_missing_path_annotations() {
        let cfg = doc_with_path("ConfigMap", "fn", Some("foo/bar.yaml"));
        let exec = TestExec(vec!["cat".to_string()]);
        let opts = RunOptions::default().with_global_scope(true);
        let outcome = run(&cfg, candidates(), &opts, &exec).unwrap();
        assert_eq!(outcome.items.len(), 2);
        assert!(outcome.items[0].path().is_some());
    }

    #[test]
    fn keep_reader_annotations_preserves_the_index() {
        let cfg = doc_with_path("ConfigMap", "fn", None);
        let exec = TestExec(vec!["cat".to_string()]);
        let opts = RunOptions::default().with_keep_reader_annotations(true);
        let outcome = run(&cfg, candidates(), &opts, &exec).unwrap();
        assert_eq!(outcome.items[0].index(), Some(0));
        assert_eq!(outcome.items[1].index(), Some(1));
    }

    /// ImageRequiringExec behaves like [`TestExec`] but, like [`crate::invoke::DockerRuntime`],
    /// insists the function spec carry a `container.image` before it runs.
    struct ImageRequiringExec(TestExec);

    impl crate::invoke::Exec for ImageRequiringExec {
        fn argv(&self, spec: &api::ContainerSpec, network: &str) -> Vec<String> {
            self.0.argv(spec, network)
        }
        fn requires_image(&self) -> bool {
            true
        }
    }

    #[test]
    fn missing_container_image_is_a_spec_error_for_image_requiring_invokers() {
        let cfg = doc_with_path("ConfigMap", "fn", None);
        let exec = ImageRequiringExec(TestExec(vec!["cat".to_string()]));
        let err = run(&cfg, candidates(), &RunOptions::default(), &exec).unwrap_err();
        assert!(matches!(err, Error::Spec(_)), "expected SpecError, got {err:?}");
    }

    /// NetworkRecordingExec records the `network` argument it was invoked with, then runs `cat`.
    struct NetworkRecordingExec(std::sync::Mutex<Option<String>>);

    impl crate::invoke::Exec for NetworkRecordingExec {
        fn argv(&self, _spec: &api::ContainerSpec, network: &str) -> Vec<String> {
            *self.0.lock().unwrap() = Some(network.to_string());
            vec!["cat".to_string()]
        }
    }

    fn cfg_with_function_spec(network_required: bool) -> Document {
        let annotation = format!(
            "container:\n  image: gcr.io/example/fn:v1\n  network:\n    required: {network_required}\n"
        );
        let mut cfg = doc_with_path("ConfigMap", "fn", None);
        cfg.set_annotation("config.kubernetes.io/function", annotation);
        cfg
    }

    #[test]
    fn network_stays_none_when_the_function_does_not_request_it() {
        let cfg = cfg_with_function_spec(false);
        let exec = NetworkRecordingExec(std::sync::Mutex::new(None));
        let opts = RunOptions::default().with_network("bridge");
        run(&cfg, candidates(), &opts, &exec).unwrap();
        assert_eq!(exec.0.lock().unwrap().as_deref(), Some("none"));
    }

    #[test]
    fn network_override_applies_only_when_the_function_requests_it() {
        let cfg = cfg_with_function_spec(true);
        let exec = NetworkRecordingExec(std::sync::Mutex::new(None));
        let opts = RunOptions::default().with_network("bridge");
        run(&cfg, candidates(), &opts, &exec).unwrap();
        assert_eq!(exec.0.lock().unwrap().as_deref(), Some("bridge"));
    }

    #[test]
    fn network_required_without_an_override_still_defaults_to_none() {
        let cfg = cfg_with_function_spec(true);
        let exec = NetworkRecordingExec(std::sync::Mutex::new(None));
        run(&cfg, candidates(), &RunOptions::default(), &exec).unwrap();
        assert_eq!(exec.0.lock().unwrap().as_deref(), Some("none"));
    }
}
