//! Extras that only show up during tests.

use api::Document;

/// Test shadows the compiler's `#[test]` attribute with `test_log`'s, so `tracing` output from a
/// subprocess or file-IO exercising test surfaces on failure without per-test boilerplate.
/// Imported by the `invoke`, `filter`, and `results` test modules, which exercise exactly that.
pub use test_log::test;

/// Doc_with_path builds a minimal document of the given `kind`/`name`, with
/// `config.kubernetes.io/path` set when `path` is `Some`.
pub fn doc_with_path(kind: &str, name: &str, path: Option<&str>) -> Document {
    let text = format!("apiVersion: v1\nkind: {kind}\nmetadata:\n  name: {name}\n");
    let mut doc = Document::from_str(&text).expect("fixture text is valid YAML");
    if let Some(path) = path {
        doc.set_path(path);
    }
    doc
}
