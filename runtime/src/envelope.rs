//! Envelope implements the Envelope Codec: building a ResourceList from in-scope items and a
//! function config, and parsing one back from a container's stdout.

use api::{Document, ResourceList, RESOURCE_LIST_API_VERSION, RESOURCE_LIST_KIND};

use crate::{Error, Result};

/// Encode serializes `items` and `function_config` as a ResourceList. When `flow_style_config` is
/// set, the `functionConfig` subtree is rendered as a single compact line (valid YAML, since YAML
/// is a superset of JSON) instead of a nested block — a cosmetic, diff-friendliness knob with no
/// effect on decoding.
pub fn encode(items: &[Document], function_config: &Document, flow_style_config: bool) -> Result<String> {
    let rl = ResourceList {
        api_version: RESOURCE_LIST_API_VERSION.to_string(),
        kind: RESOURCE_LIST_KIND.to_string(),
        items: items.to_vec(),
        function_config: None,
        results: Vec::new(),
    };
    let mut text = serde_yaml::to_string(&rl).map_err(api::Error::from)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    if flow_style_config {
        let compact =
            serde_json::to_string(&function_config.to_value()).map_err(|e| Error::Other(e.into()))?;
        text.push_str("functionConfig: ");
        text.push_str(&compact);
        text.push('\n');
    } else {
        let block = serde_yaml::to_string(&function_config.to_value()).map_err(api::Error::from)?;
        text.push_str("functionConfig:\n");
        for line in block.trim_end().lines() {
            text.push_str("  ");
            text.push_str(line);
            text.push('\n');
        }
    }

    Ok(text)
}

/// Decode parses a container's stdout as a ResourceList, returning its `items` and `results`.
/// Top-level keys this crate doesn't understand are ignored, per the wire contract.
pub fn decode(text: &str) -> Result<(Vec<Document>, Vec<Document>)> {
    let rl: ResourceList = serde_yaml::from_str(text).map_err(api::Error::from)?;
    Ok((rl.items, rl.results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::doc_with_path;

    fn function_config() -> Document {
        doc_with_path("ConfigMap", "fn", Some("foo/bar.yaml"))
    }

    #[test]
    fn round_trip_through_an_identity_transform_is_lossless() {
        let items = vec![
            doc_with_path("Deployment", "deployment-foo", None),
            doc_with_path("Service", "service-foo", None),
        ];
        let text = encode(&items, &function_config(), false).unwrap();
        let (decoded, results) = decode(&text).unwrap();
        assert_eq!(decoded.len(), items.len());
        assert_eq!(decoded[0].name(), Some("deployment-foo"));
        assert_eq!(decoded[1].name(), Some("service-foo"));
        assert!(results.is_empty());
    }

    #[test]
    fn flow_style_renders_function_config_on_one_line() {
        let text = encode(&[], &function_config(), true).unwrap();
        let line = text
            .lines()
            .find(|l| l.starts_with("functionConfig:"))
            .unwrap();
        assert!(line.contains("{\"apiVersion\""), "line was: {line}");
        // decoding must still succeed and carry the same function config through.
        let rl: ResourceList = serde_yaml::from_str(&text).unwrap();
        assert_eq!(rl.function_config.unwrap().name(), Some("fn"));
    }

    #[test]
    fn block_style_indents_the_nested_document() {
        let text = encode(&[], &function_config(), false).unwrap();
        assert!(text.contains("functionConfig:\n  apiVersion:"));
    }

    #[test]
    fn decode_is_permissive_of_unknown_keys_and_empty_sections() {
        let text = "apiVersion: config.kubernetes.io/v1alpha1\nkind: ResourceList\nunknown: true\n";
        let (items, results) = decode(text).unwrap();
        assert!(items.is_empty());
        assert!(results.is_empty());
    }
}
