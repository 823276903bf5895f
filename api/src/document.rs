//! Document implements the minimal mutable YAML-tree type the rest of this workspace treats as
//! "the document library": parse text in, read/write annotations and a handful of well-known
//! fields, serialize text out, preserving anything it doesn't understand untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::{Error, Result, FUNCTION_ANNOTATION, INDEX_ANNOTATION, LEGACY_FUNCTION_KEY, PATH_ANNOTATION};

/// Document wraps a single YAML mapping: a structured record with a recognizable `apiVersion`,
/// `kind`, and `metadata` subtree. Identity is by object reference within one run; cloning a
/// Document produces an independent copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document(Mapping);

fn get_str<'a>(m: &'a Mapping, key: &str) -> Option<&'a str> {
    m.get(key).and_then(Value::as_str)
}

impl Document {
    /// From_value converts an already-parsed YAML value into a Document, failing if the root
    /// isn't a mapping.
    pub fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Mapping(m) => Ok(Document(m)),
            _ => Err(Error::NotAMapping),
        }
    }

    /// From_str parses one YAML document's worth of text.
    pub fn from_str(s: &str) -> Result<Self> {
        let v: Value = serde_yaml::from_str(s)?;
        Self::from_value(v)
    }

    /// To_value hands back the underlying tree, e.g. for embedding inside another structure.
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.0.clone())
    }

    /// To_string renders the document as a standalone YAML text block.
    pub fn to_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// Api_version returns the top-level `apiVersion`, if present.
    pub fn api_version(&self) -> Option<&str> {
        get_str(&self.0, "apiVersion")
    }

    /// Kind returns the top-level `kind`, if present.
    pub fn kind(&self) -> Option<&str> {
        get_str(&self.0, "kind")
    }

    /// Require_kind is [`Document::kind`], but fails loudly for callers (like the Path Defaulter)
    /// that cannot proceed without it.
    pub fn require_kind(&self) -> Result<&str> {
        self.kind().ok_or(Error::MissingField("kind"))
    }

    /// Name returns `metadata.name`, if present.
    pub fn name(&self) -> Option<&str> {
        self.metadata().and_then(|m| get_str(m, "name"))
    }

    /// Require_name is [`Document::name`], but fails loudly.
    pub fn require_name(&self) -> Result<&str> {
        self.name().ok_or(Error::MissingField("metadata.name"))
    }

    /// Metadata returns the `metadata` subtree, if present.
    pub fn metadata(&self) -> Option<&Mapping> {
        self.0.get("metadata").and_then(Value::as_mapping)
    }

    fn metadata_mut(&mut self) -> &mut Mapping {
        if !matches!(self.0.get("metadata"), Some(Value::Mapping(_))) {
            self.0
                .insert(Value::from("metadata"), Value::Mapping(Mapping::new()));
        }
        self.0
            .get_mut("metadata")
            .and_then(Value::as_mapping_mut)
            .expect("metadata was just inserted as a mapping")
    }

    fn annotations_mapping(&self) -> Option<&Mapping> {
        self.metadata()
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_mapping)
    }

    fn annotations_mapping_mut(&mut self) -> &mut Mapping {
        let meta = self.metadata_mut();
        if !matches!(meta.get("annotations"), Some(Value::Mapping(_))) {
            meta.insert(Value::from("annotations"), Value::Mapping(Mapping::new()));
        }
        meta.get_mut("annotations")
            .and_then(Value::as_mapping_mut)
            .expect("annotations was just inserted as a mapping")
    }

    /// Annotations snapshots every string-valued entry of `metadata.annotations`.
    pub fn annotations(&self) -> BTreeMap<String, String> {
        self.annotations_mapping()
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_string(), v.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Annotation reads a single annotation value.
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.annotations_mapping()
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Set_annotation writes a single annotation value, creating `metadata.annotations` if needed.
    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations_mapping_mut()
            .insert(Value::from(key.into()), Value::from(value.into()));
    }

    /// Remove_annotation deletes a single annotation, returning its prior value.
    pub fn remove_annotation(&mut self, key: &str) -> Option<String> {
        let meta = self.0.get_mut("metadata").and_then(Value::as_mapping_mut)?;
        let anns = meta.get_mut("annotations").and_then(Value::as_mapping_mut)?;
        anns.remove(key).and_then(|v| v.as_str().map(str::to_string))
    }

    /// Path is the well-known `config.kubernetes.io/path` annotation.
    pub fn path(&self) -> Option<String> {
        self.annotation(PATH_ANNOTATION)
    }

    /// Set_path writes the `config.kubernetes.io/path` annotation.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.set_annotation(PATH_ANNOTATION, path.into());
    }

    /// Index is the well-known `config.kubernetes.io/index` annotation, parsed as a number.
    pub fn index(&self) -> Option<usize> {
        self.annotation(INDEX_ANNOTATION)?.parse().ok()
    }

    /// Set_index writes the `config.kubernetes.io/index` annotation.
    pub fn set_index(&mut self, index: usize) {
        self.set_annotation(INDEX_ANNOTATION, index.to_string());
    }

    /// Clear_index removes the `config.kubernetes.io/index` annotation.
    pub fn clear_index(&mut self) {
        self.remove_annotation(INDEX_ANNOTATION);
    }

    /// Function_annotation returns the literal text of the `config.kubernetes.io/function`
    /// annotation, if set.
    pub fn function_annotation(&self) -> Option<String> {
        self.annotation(FUNCTION_ANNOTATION)
    }

    /// Legacy_config_fn returns the `metadata.configFn` subtree, if set.
    pub fn legacy_config_fn(&self) -> Option<Value> {
        self.metadata()
            .and_then(|m| m.get(LEGACY_FUNCTION_KEY))
            .cloned()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Mapping::deserialize(deserializer).map(Document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deployment() -> Document {
        Document::from_str(
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: deployment-foo\n",
        )
        .unwrap()
    }

    #[test]
    fn accessors_read_well_known_fields() {
        let d = deployment();
        assert_eq!(d.api_version(), Some("apps/v1"));
        assert_eq!(d.kind(), Some("Deployment"));
        assert_eq!(d.name(), Some("deployment-foo"));
        assert_eq!(d.path(), None);
    }

    #[test]
    fn set_annotation_creates_missing_subtrees() {
        let mut d = Document::from_str("apiVersion: v1\nkind: ConfigMap\n").unwrap();
        assert!(d.metadata().is_none());
        d.set_path("foo/bar.yaml");
        assert_eq!(d.path().as_deref(), Some("foo/bar.yaml"));
        d.set_index(3);
        assert_eq!(d.index(), Some(3));
        d.clear_index();
        assert_eq!(d.index(), None);
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = Document::from_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, Error::NotAMapping));
    }

    #[test]
    fn round_trips_through_text() {
        let mut d = deployment();
        d.set_annotation("custom.example.com/hint", "keep-me");
        let text = d.to_string().unwrap();
        let back = Document::from_str(&text).unwrap();
        assert_eq!(d, back);
    }
}
