//! Stream implements the minimal Stream Reader/Writer: splitting/joining a multi-document YAML
//! text on `---` boundaries. No comment or anchor preservation; that's an external collaborator's
//! job, not this crate's.

use api::Document;
use serde::Deserialize;
use serde_yaml::Value;

use crate::Result;

/// Read_stream splits `text` on YAML document boundaries, skips empty documents, and parses each
/// remaining one as a [`Document`]. Uses `serde_yaml`'s own multi-document deserializer rather
/// than splitting on the literal string `"---"`, so a `---` inside a quoted or block scalar
/// doesn't get mistaken for a document boundary.
pub fn read_stream(text: &str) -> Result<Vec<Document>> {
    serde_yaml::Deserializer::from_str(text)
        .map(|de| Value::deserialize(de).map_err(api::Error::from))
        .filter(|res| !matches!(res, Ok(Value::Null)))
        .map(|res| Ok(Document::from_value(res?)?))
        .collect()
}

/// Write_stream renders each document and joins them with `"---\n"` separators.
pub fn write_stream(docs: &[Document]) -> Result<String> {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&doc.to_string()?);
    }
    Ok(out)
}
