// Argument encoder: converts `key=value` command-line tokens into the
// JSON payload for a file metadata PATCH.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Prefix marking a nested metadata key, as in `metadata.sample_id=X`.
const METADATA_PREFIX: &str = "metadata.";

/// Key collecting repeated tag values, as in `tag=rna tag=batch3`.
const TAG_KEY: &str = "tag";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `key=value`, got `{0}`")]
    MissingEquals(String),
    #[error("empty metadata key in `{0}`")]
    EmptyMetadataKey(String),
}

/// PATCH payload built from the update tokens. `metadata` and `tags`
/// are omitted from the serialized body when no such token was given.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateData {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Encode an ordered token list into an `UpdateData` document.
///
/// Three token shapes are recognized, matched on the exact key segment
/// left of `=` (so `tagged=v` and `metadatax=v` are plain keys, not tag
/// or metadata tokens):
/// - `key=value` goes into the flat `fields` map,
/// - `metadata.key=value` goes into the nested `metadata` map,
/// - `tag=value` appends to the `tags` list in input order.
///
/// A key given twice keeps the later value (mapping semantics). A token
/// without `=` is a parse failure.
pub fn collect_update_data(args: &[String]) -> Result<UpdateData, ParseError> {
    let mut data = UpdateData::default();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| ParseError::MissingEquals(arg.clone()))?;
        if let Some(meta_key) = key.strip_prefix(METADATA_PREFIX) {
            if meta_key.is_empty() {
                return Err(ParseError::EmptyMetadataKey(arg.clone()));
            }
            data.metadata.insert(meta_key.to_string(), value.to_string());
        } else if key == TAG_KEY {
            data.tags.push(value.to_string());
        } else {
            data.fields.insert(key.to_string(), value.to_string());
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn plain_keys_map_through() {
        let data = collect_update_data(&args(&["name=reads.fastq", "project=p1"])).unwrap();
        assert_eq!(data.fields["name"], "reads.fastq");
        assert_eq!(data.fields["project"], "p1");
        assert!(data.metadata.is_empty());
        assert!(data.tags.is_empty());
    }

    #[test]
    fn later_duplicate_overwrites_earlier() {
        let data = collect_update_data(&args(&["name=a", "name=b"])).unwrap();
        assert_eq!(data.fields["name"], "b");
        assert_eq!(data.fields.len(), 1);
    }

    #[test]
    fn metadata_tokens_collect_into_nested_map() {
        let data = collect_update_data(&args(&[
            "metadata.sample_id=S1",
            "metadata.library=lib-3",
        ]))
        .unwrap();
        assert!(data.fields.is_empty());
        assert_eq!(data.metadata["sample_id"], "S1");
        assert_eq!(data.metadata["library"], "lib-3");
    }

    #[test]
    fn tags_keep_input_order() {
        let data = collect_update_data(&args(&["tag=rna", "tag=batch3", "tag=rna"])).unwrap();
        assert_eq!(data.tags, vec!["rna", "batch3", "rna"]);
    }

    #[test]
    fn value_side_may_contain_separators() {
        let data = collect_update_data(&args(&["metadata.note=a=b.c", "tag=x=y"])).unwrap();
        assert_eq!(data.metadata["note"], "a=b.c");
        assert_eq!(data.tags, vec!["x=y"]);
    }

    #[test]
    fn prefix_matching_is_exact_segment() {
        // `tagged` and `metadatax` merely start with the special words
        // and must be treated as plain keys.
        let data = collect_update_data(&args(&["tagged=yes", "metadatax=1", "metadata=2"]))
            .unwrap();
        assert_eq!(data.fields["tagged"], "yes");
        assert_eq!(data.fields["metadatax"], "1");
        assert_eq!(data.fields["metadata"], "2");
        assert!(data.metadata.is_empty());
        assert!(data.tags.is_empty());
    }

    #[test]
    fn empty_sections_are_not_serialized() {
        let data = collect_update_data(&args(&["name=x"])).unwrap();
        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(body, serde_json::json!({"name": "x"}));
    }

    #[test]
    fn populated_sections_serialize_nested() {
        let data =
            collect_update_data(&args(&["name=x", "metadata.k=v", "tag=t1", "tag=t2"])).unwrap();
        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "x",
                "metadata": {"k": "v"},
                "tags": ["t1", "t2"],
            })
        );
    }

    #[test]
    fn token_without_equals_is_an_error() {
        let err = collect_update_data(&args(&["name"])).unwrap_err();
        assert_eq!(err, ParseError::MissingEquals("name".to_string()));
    }

    #[test]
    fn bare_metadata_prefix_is_an_error() {
        let err = collect_update_data(&args(&["metadata.=v"])).unwrap_err();
        assert_eq!(err, ParseError::EmptyMetadataKey("metadata.=v".to_string()));
    }
}
