use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header that always has an entry in a metadata record, even when the
/// caller sent none.
pub const CONTENT_TYPE: &str = "content-type";

/// Application headers carrying this prefix survive the round trip through
/// the store; everything else is dropped.
pub const METADATA_HEADER_PREFIX: &str = "x-rebase-";

/// A stored header value. Repeated headers keep their values in arrival
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multi(Vec<String>),
}

impl HeaderValue {
    fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                *self = HeaderValue::Multi(vec![std::mem::take(first), value]);
            }
            HeaderValue::Multi(values) => values.push(value),
        }
    }

    /// All values comma-joined, the measure applied to multi-valued headers
    /// by admission control.
    pub fn joined(&self) -> String {
        match self {
            HeaderValue::Single(value) => value.clone(),
            HeaderValue::Multi(values) => values.join(","),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            HeaderValue::Single(value) => std::slice::from_ref(value),
            HeaderValue::Multi(values) => values.as_slice(),
        }
    }
}

/// The subset of caller headers that survives a round trip through the
/// store: `content-type` plus any header carrying the recognized prefix.
///
/// Selection is an allow-list so the serialized record stays bounded no
/// matter what the caller sends. The record is persisted as JSON in a
/// side-file next to the payload; key order is irrelevant, value lists keep
/// their positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobMetadata {
    entries: BTreeMap<String, HeaderValue>,
}

impl BlobMetadata {
    /// Select the relevant subset from raw request headers. Names are
    /// matched case-insensitively and stored lowercased; a missing
    /// content-type becomes an empty entry.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: BTreeMap<String, HeaderValue> = BTreeMap::new();

        for (name, value) in headers {
            let name = name.to_ascii_lowercase();
            if name != CONTENT_TYPE && !name.starts_with(METADATA_HEADER_PREFIX) {
                continue;
            }

            entries
                .entry(name)
                .and_modify(|existing| existing.push(value.to_string()))
                .or_insert_with(|| HeaderValue::Single(value.to_string()));
        }

        entries
            .entry(CONTENT_TYPE.to_string())
            .or_insert_with(|| HeaderValue::Single(String::new()));

        Self { entries }
    }

    /// First stored content-type value; empty when the caller sent none.
    pub fn content_type(&self) -> &str {
        self.entries
            .get(CONTENT_TYPE)
            .and_then(|value| value.as_slice().first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(name)
    }

    pub fn header_count(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Size of the serialized record, counted against the payload size and
    /// disk quota limits.
    pub fn serialized_len(&self) -> u64 {
        self.to_json_bytes()
            .map(|bytes| bytes.len() as u64)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_content_type_and_prefixed_headers() {
        let metadata = BlobMetadata::from_headers([
            ("content-type", "application/pdf"),
            ("x-rebase-origin", "eu-west"),
            ("authorization", "Bearer secret"),
            ("accept", "*/*"),
        ]);

        assert_eq!(metadata.content_type(), "application/pdf");
        assert_eq!(
            metadata.get("x-rebase-origin"),
            Some(&HeaderValue::Single("eu-west".to_string()))
        );
        assert_eq!(metadata.get("authorization"), None);
        assert_eq!(metadata.get("accept"), None);
        assert_eq!(metadata.header_count(), 2);
    }

    #[test]
    fn test_extract_matches_names_case_insensitively() {
        let metadata = BlobMetadata::from_headers([
            ("Content-Type", "text/plain"),
            ("X-Rebase-Tag", "alpha"),
        ]);

        assert_eq!(metadata.content_type(), "text/plain");
        assert_eq!(
            metadata.get("x-rebase-tag"),
            Some(&HeaderValue::Single("alpha".to_string()))
        );
    }

    #[test]
    fn test_extract_defaults_missing_content_type_to_empty() {
        let metadata = BlobMetadata::from_headers([("x-rebase-tag", "alpha")]);

        assert_eq!(metadata.content_type(), "");
        assert_eq!(metadata.header_count(), 2);
    }

    #[test]
    fn test_repeated_headers_collect_positionally() {
        let metadata = BlobMetadata::from_headers([
            ("x-rebase-tag", "first"),
            ("x-rebase-tag", "second"),
            ("x-rebase-tag", "third"),
        ]);

        let value = metadata.get("x-rebase-tag").unwrap();
        assert_eq!(
            value.as_slice(),
            &["first".to_string(), "second".to_string(), "third".to_string()]
        );
        assert_eq!(value.joined(), "first,second,third");
    }

    #[test]
    fn test_json_round_trip_preserves_entries() {
        let metadata = BlobMetadata::from_headers([
            ("content-type", "image/png"),
            ("x-rebase-tag", "a"),
            ("x-rebase-tag", "b"),
            ("x-rebase-owner", "ops"),
        ]);

        let bytes = metadata.to_json_bytes().unwrap();
        let decoded = BlobMetadata::from_json_bytes(&bytes).unwrap();

        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_serialized_len_counts_json_bytes() {
        let metadata = BlobMetadata::from_headers([("content-type", "text/plain")]);

        let expected = metadata.to_json_bytes().unwrap().len() as u64;
        assert_eq!(metadata.serialized_len(), expected);
        assert!(metadata.serialized_len() > 0);
    }
}
