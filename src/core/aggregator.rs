use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Signature tokens: an empty list until TF-IDF weighting replaces it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tokens {
    List(Vec<String>),
    Weighted(BTreeMap<String, f64>),
}

impl Default for Tokens {
    fn default() -> Self {
        Tokens::List(Vec::new())
    }
}

/// Accumulated data for one method signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub tokens: Tokens,

    /// Occurrence count per distinct value
    pub values: BTreeMap<String, u64>,
}

impl AggregateEntry {
    /// Count one more occurrence of `value`
    pub fn record(&mut self, value: &str) {
        *self.values.entry(value.to_string()).or_insert(0) += 1;
    }
}

/// Signature-keyed frequency counters built up during one run
///
/// Keys are kept sorted so serialization is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregator {
    entries: BTreeMap<String, AggregateEntry>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an entry exists for `signature`, empty on first sight
    pub fn ensure(&mut self, signature: &str) -> &mut AggregateEntry {
        self.entries.entry(signature.to_string()).or_default()
    }

    /// Count one occurrence of `value` for `signature`
    pub fn add(&mut self, signature: &str, value: &str) {
        self.ensure(signature).record(value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in signature order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut AggregateEntry)> {
        self.entries.iter_mut()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, signature: &str) -> Option<&AggregateEntry> {
        self.entries.get(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_accumulates_per_signature() {
        let mut aggregator = Aggregator::new();
        aggregator.add("Foo.bar(int)", "hello");
        aggregator.add("Foo.bar(int)", "hello");
        aggregator.add("Foo.bar(int)", "world");
        aggregator.add("Foo.baz()", "hello");

        assert_eq!(aggregator.len(), 2);
        let entry = aggregator.get("Foo.bar(int)").unwrap();
        assert_eq!(entry.values["hello"], 2);
        assert_eq!(entry.values["world"], 1);
        assert!(!entry.values.contains_key("missing"));
    }

    #[test]
    fn test_ensure_keeps_existing_entry() {
        let mut aggregator = Aggregator::new();
        aggregator.add("Foo.bar()", "v1");
        aggregator.ensure("Foo.bar()");

        let entry = aggregator.get("Foo.bar()").unwrap();
        assert_eq!(entry.tokens, Tokens::List(Vec::new()));
        assert_eq!(entry.values["v1"], 1);
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let mut aggregator = Aggregator::new();
        aggregator.add("B.m()", "v");
        aggregator.ensure("A.m()").tokens = Tokens::Weighted(BTreeMap::from([("m".to_string(), 100.0)]));

        let value = serde_json::to_value(&aggregator).unwrap();
        assert_eq!(
            value,
            json!({
                "A.m()": {"tokens": {"m": 100.0}, "values": {}},
                "B.m()": {"tokens": [], "values": {"v": 1}}
            })
        );
    }
}
