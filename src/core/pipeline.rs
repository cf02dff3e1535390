use std::fmt;
use tracing::trace;

use crate::error::Result;
use super::aggregator::Aggregator;
use super::chunk::TupleRecord;
use super::filters::{FilterLists, SignatureFilter, ValueFilter};
use super::signature::SignatureBuilder;

/// Primitive value type selected for export.
///
/// Only `string` values are collected; any other selector matches tags but
/// yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    Other(String),
}

impl ValueType {
    pub fn tag(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::Other(tag) => tag,
        }
    }
}

impl From<&str> for ValueType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => ValueType::String,
            other => ValueType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Options controlling how tuples are turned into aggregate entries
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub value_type: ValueType,
    pub filter_signatures: bool,
    pub use_generics: bool,
    pub tokenize: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            value_type: ValueType::String,
            filter_signatures: false,
            use_generics: false,
            tokenize: false,
        }
    }
}

/// Only call tuples with at least one value are worth processing.
///
/// Reads nothing but the kind tag and the value list, so tuples that are
/// skipped never need to be well formed.
pub fn keep_tuple(tuple: &TupleRecord<'_>) -> bool {
    tuple.is_call() && !tuple.raw_values().is_empty()
}

/// Filters a kept tuple and folds its values into the aggregator
pub struct TupleProcessor {
    value_type: ValueType,
    signatures: SignatureBuilder,
    signature_filter: SignatureFilter,
    value_filter: ValueFilter,
}

impl TupleProcessor {
    pub fn new(options: &PipelineOptions, lists: &FilterLists) -> Self {
        Self {
            value_type: options.value_type.clone(),
            signatures: SignatureBuilder::new(options.use_generics),
            signature_filter: SignatureFilter::new(options.filter_signatures, lists),
            value_filter: ValueFilter::new(lists),
        }
    }

    /// Values of the selected type, trimmed
    fn collect_values(&self, tuple: &TupleRecord<'_>) -> Result<Vec<String>> {
        let mut values = Vec::new();
        for typed_value in tuple.typed_values() {
            let typed_value = typed_value?;
            if typed_value.tag != self.value_type.tag() {
                continue;
            }
            if self.value_type == ValueType::String {
                values.push(typed_value.text()?.to_string());
            }
        }
        Ok(values)
    }

    /// Returns true when the tuple reached the aggregator
    pub fn process(&self, aggregator: &mut Aggregator, tuple: &TupleRecord<'_>) -> Result<bool> {
        let values = self.collect_values(tuple)?;
        if values.is_empty() {
            return Ok(false);
        }

        let signature = self.signatures.build(tuple)?;
        if self.signature_filter.should_drop(&signature) {
            trace!("Dropping filtered signature {}", signature);
            return Ok(false);
        }

        aggregator.ensure(&signature);
        for value in &values {
            if !self.value_filter.excludes(value) {
                aggregator.add(&signature, value);
            }
        }

        Ok(true)
    }
}
