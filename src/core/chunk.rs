use std::path::Path;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{PreprocessError, Result};

/// Key whose presence marks a type record as a class
pub const CLASS_MARKER: &str = "class";

/// Tuple kind holding a method call site
pub const CALL_KIND: &str = "call";

/// View over one call-site occurrence with its observed argument values.
///
/// Fields are read on demand so a tuple that is skipped is never decoded.
#[derive(Debug, Clone, Copy)]
pub struct TupleRecord<'a> {
    value: &'a Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetType {
    pub name: String,

    #[serde(default)]
    pub type_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetMethod {
    pub name: String,

    #[serde(default)]
    pub type_args: Option<Vec<String>>,

    pub params: Vec<String>,
}

/// Literal argument value together with its primitive type tag
#[derive(Debug, Clone, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub tag: String,

    #[serde(default)]
    pub value: Value,
}

impl<'a> TupleRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Kind tag, absent when the tuple has no textual `type`
    pub fn kind(&self) -> Option<&'a str> {
        self.value.get("type").and_then(Value::as_str)
    }

    pub fn is_call(&self) -> bool {
        self.kind() == Some(CALL_KIND)
    }

    /// Undecoded typed values; empty when the field is missing or not an array
    pub fn raw_values(&self) -> &'a [Value] {
        self.value
            .get("values")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn typed_values(&self) -> impl Iterator<Item = Result<TypedValue>> + 'a {
        self.raw_values()
            .iter()
            .map(|raw| Ok(TypedValue::deserialize(raw)?))
    }

    pub fn target_type(&self) -> Result<TargetType> {
        self.decode_field("target_type")
    }

    pub fn target_method(&self) -> Result<TargetMethod> {
        self.decode_field("target_method")
    }

    fn decode_field<T: Deserialize<'a>>(&self, key: &str) -> Result<T> {
        let field = self.value
            .get(key)
            .ok_or_else(|| PreprocessError::Structure(format!("tuple has no {}", key)))?;
        Ok(T::deserialize(field)?)
    }
}

impl TypedValue {
    /// Trimmed textual value; a non-string payload is a decode failure
    pub fn text(&self) -> Result<&str> {
        self.value.as_str()
            .map(str::trim)
            .ok_or_else(|| PreprocessError::Structure(format!(
                "value tagged '{}' is not a string: {}", self.tag, self.value
            )))
    }
}

/// View over a type record of a parsed chunk
#[derive(Debug, Clone, Copy)]
pub struct TypeRecord<'a> {
    value: &'a Value,
}

/// View over a method record nested in a type record
#[derive(Debug, Clone, Copy)]
pub struct MethodRecord<'a> {
    value: &'a Value,
}

impl<'a> TypeRecord<'a> {
    pub fn new(value: &'a Value) -> Result<Self> {
        if value.is_object() {
            Ok(Self { value })
        } else {
            Err(PreprocessError::Structure(format!("type record is not an object: {}", value)))
        }
    }

    pub fn is_class(&self) -> bool {
        self.value.get(CLASS_MARKER).is_some()
    }

    pub fn methods(&self) -> Result<impl Iterator<Item = MethodRecord<'a>>> {
        Ok(array_field(self.value, "methods")?
            .iter()
            .map(|value| MethodRecord { value }))
    }
}

impl<'a> MethodRecord<'a> {
    pub fn tuples(&self) -> Result<impl Iterator<Item = TupleRecord<'a>>> {
        Ok(array_field(self.value, "tuples")?.iter().map(TupleRecord::new))
    }
}

/// Decode and parse the contents of a chunk file into its type records
pub fn parse_chunk(bytes: &[u8], path: &Path) -> Result<Vec<Value>> {
    let text = std::str::from_utf8(bytes).map_err(|source| PreprocessError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_json::from_str::<Value>(text)? {
        Value::Array(types) => Ok(types),
        other => Err(PreprocessError::Structure(format!(
            "chunk root must be an array, found {}",
            json_kind(&other)
        ))),
    }
}

fn array_field<'a>(value: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    match value.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(PreprocessError::Structure(format!(
            "field '{}' must be an array, found {}", key, json_kind(other)
        ))),
        None => Err(PreprocessError::Structure(format!("missing field '{}'", key))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
