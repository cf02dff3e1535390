use crate::error::{PreprocessError, Result};
use super::chunk::TupleRecord;

/// Builds the canonical `Class<Args>.method<Args>(params)` key for call tuples
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureBuilder {
    use_generics: bool,
}

impl SignatureBuilder {
    pub fn new(use_generics: bool) -> Self {
        Self { use_generics }
    }

    pub fn build(&self, tuple: &TupleRecord<'_>) -> Result<String> {
        let target_type = tuple.target_type()?;
        let target_method = tuple.target_method()?;

        let class_name = self.with_generics(&target_type.name, target_type.type_args.as_deref(), "target_type")?;
        let method_name = self.with_generics(&target_method.name, target_method.type_args.as_deref(), "target_method")?;

        Ok(format!("{}.{}({})", class_name, method_name, target_method.params.join(",")))
    }

    fn with_generics(&self, name: &str, type_args: Option<&[String]>, owner: &str) -> Result<String> {
        if !self.use_generics {
            return Ok(name.to_string());
        }

        let type_args = type_args.ok_or_else(|| {
            PreprocessError::Structure(format!("{} has no type_args", owner))
        })?;

        if type_args.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{}<{}>", name, type_args.join(",")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn tuple(class_args: &[&str], method_args: &[&str], params: &[&str]) -> Value {
        json!({
            "type": "call",
            "target_type": {"name": "java.util.Map", "type_args": class_args},
            "target_method": {"name": "put", "type_args": method_args, "params": params},
            "values": []
        })
    }

    fn build(use_generics: bool, raw: &Value) -> Result<String> {
        SignatureBuilder::new(use_generics).build(&TupleRecord::new(raw))
    }

    #[test]
    fn test_without_generics() {
        let t = tuple(&["K", "V"], &[], &["K", "V"]);
        assert_eq!(build(false, &t).unwrap(), "java.util.Map.put(K,V)");
    }

    #[test]
    fn test_with_generics() {
        let t = tuple(&["K", "V"], &["T"], &["K", "V"]);
        assert_eq!(build(true, &t).unwrap(), "java.util.Map<K,V>.put<T>(K,V)");
    }

    #[test]
    fn test_empty_generics_are_omitted() {
        let t = tuple(&[], &[], &[]);
        assert_eq!(build(true, &t).unwrap(), "java.util.Map.put()");
    }

    #[test]
    fn test_parameter_changes_signature() {
        let a = build(false, &tuple(&[], &[], &["int"])).unwrap();
        let b = build(false, &tuple(&[], &[], &["long"])).unwrap();
        let c = build(false, &tuple(&[], &[], &["int"])).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_missing_type_args_only_matters_with_generics() {
        let t = json!({
            "type": "call",
            "target_type": {"name": "Foo"},
            "target_method": {"name": "bar", "params": ["int"]},
            "values": []
        });

        assert_eq!(build(false, &t).unwrap(), "Foo.bar(int)");
        assert!(build(true, &t).is_err());
    }

    #[test]
    fn test_missing_target_is_error() {
        let t = json!({"type": "call", "target_type": {"name": "Foo"}, "values": []});
        assert!(build(false, &t).is_err());
    }
}
