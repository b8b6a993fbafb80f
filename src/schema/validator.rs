//! Checks decoded JSON documents against schema descriptions.

use serde_json::{Map, Value};

use super::{ObjectSchema, Schema, SchemaCatalog, catalog};
use crate::error::{ValidationFailure, Violation};

/// Capability that decides whether a document matches a description.
pub trait Validator: Send + Sync {
    fn validate(&self, schema: &Schema, document: &Value) -> Result<(), ValidationFailure>;
}

/// Validator for closed schemas that resolves references through a catalog.
///
/// Stops at the first violation. Properties are checked in declaration
/// order, then undeclared properties are reported.
#[derive(Debug, Clone, Copy)]
pub struct ClosedValidator<'a> {
    catalog: &'a SchemaCatalog,
}

impl<'a> ClosedValidator<'a> {
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        ClosedValidator { catalog }
    }

    fn check(&self, schema: &Schema, value: &Value, path: &str) -> Result<(), ValidationFailure> {
        match schema {
            Schema::String if value.is_string() => Ok(()),
            Schema::Integer if value.is_i64() || value.is_u64() => Ok(()),
            Schema::Number if value.is_number() => Ok(()),
            Schema::Boolean if value.is_boolean() => Ok(()),
            Schema::Array(items) => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| wrong_type(path, schema, value))?;
                for (i, element) in elements.iter().enumerate() {
                    self.check(items, element, &format!("{}[{}]", path, i))?;
                }
                Ok(())
            }
            Schema::Object(object) => {
                let map = value
                    .as_object()
                    .ok_or_else(|| wrong_type(path, schema, value))?;
                self.check_object(object, map, path)
            }
            Schema::Ref(name) => {
                let object = self.catalog.get(*name).ok_or_else(|| ValidationFailure {
                    path: path.to_string(),
                    violation: Violation::UnknownReference(name.to_string()),
                })?;
                let map = value
                    .as_object()
                    .ok_or_else(|| wrong_type(path, schema, value))?;
                self.check_object(object, map, path)
            }
            _ => Err(wrong_type(path, schema, value)),
        }
    }

    fn check_object(
        &self,
        object: &ObjectSchema,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        for (name, property) in object.properties() {
            match map.get(name) {
                Some(value) => {
                    self.check(&property.schema, value, &format!("{}.{}", path, name))?
                }
                None if property.required => {
                    return Err(ValidationFailure {
                        path: path.to_string(),
                        violation: Violation::MissingField(name.to_string()),
                    });
                }
                None => {}
            }
        }

        if object.is_closed() {
            if let Some(extra) = map.keys().find(|key| object.property(key).is_none()) {
                return Err(ValidationFailure {
                    path: path.to_string(),
                    violation: Violation::UnexpectedField(extra.clone()),
                });
            }
        }

        Ok(())
    }
}

impl Default for ClosedValidator<'static> {
    fn default() -> Self {
        ClosedValidator::new(catalog())
    }
}

impl Validator for ClosedValidator<'_> {
    fn validate(&self, schema: &Schema, document: &Value) -> Result<(), ValidationFailure> {
        self.check(schema, document, "$")
    }
}

fn wrong_type(path: &str, expected: &Schema, found: &Value) -> ValidationFailure {
    ValidationFailure {
        path: path.to_string(),
        violation: Violation::WrongType {
            expected: expected.to_string(),
            found: json_type(found),
        },
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
