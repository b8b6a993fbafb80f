//! # Schema Module
//!
//! Structural descriptions of the JSON documents exchanged with the mobile
//! client API. A [`Schema`] is a small tree of typed nodes; object nodes list
//! their properties with a required/optional flag and may be closed, in which
//! case any undeclared property is a violation.
//!
//! Entity descriptions live in the process-wide [`catalog`] and refer to each
//! other through [`Schema::Ref`] nodes. References are resolved by the
//! [`validator`] while it walks a document, which is what lets `Artist` embed
//! `Artist` without expanding forever.
//!
//! Catalog entries are shared and immutable. Code that needs a variant of an
//! entry (for example with some fields made optional) takes an owned copy
//! through [`catalog::SchemaCatalog::customize`] and edits that copy.

pub mod catalog;
pub mod validator;

use std::fmt;

use indexmap::IndexMap;

pub use catalog::{SchemaCatalog, SchemaName, catalog};
pub use validator::{ClosedValidator, Validator};

/// A node in a structural description.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<Schema>),
    Object(ObjectSchema),
    /// Named reference into the catalog, resolved at validation time.
    Ref(SchemaName),
}

impl Schema {
    pub fn array_of(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    /// Short type label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::String => "string",
            Schema::Integer => "integer",
            Schema::Number => "number",
            Schema::Boolean => "boolean",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
            Schema::Ref(_) => "object",
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

/// A declared property of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub schema: Schema,
    pub required: bool,
}

/// Object description: ordered properties plus the closed flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    properties: IndexMap<String, Property>,
    closed: bool,
}

impl ObjectSchema {
    /// An object that rejects properties it does not declare.
    pub fn closed() -> Self {
        ObjectSchema {
            properties: IndexMap::new(),
            closed: true,
        }
    }

    /// An object that tolerates undeclared properties.
    pub fn open() -> Self {
        ObjectSchema {
            properties: IndexMap::new(),
            closed: false,
        }
    }

    pub fn field(self, name: &str, schema: Schema) -> Self {
        self.with_property(name, schema, true)
    }

    pub fn optional(self, name: &str, schema: Schema) -> Self {
        self.with_property(name, schema, false)
    }

    /// Adds or replaces a property.
    pub fn with_property(mut self, name: &str, schema: Schema, required: bool) -> Self {
        self.properties
            .insert(name.to_string(), Property { schema, required });
        self
    }

    /// Marks the named properties optional. Unknown names are ignored.
    pub fn relax(mut self, names: &[&str]) -> Self {
        for name in names {
            if let Some(property) = self.properties.get_mut(*name) {
                property.required = false;
            }
        }
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|(_, p)| p.required)
            .map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Array(items) => write!(f, "array<{}>", items),
            Schema::Ref(name) => write!(f, "{}", name),
            other => f.write_str(other.type_name()),
        }
    }
}
