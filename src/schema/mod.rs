//! Declarative field metadata for request and response types
//!
//! Every payload type that crosses the dispatch route describes its own
//! fields through [`Documented`]. The catalog generator reads these tables
//! instead of inspecting types at runtime.

use serde_json::Value;

/// Shape of a documented field
#[derive(Debug, Clone)]
pub enum TypeDesc {
    Str,
    Int,
    Float,
    Bool,
    Any,
    /// One of a fixed set of string values
    Literal(&'static [&'static str]),
    List(Box<TypeDesc>),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Union(Vec<TypeDesc>),
    /// Field may be absent or null
    Optional(Box<TypeDesc>),
    /// Nested structured type
    Object {
        name: &'static str,
        fields: fn() -> Vec<FieldSpec>,
    },
}

impl TypeDesc {
    pub fn list(inner: TypeDesc) -> Self {
        TypeDesc::List(Box::new(inner))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(key), Box::new(value))
    }

    pub fn optional(inner: TypeDesc) -> Self {
        TypeDesc::Optional(Box::new(inner))
    }

    /// Object descriptor for a [`Documented`] type
    pub fn object<T: Documented>() -> Self {
        TypeDesc::Object {
            name: T::NAME,
            fields: T::schema,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeDesc::Object { .. })
    }
}

/// Default value declared for a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// No default; the caller must supply the field
    Missing,
    /// Explicit `null` default
    Null,
    Value(Value),
}

/// Metadata for one field of a documented type
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: TypeDesc,
    /// Free text; may carry `[DISABLED]`, `[HIDDEN]` and `[BETA]` tags
    pub description: &'static str,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub fn new(name: &'static str, ty: TypeDesc) -> Self {
        Self {
            name,
            ty,
            description: "",
            default: FieldDefault::Missing,
        }
    }

    pub fn doc(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    pub fn default_null(mut self) -> Self {
        self.default = FieldDefault::Null;
        self
    }
}

/// A type that can describe its own fields
pub trait Documented {
    /// Name used when the type appears nested in another schema
    const NAME: &'static str;

    fn schema() -> Vec<FieldSpec>;
}
