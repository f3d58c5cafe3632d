use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

/// Shape of a normalized value.
///
/// Variant names mirror [`Value`](crate::Value) for consistency (values ↔ types).
/// Primitive variants carry no data, so they are shared without allocation;
/// composite variants own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Struct(FieldDefs),
    Array(Box<Schema>),
    /// Keys are always [`Schema::String`]; only the value schema is stored.
    Map(Box<Schema>),
}

/// Key schema of every [`Schema::Map`].
pub static MAP_KEY_SCHEMA: Schema = Schema::String;

impl Schema {
    pub fn array(element: Schema) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(value: Schema) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Schema::Struct(_) | Schema::Array(_) | Schema::Map(_)
        )
    }

    /// Element schema of an array, or value schema of a map.
    pub fn element(&self) -> Option<&Schema> {
        match self {
            Schema::Array(element) | Schema::Map(element) => Some(element),
            _ => None,
        }
    }

    pub fn map_key(&self) -> Option<&'static Schema> {
        match self {
            Schema::Map(_) => Some(&MAP_KEY_SCHEMA),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&FieldDefs> {
        match self {
            Schema::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Null => "null",
            Schema::Bool => "boolean",
            Schema::I8 => "int8",
            Schema::I16 => "int16",
            Schema::I32 => "int32",
            Schema::I64 => "int64",
            Schema::F32 => "float32",
            Schema::F64 => "float64",
            Schema::String => "string",
            Schema::Bytes => "bytes",
            Schema::Struct(_) => "struct",
            Schema::Array(_) => "array",
            Schema::Map(_) => "map",
        }
    }
}

/// Compact one-line rendering, e.g. `struct{a: string, b: array<int32>}`.
impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Schema::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.schema)?;
                }
                f.write_str("}")
            }
            Schema::Array(element) => write!(f, "array<{element}>"),
            Schema::Map(value) => write!(f, "map<{MAP_KEY_SCHEMA}, {value}>"),
            primitive => f.write_str(primitive.type_name()),
        }
    }
}

/// Ordered collection of [`FieldDef`] forming a struct body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefs(pub Vec<FieldDef>);

impl FieldDefs {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self(fields)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, name: impl Into<String>, schema: Schema) {
        self.0.push(FieldDef::new(name, schema));
    }

    pub fn as_slice(&self) -> &[FieldDef] {
        &self.0
    }

    /// Schema of the field called `name`.
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.0.iter().find(|f| f.name == name).map(|f| &f.schema)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }
}

impl From<Vec<FieldDef>> for FieldDefs {
    fn from(value: Vec<FieldDef>) -> Self {
        Self(value)
    }
}

impl FromIterator<FieldDef> for FieldDefs {
    fn from_iter<T: IntoIterator<Item = FieldDef>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for FieldDefs {
    type Target = [FieldDef];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

/// A named member of a [`Schema::Struct`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub schema: Schema,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}
