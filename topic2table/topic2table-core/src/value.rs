//! Canonical in-memory value produced by every decoder.

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{
    error::ValueTypeError,
    schema::{FieldDefs, Schema},
};

/// Value produced by decoders and normalizers.
/// All types are explicit; no lossy conversions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    Struct(StructValue),
    Array(Vec<Value>),
    Map(Vec<(Arc<str>, Value)>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Schema describing this value.
    ///
    /// Null reports [`Schema::Null`], structs report the schema they were built
    /// with, and containers sample one element the same way inference does.
    pub fn schema(&self) -> Schema {
        match self {
            Value::Null => Schema::Null,
            Value::Bool(_) => Schema::Bool,
            Value::I8(_) => Schema::I8,
            Value::I16(_) => Schema::I16,
            Value::I32(_) => Schema::I32,
            Value::I64(_) => Schema::I64,
            Value::F32(_) => Schema::F32,
            Value::F64(_) => Schema::F64,
            Value::String(_) => Schema::String,
            Value::Bytes(_) => Schema::Bytes,
            Value::Struct(s) => Schema::Struct(s.schema().clone()),
            Value::Array(items) => Schema::array(sample_schema(items.first())),
            Value::Map(entries) => Schema::map(sample_schema(entries.first().map(|(_, v)| v))),
        }
    }

    pub fn try_bool(&self) -> Result<Option<bool>, ValueTypeError> {
        match self {
            Value::Bool(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Bool")),
        }
    }

    pub fn try_i8(&self) -> Result<Option<i8>, ValueTypeError> {
        match self {
            Value::I8(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("I8")),
        }
    }

    pub fn try_i16(&self) -> Result<Option<i16>, ValueTypeError> {
        match self {
            Value::I16(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("I16")),
        }
    }

    pub fn try_i32(&self) -> Result<Option<i32>, ValueTypeError> {
        match self {
            Value::I32(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("I32")),
        }
    }

    pub fn try_i64(&self) -> Result<Option<i64>, ValueTypeError> {
        match self {
            Value::I64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("I64")),
        }
    }

    pub fn try_f32(&self) -> Result<Option<f32>, ValueTypeError> {
        match self {
            Value::F32(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("F32")),
        }
    }

    pub fn try_f64(&self) -> Result<Option<f64>, ValueTypeError> {
        match self {
            Value::F64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("F64")),
        }
    }

    pub fn try_str(&self) -> Result<Option<&str>, ValueTypeError> {
        match self {
            Value::String(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<Option<&[u8]>, ValueTypeError> {
        match self {
            Value::Bytes(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Bytes")),
        }
    }

    pub fn try_struct(&self) -> Result<Option<&StructValue>, ValueTypeError> {
        match self {
            Value::Struct(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Struct")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Struct(_) => "Struct",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
        }
    }
}

fn sample_schema(sample: Option<&Value>) -> Schema {
    match sample {
        None | Some(Value::Null) => Schema::String,
        Some(v) => v.schema(),
    }
}

/// A record whose field set is fixed by its schema.
///
/// `values[i]` always belongs to `schema[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    schema: FieldDefs,
    values: Vec<Value>,
}

impl StructValue {
    /// Build a struct by producing one value per schema field, in schema order.
    pub fn from_schema<E>(
        schema: FieldDefs,
        mut value_of: impl FnMut(&str, &Schema) -> Result<Value, E>,
    ) -> Result<Self, E> {
        let values = schema
            .iter()
            .map(|field| value_of(&field.name, &field.schema))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &FieldDefs {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.names().zip(self.values.iter())
    }
}

/// Renders values as `{a: "A", b: [1, 2, 3], c: null}`; bytes are shown as hex.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Bytes(b) => {
                f.write_str("0x")?;
                b.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
            }
            Value::Struct(s) => {
                f.write_str("{")?;
                for (i, (name, value)) in s.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {value}", key.as_ref())?;
                }
                f.write_str("}")
            }
        }
    }
}
