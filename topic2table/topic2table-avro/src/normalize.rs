//! Convert decoded Avro values into the canonical [`Value`] / [`Schema`] pair.

use std::{collections::HashMap, sync::Arc};

use apache_avro::{schema::SchemaKind, types::Value as AvroValue};
use topic2table_core::{FieldDefs, InferenceError, NormalizeError, Schema, StructValue, Value};

/// Text that stands for an explicit null wherever it appears.
const NULL_TEXT: &str = "null";
const DETAIL_LIMIT: usize = 64;

/// Infer the [`Schema`] of a decoded Avro value.
///
/// Unions infer their selected branch and enums infer `string`. Arrays sample
/// their first item and maps the entry with the smallest key; empty containers
/// default to `string` elements. Logical types (dates, decimals, uuids, ...)
/// are not part of the type model and fail with [`InferenceError::Unsupported`].
pub fn infer_avro_schema(value: &AvroValue) -> Result<Schema, InferenceError> {
    let schema = match value {
        AvroValue::Null => Schema::String,
        AvroValue::Boolean(_) => Schema::Bool,
        AvroValue::Int(_) => Schema::I32,
        AvroValue::Long(_) => Schema::I64,
        AvroValue::Float(_) => Schema::F32,
        AvroValue::Double(_) => Schema::F64,
        AvroValue::String(_) | AvroValue::Enum(_, _) => Schema::String,
        AvroValue::Bytes(_) | AvroValue::Fixed(_, _) => Schema::Bytes,
        AvroValue::Union(_, inner) => infer_avro_schema(inner)?,
        AvroValue::Record(fields) => Schema::Struct(infer_record_fields(fields)?),
        AvroValue::Array(items) => Schema::array(infer_sample(items.first())?),
        AvroValue::Map(entries) => {
            Schema::map(infer_sample(sorted_entries(entries).first().map(|(_, v)| *v))?)
        }
        other => return Err(unsupported(other)),
    };
    Ok(schema)
}

/// Normalize a decoded Avro value of any shape.
pub fn normalize_avro(value: &AvroValue) -> Result<Value, NormalizeError> {
    let normalized = match value {
        AvroValue::Null => Value::Null,
        AvroValue::String(s) | AvroValue::Enum(_, s) if s == NULL_TEXT => Value::Null,
        AvroValue::String(s) | AvroValue::Enum(_, s) => Value::string(s),
        AvroValue::Boolean(b) => Value::Bool(*b),
        AvroValue::Int(v) => Value::I32(*v),
        AvroValue::Long(v) => Value::I64(*v),
        AvroValue::Float(v) => Value::F32(*v),
        AvroValue::Double(v) => Value::F64(*v),
        AvroValue::Bytes(b) | AvroValue::Fixed(_, b) => Value::bytes(b),
        AvroValue::Union(_, inner) => normalize_avro(inner)?,
        AvroValue::Array(items) => Value::Array(
            items
                .iter()
                .map(normalize_avro)
                .collect::<Result<_, _>>()?,
        ),
        AvroValue::Map(entries) => Value::Map(
            sorted_entries(entries)
                .into_iter()
                .map(|(k, v)| Ok((Arc::from(k), normalize_avro(v)?)))
                .collect::<Result<_, NormalizeError>>()?,
        ),
        AvroValue::Record(fields) => Value::Struct(normalize_record(fields)?),
        other => return Err(unsupported(other).into()),
    };
    Ok(normalized)
}

/// Normalize a top-level Avro record into a struct, looking through unions.
pub fn normalize_avro_record(value: &AvroValue) -> Result<StructValue, NormalizeError> {
    match value {
        AvroValue::Record(fields) => normalize_record(fields),
        AvroValue::Union(_, inner) => normalize_avro_record(inner),
        other => Err(NormalizeError::NotARecord {
            found: avro_type_name(other),
        }),
    }
}

fn normalize_record(fields: &[(String, AvroValue)]) -> Result<StructValue, NormalizeError> {
    let schema = infer_record_fields(fields)?;
    StructValue::from_schema(schema, |name, _| {
        fields
            .iter()
            .find(|(field, _)| field == name)
            .map_or(Ok(Value::Null), |(_, v)| normalize_avro(v))
    })
}

fn infer_record_fields(fields: &[(String, AvroValue)]) -> Result<FieldDefs, InferenceError> {
    let mut defs = FieldDefs::with_capacity(fields.len());
    for (name, value) in fields {
        defs.push(name.as_str(), infer_avro_schema(value)?);
    }
    Ok(defs)
}

fn infer_sample(sample: Option<&AvroValue>) -> Result<Schema, InferenceError> {
    sample.map_or(Ok(Schema::String), infer_avro_schema)
}

fn sorted_entries(entries: &HashMap<String, AvroValue>) -> Vec<(&str, &AvroValue)> {
    let mut sorted: Vec<_> = entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
    sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
    sorted
}

fn avro_type_name(value: &AvroValue) -> String {
    format!("avro {:?}", SchemaKind::from(value)).to_lowercase()
}

fn unsupported(value: &AvroValue) -> InferenceError {
    let mut detail = format!("{value:?}");
    if let Some((end, _)) = detail.char_indices().nth(DETAIL_LIMIT) {
        detail.truncate(end);
        detail.push_str("...");
    }
    InferenceError::unsupported(avro_type_name(value), detail)
}
