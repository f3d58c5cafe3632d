use std::fmt::{Error, Result, Write as _};

use super::{MAP_KEY_SCHEMA, Schema};

/// Format a schema in a readable style:
/// primitive members are rendered in one line, compound members are pretty-printed.
/// Nested members follow the same rule.
pub fn format_schema(schema: &Schema) -> std::result::Result<String, Error> {
    let mut out = String::new();
    format_labeled_schema("root", schema, 0, &mut out)?;
    Ok(out)
}

fn format_compound(schema: &Schema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", schema.type_name())?;

    match schema {
        Schema::Struct(fields) => {
            writeln!(out, "{pad}fields:")?;
            for field in fields.iter() {
                format_labeled_schema(&field.name, &field.schema, indent + 4, out)?;
            }
        }
        Schema::Array(element) => {
            format_labeled_schema("item", element, indent, out)?;
        }
        Schema::Map(value) => {
            format_labeled_schema("key", &MAP_KEY_SCHEMA, indent, out)?;
            format_labeled_schema("value", value, indent, out)?;
        }
        _ => unreachable!("{schema:?} is not a compound type"),
    }

    Ok(())
}

fn format_labeled_schema(label: &str, schema: &Schema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    if schema.is_primitive() {
        writeln!(out, "{pad}{label}: {{ type: {} }}", schema.type_name())?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_compound(schema, indent + 4, out)?;
    }
    Ok(())
}
