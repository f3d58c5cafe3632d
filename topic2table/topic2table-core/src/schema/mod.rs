//! Schema intermediate representation shared by every decoder.

mod format;
mod types;

pub use format::format_schema;
pub use types::{FieldDef, FieldDefs, MAP_KEY_SCHEMA, Schema};
