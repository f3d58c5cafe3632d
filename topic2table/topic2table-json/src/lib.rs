//! JSON support for the topic2table pipeline.
//!
//! Parsed documents are held as [`JsonNode`] trees, which keep the numeric kind
//! each number was read as. From there:
//! - [`infer_json_schema`] derives a [`Schema`](topic2table_core::Schema),
//! - [`normalize_json`] builds the matching [`Value`](topic2table_core::Value),
//! - [`read_json_container`] / [`read_json_value`] are the structured-text
//!   fallbacks used for payloads, keys and headers,
//! - [`value_to_json`] renders normalized values back to JSON.

mod decoder;
mod infer;
mod node;
mod normalize;
mod reader;
mod render;

pub use decoder::{JsonContainerDecoder, JsonContainerDecoderFactory};
pub use infer::infer_json_schema;
pub use node::JsonNode;
pub use normalize::{normalize_json, normalize_json_record};
pub use reader::{JsonReadError, read_json_container, read_json_value};
pub use render::value_to_json;
