use std::fmt;

/// Placement of a mapped field inside a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    /// The whole payload.
    Value,
    /// The whole message key.
    Key,
    /// One named message property.
    Header(String),
}

impl FieldPath {
    /// Mapping source addressing the whole payload.
    pub const VALUE_SOURCE: &'static str = "value.__self";
    /// Mapping source addressing the whole key.
    pub const KEY_SOURCE: &'static str = "key.__self";
    /// Prefix of mapping sources addressing a header.
    pub const HEADER_PREFIX: &'static str = "header.";

    /// Derive the field path from a table mapping source descriptor.
    ///
    /// Returns `None` for descriptors that address a sub-field (e.g. `value.name`),
    /// which are resolved downstream rather than by a field decoder.
    pub fn from_mapping_source(source: &str) -> Option<Self> {
        match source {
            Self::VALUE_SOURCE => Some(Self::Value),
            Self::KEY_SOURCE => Some(Self::Key),
            _ => source
                .strip_prefix(Self::HEADER_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| Self::Header(name.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Value => f.write_str("value"),
            FieldPath::Key => f.write_str("key"),
            FieldPath::Header(name) => write!(f, "header:{name}"),
        }
    }
}
