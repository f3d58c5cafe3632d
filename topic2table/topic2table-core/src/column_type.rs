//! Store-native destination column types.

use std::{fmt, str::FromStr};

use crate::error::ColumnTypeParseError;

/// Column type kinds, without type parameters. Used as the decoder catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKind {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
    List,
    Set,
    Map,
    Tuple,
    Udt,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Bigint => "bigint",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Counter => "counter",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Duration => "duration",
            Self::Float => "float",
            Self::Inet => "inet",
            Self::Int => "int",
            Self::Smallint => "smallint",
            Self::Text => "text",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Timeuuid => "timeuuid",
            Self::Tinyint => "tinyint",
            Self::Uuid => "uuid",
            Self::Varchar => "varchar",
            Self::Varint => "varint",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Tuple => "tuple",
            Self::Udt => "udt",
        }
    }

    fn from_simple_name(name: &str) -> Option<Self> {
        let kind = match name {
            "ascii" => Self::Ascii,
            "bigint" => Self::Bigint,
            "blob" => Self::Blob,
            "boolean" => Self::Boolean,
            "counter" => Self::Counter,
            "date" => Self::Date,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "duration" => Self::Duration,
            "float" => Self::Float,
            "inet" => Self::Inet,
            "int" => Self::Int,
            "smallint" => Self::Smallint,
            "text" => Self::Text,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "timeuuid" => Self::Timeuuid,
            "tinyint" => Self::Tinyint,
            "uuid" => Self::Uuid,
            "varchar" => Self::Varchar,
            "varint" => Self::Varint,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact type of a destination column as reported by the store metadata.
///
/// `frozen<...>` wrappers are accepted when parsing and dropped, since they do
/// not change how a field is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Simple(ColumnKind),
    List(Box<ColumnType>),
    Set(Box<ColumnType>),
    Map(Box<ColumnType>, Box<ColumnType>),
    Tuple(Vec<ColumnType>),
    Udt(String),
}

impl ColumnType {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnType::Simple(kind) => *kind,
            ColumnType::List(_) => ColumnKind::List,
            ColumnType::Set(_) => ColumnKind::Set,
            ColumnType::Map(_, _) => ColumnKind::Map,
            ColumnType::Tuple(_) => ColumnKind::Tuple,
            ColumnType::Udt(_) => ColumnKind::Udt,
        }
    }
}

impl From<ColumnKind> for ColumnType {
    fn from(kind: ColumnKind) -> Self {
        Self::Simple(kind)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Simple(kind) => f.write_str(kind.as_str()),
            ColumnType::List(element) => write!(f, "list<{element}>"),
            ColumnType::Set(element) => write!(f, "set<{element}>"),
            ColumnType::Map(key, value) => write!(f, "map<{key}, {value}>"),
            ColumnType::Tuple(items) => {
                f.write_str("tuple<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(">")
            }
            ColumnType::Udt(name) => f.write_str(name),
        }
    }
}

impl FromStr for ColumnType {
    type Err = ColumnTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser { input: s, rest: s };
        let parsed = parser.parse_type()?;
        if !parser.rest.trim().is_empty() {
            return Err(parser.error(format!("unexpected trailing input '{}'", parser.rest)));
        }
        Ok(parsed)
    }
}

struct TypeParser<'a> {
    input: &'a str,
    rest: &'a str,
}

impl TypeParser<'_> {
    fn parse_type(&mut self) -> Result<ColumnType, ColumnTypeParseError> {
        let name = self.identifier()?.to_ascii_lowercase();
        match name.as_str() {
            "frozen" => {
                let mut params = self.parameters()?;
                match (params.pop(), params.is_empty()) {
                    (Some(inner), true) => Ok(inner),
                    _ => Err(self.error("frozen<> takes exactly one type")),
                }
            }
            "list" => Ok(ColumnType::List(Box::new(self.single_parameter("list")?))),
            "set" => Ok(ColumnType::Set(Box::new(self.single_parameter("set")?))),
            "map" => {
                let mut params = self.parameters()?.into_iter();
                match (params.next(), params.next(), params.next()) {
                    (Some(key), Some(value), None) => {
                        Ok(ColumnType::Map(Box::new(key), Box::new(value)))
                    }
                    _ => Err(self.error("map<> takes exactly two types")),
                }
            }
            "tuple" => Ok(ColumnType::Tuple(self.parameters()?)),
            other => Ok(match ColumnKind::from_simple_name(other) {
                Some(kind) => ColumnType::Simple(kind),
                None => ColumnType::Udt(other.to_string()),
            }),
        }
    }

    fn single_parameter(&mut self, name: &str) -> Result<ColumnType, ColumnTypeParseError> {
        let mut params = self.parameters()?;
        match (params.pop(), params.is_empty()) {
            (Some(inner), true) => Ok(inner),
            _ => Err(self.error(format!("{name}<> takes exactly one type"))),
        }
    }

    fn identifier(&mut self) -> Result<&str, ColumnTypeParseError> {
        self.rest = self.rest.trim_start();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error("expected a type name"));
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(ident)
    }

    fn parameters(&mut self) -> Result<Vec<ColumnType>, ColumnTypeParseError> {
        self.expect('<')?;
        let mut params = vec![self.parse_type()?];
        loop {
            self.rest = self.rest.trim_start();
            if self.eat(',') {
                params.push(self.parse_type()?);
            } else {
                self.expect('>')?;
                return Ok(params);
            }
        }
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.trim_start().strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ColumnTypeParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{c}'")))
        }
    }

    fn error(&self, detail: impl Into<String>) -> ColumnTypeParseError {
        ColumnTypeParseError {
            input: self.input.to_string(),
            detail: detail.into(),
        }
    }
}
