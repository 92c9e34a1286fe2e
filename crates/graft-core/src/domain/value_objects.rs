//! Domain value objects: FieldKind and Marker.
//!
//! # Design
//!
//! These are pure value types: equality by value, no identity. `FieldKind`
//! is a closed enumeration: each variant fixes its schema rendering rule and
//! whether it needs an import, so adding a kind is an exhaustiveness error
//! everywhere it matters rather than a runtime lookup.
//!
//! # Adding New Field Kinds
//!
//! 1. Add the enum variant here
//! 2. Add its token(s) to `FromStr`
//! 3. Add its `schema_type` and `schema_import` arms
//! 4. Done; the mutators pick it up through `Field`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FieldKind ────────────────────────────────────────────────────────────────

const COIN_TYPE: &str = "cosmos.base.v1beta1.Coin";
const COIN_IMPORT: &str = "cosmos/base/v1beta1/coin.proto";

/// The semantic type of a request/response field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    String,
    Bool,
    Int,
    Uint,
    Coin,
    StringList,
    IntList,
    UintList,
    CoinList,
    /// Another generated message of this module, by its upper-camel type name.
    Custom(String),
}

impl FieldKind {
    /// The token users type for this kind (`name:token`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Coin => "coin",
            Self::StringList => "array.string",
            Self::IntList => "array.int",
            Self::UintList => "array.uint",
            Self::CoinList => "array.coin",
            Self::Custom(name) => name,
        }
    }

    /// Type as written in a schema message body.
    pub fn schema_type(&self) -> String {
        match self {
            Self::String => "string".into(),
            Self::Bool => "bool".into(),
            Self::Int => "int32".into(),
            Self::Uint => "uint64".into(),
            Self::Coin => COIN_TYPE.into(),
            Self::StringList => "repeated string".into(),
            Self::IntList => "repeated int32".into(),
            Self::UintList => "repeated uint64".into(),
            Self::CoinList => format!("repeated {COIN_TYPE}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Import a built-in kind needs, if any.
    ///
    /// Custom kinds return `None` here; their import depends on the app and
    /// module and is assembled by [`crate::domain::Field::schema_import`].
    pub fn schema_import(&self) -> Option<&'static str> {
        match self {
            Self::Coin | Self::CoinList => Some(COIN_IMPORT),
            Self::String
            | Self::Bool
            | Self::Int
            | Self::Uint
            | Self::StringList
            | Self::IntList
            | Self::UintList
            | Self::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::String
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    /// Lower-case tokens name built-in kinds; a token starting with an
    /// upper-case ASCII letter names a custom message type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "uint" => Ok(Self::Uint),
            "coin" => Ok(Self::Coin),
            "array.string" | "strings" => Ok(Self::StringList),
            "array.int" | "ints" => Ok(Self::IntList),
            "array.uint" | "uints" => Ok(Self::UintList),
            "array.coin" | "coins" => Ok(Self::CoinList),
            other
                if other.starts_with(|c: char| c.is_ascii_uppercase())
                    && other.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Ok(Self::Custom(other.to_string()))
            }
            other => Err(DomainError::UnknownFieldType {
                field: String::new(),
                token: other.to_string(),
            }),
        }
    }
}

// ── Marker ───────────────────────────────────────────────────────────────────

/// A file-scoped sentinel line that marks an extension point.
///
/// A marker is never consumed: insertions land immediately before it, so it
/// is still there for the next scaffold run. The token text is a contract
/// with the app templates that planted it and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    name: &'static str,
    token: &'static str,
}

impl Marker {
    /// Import statements of a schema file.
    pub const SCHEMA_IMPORTS: Marker = Marker::new(
        "schema-imports",
        "// this line is used by graft scaffolding # 1",
    );

    /// RPC declarations inside the schema service block.
    pub const SCHEMA_RPC: Marker = Marker::new(
        "schema-rpc",
        "// this line is used by graft scaffolding # 2",
    );

    /// Top-level message definitions of a schema file.
    pub const SCHEMA_MESSAGES: Marker = Marker::new(
        "schema-messages",
        "// this line is used by graft scaffolding # 3",
    );

    /// Sub-command registrations in a command-binding file.
    pub const COMMAND_REGISTRATION: Marker = Marker::new(
        "command-registration",
        "// this line is used by graft scaffolding # 1",
    );

    pub const fn new(name: &'static str, token: &'static str) -> Self {
        Self { name, token }
    }

    /// Human-readable name used in errors and logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Exact text searched for in the target file.
    pub const fn token(&self) -> &'static str {
        self.token
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
