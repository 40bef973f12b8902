//! Move type tags.
//!
//! Type arguments to move calls are written as strings like
//! `0x2::sui::SUI` or `0x2::coin::Coin<0x2::sui::SUI>` and serialized
//! to the ledger's binary layout. The enum variant order below is the
//! ledger's and must not be rearranged.

use crate::address::SuiAddress;
use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated Move identifier (module, struct or function name).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates an identifier, validating the Move naming rules:
    /// a leading letter or underscore followed by letters, digits or
    /// underscores.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if valid {
            Ok(Self(name))
        } else {
            Err(TypeError::InvalidIdentifier(name))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl FromStr for Identifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A Move type tag.
///
/// Variant order is fixed by the ledger's binary format: the newer
/// integer widths (`u16`, `u32`, `u256`) were appended after `struct`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `u8`
    U8,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `address`
    Address,
    /// `signer`
    Signer,
    /// `vector<T>`
    Vector(Box<TypeTag>),
    /// A struct type, e.g. `0x2::sui::SUI`
    Struct(Box<StructTag>),
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u256`
    U256,
}

/// A fully qualified Move struct type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    /// Address of the defining package.
    pub address: SuiAddress,
    /// Module within the package.
    pub module: Identifier,
    /// Struct name.
    pub name: Identifier,
    /// Type parameters, if the struct is generic.
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// The native gas coin type, `0x2::sui::SUI`.
    pub fn sui() -> Self {
        TypeTag::Struct(Box::new(StructTag {
            address: SuiAddress::from_hex("0x2").expect("valid framework address"),
            module: Identifier::new("sui").expect("valid identifier"),
            name: Identifier::new("SUI").expect("valid identifier"),
            type_params: vec![],
        }))
    }

    /// Parses a type tag from its string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let s = s.trim();
        match s {
            "bool" => return Ok(TypeTag::Bool),
            "u8" => return Ok(TypeTag::U8),
            "u16" => return Ok(TypeTag::U16),
            "u32" => return Ok(TypeTag::U32),
            "u64" => return Ok(TypeTag::U64),
            "u128" => return Ok(TypeTag::U128),
            "u256" => return Ok(TypeTag::U256),
            "address" => return Ok(TypeTag::Address),
            "signer" => return Ok(TypeTag::Signer),
            _ => {}
        }

        if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeTag::Vector(Box::new(TypeTag::parse(inner)?)));
        }

        StructTag::parse(s).map(|tag| TypeTag::Struct(Box::new(tag)))
    }
}

impl StructTag {
    /// Parses a struct tag like `0x2::coin::Coin<0x2::sui::SUI>`.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let s = s.trim();
        let (head, type_params) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
                (&s[..open], split_type_params(inner)?)
            }
            None => (s, vec![]),
        };

        let mut parts = head.splitn(3, "::");
        let address = parts
            .next()
            .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
        let module = parts
            .next()
            .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
        let name = parts
            .next()
            .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;

        Ok(Self {
            address: SuiAddress::from_hex(address)?,
            module: Identifier::new(module)?,
            name: Identifier::new(name)?,
            type_params: type_params
                .into_iter()
                .map(|p| TypeTag::parse(p))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Splits `A, B<C, D>, E` on commas at angle-bracket depth zero.
fn split_type_params(s: &str) -> Result<Vec<&str>, TypeError> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
            }
            ',' if depth == 0 => {
                params.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeError::InvalidTypeTag(s.to_string()));
    }
    params.push(&s[start..]);
    Ok(params)
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_string(),
            self.module,
            self.name
        )?;
        if !self.type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
