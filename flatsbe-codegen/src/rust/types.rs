//! Primitive type mapping and identifier helpers.

use crate::error::CodegenError;
use flatsbe_ir::{ByteOrder, PrimitiveType, Token, to_pascal_case, to_snake_case};

/// Rust keywords that need a raw identifier when used as a field name.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore instead.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Rust storage type and runtime accessor fragment for one primitive type.
///
/// The fragment names the runtime buffer calls: a fragment of `u16_le` means
/// reads go through `get_u16_le` and writes through `put_u16_le`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveMapping {
    primitive_type: PrimitiveType,
    fragment: String,
}

impl PrimitiveMapping {
    /// Maps a primitive type under the given byte order.
    #[must_use]
    pub fn new(primitive_type: PrimitiveType, byte_order: ByteOrder) -> Self {
        let fragment = if primitive_type.size() == 1 {
            primitive_type.rust_type().to_string()
        } else {
            format!(
                "{}_{}",
                primitive_type.rust_type(),
                byte_order.accessor_suffix()
            )
        };
        Self {
            primitive_type,
            fragment,
        }
    }

    /// Maps the primitive type carried by `token`.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnsupportedPrimitiveType`] if the token has none.
    pub fn for_token(
        token: &Token,
        byte_order: ByteOrder,
        construct: &str,
    ) -> Result<Self, CodegenError> {
        token
            .primitive_type()
            .map(|p| Self::new(p, byte_order))
            .ok_or_else(|| {
                CodegenError::unsupported_primitive(construct, token.name(), token.signal())
            })
    }

    /// Returns the mapped primitive type.
    #[must_use]
    pub const fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    /// Returns the Rust storage type name.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        self.primitive_type.rust_type()
    }

    /// Returns the accessor method name fragment.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns the runtime read method name.
    #[must_use]
    pub fn getter(&self) -> String {
        format!("get_{}", self.fragment)
    }

    /// Returns the runtime write method name.
    #[must_use]
    pub fn putter(&self) -> String {
        format!("put_{}", self.fragment)
    }
}

/// Converts a schema name into a snake_case Rust field or method identifier.
#[must_use]
pub fn field_ident(name: &str) -> String {
    escape_ident(to_snake_case(name))
}

/// Converts a schema name into a PascalCase Rust type or variant identifier.
#[must_use]
pub fn type_ident(name: &str) -> String {
    escape_ident(to_pascal_case(name))
}

fn escape_ident(ident: String) -> String {
    if RESERVED_PATH_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
