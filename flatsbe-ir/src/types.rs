//! Primitive types, constant values and byte order.

use crate::error::IrError;
use std::fmt;
use std::str::FromStr;

/// SBE primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Single character (1 byte).
    Char,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveType {
    /// Every primitive type, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Char,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float,
        Self::Double,
    ];

    /// Returns the size of the primitive type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Char | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double => 8,
        }
    }

    /// Returns the Rust type name for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Char | Self::Uint8 => "u8",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Returns the SBE type name.
    #[must_use]
    pub const fn sbe_name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parses a primitive type from its SBE name.
    #[must_use]
    pub fn from_sbe_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.sbe_name() == name)
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Inclusive integral range representable by this type, `None` for floats.
    #[must_use]
    pub const fn integral_range(&self) -> Option<(i128, i128)> {
        match self {
            Self::Char | Self::Uint8 => Some((0, u8::MAX as i128)),
            Self::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::Uint16 => Some((0, u16::MAX as i128)),
            Self::Uint32 => Some((0, u32::MAX as i128)),
            Self::Uint64 => Some((0, u64::MAX as i128)),
            Self::Float | Self::Double => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sbe_name())
    }
}

impl FromStr for PrimitiveType {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sbe_name(s).ok_or_else(|| IrError::UnknownPrimitiveType {
            name: s.to_string(),
        })
    }
}

/// Constant value carried by enum members (encoded value) and set choices
/// (bit position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveValue {
    /// Single-byte character.
    Char(u8),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
}

impl PrimitiveValue {
    /// Parses constant text as a value of `primitive_type`.
    ///
    /// A `char` constant is either a single ASCII character or its numeric code.
    ///
    /// # Errors
    /// Returns [`IrError::InvalidConstant`] if the text is not a value of the type.
    pub fn parse(text: &str, primitive_type: PrimitiveType) -> Result<Self, IrError> {
        let invalid = || IrError::InvalidConstant {
            value: text.to_string(),
            primitive_type: primitive_type.sbe_name(),
        };
        let trimmed = text.trim();

        let value = match primitive_type {
            PrimitiveType::Char => match trimmed.as_bytes() {
                [byte] if byte.is_ascii() => Self::Char(*byte),
                _ => Self::Char(trimmed.parse::<u8>().map_err(|_| invalid())?),
            },
            p if p.is_signed() => Self::Int(trimmed.parse::<i64>().map_err(|_| invalid())?),
            p if p.is_unsigned() => Self::UInt(trimmed.parse::<u64>().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };

        if value.fits(primitive_type) {
            Ok(value)
        } else {
            Err(invalid())
        }
    }

    /// Returns the value widened to `i128`.
    #[must_use]
    pub const fn as_i128(&self) -> i128 {
        match *self {
            Self::Char(c) => c as i128,
            Self::Int(v) => v as i128,
            Self::UInt(v) => v as i128,
        }
    }

    /// Returns true if the value is representable by `primitive_type`.
    #[must_use]
    pub fn fits(&self, primitive_type: PrimitiveType) -> bool {
        match primitive_type.integral_range() {
            Some((min, max)) => (min..=max).contains(&self.as_i128()),
            None => false,
        }
    }

    /// Renders the value as a Rust literal usable in expressions and patterns.
    #[must_use]
    pub fn to_rust_literal(&self) -> String {
        match *self {
            Self::Char(b'\'') => "b'\\''".to_string(),
            Self::Char(b'\\') => "b'\\\\'".to_string(),
            Self::Char(c) if c.is_ascii_graphic() || c == b' ' => format!("b'{}'", c as char),
            Self::Char(c) => c.to_string(),
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) if c.is_ascii_graphic() => write!(f, "'{}'", *c as char),
            Self::Char(c) => write!(f, "{c}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
        }
    }
}

impl From<u8> for PrimitiveValue {
    fn from(value: u8) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for PrimitiveValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl TryFrom<char> for PrimitiveValue {
    type Error = IrError;

    /// Only ASCII characters fit a single-byte `char` encoding.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        if value.is_ascii() {
            Ok(Self::Char(value as u8))
        } else {
            Err(IrError::InvalidConstant {
                value: value.to_string(),
                primitive_type: PrimitiveType::Char.sbe_name(),
            })
        }
    }
}

/// Byte order for SBE encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (default for SBE).
    #[default]
    LittleEndian,
    /// Big-endian byte order.
    BigEndian,
}

impl ByteOrder {
    /// Parses byte order from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "littleendian" | "little-endian" | "le" => Some(Self::LittleEndian),
            "bigendian" | "big-endian" | "be" => Some(Self::BigEndian),
            _ => None,
        }
    }

    /// Suffix appended to multi-byte accessor names in the runtime buffer traits.
    #[must_use]
    pub const fn accessor_suffix(&self) -> &'static str {
        match self {
            Self::LittleEndian => "le",
            Self::BigEndian => "be",
        }
    }
}

impl FromStr for ByteOrder {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| IrError::UnknownByteOrder {
            name: s.to_string(),
        })
    }
}
