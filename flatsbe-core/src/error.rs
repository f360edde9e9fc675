//! Error types for flatsbe runtime operations.

use thiserror::Error;

/// Raised by a generated `lookup` when an encoded value matches no constant.
///
/// The offending value is widened to `i128` so every integral storage type,
/// signed or unsigned, round-trips without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("unknown value {value} for enum {enum_name}")]
pub struct UnknownEnumValue {
    /// Generated enum type name.
    pub enum_name: &'static str,
    /// Raw encoded value that matched no constant.
    pub value: i128,
}

impl UnknownEnumValue {
    /// Creates an unknown value error for the named enum.
    #[must_use]
    pub fn new(enum_name: &'static str, value: impl Into<i128>) -> Self {
        Self {
            enum_name,
            value: value.into(),
        }
    }
}

/// Core error type for flatsbe runtime operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer is too short to bind a flyweight at the requested offset.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },

    /// Encoded enum value with no matching constant.
    #[error(transparent)]
    UnknownEnumValue(#[from] UnknownEnumValue),
}

impl Error {
    /// Checks that `available` bytes can hold `length` bytes at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] when the range does not fit.
    pub fn check_bounds(offset: usize, length: usize, available: usize) -> Result<()> {
        let required = offset.saturating_add(length);
        if required > available {
            return Err(Self::BufferTooShort {
                required,
                available,
            });
        }
        Ok(())
    }
}

/// Result type alias for flatsbe runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_value_widens_signed() {
        let err = UnknownEnumValue::new("Direction", -3i8);
        assert_eq!(err.value, -3);
        assert_eq!(err.to_string(), "unknown value -3 for enum Direction");
    }

    #[test]
    fn test_unknown_enum_value_widens_u64_max() {
        let err = UnknownEnumValue::new("Wide", u64::MAX);
        assert_eq!(err.value, i128::from(u64::MAX));
    }

    #[test]
    fn test_check_bounds() {
        assert!(Error::check_bounds(100, 8, 108).is_ok());
        assert_eq!(
            Error::check_bounds(100, 8, 107),
            Err(Error::BufferTooShort {
                required: 108,
                available: 107,
            })
        );
        assert!(Error::check_bounds(usize::MAX, 8, 16).is_err());
    }

    #[test]
    fn test_error_from_unknown_enum_value() {
        let err: Error = UnknownEnumValue::new("Color", 2u8).into();
        assert!(matches!(
            err,
            Error::UnknownEnumValue(UnknownEnumValue { value: 2, .. })
        ));
    }
}
