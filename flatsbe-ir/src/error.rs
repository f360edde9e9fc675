//! Error types for building the intermediate representation.

use thiserror::Error;

/// Error type for IR construction helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    /// Unknown primitive type name.
    #[error("unknown primitive type '{name}'")]
    UnknownPrimitiveType {
        /// Name that failed to parse.
        name: String,
    },

    /// Unknown byte order name.
    #[error("unknown byte order '{name}'")]
    UnknownByteOrder {
        /// Name that failed to parse.
        name: String,
    },

    /// Constant text that is not a valid value of the primitive type.
    #[error("invalid constant '{value}' for primitive type '{primitive_type}'")]
    InvalidConstant {
        /// Constant text.
        value: String,
        /// SBE name of the primitive type.
        primitive_type: &'static str,
    },
}
