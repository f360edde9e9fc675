//! Error types for code generation.

use flatsbe_ir::Signal;
use thiserror::Error;

/// Error type for code generation operations.
///
/// Every generation-time variant names the construct being generated so the
/// failing schema element can be located.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A construct violates a structural invariant.
    #[error("malformed schema in '{construct}': {message}")]
    MalformedSchema {
        /// Construct being generated.
        construct: String,
        /// What is wrong with it.
        message: String,
    },

    /// A token without a usable primitive type reached the type mapping.
    #[error("unsupported primitive type on {signal} token '{token}' in '{construct}'")]
    UnsupportedPrimitiveType {
        /// Construct being generated.
        construct: String,
        /// Offending token name.
        token: String,
        /// Offending token signal.
        signal: Signal,
    },

    /// A recognised construct shape that has no generator yet.
    #[error("{signal} '{construct}' is not yet supported")]
    NotYetImplemented {
        /// Construct that could not be generated.
        construct: String,
        /// Signal of the unsupported construct.
        signal: Signal,
    },

    /// IO error while writing an output unit.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates a malformed schema error.
    pub fn malformed(construct: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSchema {
            construct: construct.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported primitive type error.
    pub fn unsupported_primitive(
        construct: impl Into<String>,
        token: impl Into<String>,
        signal: Signal,
    ) -> Self {
        Self::UnsupportedPrimitiveType {
            construct: construct.into(),
            token: token.into(),
            signal,
        }
    }

    /// Creates a not yet implemented error.
    pub fn not_yet_implemented(construct: impl Into<String>, signal: Signal) -> Self {
        Self::NotYetImplemented {
            construct: construct.into(),
            signal,
        }
    }

    /// Returns the construct the error refers to, if any.
    #[must_use]
    pub fn construct(&self) -> Option<&str> {
        match self {
            Self::MalformedSchema { construct, .. }
            | Self::UnsupportedPrimitiveType { construct, .. }
            | Self::NotYetImplemented { construct, .. } => Some(construct),
            Self::Io(_) => None,
        }
    }
}
