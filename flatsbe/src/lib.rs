//! # flatsbe
//!
//! Generates flyweight accessors from an SBE token stream.
//!
//! An upstream schema compiler hands over an [`ir::IntermediateRepresentation`]:
//! a message header, declared types and messages, each a flat sequence of
//! BEGIN/END-bounded tokens. The generator turns every construct into one
//! Rust source unit whose accessors read and write primitives at fixed
//! offsets of a borrowed buffer.
//!
//! ## Features
//!
//! - **Zero-copy flyweights** - Generated structs wrap any `ReadBuffer`/`WriteBuffer`
//! - **Closed enumerations** - Exhaustive `lookup` with a typed unknown-value error
//! - **Bit sets and nested composites** - Offsets compose additively at every level
//! - **Pluggable output** - In-memory or directory sinks, one unit per construct
//!
//! ## Quick Start
//!
//! ```ignore
//! use flatsbe::prelude::*;
//!
//! let ir = IntermediateRepresentation::new("car", header_tokens);
//! let output = generate_to_memory(&ir, GeneratorOptions::default())?;
//! println!("{}", output.get("MessageHeader").unwrap_or_default());
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime buffer traits and errors used by generated code
//! - [`ir`] - Token model and intermediate representation
//! - [`codegen`] - Generators, coordinator and output managers

pub mod prelude;

/// Runtime buffer traits and errors used by generated code.
pub mod core {
    pub use flatsbe_core::*;
}

/// Token model and intermediate representation.
pub mod ir {
    pub use flatsbe_ir::*;
}

/// Code generation from the intermediate representation.
pub mod codegen {
    pub use flatsbe_codegen::*;
}

// Re-export commonly used items at the crate root
pub use flatsbe_codegen::{
    CodegenError, Generator, GeneratorOptions, generate_to_dir, generate_to_memory,
};
pub use flatsbe_core::{ReadBuffer, UnknownEnumValue, WriteBuffer};
pub use flatsbe_ir::{IntermediateRepresentation, Token};
