//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use flatsbe::prelude::*;
//! ```

// Runtime types
pub use flatsbe_core::buffer::{ReadBuffer, WriteBuffer};
pub use flatsbe_core::error::{Error as CoreError, Result as CoreResult, UnknownEnumValue};

// IR types
pub use flatsbe_ir::{
    ByteOrder, IntermediateRepresentation, PrimitiveType, PrimitiveValue, Signal, Token,
};

// Codegen types
pub use flatsbe_codegen::{
    CodegenError, DirectoryOutputManager, Generator, GeneratorOptions, MemoryOutputManager,
    OutputManager, generate_to_dir, generate_to_memory,
};
