//! # flatsbe IR
//!
//! Intermediate representation handed to the code generator by an upstream
//! schema compiler.
//!
//! This crate provides:
//! - The flat [`Token`] model and its structural [`Signal`]s
//! - Primitive types, constant values and byte order
//! - The read-only [`IntermediateRepresentation`] grouping header, types and messages
//! - Naming helpers shared by generators

pub mod error;
pub mod ir;
pub mod token;
pub mod types;

pub use error::IrError;
pub use ir::{IntermediateRepresentation, to_pascal_case, to_snake_case};
pub use token::{Signal, Token, TokenOptions};
pub use types::{ByteOrder, PrimitiveType, PrimitiveValue};
