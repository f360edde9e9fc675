//! # flatsbe Core
//!
//! Runtime support for code generated by `flatsbe-codegen`.
//!
//! This crate provides:
//! - Buffer traits with little- and big-endian primitive reads and writes
//! - The [`UnknownEnumValue`] error returned by generated enum lookups
//! - Error types for bounds-checked flyweight binding

pub mod buffer;
pub mod error;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use error::{Error, Result, UnknownEnumValue};
