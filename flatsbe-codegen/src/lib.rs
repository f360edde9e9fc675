//! # flatsbe Codegen
//!
//! Rust code generation from a flatsbe token-stream IR.
//!
//! This crate provides:
//! - Primitive type mapping onto the `flatsbe-core` buffer accessors
//! - Enumeration, bit set and composite generation
//! - Message header flyweight generation
//! - A coordinator writing one unit per construct through an [`OutputManager`]

pub mod error;
pub mod generator;
pub mod options;
pub mod output;
pub mod rust;
pub mod walk;

pub use error::CodegenError;
pub use generator::Generator;
pub use options::GeneratorOptions;
pub use output::{DirectoryOutputManager, MemoryOutputManager, OutputManager};
pub use rust::GeneratedUnit;

use flatsbe_ir::IntermediateRepresentation;

/// Generates every unit of `ir` into memory.
///
/// # Arguments
/// * `ir` - Intermediate representation to generate from
/// * `options` - Generator options
///
/// # Returns
/// The in-memory output holding one unit per construct.
///
/// # Errors
/// Returns `CodegenError` if any construct fails to generate.
pub fn generate_to_memory(
    ir: &IntermediateRepresentation,
    options: GeneratorOptions,
) -> Result<MemoryOutputManager, CodegenError> {
    let mut generator = Generator::new(ir, MemoryOutputManager::new()).with_options(options);
    generator.generate()?;
    Ok(generator.into_output())
}

/// Generates every unit of `ir` into `<snake_case name>.rs` files under `dir`.
///
/// # Returns
/// The names of the units written, in order.
///
/// # Errors
/// Returns `CodegenError` if the directory cannot be created or any construct
/// fails to generate.
pub fn generate_to_dir(
    ir: &IntermediateRepresentation,
    options: GeneratorOptions,
    dir: &std::path::Path,
) -> Result<Vec<String>, CodegenError> {
    let output = DirectoryOutputManager::new(dir)?;
    Generator::new(ir, output).with_options(options).generate()
}
