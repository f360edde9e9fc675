//! Code emission coordinator.
//!
//! Walks the header, the declared types and the messages of an IR, routes
//! each construct to its generator and writes every rendered unit through an
//! [`OutputManager`].

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::output::OutputManager;
use crate::rust::{EnumGenerator, FlyweightGenerator, GeneratedUnit, SetGenerator};
use crate::walk::Construct;
use flatsbe_ir::{IntermediateRepresentation, Signal, Token};
use std::collections::HashMap;
use std::io::Write;

/// Main code generator.
pub struct Generator<'a, O: OutputManager> {
    ir: &'a IntermediateRepresentation,
    options: GeneratorOptions,
    output: O,
    written: HashMap<String, String>,
}

impl<'a, O: OutputManager> Generator<'a, O> {
    /// Creates a new generator writing to `output` with default options.
    #[must_use]
    pub fn new(ir: &'a IntermediateRepresentation, output: O) -> Self {
        Self {
            ir,
            options: GeneratorOptions::default(),
            output,
            written: HashMap::new(),
        }
    }

    /// Replaces the generator options.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the generator options.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Returns the output manager.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the generator and returns the output manager.
    #[must_use]
    pub fn into_output(self) -> O {
        self.output
    }

    /// Generates the message header unit.
    ///
    /// # Errors
    /// Returns the header generation error, or an I/O error from the sink.
    pub fn generate_message_header_stub(&mut self) -> Result<String, CodegenError> {
        tracing::debug!("generating message header {}", self.options.header_type_name);
        let unit = FlyweightGenerator::new(self.ir, &self.options)
            .generate_header()
            .inspect_err(|e| tracing::warn!("message header generation failed: {}", e))?;
        self.write_unit(unit)
    }

    /// Generates the unit for one declared type sequence.
    ///
    /// Returns `Ok(None)` for the composite that is the message header, which
    /// is generated by [`Self::generate_message_header_stub`].
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] for sequences that do not
    /// start with a BEGIN marker or fail validation, and
    /// [`CodegenError::NotYetImplemented`] for BEGIN signals other than enum,
    /// set and composite.
    pub fn generate_type_stub(&mut self, tokens: &[Token]) -> Result<Option<String>, CodegenError> {
        let construct = Construct::parse(tokens)
            .inspect_err(|e| tracing::warn!("rejected type sequence: {}", e))?;
        let name = construct.name();
        let signal = construct.signal();

        if signal == Signal::BeginComposite && self.ir.header_name() == Some(name) {
            tracing::debug!("skipping {}: generated as the message header", name);
            return Ok(None);
        }

        tracing::debug!("generating {} '{}'", signal, name);
        let unit = match signal {
            Signal::BeginEnum => EnumGenerator::new(self.ir, &self.options).generate(&construct),
            Signal::BeginSet => SetGenerator::new(self.ir, &self.options).generate(&construct),
            Signal::BeginComposite => {
                FlyweightGenerator::new(self.ir, &self.options).generate(&construct)
            }
            other => Err(CodegenError::not_yet_implemented(name, other)),
        }
        .inspect_err(|e| tracing::warn!("type generation failed: {}", e))?;

        self.write_unit(unit).map(Some)
    }

    /// Generates every declared type in IR order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first error raised by [`Self::generate_type_stub`].
    pub fn generate_type_stubs(&mut self) -> Result<Vec<String>, CodegenError> {
        let ir = self.ir;
        let mut names = Vec::with_capacity(ir.types().len());
        for tokens in ir.types() {
            if let Some(name) = self.generate_type_stub(tokens)? {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Generates message units.
    ///
    /// Message bodies are not generated; with no messages this is a no-op.
    ///
    /// # Errors
    /// Returns [`CodegenError::NotYetImplemented`] naming the first message.
    pub fn generate_message_stubs(&mut self) -> Result<Vec<String>, CodegenError> {
        match self.ir.messages().next() {
            None => Ok(Vec::new()),
            Some(tokens) => {
                let name = tokens.first().map_or("<unnamed>", Token::name);
                let err = CodegenError::not_yet_implemented(name, Signal::BeginMessage);
                tracing::warn!("message generation failed: {}", err);
                Err(err)
            }
        }
    }

    /// Generates the header, then the declared types, then the messages.
    ///
    /// Returns the names of the units written, in order.
    ///
    /// # Errors
    /// Returns the first generation or I/O error.
    pub fn generate(&mut self) -> Result<Vec<String>, CodegenError> {
        let mut names = vec![self.generate_message_header_stub()?];
        names.extend(self.generate_type_stubs()?);
        names.extend(self.generate_message_stubs()?);
        tracing::info!(
            "generated {} unit(s) for package {}",
            names.len(),
            self.ir.package()
        );
        Ok(names)
    }

    /// Writes a rendered unit through one sink, at most once per sink.
    fn write_unit(&mut self, unit: GeneratedUnit) -> Result<String, CodegenError> {
        let key = self.output.key_for(&unit.name);
        if let Some(previous) = self.written.get(&key) {
            let reason = if *previous == unit.name {
                format!("output unit '{}' was already written", unit.name)
            } else {
                format!(
                    "output '{key}' for unit '{}' was already written by unit '{previous}'",
                    unit.name
                )
            };
            let err = CodegenError::malformed(&unit.name, reason);
            tracing::warn!("{}", err);
            return Err(err);
        }

        {
            let mut sink = self.output.create_output(&unit.name)?;
            sink.write_all(unit.source.as_bytes())?;
            sink.flush()?;
        }

        tracing::debug!("wrote unit {} ({} bytes)", unit.name, unit.source.len());
        self.written.insert(key, unit.name.clone());
        Ok(unit.name)
    }
}
