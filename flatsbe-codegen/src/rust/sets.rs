//! Bit set code generation.

use super::types::{PrimitiveMapping, field_ident, type_ident};
use super::{GeneratedUnit, SourceWriter};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::walk::{Construct, Member};
use flatsbe_ir::{IntermediateRepresentation, Signal};
use std::collections::HashSet;

/// Method names every generated set already defines.
const RESERVED: &[&str] = &["new", "from_raw", "raw", "clear"];

/// Generator for bit set types.
pub struct SetGenerator<'a> {
    ir: &'a IntermediateRepresentation,
    options: &'a GeneratorOptions,
}

struct Choice<'t> {
    schema_name: &'t str,
    ident: String,
    bit: u32,
}

impl<'a> SetGenerator<'a> {
    /// Creates a new set generator.
    #[must_use]
    pub fn new(ir: &'a IntermediateRepresentation, options: &'a GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Generates the unit for one BEGIN_SET…END_SET construct.
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] for empty sets, non-choice
    /// interior tokens, missing or out-of-range bit positions, duplicate
    /// choices and storage types that are not unsigned integers.
    pub fn generate(&self, construct: &Construct<'_>) -> Result<GeneratedUnit, CodegenError> {
        let name = construct.name();
        if construct.signal() != Signal::BeginSet {
            return Err(CodegenError::malformed(
                name,
                format!("expected BEGIN_SET, found {}", construct.signal()),
            ));
        }

        let mapping =
            PrimitiveMapping::for_token(construct.begin(), self.ir.byte_order(), name)?;
        let storage = mapping.primitive_type();
        if !storage.is_unsigned() {
            return Err(CodegenError::malformed(
                name,
                format!("set storage type '{storage}' is not an unsigned integer"),
            ));
        }
        let width = u32::try_from(storage.size() * 8).unwrap_or(u32::MAX);
        let choices = collect_choices(construct, width)?;

        let type_name = type_ident(name);
        let rust_type = mapping.rust_type();

        let mut w = SourceWriter::new(self.options.emit_docs);
        w.file_header(self.ir.package(), &[]);

        w.doc(0, &format!("`{name}` bit set, stored as `{storage}`."));
        w.line(0, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]");
        w.line(0, &format!("pub struct {type_name}({rust_type});"));
        w.blank();

        w.line(0, &format!("impl {type_name} {{"));
        w.doc(1, "Creates a set with no choice set.");
        w.line(1, "#[must_use]");
        w.line(1, "pub const fn new() -> Self {");
        w.line(2, "Self(0)");
        w.line(1, "}");
        w.blank();

        w.doc(1, "Creates a set from its encoded value.");
        w.line(1, "#[must_use]");
        w.line(1, &format!("pub const fn from_raw(raw: {rust_type}) -> Self {{"));
        w.line(2, "Self(raw)");
        w.line(1, "}");
        w.blank();

        w.doc(1, "Returns the encoded value.");
        w.line(1, "#[must_use]");
        w.line(1, &format!("pub const fn raw(self) -> {rust_type} {{"));
        w.line(2, "self.0");
        w.line(1, "}");
        w.blank();

        w.doc(1, "Clears every choice.");
        w.line(1, "pub fn clear(&mut self) -> &mut Self {");
        w.line(2, "self.0 = 0;");
        w.line(2, "self");
        w.line(1, "}");

        for choice in &choices {
            let mask = format!("{:#x}", 1u64 << choice.bit);
            w.blank();
            w.doc(
                1,
                &format!("Returns true if `{}` (bit {}) is set.", choice.schema_name, choice.bit),
            );
            w.line(1, "#[must_use]");
            w.line(1, &format!("pub const fn {}(self) -> bool {{", choice.ident));
            w.line(2, &format!("(self.0 & {mask}) != 0"));
            w.line(1, "}");
            w.blank();

            w.doc(1, &format!("Sets or clears `{}`.", choice.schema_name));
            w.line(
                1,
                &format!(
                    "pub fn set_{}(&mut self, value: bool) -> &mut Self {{",
                    choice.ident.trim_start_matches("r#")
                ),
            );
            w.line(2, "if value {");
            w.line(3, &format!("self.0 |= {mask};"));
            w.line(2, "} else {");
            w.line(3, &format!("self.0 &= !{mask};"));
            w.line(2, "}");
            w.line(2, "self");
            w.line(1, "}");
        }
        w.line(0, "}");

        Ok(GeneratedUnit {
            name: type_name,
            source: w.finish(),
        })
    }
}

fn collect_choices<'t>(
    construct: &Construct<'t>,
    width: u32,
) -> Result<Vec<Choice<'t>>, CodegenError> {
    let name = construct.name();
    let mut choices = Vec::new();
    let mut idents = HashSet::new();
    let mut bits = HashSet::new();

    for member in construct.members() {
        let token = match member? {
            Member::Token(token) if token.signal() == Signal::Choice => token,
            Member::Token(token) => {
                return Err(CodegenError::malformed(
                    name,
                    format!("unexpected {} '{}' inside set", token.signal(), token.name()),
                ));
            }
            Member::Nested(nested) => {
                return Err(CodegenError::malformed(
                    name,
                    format!("unexpected {} '{}' inside set", nested.signal(), nested.name()),
                ));
            }
        };

        let position = token.const_value().ok_or_else(|| {
            CodegenError::malformed(name, format!("choice '{}' has no bit position", token.name()))
        })?;
        let bit = u32::try_from(position.as_i128())
            .ok()
            .filter(|bit| *bit < width)
            .ok_or_else(|| {
                CodegenError::malformed(
                    name,
                    format!(
                        "bit position {position} of choice '{}' is outside 0..{width}",
                        token.name()
                    ),
                )
            })?;

        let ident = field_ident(token.name());
        if RESERVED.contains(&ident.as_str()) {
            return Err(CodegenError::malformed(
                name,
                format!("choice name '{}' collides with a set method", token.name()),
            ));
        }
        if !idents.insert(ident.clone()) {
            return Err(CodegenError::malformed(
                name,
                format!("duplicate choice name '{}'", token.name()),
            ));
        }
        if !bits.insert(bit) {
            return Err(CodegenError::malformed(
                name,
                format!("duplicate bit position {bit} on choice '{}'", token.name()),
            ));
        }

        choices.push(Choice {
            schema_name: token.name(),
            ident,
            bit,
        });
    }

    if choices.is_empty() {
        return Err(CodegenError::malformed(name, "set has no choices"));
    }
    Ok(choices)
}
