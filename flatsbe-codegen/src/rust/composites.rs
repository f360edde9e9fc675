//! Flyweight code generation for the message header and composites.
//!
//! Both share one shape: a struct bound to a buffer and a base offset, with
//! one accessor per member. Nested composites compose offsets additively, so
//! the absolute position of a leaf is the base offset plus every relative
//! offset along its path.

use super::types::{PrimitiveMapping, field_ident, type_ident};
use super::{GeneratedUnit, SourceWriter};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::walk::{Construct, Member};
use flatsbe_ir::{IntermediateRepresentation, PrimitiveType, Signal, Token};
use std::collections::HashSet;

/// Method names every generated flyweight already defines.
const RESERVED: &[&str] = &["wrap", "try_wrap", "reset", "offset", "buffer", "into_inner"];

/// Generator for flyweight accessors over the message header and composites.
pub struct FlyweightGenerator<'a> {
    ir: &'a IntermediateRepresentation,
    options: &'a GeneratorOptions,
}

/// One member accessor, resolved against the declared types.
#[derive(Debug)]
enum Accessor<'t> {
    Primitive {
        name: &'t str,
        offset: usize,
        mapping: PrimitiveMapping,
    },
    Enum {
        name: &'t str,
        offset: usize,
        type_name: String,
        mapping: PrimitiveMapping,
    },
    Set {
        name: &'t str,
        offset: usize,
        type_name: String,
        mapping: PrimitiveMapping,
    },
    Composite {
        name: &'t str,
        offset: usize,
        type_name: String,
        length: usize,
    },
}

impl Accessor<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Primitive { name, .. }
            | Self::Enum { name, .. }
            | Self::Set { name, .. }
            | Self::Composite { name, .. } => name,
        }
    }

    /// One past the last byte the member occupies, relative to the flyweight.
    fn end(&self) -> usize {
        match self {
            Self::Primitive {
                offset, mapping, ..
            }
            | Self::Enum {
                offset, mapping, ..
            }
            | Self::Set {
                offset, mapping, ..
            } => offset + mapping.primitive_type().size(),
            Self::Composite { offset, length, .. } => offset + length,
        }
    }

    /// Generated method names, used for collision checks.
    fn method_names(&self) -> Vec<String> {
        let ident = field_ident(self.name());
        let bare = ident.trim_start_matches("r#");
        match self {
            Self::Composite { .. } => vec![ident.clone(), format!("{bare}_mut")],
            _ => vec![ident.clone(), format!("set_{bare}")],
        }
    }
}

impl<'a> FlyweightGenerator<'a> {
    /// Creates a new flyweight generator.
    #[must_use]
    pub fn new(ir: &'a IntermediateRepresentation, options: &'a GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Generates the message header flyweight from the IR's header tokens.
    ///
    /// The unit is named after [`GeneratorOptions::header_type_name`].
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] if the header is not one
    /// BEGIN_COMPOSITE…END_COMPOSITE construct or has invalid members, and
    /// [`CodegenError::NotYetImplemented`] for groups, var data, fields or
    /// messages inside it.
    pub fn generate_header(&self) -> Result<GeneratedUnit, CodegenError> {
        let construct = Construct::parse(self.ir.header())?;
        if construct.signal() != Signal::BeginComposite {
            return Err(CodegenError::malformed(
                construct.name(),
                format!(
                    "message header must be a composite, found {}",
                    construct.signal()
                ),
            ));
        }
        self.render(&construct, type_ident(&self.options.header_type_name))
    }

    /// Generates the flyweight for one BEGIN_COMPOSITE…END_COMPOSITE construct.
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] for empty composites,
    /// duplicate or reserved member names and references to undeclared
    /// types, and [`CodegenError::NotYetImplemented`] for groups, var data,
    /// fields or messages inside the composite.
    pub fn generate(&self, construct: &Construct<'_>) -> Result<GeneratedUnit, CodegenError> {
        if construct.signal() != Signal::BeginComposite {
            return Err(CodegenError::malformed(
                construct.name(),
                format!("expected BEGIN_COMPOSITE, found {}", construct.signal()),
            ));
        }
        self.render(construct, type_ident(construct.name()))
    }

    fn render(
        &self,
        construct: &Construct<'_>,
        type_name: String,
    ) -> Result<GeneratedUnit, CodegenError> {
        let accessors = self.collect_accessors(construct)?;
        let length = encoded_length(&accessors);
        tracing::trace!(
            "laying out {} with {} members, {} bytes",
            type_name,
            accessors.len(),
            length
        );

        let runtime = &self.options.runtime_crate;
        let has_enums = accessors.iter().any(|a| matches!(a, Accessor::Enum { .. }));
        let has_refs = accessors
            .iter()
            .any(|a| !matches!(a, Accessor::Primitive { .. }));

        let mut imports = vec![format!("{runtime}::buffer::{{ReadBuffer, WriteBuffer}}")];
        if has_enums {
            imports.push(format!("{runtime}::error::{{Error, UnknownEnumValue}}"));
        } else {
            imports.push(format!("{runtime}::error::Error"));
        }
        if has_refs {
            imports.push("super::*".to_string());
        }

        let mut w = SourceWriter::new(self.options.emit_docs);
        w.file_header(self.ir.package(), &imports);
        write_binding(&mut w, construct.name(), &type_name, length);
        write_read_accessors(&mut w, &type_name, &accessors);
        write_write_accessors(&mut w, &type_name, &accessors);

        Ok(GeneratedUnit {
            name: type_name,
            source: w.finish(),
        })
    }

    fn collect_accessors<'t>(
        &self,
        construct: &Construct<'t>,
    ) -> Result<Vec<Accessor<'t>>, CodegenError> {
        let name = construct.name();
        let order = self.ir.byte_order();
        let mut accessors = Vec::new();
        let mut methods: HashSet<String> = RESERVED.iter().map(|m| (*m).to_string()).collect();

        for member in construct.members() {
            let accessor = match member? {
                Member::Token(token) if token.signal() == Signal::Encoding => {
                    Accessor::Primitive {
                        name: token.name(),
                        offset: token.offset(),
                        mapping: PrimitiveMapping::for_token(token, order, name)?,
                    }
                }
                Member::Token(token) => {
                    return Err(CodegenError::malformed(
                        name,
                        format!(
                            "unexpected {} '{}' inside composite",
                            token.signal(),
                            token.name()
                        ),
                    ));
                }
                Member::Nested(nested) => self.nested_accessor(name, &nested)?,
            };

            for method in accessor.method_names() {
                if !methods.insert(method) {
                    return Err(CodegenError::malformed(
                        name,
                        format!(
                            "member '{}' collides with another accessor",
                            accessor.name()
                        ),
                    ));
                }
            }
            accessors.push(accessor);
        }

        if accessors.is_empty() {
            return Err(CodegenError::malformed(name, "composite has no members"));
        }
        Ok(accessors)
    }

    fn nested_accessor<'t>(
        &self,
        parent: &str,
        nested: &Construct<'t>,
    ) -> Result<Accessor<'t>, CodegenError> {
        let begin = nested.begin();
        let signal = nested.signal();
        match signal {
            Signal::BeginEnum => {
                let declared = self.declared(parent, begin, signal)?;
                Ok(Accessor::Enum {
                    name: begin.name(),
                    offset: begin.offset(),
                    type_name: type_ident(begin.type_name()),
                    mapping: self.storage(parent, begin, declared)?,
                })
            }
            Signal::BeginSet => {
                let declared = self.declared(parent, begin, signal)?;
                Ok(Accessor::Set {
                    name: begin.name(),
                    offset: begin.offset(),
                    type_name: type_ident(begin.type_name()),
                    mapping: self.storage(parent, begin, declared)?,
                })
            }
            Signal::BeginComposite => {
                self.declared(parent, begin, signal)?;
                let members = self.collect_accessors(nested)?;
                // The header composite is emitted under the configured name.
                let type_name = if self.is_header(begin.type_name()) {
                    type_ident(&self.options.header_type_name)
                } else {
                    type_ident(begin.type_name())
                };
                Ok(Accessor::Composite {
                    name: begin.name(),
                    offset: begin.offset(),
                    type_name,
                    length: encoded_length(&members),
                })
            }
            _ => Err(CodegenError::not_yet_implemented(nested.name(), signal)),
        }
    }

    /// Resolves the declared type a nested BEGIN marker refers to.
    fn declared(
        &self,
        parent: &str,
        begin: &Token,
        signal: Signal,
    ) -> Result<&'a Token, CodegenError> {
        let declared = self
            .ir
            .get_type(begin.type_name())
            .or_else(|| self.is_header(begin.type_name()).then(|| self.ir.header()))
            .and_then(<[Token]>::first)
            .ok_or_else(|| {
                CodegenError::malformed(
                    parent,
                    format!(
                        "member '{}' refers to undeclared type '{}'",
                        begin.name(),
                        begin.type_name()
                    ),
                )
            })?;
        if declared.signal() != signal {
            return Err(CodegenError::malformed(
                parent,
                format!(
                    "member '{}' is a {} but '{}' is declared as {}",
                    begin.name(),
                    signal,
                    begin.type_name(),
                    declared.signal()
                ),
            ));
        }
        Ok(declared)
    }

    fn is_header(&self, type_name: &str) -> bool {
        self.ir.header_name() == Some(type_name)
    }

    /// Storage type of a nested enum or set; the declared type wins.
    fn storage(
        &self,
        parent: &str,
        begin: &Token,
        declared: &Token,
    ) -> Result<PrimitiveMapping, CodegenError> {
        let primitive: Option<PrimitiveType> =
            declared.primitive_type().or_else(|| begin.primitive_type());
        primitive
            .map(|p| PrimitiveMapping::new(p, self.ir.byte_order()))
            .ok_or_else(|| {
                CodegenError::unsupported_primitive(parent, begin.name(), begin.signal())
            })
    }
}

fn write_binding(w: &mut SourceWriter, schema_name: &str, type_name: &str, length: usize) {
    w.doc(0, &format!("Flyweight over an encoded `{schema_name}`."));
    w.line(0, "#[derive(Debug, Clone, Copy)]");
    w.line(0, &format!("pub struct {type_name}<B> {{"));
    w.line(1, "buffer: B,");
    w.line(1, "offset: usize,");
    w.line(0, "}");
    w.blank();

    w.line(0, &format!("impl<B> {type_name}<B> {{"));
    w.doc(1, "Encoded length in bytes.");
    w.line(1, &format!("pub const ENCODED_LENGTH: usize = {length};"));
    w.blank();
    w.doc(1, "Binds to `buffer` at `offset` without bounds checking.");
    w.line(1, "#[must_use]");
    w.line(1, "pub const fn wrap(buffer: B, offset: usize) -> Self {");
    w.line(2, "Self { buffer, offset }");
    w.line(1, "}");
    w.blank();
    w.doc(1, "Rebinds to `buffer` at `offset` and returns the previous buffer.");
    w.line(1, "pub fn reset(&mut self, buffer: B, offset: usize) -> B {");
    w.line(2, "self.offset = offset;");
    w.line(2, "core::mem::replace(&mut self.buffer, buffer)");
    w.line(1, "}");
    w.blank();
    w.doc(1, "Returns the base offset.");
    w.line(1, "#[must_use]");
    w.line(1, "pub const fn offset(&self) -> usize {");
    w.line(2, "self.offset");
    w.line(1, "}");
    w.blank();
    w.doc(1, "Returns the bound buffer.");
    w.line(1, "#[must_use]");
    w.line(1, "pub const fn buffer(&self) -> &B {");
    w.line(2, "&self.buffer");
    w.line(1, "}");
    w.blank();
    w.doc(1, "Consumes the flyweight and returns the bound buffer.");
    w.line(1, "#[must_use]");
    w.line(1, "pub fn into_inner(self) -> B {");
    w.line(2, "self.buffer");
    w.line(1, "}");
    w.line(0, "}");
    w.blank();
}

fn encoded_length(accessors: &[Accessor<'_>]) -> usize {
    accessors.iter().map(Accessor::end).max().unwrap_or(0)
}

fn offset_expr(offset: usize) -> String {
    if offset == 0 {
        "self.offset".to_string()
    } else {
        format!("self.offset + {offset}")
    }
}

fn write_read_accessors(w: &mut SourceWriter, type_name: &str, accessors: &[Accessor<'_>]) {
    w.line(0, &format!("impl<B: ReadBuffer> {type_name}<B> {{"));
    w.doc(1, "Binds to `buffer` at `offset` after checking that the encoding fits.");
    w.doc(1, "");
    w.doc(1, "# Errors");
    w.doc(1, "Returns [`Error::BufferTooShort`] if the buffer is too short.");
    w.line(1, "pub fn try_wrap(buffer: B, offset: usize) -> Result<Self, Error> {");
    w.line(
        2,
        "Error::check_bounds(offset, Self::ENCODED_LENGTH, ReadBuffer::len(&buffer))?;",
    );
    w.line(2, "Ok(Self::wrap(buffer, offset))");
    w.line(1, "}");

    for accessor in accessors {
        w.blank();
        let ident = field_ident(accessor.name());
        match accessor {
            Accessor::Primitive {
                name,
                offset,
                mapping,
            } => {
                w.doc(1, &format!("Reads `{name}` at offset {offset}."));
                w.line(1, "#[must_use]");
                w.line(1, &format!("pub fn {ident}(&self) -> {} {{", mapping.rust_type()));
                w.line(
                    2,
                    &format!("self.buffer.{}({})", mapping.getter(), offset_expr(*offset)),
                );
                w.line(1, "}");
            }
            Accessor::Enum {
                name,
                offset,
                type_name,
                mapping,
            } => {
                w.doc(1, &format!("Reads `{name}` at offset {offset}."));
                w.doc(1, "");
                w.doc(1, "# Errors");
                w.doc(
                    1,
                    &format!("Returns [`UnknownEnumValue`] if the encoded value is not a `{type_name}`."),
                );
                w.line(
                    1,
                    &format!("pub fn {ident}(&self) -> Result<{type_name}, UnknownEnumValue> {{"),
                );
                w.line(
                    2,
                    &format!(
                        "{type_name}::lookup(self.buffer.{}({}))",
                        mapping.getter(),
                        offset_expr(*offset)
                    ),
                );
                w.line(1, "}");
            }
            Accessor::Set {
                name,
                offset,
                type_name,
                mapping,
            } => {
                w.doc(1, &format!("Reads `{name}` at offset {offset}."));
                w.line(1, "#[must_use]");
                w.line(1, &format!("pub fn {ident}(&self) -> {type_name} {{"));
                w.line(
                    2,
                    &format!(
                        "{type_name}::from_raw(self.buffer.{}({}))",
                        mapping.getter(),
                        offset_expr(*offset)
                    ),
                );
                w.line(1, "}");
            }
            Accessor::Composite {
                name,
                offset,
                type_name,
                ..
            } => {
                w.doc(1, &format!("Returns a read view of `{name}` at offset {offset}."));
                w.line(1, "#[must_use]");
                w.line(1, &format!("pub fn {ident}(&self) -> {type_name}<&B> {{"));
                w.line(
                    2,
                    &format!("{type_name}::wrap(&self.buffer, {})", offset_expr(*offset)),
                );
                w.line(1, "}");
            }
        }
    }
    w.line(0, "}");
    w.blank();
}

fn write_write_accessors(w: &mut SourceWriter, type_name: &str, accessors: &[Accessor<'_>]) {
    w.line(0, &format!("impl<B: WriteBuffer> {type_name}<B> {{"));
    for (index, accessor) in accessors.iter().enumerate() {
        if index > 0 {
            w.blank();
        }
        let ident = field_ident(accessor.name());
        let bare = ident.trim_start_matches("r#");
        match accessor {
            Accessor::Primitive {
                name,
                offset,
                mapping,
            } => {
                w.doc(1, &format!("Writes `{name}` at offset {offset}."));
                w.line(
                    1,
                    &format!(
                        "pub fn set_{bare}(&mut self, value: {}) -> &mut Self {{",
                        mapping.rust_type()
                    ),
                );
                w.line(
                    2,
                    &format!("self.buffer.{}({}, value);", mapping.putter(), offset_expr(*offset)),
                );
                w.line(2, "self");
                w.line(1, "}");
            }
            Accessor::Enum {
                name,
                offset,
                type_name,
                mapping,
            } => {
                w.doc(1, &format!("Writes `{name}` at offset {offset}."));
                w.line(
                    1,
                    &format!("pub fn set_{bare}(&mut self, value: {type_name}) -> &mut Self {{"),
                );
                w.line(
                    2,
                    &format!(
                        "self.buffer.{}({}, value.value());",
                        mapping.putter(),
                        offset_expr(*offset)
                    ),
                );
                w.line(2, "self");
                w.line(1, "}");
            }
            Accessor::Set {
                name,
                offset,
                type_name,
                mapping,
            } => {
                w.doc(1, &format!("Writes `{name}` at offset {offset}."));
                w.line(
                    1,
                    &format!("pub fn set_{bare}(&mut self, value: {type_name}) -> &mut Self {{"),
                );
                w.line(
                    2,
                    &format!(
                        "self.buffer.{}({}, value.raw());",
                        mapping.putter(),
                        offset_expr(*offset)
                    ),
                );
                w.line(2, "self");
                w.line(1, "}");
            }
            Accessor::Composite {
                name,
                offset,
                type_name,
                ..
            } => {
                w.doc(1, &format!("Returns a write view of `{name}` at offset {offset}."));
                w.line(
                    1,
                    &format!("pub fn {bare}_mut(&mut self) -> {type_name}<&mut B> {{"),
                );
                w.line(
                    2,
                    &format!("{type_name}::wrap(&mut self.buffer, {})", offset_expr(*offset)),
                );
                w.line(1, "}");
            }
        }
    }
    w.line(0, "}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatsbe_ir::ByteOrder;

    fn header_tokens() -> Vec<Token> {
        vec![
            Token::new(Signal::BeginComposite, "messageHeader"),
            Token::encoding("blockLength", PrimitiveType::Uint16, 0),
            Token::encoding("templateId", PrimitiveType::Uint16, 2),
            Token::encoding("schemaId", PrimitiveType::Uint16, 4),
            Token::encoding("version", PrimitiveType::Uint16, 6),
            Token::new(Signal::EndComposite, "messageHeader"),
        ]
    }

    fn boost_type_tokens(name: &str, offset: usize) -> Vec<Token> {
        let mut begin = Token::new(Signal::BeginEnum, name)
            .with_primitive_type(PrimitiveType::Char)
            .with_offset(offset);
        if name != "BoostType" {
            begin = begin.with_type_name("BoostType");
        }
        vec![
            begin,
            Token::char_value("TURBO", b'T'),
            Token::char_value("NITROUS", b'N'),
            Token::new(Signal::EndEnum, name),
        ]
    }

    fn booster_tokens(name: &str, offset: usize) -> Vec<Token> {
        let mut begin = Token::new(Signal::BeginComposite, name).with_offset(offset);
        if name != "Booster" {
            begin = begin.with_type_name("Booster");
        }
        let mut tokens = vec![begin];
        tokens.extend(boost_type_tokens("boostType", 0));
        tokens.push(Token::encoding("horsePower", PrimitiveType::Uint8, 1));
        tokens.push(Token::new(Signal::EndComposite, name));
        tokens
    }

    fn extras_tokens(name: &str, offset: usize) -> Vec<Token> {
        let mut begin = Token::new(Signal::BeginSet, name)
            .with_primitive_type(PrimitiveType::Uint8)
            .with_offset(offset);
        if name != "OptionalExtras" {
            begin = begin.with_type_name("OptionalExtras");
        }
        vec![
            begin,
            Token::choice("sunRoof", 0),
            Token::new(Signal::EndSet, name),
        ]
    }

    fn engine_tokens() -> Vec<Token> {
        let mut tokens = vec![
            Token::new(Signal::BeginComposite, "Engine"),
            Token::encoding("capacity", PrimitiveType::Uint16, 0),
            Token::encoding("numCylinders", PrimitiveType::Uint8, 2),
        ];
        tokens.extend(booster_tokens("booster", 3));
        tokens.extend(extras_tokens("extras", 5));
        tokens.push(Token::new(Signal::EndComposite, "Engine"));
        tokens
    }

    fn car_ir() -> IntermediateRepresentation {
        let mut ir = IntermediateRepresentation::new("car", header_tokens());
        ir.add_type(boost_type_tokens("BoostType", 0));
        ir.add_type(extras_tokens("OptionalExtras", 0));
        ir.add_type(booster_tokens("Booster", 0));
        ir.add_type(engine_tokens());
        ir
    }

    fn generate_composite(
        ir: &IntermediateRepresentation,
        tokens: &[Token],
    ) -> Result<GeneratedUnit, CodegenError> {
        let options = GeneratorOptions::default();
        let construct = Construct::parse(tokens)?;
        FlyweightGenerator::new(ir, &options).generate(&construct)
    }

    fn composite_of(members: Vec<Token>) -> Vec<Token> {
        let mut tokens = vec![Token::new(Signal::BeginComposite, "Widget")];
        tokens.extend(members);
        tokens.push(Token::new(Signal::EndComposite, "Widget"));
        tokens
    }

    #[test]
    fn test_generate_header() {
        let ir = car_ir();
        let options = GeneratorOptions::default();
        let unit = FlyweightGenerator::new(&ir, &options)
            .generate_header()
            .expect("generated");
        assert_eq!(unit.name, "MessageHeader");

        let src = &unit.source;
        assert!(src.contains("use flatsbe_core::buffer::{ReadBuffer, WriteBuffer};"));
        assert!(src.contains("use flatsbe_core::error::Error;"));
        assert!(!src.contains("super::*"));
        assert!(src.contains("pub struct MessageHeader<B> {"));
        assert!(src.contains("pub const ENCODED_LENGTH: usize = 8;"));
        assert!(src.contains("pub fn block_length(&self) -> u16 {"));
        assert!(src.contains("self.buffer.get_u16_le(self.offset)"));
        assert!(src.contains("self.buffer.get_u16_le(self.offset + 2)"));
        assert!(src.contains("pub fn set_template_id(&mut self, value: u16) -> &mut Self {"));
        assert!(src.contains("self.buffer.put_u16_le(self.offset + 2, value);"));
        assert!(src.contains("pub fn try_wrap(buffer: B, offset: usize) -> Result<Self, Error> {"));
        assert!(src.contains("core::mem::replace(&mut self.buffer, buffer)"));
    }

    #[test]
    fn test_header_type_name_and_byte_order() {
        let ir = car_ir().with_byte_order(ByteOrder::BigEndian);
        let options = GeneratorOptions::default()
            .header_type_name("FrameHeader")
            .runtime_crate("::flatsbe::core");
        let src = FlyweightGenerator::new(&ir, &options)
            .generate_header()
            .expect("generated")
            .source;
        assert!(src.contains("pub struct FrameHeader<B> {"));
        assert!(src.contains("use ::flatsbe::core::buffer::{ReadBuffer, WriteBuffer};"));
        assert!(src.contains("self.buffer.get_u16_be(self.offset + 6)"));
    }

    #[test]
    fn test_nested_header_uses_header_type_name() {
        let ir = car_ir();
        let options = GeneratorOptions::default().header_type_name("Header");
        let mut tokens = vec![
            Token::new(Signal::BeginComposite, "Frame"),
            Token::new(Signal::BeginComposite, "header").with_type_name("messageHeader"),
        ];
        tokens.extend(header_tokens().into_iter().skip(1).take(4));
        tokens.push(Token::new(Signal::EndComposite, "header"));
        tokens.push(Token::encoding("sequence", PrimitiveType::Uint32, 8));
        tokens.push(Token::new(Signal::EndComposite, "Frame"));

        let construct = Construct::parse(&tokens).expect("parsed");
        let src = FlyweightGenerator::new(&ir, &options)
            .generate(&construct)
            .expect("generated")
            .source;
        assert!(src.contains("pub fn header(&self) -> Header<&B> {"));
        assert!(src.contains("pub fn header_mut(&mut self) -> Header<&mut B> {"));
        assert!(!src.contains("MessageHeader"));
        assert!(src.contains("pub const ENCODED_LENGTH: usize = 12;"));
    }

    #[test]
    fn test_header_must_be_composite() {
        let header = vec![
            Token::new(Signal::BeginEnum, "messageHeader").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("A", 0u8),
            Token::new(Signal::EndEnum, "messageHeader"),
        ];
        let ir = IntermediateRepresentation::new("car", header);
        let options = GeneratorOptions::default();
        let err = FlyweightGenerator::new(&ir, &options)
            .generate_header()
            .unwrap_err();
        assert!(err.to_string().contains("must be a composite"));
    }

    #[test]
    fn test_generate_nested_composite() {
        let ir = car_ir();
        let unit = generate_composite(&ir, &engine_tokens()).expect("generated");
        assert_eq!(unit.name, "Engine");

        let src = &unit.source;
        assert!(src.contains("use super::*;"));
        assert!(!src.contains("UnknownEnumValue"));
        assert!(src.contains("pub const ENCODED_LENGTH: usize = 6;"));
        assert!(src.contains("pub fn booster(&self) -> Booster<&B> {"));
        assert!(src.contains("Booster::wrap(&self.buffer, self.offset + 3)"));
        assert!(src.contains("pub fn booster_mut(&mut self) -> Booster<&mut B> {"));
        assert!(src.contains("pub fn extras(&self) -> OptionalExtras {"));
        assert!(src.contains("OptionalExtras::from_raw(self.buffer.get_u8(self.offset + 5))"));
        assert!(src.contains("self.buffer.put_u8(self.offset + 5, value.raw());"));
    }

    #[test]
    fn test_generate_enum_member() {
        let ir = car_ir();
        let src = generate_composite(&ir, &booster_tokens("Booster", 0))
            .expect("generated")
            .source;
        assert!(src.contains("use flatsbe_core::error::{Error, UnknownEnumValue};"));
        assert!(src.contains("pub const ENCODED_LENGTH: usize = 2;"));
        assert!(src.contains(
            "pub fn boost_type(&self) -> Result<BoostType, UnknownEnumValue> {"
        ));
        assert!(src.contains("BoostType::lookup(self.buffer.get_u8(self.offset))"));
        assert!(src.contains("self.buffer.put_u8(self.offset, value.value());"));
    }

    #[test]
    fn test_empty_composite() {
        let ir = car_ir();
        let err = generate_composite(&ir, &composite_of(Vec::new())).unwrap_err();
        assert!(err.to_string().contains("composite has no members"));
    }

    #[test]
    fn test_reserved_member_name() {
        let ir = car_ir();
        let tokens = composite_of(vec![Token::encoding("offset", PrimitiveType::Uint32, 0)]);
        let err = generate_composite(&ir, &tokens).unwrap_err();
        assert!(err.to_string().contains("collides with another accessor"));
    }

    #[test]
    fn test_duplicate_member_name() {
        let ir = car_ir();
        let tokens = composite_of(vec![
            Token::encoding("price", PrimitiveType::Int64, 0),
            Token::encoding("price", PrimitiveType::Int64, 8),
        ]);
        let err = generate_composite(&ir, &tokens).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedSchema { .. }));
    }

    #[test]
    fn test_undeclared_reference() {
        let ir = IntermediateRepresentation::new("car", header_tokens());
        let err = generate_composite(&ir, &booster_tokens("Booster", 0)).unwrap_err();
        assert!(err.to_string().contains("undeclared type 'BoostType'"));
    }

    #[test]
    fn test_reference_kind_mismatch() {
        let mut ir = IntermediateRepresentation::new("car", header_tokens());
        ir.add_type(vec![
            Token::new(Signal::BeginSet, "BoostType").with_primitive_type(PrimitiveType::Uint8),
            Token::choice("a", 0),
            Token::new(Signal::EndSet, "BoostType"),
        ]);
        let err = generate_composite(&ir, &booster_tokens("Booster", 0)).unwrap_err();
        assert!(err.to_string().contains("declared as BEGIN_SET"));
    }

    #[test]
    fn test_group_not_yet_implemented() {
        let ir = car_ir();
        let tokens = composite_of(vec![
            Token::new(Signal::BeginGroup, "fuelFigures"),
            Token::encoding("speed", PrimitiveType::Uint16, 0),
            Token::new(Signal::EndGroup, "fuelFigures"),
        ]);
        let err = generate_composite(&ir, &tokens).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::NotYetImplemented { ref construct, signal: Signal::BeginGroup }
                if construct == "fuelFigures"
        ));
    }

    #[test]
    fn test_encoding_without_primitive_type() {
        let ir = car_ir();
        let tokens = composite_of(vec![Token::new(Signal::Encoding, "mystery")]);
        let err = generate_composite(&ir, &tokens).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedPrimitiveType { .. }));
    }

    #[test]
    fn test_keyword_member() {
        let ir = car_ir();
        let tokens = composite_of(vec![Token::encoding("type", PrimitiveType::Uint8, 0)]);
        let src = generate_composite(&ir, &tokens).expect("generated").source;
        assert!(src.contains("pub fn r#type(&self) -> u8 {"));
        assert!(src.contains("pub fn set_type(&mut self, value: u8) -> &mut Self {"));
    }
}
