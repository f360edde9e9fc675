//! Enumeration code generation.

use super::types::{PrimitiveMapping, type_ident};
use super::{GeneratedUnit, SourceWriter};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::walk::{Construct, Member};
use flatsbe_ir::{IntermediateRepresentation, PrimitiveType, PrimitiveValue, Signal};
use std::collections::HashSet;

/// Generator for enumeration types.
pub struct EnumGenerator<'a> {
    ir: &'a IntermediateRepresentation,
    options: &'a GeneratorOptions,
}

/// One validated enumeration member.
struct Variant {
    ident: String,
    literal: String,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(ir: &'a IntermediateRepresentation, options: &'a GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Generates the unit for one BEGIN_ENUM…END_ENUM construct.
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] for empty enumerations,
    /// members without a value, values outside the storage type, non-member
    /// interior tokens and duplicate names or values. Returns
    /// [`CodegenError::UnsupportedPrimitiveType`] if the BEGIN marker has no
    /// storage type.
    pub fn generate(&self, construct: &Construct<'_>) -> Result<GeneratedUnit, CodegenError> {
        let name = construct.name();
        if construct.signal() != Signal::BeginEnum {
            return Err(CodegenError::malformed(
                name,
                format!("expected BEGIN_ENUM, found {}", construct.signal()),
            ));
        }

        let mapping =
            PrimitiveMapping::for_token(construct.begin(), self.ir.byte_order(), name)?;
        let storage = mapping.primitive_type();
        if storage.is_float() {
            return Err(CodegenError::malformed(
                name,
                format!("enumeration storage type '{storage}' is not integral"),
            ));
        }

        let variants = self.collect_variants(construct, storage)?;
        let type_name = type_ident(name);
        let rust_type = mapping.rust_type();

        let mut w = SourceWriter::new(self.options.emit_docs);
        w.file_header(
            self.ir.package(),
            &[format!("{}::error::UnknownEnumValue", self.options.runtime_crate)],
        );

        w.doc(0, &format!("`{name}` enumeration, encoded as `{storage}`."));
        w.line(0, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        w.line(0, &format!("pub enum {type_name} {{"));
        for variant in &variants {
            w.doc(1, &format!("Encoded as `{}`.", variant.literal));
            w.line(1, &format!("{},", variant.ident));
        }
        w.line(0, "}");
        w.blank();

        w.line(0, &format!("impl {type_name} {{"));
        w.doc(1, "Every member, in declaration order.");
        let all = variants
            .iter()
            .map(|v| format!("Self::{}", v.ident))
            .collect::<Vec<_>>()
            .join(", ");
        w.line(
            1,
            &format!("pub const VALUES: [Self; {}] = [{all}];", variants.len()),
        );
        w.blank();

        w.doc(1, "Returns the encoded value.");
        w.line(1, "#[must_use]");
        w.line(1, &format!("pub const fn value(self) -> {rust_type} {{"));
        w.line(2, "match self {");
        for variant in &variants {
            w.line(3, &format!("Self::{} => {},", variant.ident, variant.literal));
        }
        w.line(2, "}");
        w.line(1, "}");
        w.blank();

        w.doc(1, "Returns the member encoded as `value`.");
        w.doc(1, "");
        w.doc(1, "# Errors");
        w.doc(1, "Returns [`UnknownEnumValue`] if no member is encoded as `value`.");
        w.line(
            1,
            &format!("pub fn lookup(value: {rust_type}) -> Result<Self, UnknownEnumValue> {{"),
        );
        w.line(2, "match value {");
        for variant in &variants {
            w.line(3, &format!("{} => Ok(Self::{}),", variant.literal, variant.ident));
        }
        w.line(
            3,
            &format!("_ => Err(UnknownEnumValue::new(\"{type_name}\", value)),"),
        );
        w.line(2, "}");
        w.line(1, "}");
        w.line(0, "}");
        w.blank();

        w.line(0, &format!("impl From<{type_name}> for {rust_type} {{"));
        w.line(1, &format!("fn from(value: {type_name}) -> Self {{"));
        w.line(2, "value.value()");
        w.line(1, "}");
        w.line(0, "}");
        w.blank();

        w.line(0, &format!("impl TryFrom<{rust_type}> for {type_name} {{"));
        w.line(1, "type Error = UnknownEnumValue;");
        w.blank();
        w.line(
            1,
            &format!("fn try_from(value: {rust_type}) -> Result<Self, Self::Error> {{"),
        );
        w.line(2, "Self::lookup(value)");
        w.line(1, "}");
        w.line(0, "}");

        Ok(GeneratedUnit {
            name: type_name,
            source: w.finish(),
        })
    }

    fn collect_variants(
        &self,
        construct: &Construct<'_>,
        storage: PrimitiveType,
    ) -> Result<Vec<Variant>, CodegenError> {
        let name = construct.name();
        let mut variants = Vec::new();
        let mut idents = HashSet::new();
        let mut values = HashSet::new();

        for member in construct.members() {
            let token = match member? {
                Member::Token(token) if token.signal() == Signal::ValidValue => token,
                Member::Token(token) => {
                    return Err(CodegenError::malformed(
                        name,
                        format!(
                            "unexpected {} '{}' inside enumeration",
                            token.signal(),
                            token.name()
                        ),
                    ));
                }
                Member::Nested(nested) => {
                    return Err(CodegenError::malformed(
                        name,
                        format!(
                            "unexpected {} '{}' inside enumeration",
                            nested.signal(),
                            nested.name()
                        ),
                    ));
                }
            };

            let value = token.const_value().ok_or_else(|| {
                CodegenError::malformed(name, format!("member '{}' has no value", token.name()))
            })?;
            if !value.fits(storage) {
                return Err(CodegenError::malformed(
                    name,
                    format!(
                        "value {value} of member '{}' does not fit '{storage}'",
                        token.name()
                    ),
                ));
            }

            let ident = type_ident(token.name());
            if !idents.insert(ident.clone()) {
                return Err(CodegenError::malformed(
                    name,
                    format!("duplicate member name '{}'", token.name()),
                ));
            }
            if !values.insert(value.as_i128()) {
                return Err(CodegenError::malformed(
                    name,
                    format!("duplicate value {value} on member '{}'", token.name()),
                ));
            }

            variants.push(Variant {
                ident,
                literal: literal_for(value, storage),
            });
        }

        if variants.is_empty() {
            return Err(CodegenError::malformed(name, "enumeration has no members"));
        }
        Ok(variants)
    }
}

/// Character literals only where the storage type is `char`.
fn literal_for(value: PrimitiveValue, storage: PrimitiveType) -> String {
    if storage == PrimitiveType::Char {
        value.to_rust_literal()
    } else {
        value.as_i128().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatsbe_ir::Token;

    fn ir() -> IntermediateRepresentation {
        IntermediateRepresentation::new("car", Vec::new())
    }

    fn color_tokens() -> Vec<Token> {
        vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("A", 0u8),
            Token::valid_value("B", 1u8),
            Token::new(Signal::EndEnum, "Color"),
        ]
    }

    fn generate(tokens: &[Token]) -> Result<GeneratedUnit, CodegenError> {
        let ir = ir();
        let options = GeneratorOptions::default();
        let construct = Construct::parse(tokens)?;
        EnumGenerator::new(&ir, &options).generate(&construct)
    }

    fn assert_malformed(tokens: &[Token], fragment: &str) {
        let err = generate(tokens).unwrap_err();
        assert!(
            matches!(err, CodegenError::MalformedSchema { .. }),
            "unexpected error: {err}"
        );
        assert!(err.to_string().contains(fragment), "message: {err}");
    }

    #[test]
    fn test_generate_color() {
        let unit = generate(&color_tokens()).expect("generated");
        assert_eq!(unit.name, "Color");

        let src = &unit.source;
        assert!(src.starts_with("// Generated by flatsbe-codegen from package `car`."));
        assert!(src.contains("use flatsbe_core::error::UnknownEnumValue;"));
        assert!(src.contains("pub enum Color {"));
        assert!(src.contains("pub const VALUES: [Self; 2] = [Self::A, Self::B];"));
        assert!(src.contains("pub const fn value(self) -> u8 {"));
        assert!(src.contains("Self::B => 1,"));
        assert!(src.contains("pub fn lookup(value: u8) -> Result<Self, UnknownEnumValue> {"));
        assert!(src.contains("1 => Ok(Self::B),"));
        assert!(src.contains("_ => Err(UnknownEnumValue::new(\"Color\", value)),"));
        assert!(src.contains("impl From<Color> for u8 {"));
        assert!(src.contains("impl TryFrom<u8> for Color {"));
    }

    #[test]
    fn test_members_keep_token_order() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Side").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("Sell", 2u8),
            Token::valid_value("Buy", 1u8),
            Token::valid_value("Short", 5u8),
            Token::new(Signal::EndEnum, "Side"),
        ];
        let src = generate(&tokens).expect("generated").source;
        assert!(src.contains("[Self::Sell, Self::Buy, Self::Short]"));
        let sell = src.find("    Sell,").expect("Sell variant");
        let buy = src.find("    Buy,").expect("Buy variant");
        assert!(sell < buy);
    }

    #[test]
    fn test_char_enum_uses_byte_literals() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "BoostType").with_primitive_type(PrimitiveType::Char),
            Token::char_value("TURBO", b'T'),
            Token::char_value("NITROUS", b'N'),
            Token::new(Signal::EndEnum, "BoostType"),
        ];
        let src = generate(&tokens).expect("generated").source;
        assert!(src.contains("Self::TURBO => b'T',"));
        assert!(src.contains("b'N' => Ok(Self::NITROUS),"));
    }

    #[test]
    fn test_signed_enum() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Direction").with_primitive_type(PrimitiveType::Int8),
            Token::valid_value("Down", -1i64),
            Token::valid_value("Up", 1i64),
            Token::new(Signal::EndEnum, "Direction"),
        ];
        let src = generate(&tokens).expect("generated").source;
        assert!(src.contains("pub const fn value(self) -> i8 {"));
        assert!(src.contains("-1 => Ok(Self::Down),"));
    }

    #[test]
    fn test_docs_can_be_disabled() {
        let ir = ir();
        let options = GeneratorOptions::default().emit_docs(false);
        let tokens = color_tokens();
        let construct = Construct::parse(&tokens).expect("well formed");
        let src = EnumGenerator::new(&ir, &options)
            .generate(&construct)
            .expect("generated")
            .source;
        assert!(!src.contains("///"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate(&color_tokens()).expect("generated");
        let second = generate(&color_tokens()).expect("generated");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_enum() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Empty").with_primitive_type(PrimitiveType::Uint8),
            Token::new(Signal::EndEnum, "Empty"),
        ];
        assert_malformed(&tokens, "no members");
    }

    #[test]
    fn test_member_without_value() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::new(Signal::ValidValue, "A"),
            Token::new(Signal::EndEnum, "Color"),
        ];
        assert_malformed(&tokens, "member 'A' has no value");
    }

    #[test]
    fn test_value_out_of_range() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("Big", 300u64),
            Token::new(Signal::EndEnum, "Color"),
        ];
        assert_malformed(&tokens, "does not fit 'uint8'");
    }

    #[test]
    fn test_non_member_interior_token() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::choice("A", 0),
            Token::new(Signal::EndEnum, "Color"),
        ];
        assert_malformed(&tokens, "unexpected CHOICE 'A'");
    }

    #[test]
    fn test_duplicates() {
        let names = vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("A", 0u8),
            Token::valid_value("a", 1u8),
            Token::new(Signal::EndEnum, "Color"),
        ];
        assert_malformed(&names, "duplicate member name 'a'");

        let values = vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("A", 0u8),
            Token::valid_value("B", 0u8),
            Token::new(Signal::EndEnum, "Color"),
        ];
        assert_malformed(&values, "duplicate value 0");
    }

    #[test]
    fn test_float_storage_rejected() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Ratio").with_primitive_type(PrimitiveType::Float),
            Token::valid_value("Half", 1u8),
            Token::new(Signal::EndEnum, "Ratio"),
        ];
        assert_malformed(&tokens, "not integral");
    }

    #[test]
    fn test_missing_storage_type() {
        let tokens = vec![
            Token::new(Signal::BeginEnum, "Color"),
            Token::valid_value("A", 0u8),
            Token::new(Signal::EndEnum, "Color"),
        ];
        let err = generate(&tokens).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedPrimitiveType { .. }));
    }
}
