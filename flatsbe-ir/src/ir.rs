//! Intermediate representation for code generation.
//!
//! The representation is a plain container of token sequences produced by an
//! upstream schema compiler. It is treated as validated: BEGIN/END markers are
//! matched and construct names are distinct.

use crate::token::Token;
use crate::types::ByteOrder;

/// Read-only schema model consumed by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateRepresentation {
    package: String,
    byte_order: ByteOrder,
    header: Vec<Token>,
    types: Vec<Vec<Token>>,
    messages: Vec<Vec<Token>>,
}

impl IntermediateRepresentation {
    /// Creates a representation for `package` with the given header tokens.
    #[must_use]
    pub fn new(package: impl Into<String>, header: Vec<Token>) -> Self {
        Self {
            package: package.into(),
            byte_order: ByteOrder::default(),
            header,
            types: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Sets the byte order used by every multi-byte field.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Appends a declared type (enum, set or composite) token sequence.
    pub fn add_type(&mut self, tokens: Vec<Token>) {
        self.types.push(tokens);
    }

    /// Appends a message token sequence.
    pub fn add_message(&mut self, tokens: Vec<Token>) {
        self.messages.push(tokens);
    }

    /// Returns the package (namespace) name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the byte order.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the message header token sequence.
    #[must_use]
    pub fn header(&self) -> &[Token] {
        &self.header
    }

    /// Iterates the declared type sequences in declaration order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = &[Token]> {
        self.types.iter().map(Vec::as_slice)
    }

    /// Looks up a declared type by the name on its BEGIN marker.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&[Token]> {
        self.types()
            .find(|tokens| tokens.first().is_some_and(|t| t.name() == name))
    }

    /// Iterates the message sequences in declaration order.
    pub fn messages(&self) -> impl ExactSizeIterator<Item = &[Token]> {
        self.messages.iter().map(Vec::as_slice)
    }

    /// Returns the name on the header's BEGIN marker, if the header is not empty.
    #[must_use]
    pub fn header_name(&self) -> Option<&str> {
        self.header
            .first()
            .filter(|t| t.signal().is_begin())
            .map(Token::name)
    }
}

/// Converts a string to snake_case.
///
/// Acronym runs stay together: `MDEntryPx` becomes `md_entry_px`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Signal;
    use crate::types::PrimitiveType;

    fn header_tokens() -> Vec<Token> {
        vec![
            Token::new(Signal::BeginComposite, "messageHeader"),
            Token::encoding("blockLength", PrimitiveType::Uint16, 0),
            Token::encoding("templateId", PrimitiveType::Uint16, 2),
            Token::new(Signal::EndComposite, "messageHeader"),
        ]
    }

    fn color_tokens() -> Vec<Token> {
        vec![
            Token::new(Signal::BeginEnum, "Color").with_primitive_type(PrimitiveType::Uint8),
            Token::valid_value("A", 0u8),
            Token::valid_value("B", 1u8),
            Token::new(Signal::EndEnum, "Color"),
        ]
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("symbol"), "symbol");
        assert_eq!(to_snake_case("MDEntryPx"), "md_entry_px");
        assert_eq!(to_snake_case("MessageHeader"), "message_header");
        assert_eq!(to_snake_case("blockLength"), "block_length");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("order-type"), "order_type");
        assert_eq!(to_snake_case("TURBO"), "turbo");
        assert_eq!(to_snake_case("v2Field"), "v2_field");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("messageHeader"), "MessageHeader");
        assert_eq!(to_pascal_case("side"), "Side");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("A"), "A");
    }

    #[test]
    fn test_ir_accessors() {
        let mut ir = IntermediateRepresentation::new("car.example", header_tokens());
        ir.add_type(color_tokens());

        assert_eq!(ir.package(), "car.example");
        assert_eq!(ir.byte_order(), ByteOrder::LittleEndian);
        assert_eq!(ir.header().len(), 4);
        assert_eq!(ir.header_name(), Some("messageHeader"));
        assert_eq!(ir.types().len(), 1);
        assert_eq!(ir.messages().len(), 0);
    }

    #[test]
    fn test_get_type() {
        let mut ir = IntermediateRepresentation::new("test", header_tokens());
        ir.add_type(color_tokens());

        let color = ir.get_type("Color").expect("Color declared");
        assert_eq!(color.len(), 4);
        assert_eq!(color[1].name(), "A");
        assert!(ir.get_type("Missing").is_none());
    }

    #[test]
    fn test_types_preserve_declaration_order() {
        let mut ir = IntermediateRepresentation::new("test", header_tokens());
        ir.add_type(vec![
            Token::new(Signal::BeginSet, "Flags").with_primitive_type(PrimitiveType::Uint8),
            Token::choice("active", 0),
            Token::new(Signal::EndSet, "Flags"),
        ]);
        ir.add_type(color_tokens());

        let names: Vec<&str> = ir.types().map(|t| t[0].name()).collect();
        assert_eq!(names, vec!["Flags", "Color"]);
    }

    #[test]
    fn test_with_byte_order() {
        let ir = IntermediateRepresentation::new("test", header_tokens())
            .with_byte_order(ByteOrder::BigEndian);
        assert_eq!(ir.byte_order(), ByteOrder::BigEndian);
    }

    #[test]
    fn test_header_name_empty() {
        let ir = IntermediateRepresentation::new("test", Vec::new());
        assert_eq!(ir.header_name(), None);
    }
}
