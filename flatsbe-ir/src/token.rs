//! Flat token model.
//!
//! A schema is described as a sequence of [`Token`]s. Structural signals come
//! in matched BEGIN/END pairs that nest; everything between a pair belongs to
//! that construct.

use crate::types::{PrimitiveType, PrimitiveValue};
use std::fmt;

/// Structural role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Start of a message.
    BeginMessage,
    /// End of a message.
    EndMessage,
    /// Start of a composite.
    BeginComposite,
    /// End of a composite.
    EndComposite,
    /// Start of a message field.
    BeginField,
    /// End of a message field.
    EndField,
    /// Start of a repeating group.
    BeginGroup,
    /// End of a repeating group.
    EndGroup,
    /// Start of an enumeration.
    BeginEnum,
    /// Enumeration member.
    ValidValue,
    /// End of an enumeration.
    EndEnum,
    /// Start of a bit set.
    BeginSet,
    /// Bit set member.
    Choice,
    /// End of a bit set.
    EndSet,
    /// Start of variable-length data.
    BeginVarData,
    /// End of variable-length data.
    EndVarData,
    /// Single scalar at a fixed offset.
    Encoding,
}

impl Signal {
    /// Returns true for BEGIN_* markers.
    #[must_use]
    pub const fn is_begin(&self) -> bool {
        self.matching_end().is_some()
    }

    /// Returns true for END_* markers.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(
            self,
            Self::EndMessage
                | Self::EndComposite
                | Self::EndField
                | Self::EndGroup
                | Self::EndEnum
                | Self::EndSet
                | Self::EndVarData
        )
    }

    /// Returns the END marker closing this BEGIN marker.
    #[must_use]
    pub const fn matching_end(&self) -> Option<Self> {
        match self {
            Self::BeginMessage => Some(Self::EndMessage),
            Self::BeginComposite => Some(Self::EndComposite),
            Self::BeginField => Some(Self::EndField),
            Self::BeginGroup => Some(Self::EndGroup),
            Self::BeginEnum => Some(Self::EndEnum),
            Self::BeginSet => Some(Self::EndSet),
            Self::BeginVarData => Some(Self::EndVarData),
            _ => None,
        }
    }

    /// Returns the wire-style name, e.g. `BEGIN_ENUM`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BeginMessage => "BEGIN_MESSAGE",
            Self::EndMessage => "END_MESSAGE",
            Self::BeginComposite => "BEGIN_COMPOSITE",
            Self::EndComposite => "END_COMPOSITE",
            Self::BeginField => "BEGIN_FIELD",
            Self::EndField => "END_FIELD",
            Self::BeginGroup => "BEGIN_GROUP",
            Self::EndGroup => "END_GROUP",
            Self::BeginEnum => "BEGIN_ENUM",
            Self::ValidValue => "VALID_VALUE",
            Self::EndEnum => "END_ENUM",
            Self::BeginSet => "BEGIN_SET",
            Self::Choice => "CHOICE",
            Self::EndSet => "END_SET",
            Self::BeginVarData => "BEGIN_VAR_DATA",
            Self::EndVarData => "END_VAR_DATA",
            Self::Encoding => "ENCODING",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind token options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenOptions {
    /// Encoded value of an enum member, or bit position of a set choice.
    pub const_value: Option<PrimitiveValue>,
    /// Declared type referenced by a nested BEGIN marker.
    ///
    /// When present the token's name is the member name inside the enclosing
    /// composite and this is the name of the type it refers to.
    pub type_name: Option<String>,
}

/// One schema occurrence in the flat token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    signal: Signal,
    name: String,
    primitive_type: Option<PrimitiveType>,
    offset: usize,
    options: TokenOptions,
}

impl Token {
    /// Creates a token with no primitive type, offset zero and default options.
    #[must_use]
    pub fn new(signal: Signal, name: impl Into<String>) -> Self {
        Self {
            signal,
            name: name.into(),
            primitive_type: None,
            offset: 0,
            options: TokenOptions::default(),
        }
    }

    /// Creates an ENCODING token for a scalar field.
    #[must_use]
    pub fn encoding(name: impl Into<String>, primitive_type: PrimitiveType, offset: usize) -> Self {
        Self::new(Signal::Encoding, name)
            .with_primitive_type(primitive_type)
            .with_offset(offset)
    }

    /// Creates a VALID_VALUE token for an enum member.
    #[must_use]
    pub fn valid_value(name: impl Into<String>, value: impl Into<PrimitiveValue>) -> Self {
        Self::new(Signal::ValidValue, name).with_const_value(value)
    }

    /// Creates a VALID_VALUE token for a member of a `char` enum.
    #[must_use]
    pub fn char_value(name: impl Into<String>, value: u8) -> Self {
        Self::new(Signal::ValidValue, name).with_const_value(PrimitiveValue::Char(value))
    }

    /// Creates a CHOICE token for a set member at `bit_position`.
    #[must_use]
    pub fn choice(name: impl Into<String>, bit_position: u8) -> Self {
        Self::new(Signal::Choice, name).with_const_value(bit_position)
    }

    /// Sets the primitive type.
    #[must_use]
    pub fn with_primitive_type(mut self, primitive_type: PrimitiveType) -> Self {
        self.primitive_type = Some(primitive_type);
        self
    }

    /// Sets the byte offset relative to the enclosing construct.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the constant value option.
    #[must_use]
    pub fn with_const_value(mut self, value: impl Into<PrimitiveValue>) -> Self {
        self.options.const_value = Some(value.into());
        self
    }

    /// Sets the referenced type name option.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.options.type_name = Some(type_name.into());
        self
    }

    /// Returns the structural signal.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        self.signal
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the primitive type, if the token carries one.
    #[must_use]
    pub const fn primitive_type(&self) -> Option<PrimitiveType> {
        self.primitive_type
    }

    /// Returns the byte offset relative to the enclosing construct.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the per-kind options.
    #[must_use]
    pub const fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Returns the constant value option.
    #[must_use]
    pub const fn const_value(&self) -> Option<PrimitiveValue> {
        self.options.const_value
    }

    /// Returns the referenced type name, falling back to the token's own name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.options.type_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_pairs() {
        let begins = [
            Signal::BeginMessage,
            Signal::BeginComposite,
            Signal::BeginField,
            Signal::BeginGroup,
            Signal::BeginEnum,
            Signal::BeginSet,
            Signal::BeginVarData,
        ];
        for begin in begins {
            assert!(begin.is_begin());
            assert!(!begin.is_end());
            let end = begin.matching_end().expect("begin has end");
            assert!(end.is_end());
            assert!(!end.is_begin());
        }

        for member in [Signal::Encoding, Signal::ValidValue, Signal::Choice] {
            assert!(!member.is_begin());
            assert!(!member.is_end());
            assert_eq!(member.matching_end(), None);
        }
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::BeginEnum.to_string(), "BEGIN_ENUM");
        assert_eq!(Signal::Encoding.to_string(), "ENCODING");
    }

    #[test]
    fn test_encoding_token() {
        let token = Token::encoding("templateId", PrimitiveType::Uint16, 2);
        assert_eq!(token.signal(), Signal::Encoding);
        assert_eq!(token.name(), "templateId");
        assert_eq!(token.primitive_type(), Some(PrimitiveType::Uint16));
        assert_eq!(token.offset(), 2);
        assert_eq!(token.const_value(), None);
    }

    #[test]
    fn test_member_tokens() {
        let value = Token::valid_value("Sell", 2u8);
        assert_eq!(value.signal(), Signal::ValidValue);
        assert_eq!(value.const_value(), Some(PrimitiveValue::UInt(2)));

        let model = Token::char_value("A", b'A');
        assert_eq!(model.signal(), Signal::ValidValue);
        assert_eq!(model.const_value(), Some(PrimitiveValue::Char(b'A')));

        let choice = Token::choice("sunRoof", 3);
        assert_eq!(choice.signal(), Signal::Choice);
        assert_eq!(choice.const_value(), Some(PrimitiveValue::UInt(3)));
    }

    #[test]
    fn test_type_name_falls_back_to_name() {
        let top_level = Token::new(Signal::BeginEnum, "BoostType");
        assert_eq!(top_level.type_name(), "BoostType");

        let nested = Token::new(Signal::BeginEnum, "boostType")
            .with_type_name("BoostType")
            .with_offset(4);
        assert_eq!(nested.name(), "boostType");
        assert_eq!(nested.type_name(), "BoostType");
        assert_eq!(nested.options().type_name.as_deref(), Some("BoostType"));
    }

    #[test]
    fn test_non_ascii_member_is_rejected() {
        let value = PrimitiveValue::try_from('é');
        assert!(value.is_err());
        let accepted = PrimitiveValue::try_from('T').map(|v| Token::valid_value("TURBO", v));
        assert_eq!(
            accepted.map(|t| t.const_value()),
            Ok(Some(PrimitiveValue::Char(b'T')))
        );
    }
}
