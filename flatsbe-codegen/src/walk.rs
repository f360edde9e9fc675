//! Recursive-descent walk over the flat token stream.
//!
//! A [`Construct`] is one BEGIN/END-bounded run of tokens. Its interior is
//! visited with a cursor by [`Members`], which yields plain member tokens and
//! consumes each nested BEGIN/END pair as a single nested construct.

use crate::error::CodegenError;
use flatsbe_ir::{Signal, Token};

/// One BEGIN/END-bounded construct.
#[derive(Debug, Clone, Copy)]
pub struct Construct<'a> {
    tokens: &'a [Token],
}

impl<'a> Construct<'a> {
    /// Parses `tokens` as exactly one matched BEGIN/END pair with its interior.
    ///
    /// # Errors
    /// Returns [`CodegenError::MalformedSchema`] if the sequence is empty, does
    /// not start with a BEGIN marker, has mismatched or unterminated markers, or
    /// continues past the closing END marker.
    pub fn parse(tokens: &'a [Token]) -> Result<Self, CodegenError> {
        let first = tokens
            .first()
            .ok_or_else(|| CodegenError::malformed("<unnamed>", "empty token sequence"))?;
        let end = consume_construct(tokens, 0, first.name())?;
        if end + 1 != tokens.len() {
            return Err(CodegenError::malformed(
                first.name(),
                format!(
                    "{} trailing token(s) after {}",
                    tokens.len() - end - 1,
                    tokens[end].signal()
                ),
            ));
        }
        Ok(Self { tokens })
    }

    /// Returns the BEGIN marker.
    #[must_use]
    pub fn begin(&self) -> &'a Token {
        &self.tokens[0]
    }

    /// Returns the name on the BEGIN marker.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.begin().name()
    }

    /// Returns the BEGIN signal.
    #[must_use]
    pub fn signal(&self) -> Signal {
        self.begin().signal()
    }

    /// Returns the interior tokens, excluding both markers.
    #[must_use]
    pub fn interior(&self) -> &'a [Token] {
        &self.tokens[1..self.tokens.len() - 1]
    }

    /// Iterates the direct members of the construct.
    #[must_use]
    pub fn members(&self) -> Members<'a> {
        Members {
            interior: self.interior(),
            cursor: 0,
            construct: self.name(),
        }
    }
}

/// A direct member of a construct.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    /// A non-structural token: encoding, valid value or choice.
    Token(&'a Token),
    /// A nested BEGIN/END pair.
    Nested(Construct<'a>),
}

/// Cursor over the interior of a construct.
#[derive(Debug, Clone)]
pub struct Members<'a> {
    interior: &'a [Token],
    cursor: usize,
    construct: &'a str,
}

impl<'a> Iterator for Members<'a> {
    type Item = Result<Member<'a>, CodegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.interior.get(self.cursor)?;
        let signal = token.signal();

        if signal.is_begin() {
            return match consume_construct(self.interior, self.cursor, self.construct) {
                Ok(end) => {
                    let nested = Construct {
                        tokens: &self.interior[self.cursor..=end],
                    };
                    self.cursor = end + 1;
                    Some(Ok(Member::Nested(nested)))
                }
                Err(err) => {
                    self.cursor = self.interior.len();
                    Some(Err(err))
                }
            };
        }

        self.cursor = if signal.is_end() {
            self.interior.len()
        } else {
            self.cursor + 1
        };

        if signal.is_end() {
            Some(Err(CodegenError::malformed(
                self.construct,
                format!("unmatched {} '{}'", signal, token.name()),
            )))
        } else {
            Some(Ok(Member::Token(token)))
        }
    }
}

/// Consumes the construct opened at `begin` and returns the index of its END marker.
fn consume_construct(tokens: &[Token], begin: usize, construct: &str) -> Result<usize, CodegenError> {
    let opener = &tokens[begin];
    let expected = opener.signal().matching_end().ok_or_else(|| {
        CodegenError::malformed(
            construct,
            format!(
                "expected a BEGIN marker, found {} '{}'",
                opener.signal(),
                opener.name()
            ),
        )
    })?;

    let mut cursor = begin + 1;
    while let Some(token) = tokens.get(cursor) {
        let signal = token.signal();
        if signal.is_begin() {
            cursor = consume_construct(tokens, cursor, construct)? + 1;
        } else if signal.is_end() {
            if signal != expected {
                return Err(CodegenError::malformed(
                    construct,
                    format!(
                        "{} '{}' closed by {} '{}'",
                        opener.signal(),
                        opener.name(),
                        signal,
                        token.name()
                    ),
                ));
            }
            return Ok(cursor);
        } else {
            cursor += 1;
        }
    }

    Err(CodegenError::malformed(
        construct,
        format!("unterminated {} '{}'", opener.signal(), opener.name()),
    ))
}
