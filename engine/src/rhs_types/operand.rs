use crate::lex::{Lex, LexErrorKind, LexResult};
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

/// A literal right-hand side of a filter expression.
///
/// The operand is the remainder of the expression after the operator,
/// taken verbatim unless it is wrapped in matching single or double
/// quotes, in which case the quotes are stripped and escaped quotes and
/// backslashes are honored.
#[derive(PartialEq, Eq, Clone, Hash, Serialize)]
#[serde(transparent)]
pub struct Operand(Box<str>);

impl Operand {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Operand {
    fn from(src: &str) -> Self {
        Operand(src.into())
    }
}

impl From<String> for Operand {
    fn from(src: String) -> Self {
        Operand(src.into())
    }
}

impl Deref for Operand {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Debug for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl<'i> Lex<'i> for Operand {
    fn lex(input: &'i str) -> LexResult<'i, Self> {
        let quote = match input.chars().next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Ok((input.into(), "")),
        };

        let mut res = String::new();
        let mut iter = input[1..].chars();
        loop {
            match iter
                .next()
                .ok_or((LexErrorKind::MissingEndingQuote, input))?
            {
                '\\' => match iter.next() {
                    Some(c) if c == quote || c == '\\' => res.push(c),
                    Some(c) => {
                        res.push('\\');
                        res.push(c);
                    }
                    None => return Err((LexErrorKind::MissingEndingQuote, input)),
                },
                c if c == quote => return Ok((res.into(), iter.as_str())),
                c => res.push(c),
            }
        }
    }
}
