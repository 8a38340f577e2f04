use crate::lex::{Lex, LexErrorKind, LexResult};
use crate::rhs_types::Operand;
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

/// A compiled `*=` operand: a glob pattern where `*` matches any run of
/// characters and `?` matches a single character.
///
/// Globs are translated to an anchored regular expression with every other
/// character escaped, so matching covers the whole stringified value.
#[derive(Clone)]
pub struct Wildcard {
    regex: ::regex::Regex,
    pattern: Box<str>,
}

impl Wildcard {
    pub fn new(pattern: &str) -> Result<Self, ::regex::Error> {
        // (?s) so `*`/`?` also cross newlines in stringified containers
        let mut regex_str = String::with_capacity(pattern.len() + 8);
        regex_str.push_str(r"(?s)\A");
        let mut literal = String::new();
        for c in pattern.chars() {
            match c {
                '*' | '?' => {
                    regex_str.push_str(&::regex::escape(&literal));
                    literal.clear();
                    regex_str.push_str(if c == '*' { ".*" } else { "." });
                }
                c => literal.push(c),
            }
        }
        regex_str.push_str(&::regex::escape(&literal));
        regex_str.push_str(r"\z");

        Ok(Wildcard {
            regex: ::regex::Regex::new(&regex_str)?,
            pattern: pattern.into(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the original glob pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for Wildcard {
    fn eq(&self, other: &Wildcard) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for Wildcard {}

impl Hash for Wildcard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

impl Debug for Wildcard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.pattern, f)
    }
}

impl Serialize for Wildcard {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        self.pattern.serialize(ser)
    }
}

impl<'i> Lex<'i> for Wildcard {
    fn lex(input: &'i str) -> LexResult<'i, Self> {
        let (operand, rest) = Operand::lex(input)?;
        match Wildcard::new(&operand) {
            Ok(wildcard) => Ok((wildcard, rest)),
            Err(err) => Err((LexErrorKind::ParseWildcard(err), input)),
        }
    }
}
