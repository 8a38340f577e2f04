use crate::lex::{Lex, LexErrorKind, LexResult};
use crate::rhs_types::Operand;
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

/// A compiled `@=` operand.
///
/// The pattern is searched (not anchored) against the stringified field
/// value; compilation failures surface at parse time.
#[derive(Clone)]
pub struct Regex(::regex::Regex);

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, ::regex::Error> {
        ::regex::Regex::new(pattern).map(Regex)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Regex) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Regex {}

impl Hash for Regex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl Debug for Regex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Regex {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        self.as_str().serialize(ser)
    }
}

impl<'i> Lex<'i> for Regex {
    fn lex(input: &'i str) -> LexResult<'i, Self> {
        let (operand, rest) = Operand::lex(input)?;
        match Regex::new(&operand) {
            Ok(regex) => Ok((regex, rest)),
            Err(err) => Err((LexErrorKind::ParseRegex(err), input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex() {
        let regex = assert_ok!(Regex::lex("^gerrit-\\d+$"), Regex::new("^gerrit-\\d+$").unwrap());
        assert!(regex.is_match("gerrit-01"));
        assert!(!regex.is_match("jenkins-01"));

        // quoting lets patterns start with a quote-sensitive character
        assert_ok!(Regex::lex(r#""a b""#), Regex::new("a b").unwrap());

        assert!(matches!(
            Regex::lex("[unclosed").map_err(|e| e.0),
            Err(LexErrorKind::ParseRegex(_))
        ));
    }

    #[test]
    fn test_search_not_anchored() {
        let regex = assert_ok!(Regex::lex("err"), Regex::new("err").unwrap());
        assert!(regex.is_match("gerrit-errors"));
    }
}
