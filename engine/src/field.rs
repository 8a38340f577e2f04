use crate::lex::{expect, take_while, Lex, LexResult};
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug, Display, Formatter};

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A dotted path addressing a (possibly nested) record field,
/// e.g. `metadata.version`.
///
/// A path always has at least one segment; lexing an empty segment fails.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl<'i> Lex<'i> for FieldPath {
    fn lex(mut input: &'i str) -> LexResult<'i, Self> {
        let mut segments = Vec::new();

        loop {
            let (segment, rest) = take_while(input, "field path segment", is_segment_char)?;
            segments.push(segment.to_owned());
            input = rest;

            match expect(input, ".") {
                Ok(rest) => input = rest,
                Err(_) => break,
            };
        }

        Ok((FieldPath { segments }, input))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Debug for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}
