mod operand;
mod regex;
mod wildcard;

pub use self::{operand::Operand, regex::Regex, wildcard::Wildcard};
