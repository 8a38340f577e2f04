use super::{CompiledExpr, Expr};
use crate::field::FieldPath;
use crate::lex::{skip_space, Lex, LexErrorKind, LexResult};
use crate::op::{ComparisonOp, EmptinessOp, EqualityOp, OrderingOp, PatternOp, TextOp};
use crate::rhs_types::{Operand, Regex, Wildcard};
use crate::types::{Record, Value};
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Operator plus right-hand side applied to a resolved field value.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum FieldOp {
    #[serde(serialize_with = "serialize_equality")]
    Equality { op: EqualityOp, rhs: Operand },

    #[serde(serialize_with = "serialize_text")]
    Text { op: TextOp, rhs: Operand },

    #[serde(serialize_with = "serialize_matches")]
    Matches(Regex),

    #[serde(serialize_with = "serialize_wildcard")]
    Wildcard(Wildcard),

    #[serde(serialize_with = "serialize_ordering")]
    Ordering {
        op: OrderingOp,
        rhs: OrderedFloat<f64>,
    },

    #[serde(serialize_with = "serialize_emptiness")]
    Emptiness(EmptinessOp),
}

fn serialize_op_rhs<O: Serialize, T: Serialize + ?Sized, S: Serializer>(
    op: &O,
    rhs: &T,
    ser: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;

    let mut out = ser.serialize_struct("FieldOp", 2)?;
    out.serialize_field("op", op)?;
    out.serialize_field("rhs", rhs)?;
    out.end()
}

fn serialize_op_only<O: Serialize, S: Serializer>(op: &O, ser: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;

    let mut out = ser.serialize_struct("FieldOp", 1)?;
    out.serialize_field("op", op)?;
    out.end()
}

fn serialize_equality<S: Serializer>(
    op: &EqualityOp,
    rhs: &Operand,
    ser: S,
) -> Result<S::Ok, S::Error> {
    serialize_op_rhs(op, rhs, ser)
}

fn serialize_text<S: Serializer>(op: &TextOp, rhs: &Operand, ser: S) -> Result<S::Ok, S::Error> {
    serialize_op_rhs(op, rhs, ser)
}

fn serialize_matches<S: Serializer>(rhs: &Regex, ser: S) -> Result<S::Ok, S::Error> {
    serialize_op_rhs(&"Matches", rhs, ser)
}

fn serialize_wildcard<S: Serializer>(rhs: &Wildcard, ser: S) -> Result<S::Ok, S::Error> {
    serialize_op_rhs(&"Wildcard", rhs, ser)
}

fn serialize_ordering<S: Serializer>(
    op: &OrderingOp,
    rhs: &OrderedFloat<f64>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    serialize_op_rhs(op, rhs, ser)
}

fn serialize_emptiness<S: Serializer>(op: &EmptinessOp, ser: S) -> Result<S::Ok, S::Error> {
    serialize_op_only(op, ser)
}

/// A single parsed filter constraint: field path, operator, right-hand
/// side.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct FilterExpr {
    field: FieldPath,

    #[serde(flatten)]
    op: FieldOp,
}

impl FilterExpr {
    /// The field path this expression constrains.
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn op(&self) -> &FieldOp {
        &self.op
    }
}

impl<'i> Lex<'i> for FilterExpr {
    fn lex(input: &'i str) -> LexResult<'i, Self> {
        let (field, input) = FieldPath::lex(input)?;
        let (op, input) = ComparisonOp::lex(skip_space(input))?;

        let (op, input) = match op {
            ComparisonOp::Emptiness(op) => (FieldOp::Emptiness(op), input),
            ComparisonOp::Equality(op) => {
                let (rhs, input) = Operand::lex(input)?;
                (FieldOp::Equality { op, rhs }, input)
            }
            ComparisonOp::Text(op) => {
                let (rhs, input) = Operand::lex(input)?;
                (FieldOp::Text { op, rhs }, input)
            }
            ComparisonOp::Pattern(PatternOp::Regex) => {
                let (regex, input) = Regex::lex(input)?;
                (FieldOp::Matches(regex), input)
            }
            ComparisonOp::Pattern(PatternOp::Wildcard) => {
                let (wildcard, input) = Wildcard::lex(input)?;
                (FieldOp::Wildcard(wildcard), input)
            }
            ComparisonOp::Ordering(op) => {
                let rhs_input = input;
                let (rhs, input) = Operand::lex(input)?;
                let rhs = match rhs.trim().parse::<f64>() {
                    Ok(num) => OrderedFloat(num),
                    Err(err) => return Err((LexErrorKind::ParseNumber { err }, rhs_input)),
                };
                (FieldOp::Ordering { op, rhs }, input)
            }
        };

        Ok((FilterExpr { field, op }, input))
    }
}

// Absent fields and explicit nulls collapse just before string coercion:
// both make the negated operators true and everything else false.
fn resolve_text<'r>(record: &'r Record, field: &FieldPath) -> Option<Cow<'r, str>> {
    match record.get_path(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_text()),
    }
}

impl Expr for FilterExpr {
    fn compile(self) -> CompiledExpr {
        let field = self.field;

        match self.op {
            FieldOp::Emptiness(op) => CompiledExpr::new(move |record| {
                let empty = record
                    .get_path(&field)
                    .map_or(true, Value::is_empty_value);
                match op {
                    EmptinessOp::Empty => empty,
                    EmptinessOp::NotEmpty => !empty,
                }
            }),
            FieldOp::Equality { op, rhs } => CompiledExpr::new(move |record| {
                match resolve_text(record, &field) {
                    Some(text) => {
                        let eq = text == *rhs;
                        match op {
                            EqualityOp::Equal => eq,
                            EqualityOp::NotEqual => !eq,
                        }
                    }
                    None => op == EqualityOp::NotEqual,
                }
            }),
            FieldOp::Text { op, rhs } => CompiledExpr::new(move |record| {
                match resolve_text(record, &field) {
                    Some(text) => match op {
                        TextOp::Contains => text.contains(&*rhs),
                        TextOp::NotContains => !text.contains(&*rhs),
                        TextOp::StartsWith => text.starts_with(&*rhs),
                        TextOp::EndsWith => text.ends_with(&*rhs),
                    },
                    None => op == TextOp::NotContains,
                }
            }),
            FieldOp::Matches(regex) => CompiledExpr::new(move |record| {
                resolve_text(record, &field).map_or(false, |text| regex.is_match(&text))
            }),
            FieldOp::Wildcard(wildcard) => CompiledExpr::new(move |record| {
                resolve_text(record, &field).map_or(false, |text| wildcard.is_match(&text))
            }),
            FieldOp::Ordering { op, rhs } => {
                let rhs = rhs.into_inner();
                CompiledExpr::new(move |record| {
                    record
                        .get_path(&field)
                        .and_then(Value::as_number)
                        .map_or(false, |lhs| op.matches_opt(lhs.partial_cmp(&rhs)))
                })
            }
        }
    }
}
