//! A record-filtering and field-projection engine.
//!
//! Filters are written as `field<op>value` expressions (`type=jenkins`,
//! `metadata.version>=2.0`, `name*=*-sandbox`, `description:empty`),
//! parsed once and compiled into predicates that can be evaluated against
//! any number of loosely-typed [`Record`]s. A [`FieldSelector`] then trims
//! the surviving records down to the fields a caller asked for.
//!
//! ```
//! use recfilter::{record, Engine};
//!
//! let engine = Engine::from_args(
//!     ["type=jenkins"],
//!     std::iter::empty::<&str>(),
//!     Some("name"),
//!     None,
//! )
//! .unwrap();
//!
//! let records = vec![
//!     record! { "name" => "jenkins-01", "type" => "jenkins" },
//!     record! { "name" => "gerrit-01", "type" => "gerrit" },
//! ];
//!
//! let (result, diagnostics) = engine.apply(records);
//! assert_eq!(result, vec![record! { "name" => "jenkins-01" }]);
//! assert_eq!(diagnostics.matched_count, 1);
//! ```

#[macro_use]
mod lex;

mod ast;
mod engine;
mod field;
mod filter;
mod op;
mod project;
mod rhs_types;
mod types;

pub use crate::ast::{CompiledExpr, Expr, FieldOp, FilterExpr};
pub use crate::engine::{Diagnostics, Engine, Filtered};
pub use crate::field::FieldPath;
pub use crate::filter::{Filter, FilterSet, ParseError};
pub use crate::lex::{complete, Lex, LexError, LexErrorKind, LexResult};
pub use crate::op::{ComparisonOp, EmptinessOp, EqualityOp, OrderingOp, PatternOp, TextOp};
pub use crate::project::FieldSelector;
pub use crate::rhs_types::{Operand, Regex, Wildcard};
pub use crate::types::{Record, Value};
