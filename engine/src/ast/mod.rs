mod field_expr;

pub use self::field_expr::{FieldOp, FilterExpr};

use crate::types::Record;

/// A boxed predicate produced by compiling an expression, ready to be
/// evaluated against records.
pub struct CompiledExpr(Box<dyn Fn(&Record) -> bool + Send + Sync>);

impl CompiledExpr {
    /// Creates a compiled expression from a closure.
    pub(crate) fn new(closure: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        CompiledExpr(Box::new(closure))
    }

    /// Executes the expression against a record.
    pub fn execute(&self, record: &Record) -> bool {
        (self.0)(record)
    }
}

/// Trait used to represent a node that can be compiled into a predicate.
pub trait Expr: Sized {
    fn compile(self) -> CompiledExpr;
}
