use crate::ast::{CompiledExpr, Expr, FilterExpr};
use crate::lex::{complete, Lex, LexError, LexErrorKind};
use crate::types::Record;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// An error produced when a filter expression or field list cannot be
/// parsed, carrying the offending input and the byte offset of the
/// failure.
#[derive(Debug, PartialEq)]
pub struct ParseError {
    kind: LexErrorKind,
    expression: String,
    position: usize,
}

impl ParseError {
    pub(crate) fn new(expression: &str, (kind, span): LexError<'_>) -> Self {
        ParseError {
            kind,
            position: expression.len().saturating_sub(span.len()),
            expression: expression.to_owned(),
        }
    }

    pub fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    /// The input that failed to parse.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Byte offset into [`expression`](Self::expression) where lexing
    /// failed.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse filter expression {:?}: {} at byte {}",
            self.expression, self.kind, self.position
        )
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl FilterExpr {
    /// Parses a complete `field<op>value` expression.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        complete(Self::lex(input)).map_err(|err| ParseError::new(input, err))
    }
}

/// An ordered set of include and exclude expressions.
///
/// A record passes the set when every include expression matches it and
/// no exclude expression does. An empty set passes everything.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct FilterSet {
    include: Vec<FilterExpr>,
    exclude: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses include and exclude expressions into a set, stopping at the
    /// first malformed expression.
    pub fn parse<A, B>(include: A, exclude: B) -> Result<Self, ParseError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let mut set = FilterSet::new();
        for expr in include {
            set.add_include(FilterExpr::parse(expr.as_ref())?);
        }
        for expr in exclude {
            set.add_exclude(FilterExpr::parse(expr.as_ref())?);
        }
        Ok(set)
    }

    pub fn add_include(&mut self, expr: FilterExpr) {
        self.include.push(expr);
    }

    pub fn add_exclude(&mut self, expr: FilterExpr) {
        self.exclude.push(expr);
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Compiles every expression down to a predicate.
    pub fn compile(self) -> Filter {
        Filter {
            include: self.include.into_iter().map(Expr::compile).collect(),
            exclude: self.exclude.into_iter().map(Expr::compile).collect(),
        }
    }
}

/// A compiled [`FilterSet`].
pub struct Filter {
    include: Vec<CompiledExpr>,
    exclude: Vec<CompiledExpr>,
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        self.include.iter().all(|expr| expr.execute(record))
            && !self.exclude.iter().any(|expr| expr.execute(record))
    }
}
