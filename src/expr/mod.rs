//! Query expression nodes
//!
//! Expressions are the building blocks of a statement: field references,
//! comparison operators, function calls, CASE expressions, and whole
//! sub-statements. Each renders to a [`Fragment`](crate::render::Fragment)
//! through the shared render context.

mod case;
mod field;
mod function;
mod operator;

pub use case::CaseNode;
pub use field::FieldRef;
pub use function::FunctionNode;
pub use operator::{Operand, Operator, OperatorNode};

use crate::error::QueryResult;
use crate::render::{Fragment, Render, RenderContext};
use crate::statement::Statement;

/// Any renderable query expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference
    Field(FieldRef),
    /// Binary comparison
    Operator(Box<OperatorNode>),
    /// Nested function calls around a target expression
    Function(Box<FunctionNode>),
    /// Simple or searched CASE expression
    Case(Box<CaseNode>),
    /// Parenthesized sub-statement
    Statement(Box<Statement>),
}

impl Render for Expr {
    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment> {
        match self {
            Self::Field(f) => f.render(ctx),
            Self::Operator(n) => n.render(ctx),
            Self::Function(n) => n.render(ctx),
            Self::Case(n) => n.render(ctx),
            Self::Statement(s) => {
                let query = s.assemble(ctx)?;
                Ok(Fragment::with_params(
                    format!("({})", query.sql),
                    query.params,
                ))
            }
        }
    }
}

impl From<FieldRef> for Expr {
    fn from(f: FieldRef) -> Self {
        Self::Field(f)
    }
}

impl From<OperatorNode> for Expr {
    fn from(n: OperatorNode) -> Self {
        Self::Operator(Box::new(n))
    }
}

impl From<FunctionNode> for Expr {
    fn from(n: FunctionNode) -> Self {
        Self::Function(Box::new(n))
    }
}

impl From<CaseNode> for Expr {
    fn from(n: CaseNode) -> Self {
        Self::Case(Box::new(n))
    }
}

impl From<Statement> for Expr {
    fn from(s: Statement) -> Self {
        Self::Statement(Box::new(s))
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::Field(FieldRef::new(name))
    }
}

impl Expr {
    /// Placeholder base name for values compared against this expression
    pub(crate) fn placeholder_base(&self) -> &str {
        match self {
            Self::Field(f) => f.name(),
            _ => "expr",
        }
    }
}
