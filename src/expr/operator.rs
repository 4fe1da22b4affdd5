//! Binary comparison nodes

use super::Expr;
use crate::error::{QueryError, QueryResult};
use crate::render::{Fragment, Render, RenderContext};
use crate::value::Value;

/// Whitelisted comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    /// The `<>` spelling of inequality
    NotEqAlt,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    Regexp,
    NotRegexp,
    Add,
    Sub,
}

impl Operator {
    /// Get the SQL token for this operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::NotEqAlt => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    /// Parse an operator token; anything outside the whitelist is an error
    pub fn parse(token: &str) -> QueryResult<Self> {
        match token.trim().to_uppercase().as_str() {
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::NotEq),
            "<>" => Ok(Self::NotEqAlt),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "LIKE" => Ok(Self::Like),
            "NOT LIKE" => Ok(Self::NotLike),
            "REGEXP" => Ok(Self::Regexp),
            "NOT REGEXP" => Ok(Self::NotRegexp),
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            other => Err(QueryError::invalid_operator(other)),
        }
    }

    /// Ordering comparisons get a numeric cast against numeric values
    fn is_ordering(&self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }
}

/// The right-hand side of a comparison, resolved at construction time
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Explicit null; forces `IS NULL` / `IS NOT NULL` rendering
    Null,
    /// A scalar bound through a placeholder
    Value(Value),
    /// An expression inlined with merged parameters
    Expr(Expr),
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            other => Self::Value(other),
        }
    }
}

impl From<Expr> for Operand {
    fn from(e: Expr) -> Self {
        Self::Expr(e)
    }
}

impl From<super::FieldRef> for Operand {
    fn from(f: super::FieldRef) -> Self {
        Self::Expr(Expr::Field(f))
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Self::Value(Value::Str(s.to_string()))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Self::Value(Value::Str(s))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Self::Value(Value::Int(n))
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Self::Value(Value::Int(n as i64))
    }
}

impl From<f64> for Operand {
    fn from(f: f64) -> Self {
        Self::Value(Value::Float(f))
    }
}

/// Binary comparison between an expression and a value or expression.
///
/// A null right-hand side renders `IS NULL` for `=` and `IS NOT NULL` for
/// every other operator; any non-equality test against NULL is treated as
/// "is set", a legacy convention preserved from the original callers.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNode {
    left: Expr,
    op: Operator,
    right: Operand,
}

impl OperatorNode {
    /// Build a comparison from parts
    pub fn new(left: impl Into<Expr>, op: Operator, right: impl Into<Operand>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Build a comparison from an operator token, validating the whitelist
    pub fn with_token(
        left: impl Into<Expr>,
        op: &str,
        right: impl Into<Operand>,
    ) -> QueryResult<Self> {
        Ok(Self::new(left, Operator::parse(op)?, right))
    }

    fn combine(&self, ctx: &RenderContext, left: &str, right: &str) -> String {
        let d = ctx.dialect();
        match self.op {
            Operator::Eq => d.eq(left, right),
            Operator::NotEq => d.neq(left, right),
            Operator::Lt => d.lt(left, right),
            Operator::Lte => d.lte(left, right),
            Operator::Gt => d.gt(left, right),
            Operator::Gte => d.gte(left, right),
            Operator::Like => d.like(left, right),
            Operator::NotLike => d.not_like(left, right),
            // Tokens the bridge has no builder for keep their literal form
            _ => format!("{} {} {}", left, self.op.as_sql(), right),
        }
    }
}

impl Render for OperatorNode {
    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment> {
        let left = self.left.render(ctx)?;

        match &self.right {
            Operand::Null => {
                let test = if self.op == Operator::Eq {
                    "IS NULL"
                } else {
                    "IS NOT NULL"
                };
                Ok(Fragment::with_params(
                    format!("{} {}", left.sql, test),
                    left.params,
                ))
            }
            Operand::Expr(expr) => {
                let mut out = Fragment::with_params(String::new(), left.params);
                let right = expr.render(ctx)?;
                let right_sql = out.absorb(right);
                out.sql = self.combine(ctx, &left.sql, &right_sql);
                Ok(out)
            }
            Operand::Value(value) => {
                if matches!(value, Value::Array(_)) {
                    return Err(QueryError::invalid_expression(
                        "array values cannot be bound through a single placeholder",
                    ));
                }

                let key = ctx.placeholder(self.left.placeholder_base());
                let marker = format!(":{}", key);

                // Force numeric comparison for ordering operators against
                // numeric values; string-typed columns would otherwise
                // compare lexically
                let left_sql = if self.op.is_ordering() && value.is_numeric() {
                    format!("({} + 0)", left.sql)
                } else {
                    left.sql
                };

                let mut params = left.params;
                params.insert(key, value.clone());
                Ok(Fragment::with_params(
                    self.combine(ctx, &left_sql, &marker),
                    params,
                ))
            }
        }
    }
}
