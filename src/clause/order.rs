//! ORDER BY accumulation

use crate::bridge::QueryBuilder;
use crate::error::{QueryError, QueryResult};
use crate::expr::FieldRef;
use crate::render::RenderContext;
use crate::value::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a direction token; anything else is an error
    pub fn parse(token: &str) -> QueryResult<Self> {
        match token.trim().to_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(QueryError::invalid_expression(format!(
                "invalid order direction: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum OrderSpec {
    /// Explicit `field direction` pairs
    Pairs(Vec<(FieldRef, Direction)>),
    /// A single `FIELD(field, v1, v2, …)` ranking expression
    FieldOrder { field: FieldRef, values: Vec<Value> },
}

/// Order accumulation; explicit pairs and a custom field order are
/// mutually exclusive, the most recently set form wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderClause {
    spec: Option<OrderSpec>,
}

impl OrderClause {
    /// Append an explicit `field direction` pair, discarding any custom
    /// field order set earlier
    pub fn add(&mut self, field: FieldRef, direction: Direction) {
        match &mut self.spec {
            Some(OrderSpec::Pairs(pairs)) => pairs.push((field, direction)),
            _ => self.spec = Some(OrderSpec::Pairs(vec![(field, direction)])),
        }
    }

    /// Replace the whole clause with a `FIELD(field, v1, v2, …)` ranking
    pub fn set_field_order(&mut self, field: FieldRef, values: Vec<Value>) {
        self.spec = Some(OrderSpec::FieldOrder { field, values });
    }

    pub fn is_empty(&self) -> bool {
        self.spec.is_none()
    }

    pub fn apply(&self, ctx: &RenderContext, builder: &mut QueryBuilder) -> QueryResult<()> {
        match &self.spec {
            None => Ok(()),
            Some(OrderSpec::Pairs(pairs)) => {
                for (field, direction) in pairs {
                    builder.add_order_by(field.sql(), Some(*direction));
                }
                Ok(())
            }
            Some(OrderSpec::FieldOrder { field, values }) => {
                let mut args = Vec::with_capacity(values.len());
                for value in values {
                    args.push(match value {
                        Value::Int(n) => n.to_string(),
                        Value::Float(f) => f.to_string(),
                        Value::Str(s) => ctx.quote_str(s),
                        other => {
                            return Err(QueryError::invalid_expression(format!(
                                "field order values must be strings or numbers, got {:?}",
                                other
                            )))
                        }
                    });
                }
                builder.order_by(
                    format!("FIELD({}, {})", field.sql(), args.join(", ")),
                    None,
                );
                Ok(())
            }
        }
    }
}
