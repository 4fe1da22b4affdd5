//! HAVING accumulation

use super::Glue;
use crate::bridge::QueryBuilder;
use crate::error::QueryResult;
use crate::expr::Expr;
use crate::render::{Render, RenderContext};

/// Ordered `(expression, glue)` list driving the bridge's having
/// accumulation. The per-entry glue is honored; earlier revisions of this
/// layer accepted it but only ever produced AND-chaining.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HavingClause {
    parts: Vec<(Expr, Glue)>,
}

impl HavingClause {
    pub fn add(&mut self, expr: Expr, glue: Glue) {
        self.parts.push((expr, glue));
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn apply(&self, ctx: &mut RenderContext, builder: &mut QueryBuilder) -> QueryResult<()> {
        for (i, (expr, glue)) in self.parts.iter().enumerate() {
            let frag = expr.render(ctx)?;
            if i == 0 {
                builder.having(frag.sql);
            } else {
                match glue {
                    Glue::And => builder.and_having(frag.sql),
                    Glue::Or => builder.or_having(frag.sql),
                }
            }
            builder.merge_params(frag.params);
        }
        Ok(())
    }
}
