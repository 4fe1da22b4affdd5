//! UNION accumulation

use crate::error::QueryResult;
use crate::render::{Fragment, RenderContext};
use crate::statement::Statement;

/// Ordered list of sub-statements appended as set operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionClause {
    parts: Vec<Statement>,
}

impl UnionClause {
    pub fn add(&mut self, statement: Statement) {
        self.parts.push(statement);
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render every union arm as `UNION (\n…\n)` with merged params
    pub fn render_all(&self, ctx: &mut RenderContext) -> QueryResult<Vec<Fragment>> {
        let mut fragments = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let query = part.assemble(ctx)?;
            fragments.push(Fragment::with_params(
                format!("UNION (\n{}\n)", query.sql),
                query.params,
            ));
        }
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    #[test]
    fn test_empty_renders_nothing() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let clause = UnionClause::default();
        assert!(clause.render_all(&mut ctx).unwrap().is_empty());
    }

    #[test]
    fn test_union_arm_is_parenthesized() {
        let mut sub = Statement::new();
        sub.set_from("drafts", None);

        let mut clause = UnionClause::default();
        clause.add(sub);

        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let frags = clause.render_all(&mut ctx).unwrap();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].sql, "UNION (\nSELECT * FROM drafts\n)");
    }
}
