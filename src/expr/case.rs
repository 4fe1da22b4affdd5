//! CASE expression nodes

use super::{Expr, Operand};
use crate::error::{QueryError, QueryResult};
use crate::render::{Fragment, Render, RenderContext};
use crate::value::Value;

/// Simple or searched CASE expression with ordered WHEN/THEN branches.
///
/// String WHEN operands are quoted as constants; scalar THEN and ELSE
/// operands are always bound through placeholders. An ELSE value equal to
/// the literal token `NULL` renders the bare keyword instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseNode {
    simple: bool,
    subject: Option<Expr>,
    branches: Vec<(Operand, Operand)>,
    else_value: Option<Operand>,
}

impl CaseNode {
    /// Create a searched CASE expression (`CASE WHEN … THEN …`)
    pub fn searched() -> Self {
        Self::default()
    }

    /// Create a simple CASE expression (`CASE subject WHEN … THEN …`)
    pub fn simple(subject: impl Into<Expr>) -> Self {
        Self {
            simple: true,
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    /// Switch to the simple form; a missing subject fails at render time
    pub fn set_simple(&mut self, subject: Option<Expr>) -> &mut Self {
        self.simple = true;
        self.subject = subject;
        self
    }

    /// Append a WHEN/THEN branch
    pub fn when(mut self, when: impl Into<Operand>, then: impl Into<Operand>) -> Self {
        self.branches.push((when.into(), then.into()));
        self
    }

    /// Replace all branches with a single WHEN/THEN pair
    pub fn set(mut self, when: impl Into<Operand>, then: impl Into<Operand>) -> Self {
        self.branches.clear();
        self.branches.push((when.into(), then.into()));
        self
    }

    /// Set the ELSE clause
    pub fn with_else(mut self, value: impl Into<Operand>) -> Self {
        self.else_value = Some(value.into());
        self
    }

    fn render_when(
        out: &mut Fragment,
        ctx: &mut RenderContext,
        when: &Operand,
    ) -> QueryResult<String> {
        match when {
            Operand::Expr(expr) => {
                let frag = expr.render(ctx)?;
                Ok(out.absorb(frag))
            }
            Operand::Value(Value::Str(s)) => Ok(ctx.quote_str(s)),
            Operand::Value(Value::Int(n)) => Ok(n.to_string()),
            Operand::Value(Value::Float(f)) => Ok(f.to_string()),
            other => Err(QueryError::invalid_when(format!(
                "WHEN operand must be an expression, string, or number, got {:?}",
                other
            ))),
        }
    }

    fn render_bound(
        out: &mut Fragment,
        ctx: &mut RenderContext,
        base: &str,
        operand: &Operand,
    ) -> QueryResult<String> {
        match operand {
            Operand::Expr(expr) => {
                let frag = expr.render(ctx)?;
                Ok(out.absorb(frag))
            }
            Operand::Value(value) => {
                let key = ctx.placeholder(base);
                out.params.insert(key.clone(), value.clone());
                Ok(format!(":{}", key))
            }
            Operand::Null => {
                let key = ctx.placeholder(base);
                out.params.insert(key.clone(), Value::Null);
                Ok(format!(":{}", key))
            }
        }
    }
}

impl Render for CaseNode {
    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment> {
        if self.branches.is_empty() {
            return Err(QueryError::EmptyCaseExpression);
        }

        let mut out = Fragment::new("CASE");

        if self.simple {
            let subject = self
                .subject
                .as_ref()
                .ok_or(QueryError::MissingCaseSubject)?;
            let frag = subject.render(ctx)?;
            let sql = out.absorb(frag);
            out.sql.push(' ');
            out.sql.push_str(&sql);
        }

        for (when, then) in &self.branches {
            let when_sql = Self::render_when(&mut out, ctx, when)?;
            let then_sql = Self::render_bound(&mut out, ctx, "case_then", then)?;
            out.sql
                .push_str(&format!(" WHEN {} THEN {}", when_sql, then_sql));
        }

        match &self.else_value {
            None => {}
            Some(Operand::Null) => out.sql.push_str(" ELSE NULL"),
            Some(Operand::Value(Value::Str(s))) if s.eq_ignore_ascii_case("NULL") => {
                out.sql.push_str(" ELSE NULL");
            }
            Some(operand) => {
                let sql = Self::render_bound(&mut out, ctx, "case_else", operand)?;
                out.sql.push_str(&format!(" ELSE {}", sql));
            }
        }

        out.sql.push_str(" END");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;
    use crate::expr::{FieldRef, Operator, OperatorNode};

    fn render(node: &CaseNode) -> Fragment {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        node.render(&mut ctx).unwrap()
    }

    #[test]
    fn test_simple_case_with_literal_whens() {
        let node = CaseNode::simple(FieldRef::new("status"))
            .when("open", "1")
            .when("close", "0")
            .with_else("NULL");

        let frag = render(&node);
        assert_eq!(
            frag.sql,
            "CASE status WHEN 'open' THEN :case_then_0 WHEN 'close' THEN :case_then_1 ELSE NULL END"
        );
        assert_eq!(frag.params.len(), 2);
        assert_eq!(frag.params.get("case_then_0"), Some(&Value::Str("1".into())));
        assert_eq!(frag.params.get("case_then_1"), Some(&Value::Str("0".into())));
    }

    #[test]
    fn test_searched_case_with_expression_when() {
        let cond = OperatorNode::new(FieldRef::new("hits"), Operator::Gt, 100i64);
        let node = CaseNode::searched()
            .when(Expr::from(cond), "hot")
            .with_else("cold");

        let frag = render(&node);
        assert_eq!(
            frag.sql,
            "CASE WHEN (hits + 0) > :hits_0 THEN :case_then_1 ELSE :case_else_2 END"
        );
        assert_eq!(frag.params.len(), 3);
    }

    #[test]
    fn test_numeric_when_renders_bare() {
        let node = CaseNode::simple(FieldRef::new("kind")).when(Value::Int(1), "first");
        let frag = render(&node);
        assert_eq!(frag.sql, "CASE kind WHEN 1 THEN :case_then_0 END");
    }

    #[test]
    fn test_expression_then_inlines() {
        let node =
            CaseNode::simple(FieldRef::new("kind")).when("alias", Expr::from("real_title"));
        let frag = render(&node);
        assert_eq!(frag.sql, "CASE kind WHEN 'alias' THEN real_title END");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_else_null_is_case_insensitive() {
        let node = CaseNode::simple(FieldRef::new("s")).when("a", "1").with_else("null");
        assert!(render(&node).sql.ends_with("ELSE NULL END"));
    }

    #[test]
    fn test_bound_else() {
        let node = CaseNode::simple(FieldRef::new("s")).when("a", "1").with_else("fallback");
        let frag = render(&node);
        assert!(frag.sql.contains("ELSE :case_else_1"));
        assert_eq!(
            frag.params.get("case_else_1"),
            Some(&Value::Str("fallback".into()))
        );
    }

    #[test]
    fn test_set_replaces_branches() {
        let node = CaseNode::simple(FieldRef::new("s"))
            .when("a", "1")
            .when("b", "2")
            .set("c", "3");
        let frag = render(&node);
        assert_eq!(frag.sql, "CASE s WHEN 'c' THEN :case_then_0 END");
        assert_eq!(frag.params.len(), 1);
    }

    #[test]
    fn test_empty_case_is_an_error() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let node = CaseNode::searched();
        assert_eq!(
            node.render(&mut ctx).unwrap_err(),
            QueryError::EmptyCaseExpression
        );
    }

    #[test]
    fn test_missing_subject_is_an_error() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let mut node = CaseNode::searched();
        node.set_simple(None);
        let node = node.when("a", "1");
        assert_eq!(
            node.render(&mut ctx).unwrap_err(),
            QueryError::MissingCaseSubject
        );
    }

    #[test]
    fn test_bool_when_is_rejected() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let node = CaseNode::simple(FieldRef::new("s")).when(Value::Bool(true), "1");
        assert!(matches!(
            node.render(&mut ctx),
            Err(QueryError::InvalidWhenExpression(_))
        ));
    }
}
