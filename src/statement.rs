//! Statement assembly
//!
//! A [`Statement`] owns the independent clause accumulators and merges
//! their fragments in clause order: join, where, group, having, order,
//! limit, union. Rendering drives an execution-bridge
//! [`QueryBuilder`](crate::bridge::QueryBuilder) and is a pure traversal;
//! an unmodified statement renders byte-identically every time.

use crate::bridge::{Query, QueryBuilder};
use crate::clause::{
    Direction, Glue, GroupClause, HavingClause, JoinClause, JoinKind, JoinSpec, JoinTarget,
    LimitClause, OrderClause, UnionClause,
};
use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::expr::{Expr, FieldRef};
use crate::render::{Render, RenderContext};
use crate::telemetry::{self, CompileTimer};
use crate::value::Value;

/// Top-level composable query object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    selects: Vec<Expr>,
    from: Option<(String, Option<String>)>,
    joins: JoinClause,
    wheres: Vec<(Expr, Glue)>,
    group: GroupClause,
    having: HavingClause,
    order: OrderClause,
    limit: LimitClause,
    unions: UnionClause,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression to the select list; an empty list renders `*`
    pub fn add_select(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.selects.push(expr.into());
        self
    }

    pub fn set_from(&mut self, table: &str, alias: Option<&str>) -> &mut Self {
        self.from = Some((table.to_string(), alias.map(str::to_string)));
        self
    }

    pub fn add_left_join(
        &mut self,
        target: impl Into<JoinTarget>,
        left_key: &str,
        right_key: &str,
        left_scope: Option<&str>,
        right_scope: Option<&str>,
        extra: Option<Expr>,
    ) -> &mut Self {
        self.add_join(JoinKind::Left, target, left_key, right_key, left_scope, right_scope, extra)
    }

    pub fn add_inner_join(
        &mut self,
        target: impl Into<JoinTarget>,
        left_key: &str,
        right_key: &str,
        left_scope: Option<&str>,
        right_scope: Option<&str>,
        extra: Option<Expr>,
    ) -> &mut Self {
        self.add_join(JoinKind::Inner, target, left_key, right_key, left_scope, right_scope, extra)
    }

    #[allow(clippy::too_many_arguments)]
    fn add_join(
        &mut self,
        kind: JoinKind,
        target: impl Into<JoinTarget>,
        left_key: &str,
        right_key: &str,
        left_scope: Option<&str>,
        right_scope: Option<&str>,
        extra: Option<Expr>,
    ) -> &mut Self {
        self.joins.add(JoinSpec {
            kind,
            target: target.into(),
            left_key: FieldRef::with_scope(left_key, left_scope),
            right_key: FieldRef::with_scope(right_key, right_scope),
            extra,
        });
        self
    }

    /// AND a condition onto the where clause
    pub fn add_where(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.wheres.push((expr.into(), Glue::And));
        self
    }

    /// OR a condition onto the where clause
    pub fn or_where(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.wheres.push((expr.into(), Glue::Or));
        self
    }

    pub fn add_group(&mut self, field: &str, scope: Option<&str>) -> &mut Self {
        self.group.add(FieldRef::with_scope(field, scope));
        self
    }

    pub fn add_having(&mut self, expr: impl Into<Expr>, glue: Glue) -> &mut Self {
        self.having.add(expr.into(), glue);
        self
    }

    pub fn add_order(&mut self, field: &str, direction: Direction, scope: Option<&str>) -> &mut Self {
        self.order.add(FieldRef::with_scope(field, scope), direction);
        self
    }

    /// Order by a fixed value ranking: `FIELD(field, v1, v2, …)`.
    /// Replaces any explicit order pairs set earlier.
    pub fn set_field_order(
        &mut self,
        field: &str,
        values: Vec<Value>,
        scope: Option<&str>,
    ) -> &mut Self {
        self.order
            .set_field_order(FieldRef::with_scope(field, scope), values);
        self
    }

    pub fn set_limit(&mut self, limit: u64, offset: u64) -> &mut Self {
        self.limit.set(limit, offset);
        self
    }

    pub fn add_union(&mut self, statement: Statement) -> &mut Self {
        self.unions.add(statement);
        self
    }

    /// Compile to SQL plus the named-parameter bag.
    ///
    /// Starts a fresh render pass; use [`assemble`](Self::assemble) when
    /// rendering inside an outer statement's pass.
    pub fn compile(&self, dialect: &dyn Dialect) -> QueryResult<Query> {
        let timer = CompileTimer::start();
        let mut ctx = RenderContext::new(dialect);
        match self.assemble(&mut ctx) {
            Ok(query) => {
                telemetry::log_query(&query, &timer);
                Ok(query)
            }
            Err(err) => {
                telemetry::log_compile_error(&err);
                Err(err)
            }
        }
    }

    /// Assemble within an existing render pass, sharing its placeholder
    /// counter so nested params cannot collide
    pub fn assemble(&self, ctx: &mut RenderContext) -> QueryResult<Query> {
        let mut builder = QueryBuilder::new();

        for expr in &self.selects {
            let frag = expr.render(ctx)?;
            builder.add_select(frag.sql);
            builder.merge_params(frag.params);
        }

        if let Some((table, alias)) = &self.from {
            builder.set_from(table, alias.as_deref());
        }

        for frag in self.joins.render_all(ctx)? {
            builder.add_join(frag.sql);
            builder.merge_params(frag.params);
        }

        for (expr, glue) in &self.wheres {
            let frag = expr.render(ctx)?;
            match glue {
                Glue::And => builder.and_where(frag.sql),
                Glue::Or => builder.or_where(frag.sql),
            }
            builder.merge_params(frag.params);
        }

        self.group.apply(&mut builder);
        self.having.apply(ctx, &mut builder)?;
        self.order.apply(ctx, &mut builder)?;
        self.limit.apply(&mut builder);

        for frag in self.unions.render_all(ctx)? {
            builder.append(frag.sql);
            builder.merge_params(frag.params);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;
    use crate::expr::{Operator, OperatorNode};

    fn compile(stmt: &Statement) -> Query {
        stmt.compile(&MySqlDialect).unwrap()
    }

    #[test]
    fn test_where_and_limit() {
        let mut stmt = Statement::new();
        stmt.set_from("entries", Some("e"))
            .add_where(OperatorNode::new(
                FieldRef::scoped("e", "status"),
                Operator::Eq,
                "open",
            ))
            .set_limit(15, 0);

        let query = compile(&stmt);
        assert_eq!(
            query.sql,
            "SELECT * FROM entries AS e WHERE e.status = :status_0 LIMIT 15"
        );
        assert_eq!(query.params.get("status_0"), Some(&Value::Str("open".into())));
    }

    #[test]
    fn test_select_expressions() {
        use crate::expr::FunctionNode;

        let mut stmt = Statement::new();
        stmt.add_select(Expr::from(FieldRef::scoped("e", "id")))
            .add_select(FunctionNode::new(FieldRef::scoped("e", "author"), "COUNT,DISTINCT"))
            .set_from("entries", Some("e"));

        let query = compile(&stmt);
        assert_eq!(
            query.sql,
            "SELECT e.id, COUNT(DISTINCT e.author) FROM entries AS e"
        );
    }

    #[test]
    fn test_sub_statement_join_merges_params() {
        let mut sub = Statement::new();
        sub.set_from("comments", None).add_where(OperatorNode::new(
            FieldRef::new("approved"),
            Operator::Eq,
            "true",
        ));

        let mut stmt = Statement::new();
        stmt.set_from("entries", Some("e"))
            .add_left_join(sub, "id", "entry_id", Some("e"), Some("c"), None)
            .add_where(OperatorNode::new(
                FieldRef::scoped("e", "status"),
                Operator::Eq,
                "open",
            ));

        let query = compile(&stmt);
        assert_eq!(
            query.sql,
            "SELECT * FROM entries AS e \
             LEFT JOIN (SELECT * FROM comments WHERE approved = :approved_0) AS c \
             ON e.id = c.entry_id \
             WHERE e.status = :status_1"
        );
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn test_union_after_limit() {
        let mut other = Statement::new();
        other.set_from("drafts", None);

        let mut stmt = Statement::new();
        stmt.set_from("entries", None).set_limit(5, 0).add_union(other);

        let query = compile(&stmt);
        assert_eq!(
            query.sql,
            "SELECT * FROM entries LIMIT 5 UNION (\nSELECT * FROM drafts\n)"
        );
    }

    #[test]
    fn test_repeated_compile_is_deterministic() {
        let mut stmt = Statement::new();
        stmt.set_from("entries", Some("e"))
            .add_where(OperatorNode::new(
                FieldRef::scoped("e", "status"),
                Operator::Eq,
                "open",
            ))
            .add_order("created", Direction::Desc, Some("e"));

        let first = compile(&stmt);
        let second = compile(&stmt);
        assert_eq!(first, second);
    }
}
