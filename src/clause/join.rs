//! Join accumulation and rendering

use crate::error::QueryResult;
use crate::expr::{Expr, FieldRef};
use crate::render::{Fragment, Render, RenderContext};
use crate::statement::Statement;

/// Supported join kinds; LEFT joins always render before INNER joins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Inner,
}

impl JoinKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Left => "LEFT JOIN",
            Self::Inner => "INNER JOIN",
        }
    }
}

/// What a join attaches: a plain table or a parenthesized sub-statement
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    Table(String),
    Statement(Box<Statement>),
}

impl From<&str> for JoinTarget {
    fn from(table: &str) -> Self {
        Self::Table(table.to_string())
    }
}

impl From<String> for JoinTarget {
    fn from(table: String) -> Self {
        Self::Table(table)
    }
}

impl From<Statement> for JoinTarget {
    fn from(stmt: Statement) -> Self {
        Self::Statement(Box::new(stmt))
    }
}

/// A single registered join
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub target: JoinTarget,
    pub left_key: FieldRef,
    pub right_key: FieldRef,
    pub extra: Option<Expr>,
}

impl JoinSpec {
    /// The alias the join target is exposed under, taken from the right
    /// key's scope
    fn alias(&self) -> Option<&str> {
        self.right_key.scope()
    }

    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment> {
        let mut out = Fragment::new(self.kind.as_sql());

        match &self.target {
            JoinTarget::Table(table) => {
                out.sql.push(' ');
                out.sql.push_str(table);
            }
            JoinTarget::Statement(stmt) => {
                let query = stmt.assemble(ctx)?;
                out.params.merge(query.params);
                out.sql.push_str(&format!(" ({})", query.sql));
            }
        }

        if let Some(alias) = self.alias() {
            out.sql.push_str(&format!(" AS {}", alias));
        }

        let on = ctx
            .dialect()
            .eq(&self.left_key.sql(), &self.right_key.sql());
        out.sql.push_str(&format!(" ON {}", on));

        if let Some(extra) = &self.extra {
            let frag = extra.render(ctx)?;
            let sql = out.absorb(frag);
            out.sql.push_str(&format!(" AND {}", sql));
        }

        Ok(out)
    }
}

/// Ordered collection of join specs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinClause {
    specs: Vec<JoinSpec>,
}

impl JoinClause {
    pub fn add(&mut self, spec: JoinSpec) {
        self.specs.push(spec);
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Render all joins: LEFT before INNER, registration order within
    /// each kind, one fragment per join
    pub fn render_all(&self, ctx: &mut RenderContext) -> QueryResult<Vec<Fragment>> {
        let mut fragments = Vec::with_capacity(self.specs.len());
        for kind in [JoinKind::Left, JoinKind::Inner] {
            for spec in self.specs.iter().filter(|s| s.kind == kind) {
                fragments.push(spec.render(ctx)?);
            }
        }
        Ok(fragments)
    }
}
