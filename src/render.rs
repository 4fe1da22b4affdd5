//! Fragment rendering
//!
//! Every node and clause renders to a [`Fragment`]: a dialect-neutral SQL
//! string plus the named parameters it binds. A [`RenderContext`] is
//! threaded through the whole traversal; its monotonic counter makes
//! placeholder names unique across arbitrarily nested sub-statements, so
//! merged fragments can never collide.

use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::params::ParamBag;

/// A rendered piece of SQL together with its parameter bindings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    /// SQL text containing `:name` placeholder markers
    pub sql: String,
    /// The values bound to those placeholders
    pub params: ParamBag,
}

impl Fragment {
    /// Create a fragment with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: ParamBag::new(),
        }
    }

    /// Create a fragment carrying parameters
    pub fn with_params(sql: impl Into<String>, params: ParamBag) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Absorb another fragment's parameters, leaving its SQL to the caller
    pub fn absorb(&mut self, other: Fragment) -> String {
        self.params.merge(other.params);
        other.sql
    }
}

/// The mutable state threaded through one render pass.
///
/// Holds the dialect and the placeholder counter. A sub-statement rendered
/// inside an outer statement shares the outer context, which is what keeps
/// placeholder names unique at any nesting depth.
pub struct RenderContext<'d> {
    dialect: &'d dyn Dialect,
    next: usize,
}

impl<'d> RenderContext<'d> {
    /// Start a fresh render pass
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self { dialect, next: 0 }
    }

    /// The dialect for this pass.
    ///
    /// Returns the stored dialect's lifetime, not the context borrow's,
    /// so callers can hold it across later mutable uses of the context.
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Quote a string literal through the dialect
    pub fn quote_str(&self, s: &str) -> String {
        self.dialect.quote_str(s)
    }

    /// Allocate a unique placeholder name derived from `base`.
    ///
    /// The base is sanitized to an identifier and suffixed with the pass
    /// counter, e.g. `status_0`, `case_then_3`.
    pub fn placeholder(&mut self, base: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}_{}", sanitize(base), n)
    }
}

/// Reduce an arbitrary base string to a safe placeholder identifier
fn sanitize(base: &str) -> String {
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'p');
    }
    out
}

/// Trait for nodes and clauses that render to a SQL fragment
pub trait Render {
    /// Render this node into the given context
    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    #[test]
    fn test_placeholder_counter() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);

        assert_eq!(ctx.placeholder("status"), "status_0");
        assert_eq!(ctx.placeholder("status"), "status_1");
        assert_eq!(ctx.placeholder("case_then"), "case_then_2");
    }

    #[test]
    fn test_placeholder_sanitization() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);

        assert_eq!(ctx.placeholder("t.title"), "t_title_0");
        assert_eq!(ctx.placeholder("1st"), "p1st_1");
        assert_eq!(ctx.placeholder(""), "p_2");
    }

    #[test]
    fn test_dialect_held_across_context_mutation() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);

        // The builder keeps the dialect while nodes keep allocating
        // placeholders from the same context
        let d = ctx.dialect();
        let key = ctx.placeholder("status");
        assert_eq!(d.eq("status", &format!(":{}", key)), "status = :status_0");
    }

    #[test]
    fn test_fragment_absorb() {
        let mut outer = Fragment::new("a = :a_0");
        outer.params.insert("a_0", crate::value::Value::Int(1));

        let mut inner = Fragment::new("b = :b_1");
        inner.params.insert("b_1", crate::value::Value::Int(2));

        let sql = outer.absorb(inner);
        assert_eq!(sql, "b = :b_1");
        assert_eq!(outer.params.len(), 2);
    }
}
