//! Column references

use crate::error::QueryResult;
use crate::render::{Fragment, Render, RenderContext};

/// Reference to a column, optionally qualified with a table scope.
///
/// Immutable once constructed; renders as `scope.name` when a scope is
/// present, bare `name` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    name: String,
    scope: Option<String>,
}

impl FieldRef {
    /// Create an unscoped field reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: None,
        }
    }

    /// Create a field reference qualified with a table scope
    pub fn scoped(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Some(scope.into()),
        }
    }

    /// Build from an optional scope, matching the construction API shape
    pub fn with_scope(name: impl Into<String>, scope: Option<&str>) -> Self {
        Self {
            name: name.into(),
            scope: scope.map(str::to_string),
        }
    }

    /// The column name without any scope prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table scope, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The rendered SQL form of this reference
    pub fn sql(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}.{}", scope, self.name),
            None => self.name.clone(),
        }
    }
}

impl Render for FieldRef {
    fn render(&self, _ctx: &mut RenderContext) -> QueryResult<Fragment> {
        Ok(Fragment::new(self.sql()))
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    #[test]
    fn test_unscoped() {
        let f = FieldRef::new("title");
        assert_eq!(f.sql(), "title");
        assert_eq!(f.name(), "title");
        assert!(f.scope().is_none());
    }

    #[test]
    fn test_scoped() {
        let f = FieldRef::scoped("e", "title");
        assert_eq!(f.sql(), "e.title");
        assert_eq!(f.scope(), Some("e"));
    }

    #[test]
    fn test_render_has_no_params() {
        let dialect = MySqlDialect;
        let mut ctx = RenderContext::new(&dialect);
        let frag = FieldRef::scoped("e", "id").render(&mut ctx).unwrap();
        assert_eq!(frag.sql, "e.id");
        assert!(frag.params.is_empty());
    }
}
