//! Dialect-aware SQL helpers
//!
//! The compiler never interpolates user values into SQL text; the only
//! strings it inlines are compiler-validated identifiers and literals
//! quoted through a [`Dialect`]. The dialect also supplies the
//! comparison-expression builders the operator nodes delegate to.

/// Dialect hooks the compiler delegates low-level SQL decisions to.
///
/// The default comparison builders emit the common infix form; a dialect
/// only needs to override the ones it spells differently.
pub trait Dialect {
    /// Quote a string literal for inline use
    fn quote_str(&self, s: &str) -> String;

    fn eq(&self, left: &str, right: &str) -> String {
        format!("{left} = {right}")
    }

    fn neq(&self, left: &str, right: &str) -> String {
        format!("{left} != {right}")
    }

    fn lt(&self, left: &str, right: &str) -> String {
        format!("{left} < {right}")
    }

    fn lte(&self, left: &str, right: &str) -> String {
        format!("{left} <= {right}")
    }

    fn gt(&self, left: &str, right: &str) -> String {
        format!("{left} > {right}")
    }

    fn gte(&self, left: &str, right: &str) -> String {
        format!("{left} >= {right}")
    }

    fn like(&self, left: &str, right: &str) -> String {
        format!("{left} LIKE {right}")
    }

    fn not_like(&self, left: &str, right: &str) -> String {
        format!("{left} NOT LIKE {right}")
    }
}

/// The default MySQL-flavoured dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn quote_str(&self, s: &str) -> String {
        // Escape quotes by doubling and backslashes by doubling, then
        // wrap in single quotes
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_str() {
        let d = MySqlDialect;
        assert_eq!(d.quote_str("open"), "'open'");
        assert_eq!(d.quote_str("it's"), "'it''s'");
        assert_eq!(d.quote_str("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_comparison_builders() {
        let d = MySqlDialect;
        assert_eq!(d.eq("a", "b"), "a = b");
        assert_eq!(d.neq("a", "b"), "a != b");
        assert_eq!(d.lte("a", "b"), "a <= b");
        assert_eq!(d.not_like("a", "b"), "a NOT LIKE b");
    }
}
