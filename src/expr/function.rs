//! Function-call nodes
//!
//! A `FunctionNode` wraps a target expression in one or more nested
//! function calls. The call list is given as a comma-joined name token
//! applied outer-to-inner, so `"COUNT,DISTINCT"` around `x` renders
//! `COUNT(DISTINCT x)`.

use std::sync::LazyLock;

use regex::Regex;

use super::Expr;
use crate::error::{QueryError, QueryResult};
use crate::render::{Fragment, Render, RenderContext};
use crate::value::Value;

/// Canonical spellings for dialect-specific function aliases
const FUNCTION_ALIASES: &[(&str, &str)] = &[("SUBSTR", "SUBSTRING"), ("RANDOM", "RAND")];

static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid pattern"));

fn canonical(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    for (alias, target) in FUNCTION_ALIASES {
        if upper == *alias {
            return (*target).to_string();
        }
    }
    upper
}

/// One or more nested function calls around a target expression
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    target: Expr,
    names: Vec<String>,
    args: Vec<Value>,
}

impl FunctionNode {
    /// Wrap a target in the functions named by a comma-joined token.
    ///
    /// Names are applied outer-to-inner: `new(x, "COUNT,DISTINCT")`
    /// renders `COUNT(DISTINCT x)`.
    pub fn new(target: impl Into<Expr>, names: &str) -> Self {
        Self {
            target: target.into(),
            names: names
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            args: Vec::new(),
        }
    }

    /// A pass-through node with no calls configured
    pub fn bare(target: impl Into<Expr>) -> Self {
        Self {
            target: target.into(),
            names: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument for the innermost call
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Replace the positional arguments for the innermost call
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Render one positional argument: strings quoted, numbers and null bare
    fn render_arg(ctx: &RenderContext, value: &Value) -> QueryResult<String> {
        match value {
            Value::Str(s) => Ok(ctx.quote_str(s)),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            Value::Array(_) => Err(QueryError::invalid_expression(
                "array function arguments are not supported",
            )),
        }
    }
}

impl Render for FunctionNode {
    fn render(&self, ctx: &mut RenderContext) -> QueryResult<Fragment> {
        let target = self.target.render(ctx)?;
        if self.names.is_empty() {
            return Ok(target);
        }

        let mut names = Vec::with_capacity(self.names.len());
        for raw in &self.names {
            let name = canonical(raw);
            if !FUNCTION_NAME.is_match(&name) {
                return Err(QueryError::invalid_function_name(raw));
            }
            names.push(name);
        }

        let mut sql = target.sql;

        // The innermost call is the only one that takes positional
        // arguments; SUBSTRING additionally shifts its 0-based start to
        // the 1-based SQL convention
        if names.last().map(String::as_str) == Some("SUBSTRING") {
            names.pop();
            let mut call = format!("SUBSTRING({}", sql);
            if let Some(start) = self.args.first() {
                let start = match start {
                    Value::Int(n) => n.checked_add(1).ok_or_else(|| {
                        QueryError::invalid_expression("SUBSTRING start offset out of range")
                    })?,
                    _ => {
                        return Err(QueryError::invalid_expression(
                            "SUBSTRING start offset must be an integer",
                        ))
                    }
                };
                call.push_str(&format!(", {}", start));
                if let Some(length) = self.args.get(1) {
                    call.push_str(&format!(", {}", Self::render_arg(ctx, length)?));
                }
            }
            call.push(')');
            sql = call;
        } else if !self.args.is_empty() {
            let name = names.pop().expect("names checked non-empty");
            let mut call = format!("{}({}", name, sql);
            for arg in &self.args {
                call.push_str(&format!(", {}", Self::render_arg(ctx, arg)?));
            }
            call.push(')');
            sql = call;
        }

        // Wrap the accumulator outward through the remaining names
        for name in names.iter().rev() {
            sql = if name == "DISTINCT" {
                format!("DISTINCT {}", sql)
            } else {
                format!("{}({})", name, sql)
            };
        }

        Ok(Fragment::with_params(sql, target.params))
    }
}
