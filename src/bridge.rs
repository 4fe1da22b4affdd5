//! The execution bridge
//!
//! A minimal query builder the statement drives. The compiler hands it
//! clause text already rendered through the dialect, plus parameter
//! bindings; the builder owns clause accumulation, limit handling, and
//! final SQL assembly. Connection handling and result materialization
//! live with the caller.

use std::fmt::Write;

use crate::clause::{Direction, Glue};
use crate::params::ParamBag;

/// A finished query: SQL text plus its named-parameter bag
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub params: ParamBag,
}

/// Accumulating query builder for a single SELECT statement
#[derive(Default)]
pub struct QueryBuilder {
    select: Vec<String>,
    from: Option<String>,
    joins: Vec<String>,
    wheres: Vec<(Glue, String)>,
    groups: Vec<String>,
    havings: Vec<(Glue, String)>,
    orders: Vec<String>,
    max_results: Option<u64>,
    first_result: Option<u64>,
    tail: Vec<String>,
    params: ParamBag,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_select(&mut self, expr: impl Into<String>) {
        self.select.push(expr.into());
    }

    pub fn set_from(&mut self, table: &str, alias: Option<&str>) {
        self.from = Some(match alias {
            Some(alias) => format!("{} AS {}", table, alias),
            None => table.to_string(),
        });
    }

    pub fn add_join(&mut self, join_sql: impl Into<String>) {
        self.joins.push(join_sql.into());
    }

    pub fn and_where(&mut self, condition: impl Into<String>) {
        self.wheres.push((Glue::And, condition.into()));
    }

    pub fn or_where(&mut self, condition: impl Into<String>) {
        self.wheres.push((Glue::Or, condition.into()));
    }

    /// Start the GROUP BY clause; subsequent fields use [`add_group_by`]
    ///
    /// [`add_group_by`]: Self::add_group_by
    pub fn group_by(&mut self, field: impl Into<String>) {
        self.groups.clear();
        self.groups.push(field.into());
    }

    pub fn add_group_by(&mut self, field: impl Into<String>) {
        self.groups.push(field.into());
    }

    pub fn having(&mut self, condition: impl Into<String>) {
        self.havings.clear();
        self.havings.push((Glue::And, condition.into()));
    }

    pub fn and_having(&mut self, condition: impl Into<String>) {
        self.havings.push((Glue::And, condition.into()));
    }

    pub fn or_having(&mut self, condition: impl Into<String>) {
        self.havings.push((Glue::Or, condition.into()));
    }

    pub fn order_by(&mut self, expr: impl Into<String>, direction: Option<Direction>) {
        self.orders.clear();
        self.add_order_by(expr, direction);
    }

    pub fn add_order_by(&mut self, expr: impl Into<String>, direction: Option<Direction>) {
        let expr = expr.into();
        self.orders.push(match direction {
            Some(dir) => format!("{} {}", expr, dir.as_sql()),
            None => expr,
        });
    }

    pub fn set_max_results(&mut self, limit: u64) {
        self.max_results = Some(limit);
    }

    pub fn set_first_result(&mut self, offset: u64) {
        self.first_result = Some(offset);
    }

    /// Append trailing SQL after every other clause (set operations)
    pub fn append(&mut self, sql: impl Into<String>) {
        self.tail.push(sql.into());
    }

    pub fn merge_params(&mut self, params: ParamBag) {
        self.params.merge(params);
    }

    /// Assemble the final SQL in clause order
    pub fn build(self) -> Query {
        let mut sql = String::with_capacity(256);

        sql.push_str("SELECT ");
        if self.select.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select.join(", "));
        }

        if let Some(from) = &self.from {
            write!(sql, " FROM {}", from).expect("write to string");
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        Self::push_chained(&mut sql, "WHERE", &self.wheres);

        if !self.groups.is_empty() {
            write!(sql, " GROUP BY {}", self.groups.join(", ")).expect("write to string");
        }

        Self::push_chained(&mut sql, "HAVING", &self.havings);

        if !self.orders.is_empty() {
            write!(sql, " ORDER BY {}", self.orders.join(", ")).expect("write to string");
        }

        if let Some(limit) = self.max_results {
            write!(sql, " LIMIT {}", limit).expect("write to string");
            // An offset of 0 is omitted by the limit clause upstream
            if let Some(offset) = self.first_result {
                write!(sql, " OFFSET {}", offset).expect("write to string");
            }
        }

        for tail in &self.tail {
            sql.push(' ');
            sql.push_str(tail);
        }

        Query {
            sql,
            params: self.params,
        }
    }

    fn push_chained(sql: &mut String, keyword: &str, parts: &[(Glue, String)]) {
        for (i, (glue, condition)) in parts.iter().enumerate() {
            let lead = if i == 0 {
                keyword
            } else {
                match glue {
                    Glue::And => "AND",
                    Glue::Or => "OR",
                }
            };
            write!(sql, " {} {}", lead, condition).expect("write to string");
        }
    }
}
