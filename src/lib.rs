//! paramsql: a query-expression compiler
//!
//! This crate turns a composable, in-memory description of a relational
//! query into parameterized SQL text plus a named-parameter bag, ready to
//! hand to a lower-level execution engine. It is intentionally decoupled
//! from any database driver:
//!
//! - Independent testing without a database
//! - Clear separation between query assembly and execution
//!
//! # Architecture
//!
//! - [`expr`]: expression nodes (fields, operators, functions, CASE)
//! - [`clause`]: statement clauses (join, group, having, order, limit, union)
//! - [`statement`]: the top-level [`Statement`] gluing clauses together
//! - [`bridge`]: the clause-accumulating [`QueryBuilder`] the statement drives
//! - [`render`]: the fragment contract and placeholder allocation
//! - [`params`]: the named-parameter bag
//!
//! # Example
//!
//! ```
//! use paramsql::{
//!     Direction, FieldRef, MySqlDialect, Operator, OperatorNode, Statement,
//! };
//!
//! let mut stmt = Statement::new();
//! stmt.set_from("entries", Some("e"))
//!     .add_where(OperatorNode::new(
//!         FieldRef::scoped("e", "status"),
//!         Operator::Eq,
//!         "open",
//!     ))
//!     .add_order("created", Direction::Desc, Some("e"))
//!     .set_limit(15, 0);
//!
//! let query = stmt.compile(&MySqlDialect).unwrap();
//! assert_eq!(
//!     query.sql,
//!     "SELECT * FROM entries AS e WHERE e.status = :status_0 \
//!      ORDER BY e.created DESC LIMIT 15"
//! );
//! ```

pub mod bridge;
pub mod clause;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod params;
pub mod render;
pub mod statement;
pub mod telemetry;
pub mod value;

pub use bridge::{Query, QueryBuilder};
pub use clause::{
    Direction, Glue, GroupClause, HavingClause, JoinClause, JoinKind, JoinSpec, JoinTarget,
    LimitClause, OrderClause, UnionClause,
};
pub use dialect::{Dialect, MySqlDialect};
pub use error::{QueryError, QueryResult};
pub use expr::{CaseNode, Expr, FieldRef, FunctionNode, Operand, Operator, OperatorNode};
pub use params::ParamBag;
pub use render::{Fragment, Render, RenderContext};
pub use statement::Statement;
pub use value::Value;
