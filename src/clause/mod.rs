//! Statement clauses
//!
//! Each clause is an independent accumulator the statement composes:
//! joins render to SQL fragments directly, while group, having, order and
//! limit delegate to the execution bridge's accumulation methods.

mod group;
mod having;
mod join;
mod limit;
mod order;
mod union;

pub use group::GroupClause;
pub use having::HavingClause;
pub use join::{JoinClause, JoinKind, JoinSpec, JoinTarget};
pub use limit::LimitClause;
pub use order::{Direction, OrderClause};
pub use union::UnionClause;

/// How consecutive where/having entries chain together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glue {
    #[default]
    And,
    Or,
}
