//! LIMIT/OFFSET accumulation

use crate::bridge::QueryBuilder;

/// Optional row window delegated to the bridge's max-results and
/// first-result setters; an offset of 0 is omitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitClause {
    window: Option<(u64, u64)>,
}

impl LimitClause {
    pub fn set(&mut self, limit: u64, offset: u64) {
        self.window = Some((limit, offset));
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_none()
    }

    pub fn apply(&self, builder: &mut QueryBuilder) {
        if let Some((limit, offset)) = self.window {
            builder.set_max_results(limit);
            if offset > 0 {
                builder.set_first_result(offset);
            }
        }
    }
}
