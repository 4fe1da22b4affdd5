//! GROUP BY accumulation

use crate::bridge::QueryBuilder;
use crate::expr::FieldRef;

/// Ordered list of grouping fields, delegated to the bridge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupClause {
    fields: Vec<FieldRef>,
}

impl GroupClause {
    pub fn add(&mut self, field: FieldRef) {
        self.fields.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drive the bridge's group-by accumulation: the first field starts
    /// the clause, subsequent fields add to it
    pub fn apply(&self, builder: &mut QueryBuilder) {
        let mut fields = self.fields.iter();
        if let Some(first) = fields.next() {
            builder.group_by(first.sql());
        }
        for field in fields {
            builder.add_group_by(field.sql());
        }
    }
}
