use super::{Expr, Join, TableRef};

/// A SELECT over one table and any number of inner joins.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Projected items, in output order
    pub returning: Vec<SelectItem>,

    /// Primary table
    pub from: TableRef,

    /// Inner joins, in order
    pub joins: Vec<Join>,

    /// WHERE clause
    pub filter: Option<Expr>,

    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// An expression, optionally aliased with `AS`
    Expr { expr: Expr, alias: Option<String> },

    /// `table.*`, or `*` when no table is given
    Wildcard { table: Option<String> },
}

impl Select {
    pub fn new(from: impl Into<TableRef>) -> Self {
        Self {
            returning: vec![],
            from: from.into(),
            joins: vec![],
            filter: None,
            limit: None,
        }
    }

    pub fn column(mut self, expr: impl Into<Expr>) -> Self {
        self.returning.push(SelectItem::Expr {
            expr: expr.into(),
            alias: None,
        });
        self
    }

    pub fn column_as(mut self, expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        self.returning.push(SelectItem::Expr {
            expr: expr.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Projects every column of `table` (a name or alias).
    pub fn wildcard(mut self, table: impl Into<String>) -> Self {
        self.returning.push(SelectItem::Wildcard {
            table: Some(table.into()),
        });
        self
    }

    /// Adds an inner join unless an identical join is already present.
    pub fn join(mut self, join: Join) -> Self {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
        self
    }

    /// Adds a predicate. Repeated calls are combined with AND.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
