use super::Expr;

/// `DELETE FROM table WHERE filter`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub from: String,
    pub filter: Option<Expr>,
}

impl Delete {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            filter: None,
        }
    }

    /// Adds a predicate. Repeated calls are combined with AND.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }
}
