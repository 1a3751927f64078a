use super::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of expressions
    And(Vec<Expr>),

    /// Binary comparison
    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    /// A column, optionally qualified by a table name or alias
    Column(ExprColumn),

    /// Aggregate function call
    Func(Func),

    /// A bound value. Serialized as a placeholder, never inlined.
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    /// Table name or alias qualifying the column
    pub table: Option<String>,

    /// Column name
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Func {
    Max(Box<Expr>),
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ExprColumn {
            table: None,
            name: name.into(),
        })
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ExprColumn {
            table: Some(table.into()),
            name: name.into(),
        })
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Self::BinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn max(expr: impl Into<Expr>) -> Self {
        Self::Func(Func::Max(Box::new(expr.into())))
    }

    /// Combines two expressions with AND, flattening nested conjunctions.
    pub fn and(self, rhs: impl Into<Expr>) -> Self {
        let mut operands = match self {
            Self::And(operands) => operands,
            expr => vec![expr],
        };

        match rhs.into() {
            Self::And(rest) => operands.extend(rest),
            expr => operands.push(expr),
        }

        Self::And(operands)
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}
