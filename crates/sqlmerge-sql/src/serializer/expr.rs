use super::{Delimited, Ident, Params, Period, ToSql};

use sqlmerge_core::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(operands) => {
                fmt!(f, Delimited(operands, " AND "));
            }
            BinaryOp { lhs, op, rhs } => {
                let (lhs, rhs) = (&**lhs, &**rhs);
                fmt!(f, lhs " " op.as_str() " " rhs);
            }
            Column(expr_column) => expr_column.to_sql(f),
            Func(stmt::Func::Max(expr)) => {
                let expr = &**expr;
                fmt!(f, "MAX(" expr ")");
            }
            Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ExprColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match &self.table {
            Some(table) => fmt!(f, Period([Ident(table), Ident(&self.name)])),
            None => fmt!(f, Ident(&self.name)),
        }
    }
}
