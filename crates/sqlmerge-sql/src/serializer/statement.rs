use super::{Comma, Ident, Params, ToSql};

use sqlmerge_core::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Query(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));

        fmt!(f, "DELETE FROM " Ident(&self.from) filter);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = Ident(&self.table);

        if self.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
            return;
        }

        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(&self.values);

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let returning = Comma(&self.returning);
        let joins = self.joins.iter().map(|join| (" JOIN ", join));
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));
        let limit = self.limit.map(|limit| (" LIMIT ", limit));

        let from = &self.from;

        fmt!(f, "SELECT " returning " FROM " from);

        for join in joins {
            join.to_sql(f);
        }

        fmt!(f, filter limit);
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::SelectItem::Expr { expr, alias } => {
                let alias = alias.as_ref().map(|alias| (" AS ", Ident(alias)));
                fmt!(f, expr alias);
            }
            stmt::SelectItem::Wildcard { table: Some(table) } => {
                fmt!(f, Ident(table) ".*");
            }
            stmt::SelectItem::Wildcard { table: None } => {
                fmt!(f, "*");
            }
        }
    }
}

impl ToSql for &stmt::TableRef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let alias = self.alias.as_ref().map(|alias| (" AS ", Ident(alias)));

        fmt!(f, Ident(&self.name) alias);
    }
}

impl ToSql for &stmt::Join {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let (table, on) = (&self.table, &self.on);
        fmt!(f, table " ON " on);
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(&self.assignments);
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));

        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments filter);
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let value = &self.value;
        fmt!(f, Ident(&self.column) " = " value);
    }
}
