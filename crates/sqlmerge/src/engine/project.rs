use super::Engine;

use sqlmerge_core::{
    err,
    schema::Field,
    stmt::{Expr, Join, Row, Select, TableRef},
    Result, TableSchema,
};

impl Engine {
    /// Reads every row of `table` from the secondary database, projected so
    /// that each global identifier and first-tier diff field can be read by
    /// its row key.
    pub fn query_secondary_table(&mut self, table: &TableSchema) -> Result<Vec<Row>> {
        let select = projection(table)?;
        self.exec_secondary(select)
    }
}

/// `SELECT skey AS skey, table.*, <joined foreign fields> FROM table <joins>`
pub(super) fn projection(table: &TableSchema) -> Result<Select> {
    let mut select = Select::new(table.name.as_str())
        .column_as(
            Expr::qualified(&table.name, &table.surrogate_key),
            &table.surrogate_key,
        )
        .wildcard(&table.name);

    for field in table.joined_fields() {
        select = select
            .join(join_for(table, field)?)
            .column_as(column_for(table, field), field.row_key());
    }

    Ok(select)
}

/// The inner join that brings a foreign field's value into reach.
///
/// Joins are aliased by the local column so that two fields reading through
/// the same foreign key share one join.
pub(super) fn join_for(table: &TableSchema, field: &Field) -> Result<Join> {
    let reference = table.reference_for(&field.local).ok_or_else(|| {
        err!(
            "foreign field `{field}` of `{}` has no update field reference to join through",
            table.name
        )
    })?;

    let alias = join_alias(field);

    Ok(Join::new(
        TableRef::new(reference.table.as_str()).alias(alias.as_str()),
        Expr::eq(
            Expr::qualified(&table.name, &field.local),
            Expr::qualified(alias, &reference.field),
        ),
    ))
}

/// The column expression holding a field's value: the local column, or the
/// foreign column of the field's join.
pub(super) fn column_for(table: &TableSchema, field: &Field) -> Expr {
    match &field.foreign {
        Some(foreign) => Expr::qualified(join_alias(field), foreign),
        None => Expr::qualified(&table.name, &field.local),
    }
}

fn join_alias(field: &Field) -> String {
    format!("j_{}", field.local)
}
