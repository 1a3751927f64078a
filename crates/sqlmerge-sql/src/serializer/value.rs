use super::{Params, ToSql};

use sqlmerge_core::stmt;

/// Values are always bound, never inlined.
impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}
