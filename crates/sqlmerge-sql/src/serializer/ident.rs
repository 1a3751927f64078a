use super::{Formatter, Params, ToSql};

/// A quoted identifier. MySQL quotes with backticks; everything else with
/// double quotes. The quote character is doubled when it appears inside the
/// name.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quote = if f.serializer.is_mysql() { '`' } else { '"' };
        let name = self.0.as_ref();

        f.dst.push(quote);
        for c in name.chars() {
            if c == quote {
                f.dst.push(quote);
            }
            f.dst.push(c);
        }
        f.dst.push(quote);
    }
}
