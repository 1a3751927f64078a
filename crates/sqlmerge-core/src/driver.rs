mod response;
pub use response::{Response, Rows};

use crate::{stmt::Statement, Result};

use std::fmt::Debug;

/// A live database connection the engine executes statements against.
///
/// Implementations serialize the statement for their SQL flavor, bind its
/// values positionally, and run it in autocommit mode. Queries return
/// [`Rows::Values`]; every other statement returns [`Rows::Count`].
pub trait Connection: Debug {
    /// Execute a statement
    fn exec(&mut self, stmt: &Statement) -> Result<Response>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        (**self).exec(stmt)
    }
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        (**self).exec(stmt)
    }
}
