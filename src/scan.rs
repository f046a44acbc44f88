//! The extraction driver: reads the column names of a cursor once, resolves
//! them against a record type once, then binds and scans row after row.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rusqlite::{Params, Statement};
use tracing::debug;

use crate::bind::Bound;
use crate::cursor::{Cursor, SqliteCursor};
use crate::descriptor::{self, Descriptor, FieldPath};
use crate::error::{Result, ScanError};
use crate::naming::{NamingConvention, default_convention};
use crate::record::{Handle, Record};

/// Scans rows into handles of type `H`, which is either a record declared
/// with [`record!`](crate::record!) or a `Box` of one.
pub struct Scanner<H: Handle> {
    descriptor: Arc<Descriptor>,
    convention: Arc<dyn NamingConvention>,
    handle: PhantomData<fn() -> H>,
}

impl<H: Handle> Scanner<H> {
    /// Uses the shared descriptor for `H` and the default naming convention.
    pub fn new() -> Self {
        Self {
            descriptor: descriptor::of::<H>(),
            convention: default_convention(),
            handle: PhantomData,
        }
    }
    pub fn with_convention(mut self, convention: impl NamingConvention + 'static) -> Self {
        self.convention = Arc::new(convention);
        self
    }
    pub fn with_shared_convention(mut self, convention: Arc<dyn NamingConvention>) -> Self {
        self.convention = convention;
        self
    }
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
    pub fn convention(&self) -> &dyn NamingConvention {
        self.convention.as_ref()
    }

    /// Field path per column, `None` where no field matches.
    pub fn fields<S: AsRef<str>>(&self, columns: &[S]) -> Vec<Option<FieldPath>> {
        self.descriptor.resolve(columns, self.convention.as_ref())
    }
    /// A zeroed record, ready to be bound.
    pub fn fresh(&self) -> H::Record {
        H::Record::default()
    }
    pub fn bind<'r>(&self, record: &'r mut H::Record, fields: &'r [Option<FieldPath>]) -> Bound<'r> {
        Bound::new(record, fields)
    }
    /// Hands the record back in the form `H` asks for.
    pub fn wrap(&self, record: H::Record) -> H {
        H::wrap(record)
    }

    fn resolve_cursor<C: Cursor>(&self, cursor: &C) -> Result<Vec<Option<FieldPath>>> {
        let columns = cursor.columns();
        if columns.is_empty() {
            return Err(ScanError::NoColumns);
        }
        Ok(self.fields(&columns))
    }

    /// Calls `each` with one freshly scanned record per row, in cursor order.
    ///
    /// Stops at the first failing scan or callback and returns that error as
    /// it is. Records already handed to `each` stay with the caller.
    pub fn bulk<C, F, E>(&self, cursor: &mut C, mut each: F) -> std::result::Result<(), E>
    where
        C: Cursor,
        F: FnMut(H) -> std::result::Result<(), E>,
        E: From<ScanError>,
    {
        let fields = self.resolve_cursor(cursor)?;
        let mut scanned = 0usize;
        while cursor.advance()? {
            let mut record = self.fresh();
            cursor.scan(&mut self.bind(&mut record, &fields))?;
            scanned += 1;
            each(self.wrap(record))?;
        }
        debug!(record = self.descriptor.name(), rows = scanned, "bulk scan complete");
        Ok(())
    }

    /// Scans the first row of `cursor` into `dst`. Leaves `dst` untouched
    /// when there is no row.
    pub fn one<C: Cursor>(&self, cursor: &mut C, dst: &mut H) -> Result<()> {
        let fields = self.resolve_cursor(cursor)?;
        if !cursor.advance()? {
            return Err(ScanError::NoRows);
        }
        cursor.scan(&mut self.bind(dst.record_mut(), &fields))
    }

    /// Every row of `cursor`, in order.
    pub fn all<C: Cursor>(&self, cursor: &mut C) -> Result<Vec<H>> {
        let mut records = Vec::new();
        self.bulk(cursor, |record| {
            records.push(record);
            Ok::<_, ScanError>(())
        })?;
        Ok(records)
    }

    pub fn query_all<P: Params>(&self, statement: &mut Statement<'_>, params: P) -> Result<Vec<H>> {
        let mut cursor = SqliteCursor::query(statement, params)?;
        self.all(&mut cursor)
    }

    /// The first row of the query as a fresh handle.
    pub fn query_one<P: Params>(&self, statement: &mut Statement<'_>, params: P) -> Result<H> {
        let mut cursor = SqliteCursor::query(statement, params)?;
        let mut dst = self.wrap(self.fresh());
        self.one(&mut cursor, &mut dst)?;
        Ok(dst)
    }
}

impl<H: Handle> Default for Scanner<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> Clone for Scanner<H> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            convention: Arc::clone(&self.convention),
            handle: PhantomData,
        }
    }
}

impl<H: Handle> fmt::Debug for Scanner<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Shorthand for a scanner over the record type itself.
pub fn scanner<R: Record + Handle>() -> Scanner<R> {
    Scanner::new()
}
