//! The result cursor the scanner reads from.
//!
//! A [`Cursor`] exposes its column names up front, steps through rows with
//! [`Cursor::advance`], and copies the current row into a [`Bound`] record
//! with [`Cursor::scan`]. [`SqliteCursor`] drives a live `rusqlite` query;
//! [`MemoryCursor`] serves rows that are already in memory.

use rusqlite::types::{FromSqlError, Value, ValueRef};
use rusqlite::{Params, Rows, Statement};

use crate::bind::Bound;
use crate::error::{Result, ScanError};

pub trait Cursor {
    /// Column names of the result set, readable before any row is consumed.
    fn columns(&self) -> Vec<String>;
    /// Moves to the next row. `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;
    /// Writes every column of the current row, in column order.
    fn scan(&mut self, row: &mut Bound<'_>) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn columns(&self) -> Vec<String> {
        (**self).columns()
    }
    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }
    fn scan(&mut self, row: &mut Bound<'_>) -> Result<()> {
        (**self).scan(row)
    }
}

// Shared by both cursors so a failed conversion looks the same as it would
// coming out of `rusqlite::Row::get`.
fn scan_values(columns: &[String], values: &[Value], row: &mut Bound<'_>) -> Result<()> {
    if values.len() != row.width() {
        return Err(ScanError::Cursor(format!(
            "row has {} columns but {} targets were bound",
            values.len(),
            row.width()
        )));
    }
    for (index, value) in values.iter().enumerate() {
        row.accept(index, ValueRef::from(value)).map_err(|err| {
            let name = columns.get(index).map(String::as_str).unwrap_or_default();
            conversion_error(index, name, value, err)
        })?;
    }
    Ok(())
}

fn conversion_error(index: usize, name: &str, value: &Value, err: FromSqlError) -> ScanError {
    let err = match err {
        FromSqlError::InvalidType => {
            rusqlite::Error::InvalidColumnType(index, name.to_string(), value.data_type())
        }
        FromSqlError::OutOfRange(i) => rusqlite::Error::IntegralValueOutOfRange(index, i),
        FromSqlError::Other(err) => {
            rusqlite::Error::FromSqlConversionFailure(index, value.data_type(), err)
        }
        err => rusqlite::Error::FromSqlConversionFailure(index, value.data_type(), Box::new(err)),
    };
    ScanError::Sql(err)
}

// ------------- SqliteCursor -------------
/// Cursor over a running `rusqlite` query. Holds on to the current row only.
pub struct SqliteCursor<'stmt> {
    rows: Rows<'stmt>,
    columns: Vec<String>,
    current: Option<Vec<Value>>,
}

impl<'stmt> SqliteCursor<'stmt> {
    pub fn new(rows: Rows<'stmt>) -> Self {
        let columns = rows
            .as_ref()
            .map(|statement| {
                statement
                    .column_names()
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            rows,
            columns,
            current: None,
        }
    }
    pub fn query<P: Params>(statement: &'stmt mut Statement<'_>, params: P) -> Result<Self> {
        Ok(Self::new(statement.query(params)?))
    }
}

impl Cursor for SqliteCursor<'_> {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }
    fn advance(&mut self) -> Result<bool> {
        let width = self.columns.len();
        match self.rows.next()? {
            Some(row) => {
                let mut values = Vec::with_capacity(width);
                for index in 0..width {
                    values.push(Value::from(row.get_ref(index)?));
                }
                self.current = Some(values);
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }
    fn scan(&mut self, row: &mut Bound<'_>) -> Result<()> {
        match &self.current {
            Some(values) => scan_values(&self.columns, values, row),
            None => Err(ScanError::Cursor("scan without a current row".to_string())),
        }
    }
}

// ------------- MemoryCursor -------------
/// Cursor over rows that are already materialised.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: std::collections::VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl MemoryCursor {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into(),
            current: None,
        }
    }
    /// A result set with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn push(&mut self, row: Vec<Value>) {
        self.rows.push_back(row);
    }
    /// Rows not yet advanced past.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Cursor for MemoryCursor {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }
    fn advance(&mut self) -> Result<bool> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }
    fn scan(&mut self, row: &mut Bound<'_>) -> Result<()> {
        match &self.current {
            Some(values) => scan_values(&self.columns, values, row),
            None => Err(ScanError::Cursor("scan without a current row".to_string())),
        }
    }
}
