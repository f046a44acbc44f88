use rusqlite::types::{FromSqlError, FromSqlResult, ValueRef};

use crate::descriptor::FieldPath;
use crate::record::{DISCARD, Fields, slot_at};

/// Where one column of a row goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'p> {
    Field(&'p FieldPath),
    Discard,
}

impl<'p> From<Option<&'p FieldPath>> for Target<'p> {
    fn from(path: Option<&'p FieldPath>) -> Self {
        match path {
            Some(path) => Self::Field(path),
            None => Self::Discard,
        }
    }
}

/// A record borrowed for the duration of one row, with a target per column.
pub struct Bound<'r> {
    record: &'r mut dyn Fields,
    targets: Vec<Target<'r>>,
}

impl<'r> Bound<'r> {
    pub fn new(record: &'r mut dyn Fields, fields: &'r [Option<FieldPath>]) -> Self {
        Self {
            record,
            targets: fields.iter().map(|path| Target::from(path.as_ref())).collect(),
        }
    }
    /// Number of columns the row is expected to have.
    pub fn width(&self) -> usize {
        self.targets.len()
    }
    pub fn targets(&self) -> &[Target<'r>] {
        &self.targets
    }
    /// Writes the value of column `column` into its target. Later writes to
    /// the same field replace earlier ones.
    pub fn accept(&mut self, column: usize, value: ValueRef<'_>) -> FromSqlResult<()> {
        match self.targets.get(column).copied() {
            Some(Target::Field(path)) => match slot_at(&mut *self.record, path.indices()) {
                Some(slot) => slot.accept(value),
                None => Err(FromSqlError::Other(
                    format!("field path {path} does not lead to a column field").into(),
                )),
            },
            Some(Target::Discard) => DISCARD.accept(value),
            None => Err(FromSqlError::Other(
                format!("column {column} is outside a row of width {}", self.width()).into(),
            )),
        }
    }
}
