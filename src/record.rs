//! Record types and their static field tables.
//!
//! A record is a plain struct whose fields are declared together with the
//! name they are looked up by. The [`record!`](crate::record!) macro writes
//! the struct, its [`Layout`], and the [`Fields`] accessor in one go, so that
//! nothing has to be discovered at runtime:
//!
//! ```
//! use rowscan::record;
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Audit {
//!         pub created_by: Option<String> => column "CreatedBy",
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct User {
//!         pub id: i64 => column "ID",
//!         pub first_name: String => column "FirstName",
//!         pub audit: Audit => embed "Audit",
//!     }
//! }
//! ```
//!
//! Embedded records promote their fields: `CreatedBy` above resolves on
//! `User` through the path `[2, 0]`.

use core::hash::BuildHasherDefault;
use rusqlite::types::{FromSql, FromSqlResult, ValueRef};
use seahash::SeaHasher;

pub type FieldHasher = BuildHasherDefault<SeaHasher>;

/// Anything a column value can be written into.
pub trait Slot {
    fn accept(&mut self, value: ValueRef<'_>) -> FromSqlResult<()>;
}

impl<T: FromSql> Slot for T {
    fn accept(&mut self, value: ValueRef<'_>) -> FromSqlResult<()> {
        *self = T::column_result(value)?;
        Ok(())
    }
}

/// Sink for columns with no matching field. Accepts any value and keeps none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

pub static DISCARD: Discard = Discard;

impl Discard {
    pub fn accept(&self, _value: ValueRef<'_>) -> FromSqlResult<()> {
        Ok(())
    }
}

// ------------- Layout -------------
#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub embedded: Option<fn() -> &'static Layout>,
}

impl FieldDef {
    pub const fn column(name: &'static str) -> Self {
        Self { name, embedded: None }
    }
    pub const fn embed(name: &'static str, layout: fn() -> &'static Layout) -> Self {
        Self { name, embedded: Some(layout) }
    }
}

/// Mutable access to one declared field, by its position in the layout.
pub enum FieldMut<'a> {
    Value(&'a mut dyn Slot),
    Embedded(&'a mut dyn Fields),
}

pub trait Fields {
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

pub trait Record: Fields + Default + 'static {
    fn layout() -> &'static Layout;
}

/// What a scan hands back to the caller: the record itself, or the record
/// behind any number of boxes.
pub trait Handle: Sized + 'static {
    type Record: Record;
    const INDIRECTIONS: usize;
    fn wrap(record: Self::Record) -> Self;
    fn record_mut(&mut self) -> &mut Self::Record;
}

impl<H: Handle> Handle for Box<H> {
    type Record = H::Record;
    const INDIRECTIONS: usize = H::INDIRECTIONS + 1;
    fn wrap(record: Self::Record) -> Self {
        Box::new(H::wrap(record))
    }
    fn record_mut(&mut self) -> &mut Self::Record {
        (**self).record_mut()
    }
}

/// Follows `path` through embedded records down to a writable slot.
pub fn slot_at<'r>(record: &'r mut dyn Fields, path: &[usize]) -> Option<&'r mut dyn Slot> {
    let (last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = match current.field_mut(index)? {
            FieldMut::Embedded(inner) => inner,
            FieldMut::Value(_) => return None,
        };
    }
    match current.field_mut(*last)? {
        FieldMut::Value(slot) => Some(slot),
        FieldMut::Embedded(_) => None,
    }
}

/// Declares a record struct together with its field table.
///
/// Each field is either `column "Name"`, a scalar bound by that name, or
/// `embed "Name"`, another record whose fields are promoted into this one.
/// Column field types must implement `rusqlite::types::FromSql + Default`.
#[macro_export]
macro_rules! record {
    (@def column $name:literal, $ty:ty) => {
        $crate::record::FieldDef::column($name)
    };
    (@def embed $name:literal, $ty:ty) => {
        $crate::record::FieldDef::embed($name, <$ty as $crate::record::Record>::layout)
    };
    (@mut column $field:expr) => {
        $crate::record::FieldMut::Value($field)
    };
    (@mut embed $field:expr) => {
        $crate::record::FieldMut::Embedded($field)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $record:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $kind:ident $name:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $record {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::record::Fields for $record {
            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(&mut self, index: usize) -> Option<$crate::record::FieldMut<'_>> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return Some($crate::record!(@mut $kind &mut self.$field));
                    }
                    position += 1;
                )*
                None
            }
        }

        impl $crate::record::Record for $record {
            fn layout() -> &'static $crate::record::Layout {
                static LAYOUT: $crate::record::Layout = $crate::record::Layout {
                    name: stringify!($record),
                    fields: &[$($crate::record!(@def $kind $name, $ty)),*],
                };
                &LAYOUT
            }
        }

        impl $crate::record::Handle for $record {
            type Record = $record;
            const INDIRECTIONS: usize = 0;
            fn wrap(record: Self::Record) -> Self {
                record
            }
            fn record_mut(&mut self) -> &mut Self::Record {
                self
            }
        }
    };
}
