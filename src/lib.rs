//! Rowscan – maps SQL result rows onto declared record types by column name.
//!
//! Given a result cursor, rowscan works out once which column feeds which
//! field and then fills one record per row:
//! * A [`naming::NamingConvention`] turns a column name (`first_name`) into a
//!   candidate field name (`FirstName`). Conventions can be chained.
//! * A [`descriptor::Descriptor`] indexes the declared fields of a record type,
//!   including fields promoted from embedded records, and is built once per type.
//! * The binder ([`bind::Bound`]) routes each column of a row either to a field
//!   or to the shared [`record::Discard`] sink when nothing matched.
//! * The [`scan::Scanner`] drives a [`cursor::Cursor`] in bulk (one callback per
//!   row) or for a single row into a caller supplied destination.
//!
//! ## Modules
//! * [`record`] – The `record!` macro, field tables and write slots.
//! * [`naming`] – Default, identity, closure, rename and rewrite conventions.
//! * [`descriptor`] – Field index per record type and the shared registry.
//! * [`bind`] – Per-row column targets.
//! * [`cursor`] – The cursor contract plus `rusqlite` and in-memory cursors.
//! * [`scan`] – Bulk and single extraction.
//! * [`settings`] – Naming and logging configuration.
//!
//! ## Quick Start
//! ```
//! use rusqlite::Connection;
//! use rowscan::{record, scan::Scanner};
//!
//! record! {
//!     #[derive(Debug)]
//!     pub struct User {
//!         pub id: i64 => column "ID",
//!         pub first_name: String => column "FirstName",
//!     }
//! }
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch("create table user (id integer, first_name text);
//!                     insert into user values (1, 'Alice');").unwrap();
//! let mut stmt = conn.prepare("select id, first_name from user").unwrap();
//! let users = Scanner::<User>::new().query_all(&mut stmt, []).unwrap();
//! assert_eq!(users[0].first_name, "Alice");
//! ```
//!
//! Records can also be asked for boxed: `Scanner::<Box<User>>` hands back
//! `Box<User>` for every row.

pub mod bind;
pub mod cursor;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod record;
pub mod scan;
pub mod settings;

pub use error::{Result, ScanError};
