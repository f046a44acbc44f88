use rusqlite::types::Value;
use rusqlite::Connection;
use rowscan::cursor::MemoryCursor;
use rowscan::record;
use rowscan::scan::Scanner;
use rowscan::ScanError;

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Account {
        pub id: i64 => column "ID",
        pub owner_id: i64 => column "OwnerID",
        pub balance: f64 => column "Balance",
    }
}

fn account_cursor(rows: Vec<Vec<Value>>) -> MemoryCursor {
    MemoryCursor::new(["id", "owner_id", "balance"], rows)
}

#[test]
fn populates_the_supplied_destination() {
    let mut cursor = account_cursor(vec![
        vec![Value::Integer(7), Value::Integer(3), Value::Real(12.5)],
        vec![Value::Integer(8), Value::Integer(4), Value::Real(0.0)],
    ]);
    let mut dst = Account::default();
    Scanner::<Account>::new().one(&mut cursor, &mut dst).expect("one row");
    assert_eq!(dst, Account { id: 7, owner_id: 3, balance: 12.5 });
    assert_eq!(cursor.remaining(), 1, "only the first row is read");
}

#[test]
fn no_rows_leaves_destination_untouched() {
    let mut cursor = account_cursor(Vec::new());
    let mut dst = Account { id: 99, owner_id: 98, balance: 1.0 };
    let err = Scanner::<Account>::new().one(&mut cursor, &mut dst).unwrap_err();
    assert!(matches!(err, ScanError::NoRows));
    assert!(err.is_not_exist());
    assert_eq!(dst, Account { id: 99, owner_id: 98, balance: 1.0 });
}

#[test]
fn no_columns_is_reported_before_rows() {
    let mut cursor = MemoryCursor::empty();
    let mut dst = Account::default();
    let err = Scanner::<Account>::new().one(&mut cursor, &mut dst).unwrap_err();
    assert!(matches!(err, ScanError::NoColumns));
}

#[test]
fn unmatched_columns_keep_existing_values() {
    let mut cursor = MemoryCursor::new(["id", "comment"], vec![vec![Value::Integer(5), Value::Text("x".into())]]);
    let mut dst = Account { id: 0, owner_id: 42, balance: 2.5 };
    Scanner::<Account>::new().one(&mut cursor, &mut dst).unwrap();
    assert_eq!(dst, Account { id: 5, owner_id: 42, balance: 2.5 });
}

#[test]
fn boxed_destination_is_written_through() {
    let mut cursor = account_cursor(vec![vec![Value::Integer(1), Value::Integer(2), Value::Real(3.0)]]);
    let mut dst: Box<Account> = Box::default();
    Scanner::<Box<Account>>::new().one(&mut cursor, &mut dst).unwrap();
    assert_eq!(*dst, Account { id: 1, owner_id: 2, balance: 3.0 });
}

#[test]
fn scan_failure_propagates() {
    let mut cursor = account_cursor(vec![vec![Value::Integer(1), Value::Blob(vec![1, 2]), Value::Real(3.0)]]);
    let mut dst = Account::default();
    let err = Scanner::<Account>::new().one(&mut cursor, &mut dst).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Sql(rusqlite::Error::InvalidColumnType(1, _, rusqlite::types::Type::Blob))
    ));
}

#[test]
fn query_one_over_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "create table account (id integer, owner_id integer, balance real);
         insert into account values (10, 20, 30.5);",
    )
    .unwrap();
    let scanner = Scanner::<Account>::new();
    let mut stmt = conn.prepare("select id, owner_id, balance from account where id = ?").unwrap();
    let found = scanner.query_one(&mut stmt, [10]).unwrap();
    assert_eq!(found, Account { id: 10, owner_id: 20, balance: 30.5 });

    let missing = scanner.query_one(&mut stmt, [11]).unwrap_err();
    assert!(matches!(missing, ScanError::NoRows));
}
