use rusqlite::Connection;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chrono::NaiveDate;
use rowscan::record;
use rowscan::scan::Scanner;
use rowscan::settings::Settings;

record! {
    #[derive(Debug)]
    pub struct Audit {
        pub created_on: Option<NaiveDate> => column "CreatedOn",
    }
}

record! {
    #[derive(Debug)]
    pub struct Person {
        pub id: i64 => column "ID",
        pub first_name: String => column "FirstName",
        pub team_id: Option<i64> => column "TeamID",
        pub audit: Audit => embed "Audit",
    }
}

fn main() -> rowscan::Result<()> {
    // an optional config file path may be given as the only argument
    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "
        create table person (
            id integer not null,
            first_name text not null,
            team_id integer null,
            created_on text null,
            nickname text null
        );
        insert into person values (1, 'Alice', 7, '2004-06-19', 'Al');
        insert into person values (2, 'Bob', null, null, null);
        ",
    )?;

    let scanner = Scanner::<Box<Person>>::new().with_shared_convention(settings.convention()?);
    let mut stmt = conn.prepare("select id, first_name, team_id, created_on, nickname from person")?;
    let mut cursor = rowscan::cursor::SqliteCursor::query(&mut stmt, [])?;
    scanner.bulk(&mut cursor, |person| {
        info!(id = person.id, name = %person.first_name, "scanned");
        println!("{person:?}");
        Ok::<_, rowscan::ScanError>(())
    })?;
    Ok(())
}
