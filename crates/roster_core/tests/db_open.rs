use roster_core::db::schema::STUDENTS_TABLE;
use roster_core::db::{init_db, open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_students_table() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, STUDENTS_TABLE);
    assert_eq!(
        column_names(&conn),
        vec!["register_number", "name", "department", "year", "phone", "email"]
    );
}

#[test]
fn init_then_open_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let conn_first = init_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO students VALUES ('R1', 'Alice', '', '', '', '');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn init_db_is_idempotent_and_creates_students_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    drop(init_db(&path).unwrap());
    let conn = init_db(&path).unwrap();
    assert_table_exists(&conn, STUDENTS_TABLE);
}

#[test]
fn open_db_does_not_create_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(!path.exists());
}

#[test]
fn opening_database_in_missing_directory_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("students.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

fn column_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(students);").unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
