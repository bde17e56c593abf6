use roster_core::db::open_db_in_memory;
use roster_core::{
    RepoError, SqliteStudentRepository, StudentRecord, StudentRepository, StudentValidationError,
};
use rusqlite::Connection;

fn full_record(register_number: &str, name: &str) -> StudentRecord {
    StudentRecord {
        register_number: register_number.to_string(),
        name: name.to_string(),
        department: "CS".to_string(),
        year: "2".to_string(),
        phone: "123".to_string(),
        email: "a@x.com".to_string(),
    }
}

#[test]
fn insert_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let record = full_record("R1", "Alice");
    repo.insert_student(&record).unwrap();

    let students = repo.list_students().unwrap();
    assert_eq!(students, vec![record]);
}

#[test]
fn list_on_empty_table_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    assert!(repo.list_students().unwrap().is_empty());
}

#[test]
fn list_is_ordered_by_register_number() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    for id in ["R3", "R1", "R2"] {
        repo.insert_student(&StudentRecord::new(id, "Student")).unwrap();
    }

    let ids: Vec<String> = repo
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.register_number)
        .collect();
    assert_eq!(ids, vec!["R1", "R2", "R3"]);
}

#[test]
fn duplicate_insert_returns_duplicate_and_keeps_original() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    repo.insert_student(&full_record("R1", "Alice")).unwrap();
    let err = repo
        .insert_student(&full_record("R1", "Mallory"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(ref id) if id == "R1"));

    let students = repo.list_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Alice");
}

#[test]
fn insert_rejects_missing_required_fields_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let err = repo.insert_student(&StudentRecord::new("R1", "")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(StudentValidationError::MissingName)
    ));
    assert!(repo.list_students().unwrap().is_empty());
}

#[test]
fn delete_reports_matched_rows_and_tolerates_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    assert_eq!(repo.delete_student("NOTFOUND").unwrap(), 0);

    repo.insert_student(&StudentRecord::new("R2", "Bob")).unwrap();
    assert_eq!(repo.delete_student("R2").unwrap(), 1);
    assert_eq!(repo.delete_student("R2").unwrap(), 0);
    assert!(repo.list_students().unwrap().is_empty());
}

#[test]
fn null_columns_read_back_as_empty_strings() {
    let conn = open_db_in_memory().unwrap();
    insert_raw_row_with_nulls(&conn);
    let repo = SqliteStudentRepository::new(&conn);

    let students = repo.list_students().unwrap();
    assert_eq!(students, vec![StudentRecord::new("R9", "Legacy")]);
}

fn insert_raw_row_with_nulls(conn: &Connection) {
    conn.execute(
        "INSERT INTO students (register_number, name) VALUES ('R9', 'Legacy');",
        [],
    )
    .unwrap();
}
