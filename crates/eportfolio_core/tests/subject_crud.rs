use eportfolio_core::db::open_db_in_memory;
use eportfolio_core::repo::subject_repo::SqliteSubjectRepo;
use eportfolio_core::{PortfolioService, RepoError, ServiceError, SubjectDraft};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let created = service.create_subject(draft("Programming", "code", "p.png")).unwrap();
    assert!(created.id >= 1);
    assert_eq!(created.name, "Programming");
    assert!(created.abilities.is_none());

    let detail = service.get_subject(created.id).unwrap();
    assert_eq!(detail.id, created.id);
    assert_eq!(detail.icon, "code");
    assert_eq!(detail.image, "p.png");
    // Detail projection attaches (empty) child collections.
    assert_eq!(detail.abilities.as_deref(), Some(&[][..]));
    assert_eq!(detail.projects.as_deref(), Some(&[][..]));
}

#[test]
fn list_returns_summary_shape_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let first = service.create_subject(draft("first", "i1", "f.png")).unwrap();
    let second = service.create_subject(draft("second", "i2", "s.png")).unwrap();

    let listed = service.list_subjects().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
    assert!(listed[0].abilities.is_none());
    assert!(listed[0].projects.is_none());
}

#[test]
fn update_replaces_fields_of_existing_subject() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let created = service.create_subject(draft("before", "icon", "a.png")).unwrap();
    let updated = service
        .update_subject(created.id, draft("after", "icon2", "b.png"))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "after");

    let reloaded = service.get_subject(created.id).unwrap();
    assert_eq!(reloaded.name, "after");
    assert_eq!(reloaded.icon, "icon2");
    assert_eq!(reloaded.image, "b.png");
}

#[test]
fn update_missing_subject_is_not_upsert() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let err = service.update_subject(42, draft("ghost", "icon", "g.png")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: "subject", id: 42 }
    ));
    assert_eq!(count(&conn, "subjects"), 0);
}

#[test]
fn get_and_delete_missing_subject_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    assert!(matches!(
        service.get_subject(7).unwrap_err(),
        ServiceError::NotFound { entity: "subject", id: 7 }
    ));
    assert!(matches!(
        service.delete_subject(7).unwrap_err(),
        ServiceError::NotFound { entity: "subject", id: 7 }
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSubjectRepo::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

fn draft(name: &str, icon: &str, image: &str) -> SubjectDraft {
    SubjectDraft {
        name: name.to_string(),
        icon: icon.to_string(),
        image: image.to_string(),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
