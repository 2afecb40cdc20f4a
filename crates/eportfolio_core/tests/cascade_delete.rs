use eportfolio_core::db::open_db_in_memory;
use eportfolio_core::{
    AbilityDraft, PortfolioService, ProjectDraft, ServiceError, SubjectDraft, TechnologyDraft,
};
use rusqlite::Connection;

#[test]
fn delete_subject_cascades_three_levels_down() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let subject = service.create_subject(subject_draft("Programming")).unwrap();
    let ability = service.add_ability(subject.id, ability_draft("Backend")).unwrap();
    let technology = service
        .add_technology(ability.id, technology_draft("Rust"))
        .unwrap();
    let project = service
        .add_project(subject.id, project_draft("site"))
        .unwrap();

    service.delete_subject(subject.id).unwrap();

    assert!(matches!(
        service.get_subject(subject.id).unwrap_err(),
        ServiceError::NotFound { entity: "subject", .. }
    ));
    assert!(matches!(
        service.get_ability(ability.id).unwrap_err(),
        ServiceError::NotFound { entity: "ability", .. }
    ));
    assert!(matches!(
        service.get_technology(technology.id).unwrap_err(),
        ServiceError::NotFound { entity: "technology", .. }
    ));
    assert!(matches!(
        service.get_project(project.id).unwrap_err(),
        ServiceError::NotFound { entity: "project", .. }
    ));
    assert_eq!(count(&conn, "subjects"), 0);
    assert_eq!(count(&conn, "abilities"), 0);
    assert_eq!(count(&conn, "technologies"), 0);
    assert_eq!(count(&conn, "projects"), 0);
}

#[test]
fn delete_subject_leaves_sibling_subjects_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let doomed = service.create_subject(subject_draft("doomed")).unwrap();
    let survivor = service.create_subject(subject_draft("survivor")).unwrap();
    service.add_ability(doomed.id, ability_draft("a1")).unwrap();
    let kept_ability = service.add_ability(survivor.id, ability_draft("a2")).unwrap();
    service
        .add_technology(kept_ability.id, technology_draft("kept tech"))
        .unwrap();

    service.delete_subject(doomed.id).unwrap();

    assert_eq!(count(&conn, "subjects"), 1);
    assert_eq!(count(&conn, "abilities"), 1);
    assert_eq!(count(&conn, "technologies"), 1);
    let detail = service.get_subject(survivor.id).unwrap();
    assert_eq!(detail.abilities.unwrap().len(), 1);
}

#[test]
fn delete_ability_cascades_to_technologies_and_detaches_from_subject() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let subject = service.create_subject(subject_draft("subject")).unwrap();
    let ability = service.add_ability(subject.id, ability_draft("ability")).unwrap();
    service
        .add_technology(ability.id, technology_draft("tech"))
        .unwrap();

    service.delete_ability(ability.id).unwrap();

    assert_eq!(count(&conn, "abilities"), 0);
    assert_eq!(count(&conn, "technologies"), 0);
    // The owning subject survives with an empty collection.
    let detail = service.get_subject(subject.id).unwrap();
    assert_eq!(detail.abilities.unwrap().len(), 0);
}

#[test]
fn delete_missing_ability_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    assert!(matches!(
        service.delete_ability(11).unwrap_err(),
        ServiceError::NotFound { entity: "ability", id: 11 }
    ));
}

#[test]
fn delete_technology_is_leaf_only() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let subject = service.create_subject(subject_draft("subject")).unwrap();
    let ability = service.add_ability(subject.id, ability_draft("ability")).unwrap();
    let technology = service
        .add_technology(ability.id, technology_draft("tech"))
        .unwrap();

    service.delete_technology(technology.id).unwrap();

    assert_eq!(count(&conn, "technologies"), 0);
    assert_eq!(count(&conn, "abilities"), 1);
    assert_eq!(count(&conn, "subjects"), 1);
}

#[test]
fn delete_project_leaves_subject_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = PortfolioService::new(&conn);

    let subject = service.create_subject(subject_draft("subject")).unwrap();
    let project = service.add_project(subject.id, project_draft("p")).unwrap();

    service.delete_project(project.id).unwrap();

    assert_eq!(count(&conn, "projects"), 0);
    assert_eq!(count(&conn, "subjects"), 1);
}

fn subject_draft(name: &str) -> SubjectDraft {
    SubjectDraft {
        name: name.to_string(),
        icon: "icon".to_string(),
        image: "s.png".to_string(),
    }
}

fn ability_draft(name: &str) -> AbilityDraft {
    AbilityDraft {
        name: name.to_string(),
        color: "blue".to_string(),
        image: "a.png".to_string(),
    }
}

fn technology_draft(name: &str) -> TechnologyDraft {
    TechnologyDraft {
        name: name.to_string(),
        image: "t.png".to_string(),
    }
}

fn project_draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        description: "description".to_string(),
        image: "p.png".to_string(),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
