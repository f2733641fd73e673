//! Integration tests for entity-type reconciliation

use polyner::core::kb::{post_process_type, DomainTypeMapping, KnowledgeTables, LinkedEntity, TypeReconciler};
use std::io::Write;

#[test]
fn test_penguin_classics_is_always_an_edition() {
    for (candidate, title) in [("Q5", "anything"), ("unk", "novel"), ("Q15087423", "")] {
        assert_eq!(
            post_process_type("Q1336200", candidate, title, &["books"]),
            "Q57933693"
        );
    }
}

#[test]
fn test_spotify_musical_group_is_a_person() {
    assert_eq!(post_process_type("Q1299", "Q215380", "musical group", &["spotify"]), "Q5");
    assert_eq!(post_process_type("Q1", "Q2", "musical group", &["spotify"]), "Q5");
}

#[test]
fn test_last_active_domain_wins() {
    let title = "song";
    assert_eq!(post_process_type("Q2", "Q3", title, &["spotify", "books"]), "Q571");
    assert_eq!(post_process_type("Q2", "Q3", title, &["books", "spotify"]), "Q7366");
}

#[test]
fn test_domains_without_rules_pass_through() {
    assert_eq!(post_process_type("Q2", "Q3", "song", &["music", "weather"]), "Q3");
    assert_eq!(post_process_type::<&str>("Q2", "Q3", "song", &[]), "Q3");
}

#[test]
fn test_retain_with_custom_mapping() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"books": {{"Book": "Q571", "Person": "Q5"}}}}"#).unwrap();
    let tables = KnowledgeTables::with_domain_types_file(file.path()).unwrap();

    let entities = vec![
        LinkedEntity::new("Q8337", "Q7725634", "literary work"),
        LinkedEntity::new("Q34660", "Q36180", "writer"),
        LinkedEntity::new("Q90", "Q515", "city"),
    ];
    let kept = TypeReconciler::new().retain_domain_entities(&entities, &tables.domain_types, &["books"]);

    assert_eq!(
        kept,
        vec![
            LinkedEntity::new("Q8337", "Q571", "literary work"),
            LinkedEntity::new("Q34660", "Q5", "writer"),
        ]
    );
}

#[test]
fn test_builtin_tables() {
    let tables = KnowledgeTables::builtin().unwrap();
    assert!(tables.domain_types.contains("spotify"));
    assert!(tables.banned.is_banned("yesterday"));
    assert_eq!(
        DomainTypeMapping::builtin().type_id("music", "MusicAlbum"),
        Some("Q208569")
    );
}
