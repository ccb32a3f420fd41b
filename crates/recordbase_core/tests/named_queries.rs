mod common;

use common::{open_fixture_db, Person};
use recordbase_core::{CrudRepository, RepoError};
use rusqlite::types::Value;

fn seed_people(repo: &CrudRepository<'_, Person>) {
    for (name, born_on) in [("Ada", 1_000), ("Grace", 2_000), ("Edsger", 3_000)] {
        let mut person = Person::new(name);
        person.born_on = Some(born_on);
        repo.create(&mut person).unwrap();
    }
}

#[test]
fn list_named_query_binds_parameters() {
    let conn = open_fixture_db();
    let repo = CrudRepository::<Person>::new(&conn);
    seed_people(&repo);

    let hits: Vec<Person> = repo
        .execute_list_named_query("person.born_after", &[(":min_born", Value::Integer(2_000))])
        .unwrap();

    let names: Vec<&str> = hits.iter().map(|person| person.name.as_str()).collect();
    assert_eq!(names, ["Grace", "Edsger"]);
}

#[test]
fn unknown_named_query_is_rejected() {
    let conn = open_fixture_db();
    let repo = CrudRepository::<Person>::new(&conn);

    let err = repo
        .execute_list_named_query::<Person>("person.no_such_query", &[])
        .unwrap_err();
    assert!(matches!(err, RepoError::UnknownQuery(name) if name == "person.no_such_query"));
}

#[test]
fn single_named_query_returns_exactly_one_row() {
    let conn = open_fixture_db();
    let repo = CrudRepository::<Person>::new(&conn);
    seed_people(&repo);

    let person: Person = repo
        .execute_single_named_query(
            "person.by_exact_name",
            &[(":name", Value::Text("Grace".to_string()))],
        )
        .unwrap();

    assert_eq!(person.name, "Grace");
    assert_eq!(person.born_on, Some(2_000));
}

#[test]
fn single_named_query_with_zero_rows_fails() {
    let conn = open_fixture_db();
    let repo = CrudRepository::<Person>::new(&conn);
    seed_people(&repo);

    let err = repo
        .execute_single_named_query::<Person>(
            "person.by_exact_name",
            &[(":name", Value::Text("nobody".to_string()))],
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Cardinality { rows: 0, .. }));
}

#[test]
fn single_named_query_with_multiple_rows_fails() {
    let conn = open_fixture_db();
    let repo = CrudRepository::<Person>::new(&conn);

    repo.create(&mut Person::new("twin")).unwrap();
    repo.create(&mut Person::new("twin")).unwrap();

    let err = repo
        .execute_single_named_query::<Person>(
            "person.by_exact_name",
            &[(":name", Value::Text("twin".to_string()))],
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Cardinality { rows: 2, .. }));
}
