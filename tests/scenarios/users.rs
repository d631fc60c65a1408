//! User scenarios

use keyguard::{Command, Executor, StatusCode};
use serde_json::json;

use crate::common::*;

#[test]
fn create_update_delete_user() {
    let executor = Executor::ephemeral();

    let created = create_user(&executor, "A", "a@x.com");
    assert_eq!(created.status, StatusCode::Created);
    assert_eq!(body(&created)["id"], 0);
    assert_eq!(body(&created)["version"], 1);

    let updated = executor.respond(Command::UserUpdate {
        id: "0".into(),
        payload: json!({"name": "B", "email": "a@x.com"}),
        if_match: Some("1".into()),
    });
    assert_eq!(updated.status, StatusCode::Ok);
    assert_eq!(body(&updated)["version"], 2);
    assert_eq!(body(&updated)["name"], "B");

    let deleted = executor.respond(Command::UserDelete { id: "0".into() });
    assert_eq!(deleted.status, StatusCode::NoContent);

    let missing = executor.respond(Command::UserGet { id: "0".into() });
    assert_eq!(missing.status, StatusCode::NotFound);
}

#[test]
fn stale_update_leaves_record_unchanged() {
    let executor = Executor::ephemeral();
    create_user(&executor, "A", "a@x.com");

    let update = |name: &str, if_match: &str| {
        executor.respond(Command::UserUpdate {
            id: "0".into(),
            payload: json!({"name": name, "email": "a@x.com"}),
            if_match: Some(if_match.into()),
        })
    };
    assert_eq!(update("B", "1").status, StatusCode::Ok);
    assert_eq!(update("C", "1").status, StatusCode::Conflict);

    let current = executor.respond(Command::UserGet { id: "0".into() });
    assert_eq!(body(&current)["name"], "B");
    assert_eq!(body(&current)["version"], 2);
}

#[test]
fn missing_fields_are_bad_requests() {
    let executor = Executor::ephemeral();
    assert_eq!(
        create_user(&executor, "", "a@x.com").status,
        StatusCode::BadRequest
    );
    let response = executor.respond(Command::UserCreate {
        payload: json!({"name": "A"}),
    });
    assert_eq!(response.status, StatusCode::BadRequest);

    let list = executor.respond(Command::UserList);
    assert_eq!(body(&list).as_array().unwrap().len(), 0);
}

#[test]
fn task_and_user_ids_are_independent() {
    let executor = Executor::ephemeral();
    create_task(&executor, "a");
    let user = create_user(&executor, "A", "a@x.com");
    assert_eq!(body(&user)["id"], 0);
}
