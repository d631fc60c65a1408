//! Configuration scenarios

use keyguard::{Command, Executor, KeyguardConfig, StatusCode};
use serde_json::json;

use crate::common::*;

#[test]
fn seeded_users_are_listed() {
    let config = KeyguardConfig::from_toml_str(
        r#"
[[seed_users]]
name = "John Doe"
email = "john.doe@example.com"

[[seed_users]]
name = "Jane Smith"
email = "jane.smith@example.com"
"#,
    )
    .unwrap();
    let executor = Executor::open(config).unwrap();

    let list = executor.respond(Command::UserList);
    let users = body(&list).as_array().unwrap().clone();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["name"], "Jane Smith");

    let next = create_user(&executor, "C", "c@x.com");
    assert_eq!(body(&next)["id"], 2);
}

#[test]
fn strict_policy_requires_if_match() {
    let config = KeyguardConfig::from_toml_str("version_policy = \"strict\"").unwrap();
    let executor = Executor::open(config).unwrap();
    create_task(&executor, "a");

    assert_eq!(toggle(&executor, "0", None).status, StatusCode::BadRequest);
    assert_eq!(toggle(&executor, "0", Some("\"1\"")).status, StatusCode::Ok);

    let update = executor.respond(Command::UserUpdate {
        id: "0".into(),
        payload: json!({"name": "B", "email": "b@x.com"}),
        if_match: None,
    });
    assert_eq!(update.status, StatusCode::NotFound);
}

#[test]
fn status_reports_counters() {
    let executor = Executor::ephemeral();
    create_task(&executor, "a");
    toggle(&executor, "0", None);
    toggle(&executor, "0", Some("1"));

    let status = executor.respond(Command::Status);
    let info = body(&status);
    assert_eq!(info["requestCount"], 4);
    assert_eq!(info["tasks"], 1);
    assert_eq!(info["taskMutations"]["committed"], 1);
    assert_eq!(info["taskMutations"]["versionConflicts"], 1);
}
