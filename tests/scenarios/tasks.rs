//! Task scenarios

use keyguard::{Command, Executor, StatusCode};

use crate::common::*;

#[test]
fn buy_milk_toggle_then_stale_toggle() {
    let executor = Executor::ephemeral();

    let created = create_task(&executor, "buy milk");
    assert_eq!(created.status, StatusCode::Created);
    let task = body(&created);
    assert_eq!(task["id"], 0);
    assert_eq!(task["title"], "buy milk");
    assert_eq!(task["completed"], false);
    assert_eq!(task["version"], 1);

    let toggled = toggle(&executor, "0", None);
    assert_eq!(toggled.status, StatusCode::Ok);
    assert_eq!(body(&toggled)["id"], 0);
    assert_eq!(body(&toggled)["completed"], true);
    assert_eq!(body(&toggled)["version"], 2);

    let stale = toggle(&executor, "0", Some("1"));
    assert_eq!(stale.status, StatusCode::Conflict);

    let current = executor.respond(Command::TaskGet { id: "0".into() });
    assert_eq!(body(&current)["version"], 2);
    assert_eq!(body(&current)["completed"], true);
}

#[test]
fn delete_completed_keeps_open_tasks() {
    let executor = Executor::ephemeral();
    create_task(&executor, "done");
    create_task(&executor, "open");
    toggle(&executor, "0", None);

    let response = executor.respond(Command::TaskDeleteCompleted);
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(body(&response)["removed"], 1);

    let remaining = list_tasks(&executor, None);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["title"], "open");
}

#[test]
fn filter_returns_exact_subset_in_insertion_order() {
    let executor = Executor::ephemeral();
    for title in ["a", "b", "c", "d", "e"] {
        create_task(&executor, title);
    }
    for id in ["0", "2", "4"] {
        toggle(&executor, id, None);
    }

    let titles = |completed| {
        list_tasks(&executor, completed)
            .into_iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(titles(Some("true")), vec!["a", "c", "e"]);
    assert_eq!(titles(Some("false")), vec!["b", "d"]);
    assert_eq!(titles(Some("maybe")).len(), 5);
}

#[test]
fn ids_are_never_reused() {
    let executor = Executor::ephemeral();
    create_task(&executor, "a");
    toggle(&executor, "0", None);
    executor.respond(Command::TaskDeleteCompleted);

    let next = create_task(&executor, "b");
    assert_eq!(body(&next)["id"], 1);
}

#[test]
fn bad_input_is_rejected_without_side_effects() {
    let executor = Executor::ephemeral();
    assert_eq!(create_task(&executor, "").status, StatusCode::BadRequest);
    assert_eq!(toggle(&executor, "x1", None).status, StatusCode::BadRequest);
    assert_eq!(toggle(&executor, "0", None).status, StatusCode::NotFound);
    assert!(list_tasks(&executor, None).is_empty());
}
