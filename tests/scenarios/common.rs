//! Shared helpers for scenario tests

use keyguard::{Command, Executor, Response};
use serde_json::{json, Value};

pub fn create_task(executor: &Executor, title: &str) -> Response {
    executor.respond(Command::TaskCreate {
        payload: json!({ "title": title }),
    })
}

pub fn toggle(executor: &Executor, id: &str, if_match: Option<&str>) -> Response {
    executor.respond(Command::TaskToggle {
        id: id.to_string(),
        if_match: if_match.map(str::to_string),
    })
}

pub fn list_tasks(executor: &Executor, completed: Option<&str>) -> Vec<Value> {
    let response = executor.respond(Command::TaskList {
        completed: completed.map(str::to_string),
    });
    match response.body {
        Some(Value::Array(items)) => items,
        other => panic!("expected array body, got {:?}", other),
    }
}

pub fn create_user(executor: &Executor, name: &str, email: &str) -> Response {
    executor.respond(Command::UserCreate {
        payload: json!({ "name": name, "email": email }),
    })
}

pub fn body(response: &Response) -> &Value {
    response.body.as_ref().expect("response has a body")
}
