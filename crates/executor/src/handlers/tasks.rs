//! Task command handlers.

use keyguard_core::parse_expected_version;
use keyguard_engine::Database;
use serde_json::Value;

use super::parse_id;
use crate::{Error, Output, Result};

/// `"true"` and `"false"` filter; any other token lists everything.
pub(crate) fn parse_completed_filter(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

pub(crate) fn task_create(db: &Database, payload: &Value) -> Result<Output> {
    let title = payload
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidInput {
            reason: "title is required and must be a string".to_string(),
        })?;
    Ok(Output::Task(db.tasks().create(title)?))
}

pub(crate) fn task_list(db: &Database, completed: Option<&str>) -> Result<Output> {
    Ok(Output::Tasks(
        db.tasks().list(parse_completed_filter(completed)),
    ))
}

pub(crate) fn task_get(db: &Database, id: &str) -> Result<Output> {
    let id = parse_id(id)?;
    Ok(Output::Task(db.tasks().get(id)?))
}

pub(crate) fn task_toggle(db: &Database, id: &str, if_match: Option<&str>) -> Result<Output> {
    let id = parse_id(id)?;
    let expected = parse_expected_version(if_match);
    Ok(Output::Task(db.tasks().toggle(id, expected)?))
}

pub(crate) fn task_delete_completed(db: &Database) -> Result<Output> {
    Ok(Output::Removed {
        count: db.tasks().delete_completed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_tokens() {
        assert_eq!(parse_completed_filter(Some("true")), Some(true));
        assert_eq!(parse_completed_filter(Some("false")), Some(false));
        assert_eq!(parse_completed_filter(Some("TRUE")), None);
        assert_eq!(parse_completed_filter(Some("1")), None);
        assert_eq!(parse_completed_filter(None), None);
    }

    #[test]
    fn create_rejects_non_text_title() {
        let db = Database::ephemeral();
        for payload in [json!({}), json!({"title": 5}), json!({"title": null}), json!("x")] {
            assert!(matches!(
                task_create(&db, &payload),
                Err(Error::InvalidInput { .. })
            ));
        }
        assert_eq!(db.tasks().count(), 0);
    }

    #[test]
    fn toggle_ignores_unparseable_if_match() {
        let db = Database::ephemeral();
        task_create(&db, &json!({"title": "a"})).unwrap();
        let out = task_toggle(&db, "0", Some("abc")).unwrap();
        match out {
            Output::Task(task) => assert!(task.completed),
            other => panic!("unexpected output {:?}", other),
        }
    }
}
