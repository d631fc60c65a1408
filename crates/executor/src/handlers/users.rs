//! User command handlers.

use keyguard_core::{parse_expected_version, UserProfile};
use keyguard_engine::Database;
use serde_json::Value;

use super::parse_id;
use crate::{Error, Output, Result};

fn invalid_body() -> Error {
    Error::InvalidInput {
        reason: "invalid request body".to_string(),
    }
}

/// Pull `name` and `email` out of an object body.
///
/// Missing or non-text fields come back empty so the service's own
/// validation reports them.
fn profile_from_payload(payload: &Value) -> Option<UserProfile> {
    let object = payload.as_object()?;
    let field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(UserProfile::new(field("name"), field("email")))
}

pub(crate) fn user_create(db: &Database, payload: &Value) -> Result<Output> {
    let profile = profile_from_payload(payload).ok_or_else(invalid_body)?;
    Ok(Output::User(db.users().create(profile)?))
}

pub(crate) fn user_list(db: &Database) -> Result<Output> {
    Ok(Output::Users(db.users().list()))
}

pub(crate) fn user_get(db: &Database, id: &str) -> Result<Output> {
    let id = parse_id(id)?;
    Ok(Output::User(db.users().get(id)?))
}

pub(crate) fn user_update(
    db: &Database,
    id: &str,
    payload: &Value,
    if_match: Option<&str>,
) -> Result<Output> {
    let id = parse_id(id)?;
    let Some(profile) = profile_from_payload(payload) else {
        // A missing user outranks a bad body.
        db.users().get(id)?;
        return Err(invalid_body());
    };
    let expected = parse_expected_version(if_match);
    Ok(Output::User(db.users().update(id, profile, expected)?))
}

pub(crate) fn user_delete(db: &Database, id: &str) -> Result<Output> {
    let id = parse_id(id)?;
    db.users().delete(id)?;
    Ok(Output::Unit)
}
