//! Concurrency scenarios through the executor
//!
//! A gate hook parks the first mutator of one id inside its critical
//! section so the test can act while the key lock is held.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use keyguard::{Command, Database, Executor, KeyguardConfig, RecordId, StatusCode};
use keyguard_concurrency::MutationHook;
use serde_json::json;

use crate::common::*;

struct Gate {
    target: RecordId,
    armed: AtomicBool,
    entered: Barrier,
    resume: Barrier,
}

impl MutationHook for Gate {
    fn on_locked(&self, id: RecordId) {
        if id == self.target && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.resume.wait();
        }
    }
}

fn gated_executor(target: u64) -> (Arc<Executor>, Arc<Gate>) {
    let gate = Arc::new(Gate {
        target: RecordId::new(target),
        armed: AtomicBool::new(true),
        entered: Barrier::new(2),
        resume: Barrier::new(2),
    });
    let hook: Arc<dyn MutationHook> = Arc::clone(&gate) as Arc<dyn MutationHook>;
    let db = Database::open_with_hook(KeyguardConfig::default(), hook).unwrap();
    (Arc::new(Executor::new(Arc::new(db))), gate)
}

#[test]
fn second_toggle_while_held_is_409_then_succeeds_after() {
    let (executor, gate) = gated_executor(0);
    create_task(&executor, "buy milk");

    let first = {
        let executor = Arc::clone(&executor);
        thread::spawn(move || toggle(&executor, "0", None))
    };

    gate.entered.wait();
    let blocked = toggle(&executor, "0", None);
    assert_eq!(blocked.status, StatusCode::Conflict);
    gate.resume.wait();

    let committed = first.join().unwrap();
    assert_eq!(body(&committed)["version"], 2);

    let after = toggle(&executor, "0", Some("2"));
    assert_eq!(after.status, StatusCode::Ok);
    assert_eq!(body(&after)["version"], 3);
    assert_eq!(body(&after)["completed"], false);
}

#[test]
fn other_records_commit_while_one_is_held() {
    let (executor, gate) = gated_executor(0);
    create_task(&executor, "held");
    create_task(&executor, "free");
    create_user(&executor, "A", "a@x.com");

    let parked = {
        let executor = Arc::clone(&executor);
        thread::spawn(move || toggle(&executor, "0", None))
    };

    gate.entered.wait();
    assert_eq!(toggle(&executor, "1", None).status, StatusCode::Ok);
    assert_eq!(create_task(&executor, "new").status, StatusCode::Created);
    gate.resume.wait();

    assert_eq!(parked.join().unwrap().status, StatusCode::Ok);
    assert_eq!(list_tasks(&executor, Some("true")).len(), 2);
}

#[test]
fn user_deleted_mid_update_is_404() {
    let (executor, gate) = gated_executor(0);
    create_user(&executor, "A", "a@x.com");

    let updater = {
        let executor = Arc::clone(&executor);
        thread::spawn(move || {
            executor.respond(Command::UserUpdate {
                id: "0".into(),
                payload: json!({"name": "B", "email": "b@x.com"}),
                if_match: None,
            })
        })
    };

    gate.entered.wait();
    let deleted = executor.respond(Command::UserDelete { id: "0".into() });
    assert_eq!(deleted.status, StatusCode::NoContent);
    gate.resume.wait();

    assert_eq!(updater.join().unwrap().status, StatusCode::NotFound);
    let locks = executor.database().users().coordinator().locks();
    assert_eq!(locks.held_count(), 0);
}

#[test]
fn retrying_clients_never_lose_updates() {
    let executor = Arc::new(Executor::ephemeral());
    create_task(&executor, "contended");

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                let mut committed = 0;
                while committed < 30 {
                    let current = executor.respond(Command::TaskGet { id: "0".into() });
                    let version = body(&current)["version"].to_string();
                    match toggle(&executor, "0", Some(&version)).status {
                        StatusCode::Ok => committed += 1,
                        StatusCode::Conflict => continue,
                        other => panic!("unexpected status {}", other),
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let task = executor.respond(Command::TaskGet { id: "0".into() });
    assert_eq!(body(&task)["version"], 181);
    assert_eq!(body(&task)["completed"], false);
}
