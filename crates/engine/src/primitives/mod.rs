//! Record services
//!
//! - **TaskService**: to-do items with a guarded `toggle`
//! - **UserService**: user profiles with a guarded `update`
//!
//! Each service owns a `RecordStore` and a `MutationCoordinator` behind
//! `Arc`s, so clones are handles onto the same state. Reads go straight to
//! the store; guarded mutations go through the coordinator.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::UserService;
