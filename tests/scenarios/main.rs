//! End-to-end scenarios through the public `keyguard` API
//!
//! Each module drives the store the way a transport adapter would: commands
//! in, status codes and JSON bodies out.

mod common;

mod concurrency;
mod config;
mod tasks;
mod users;
