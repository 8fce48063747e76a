//! Domain model and pure logic for the studio site.
//!
//! Nothing in this crate performs I/O. The store crate feeds it raw
//! snapshots; the API crate turns its outputs into HTTP responses.

pub mod catalog;
pub mod collection;
pub mod contact;
pub mod content;
pub mod error;
pub mod forms;
pub mod site;
pub mod types;
