//! Clients for the services the studio site depends on.
//!
//! - [`realtime`]: the realtime content store (hosted and in-memory).
//! - [`feed`]: live, ordered views of the four content collections.
//! - [`objects`]: binary object storage for project images.
//! - [`identity`]: operator sign-in.
//! - [`upload`]: the external gallery upload endpoint.

pub mod feed;
pub mod identity;
pub mod objects;
pub mod realtime;
pub mod upload;

pub use feed::ContentFeed;
pub use realtime::{ContentStore, MemoryStore, RealtimeDbStore, StoreError, Subscription};
