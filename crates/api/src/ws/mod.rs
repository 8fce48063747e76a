//! Live content push over WebSocket.

pub mod live;

pub use live::live_handler;
