//! # Domain Model
//!
//! Pure data: the status enumeration and transition table, the status-change
//! record and its append-only history, and the chat-session types. No I/O
//! here; everything is trivially unit-testable.

pub mod chat;
pub mod event;
pub mod history;
pub mod status;

pub use chat::{ChatMessage, ChatRole, SessionId};
pub use event::{OrderId, StatusEvent};
pub use history::StatusHistory;
pub use status::{OrderStatus, TransitionRejection, UnknownStatus, ALL_STATUSES};
