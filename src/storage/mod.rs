//! Storage layer
//!
//! Tasks persist as UTF-8 text, one task per line, fields joined by
//! `" | "`:
//!
//! ```text
//! T | 1 | buy milk | grocery,urgent
//! D | 0 | submit report | Dec 25 2023 23:59:59 |
//! E | 0 | standup | Dec 25 2023 10:00:00 | Dec 25 2023 10:15:00 | work
//! ```
//!
//! Dates are stored in the readable display format and converted back to
//! the ISO input format on load, so every loaded date passes the same
//! validation as a typed one. Lines that fail to decode are skipped with a
//! report; a missing or unreadable file loads as an empty list. Saves
//! rewrite the whole file atomically.

mod codec;
mod store;

pub use codec::{decode, encode, CodecError};
pub use store::{LoadOutcome, TaskStore};
