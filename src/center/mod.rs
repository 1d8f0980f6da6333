//! The notification center: a stateful panel, a polled unread indicator,
//! and the pure entry renderer they share. Siblings communicate by
//! injected channel, not shared state — the panel signals the indicator
//! after each successful mutation.

pub mod entry;
pub mod indicator;
pub mod panel;
