//! Per-view state. Each view owns one state struct whose reducer is a pure
//! function of `(state, action)`; backend calls live in [`commands`].

pub mod commands;
pub mod reminders;
pub mod subscriptions;
pub mod summary;

pub use reminders::RemindersState;
pub use subscriptions::{FormState, SubscriptionsAction, SubscriptionsState};
pub use summary::SummaryState;
