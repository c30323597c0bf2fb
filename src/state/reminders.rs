use std::rc::Rc;
use yew::Reducible;

use crate::models::Reminder;

pub const REMINDERS_REJECTED: &str = "Failed to fetch reminders.";
pub const REMINDERS_UNREACHABLE: &str = "Error connecting to the backend.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemindersState {
    pub reminders: Vec<Reminder>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RemindersAction {
    FetchStarted,
    FetchSucceeded(Vec<Reminder>),
    FetchFailed(String),
}

/// What the reminders view shows, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemindersDisplay {
    Loading,
    Error,
    Empty,
    Table,
}

impl RemindersState {
    pub fn display(&self) -> RemindersDisplay {
        if self.loading {
            RemindersDisplay::Loading
        } else if self.error.is_some() {
            RemindersDisplay::Error
        } else if self.reminders.is_empty() {
            RemindersDisplay::Empty
        } else {
            RemindersDisplay::Table
        }
    }
}

impl Reducible for RemindersState {
    type Action = RemindersAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RemindersAction::FetchStarted => {
                next.loading = true;
                next.error = None;
            }
            RemindersAction::FetchSucceeded(reminders) => {
                next.reminders = reminders;
                next.loading = false;
            }
            RemindersAction::FetchFailed(message) => {
                next.error = Some(message);
                next.loading = false;
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(key: &str) -> Reminder {
        Reminder {
            key: key.to_string(),
            service_name: "Netflix".to_string(),
            renewal_date: None,
            send_date: None,
            sent: false,
            category: None,
            cost: Some(15.49),
        }
    }

    #[test]
    fn fetch_cycle_toggles_loading() {
        let state = Rc::new(RemindersState::default()).reduce(RemindersAction::FetchStarted);
        assert!(state.loading);
        assert_eq!(state.display(), RemindersDisplay::Loading);

        let state = state.reduce(RemindersAction::FetchSucceeded(vec![reminder("1")]));
        assert!(!state.loading);
        assert_eq!(state.display(), RemindersDisplay::Table);
    }

    #[test]
    fn empty_result_shows_empty_state() {
        let state = Rc::new(RemindersState::default())
            .reduce(RemindersAction::FetchStarted)
            .reduce(RemindersAction::FetchSucceeded(Vec::new()));
        assert_eq!(state.display(), RemindersDisplay::Empty);
    }

    #[test]
    fn refetch_clears_previous_error() {
        let state = Rc::new(RemindersState::default())
            .reduce(RemindersAction::FetchFailed(REMINDERS_REJECTED.to_string()));
        assert_eq!(state.display(), RemindersDisplay::Error);

        let state = state.reduce(RemindersAction::FetchStarted);
        assert_eq!(state.error, None);
    }
}
