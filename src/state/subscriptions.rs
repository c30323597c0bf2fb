use chrono::NaiveDate;
use std::rc::Rc;
use yew::Reducible;

use crate::format::pay_locked;
use crate::models::{DraftField, FormMode, Subscription, SubscriptionDraft};

pub const LIST_FAILED: &str = "Failed to fetch subscriptions. Please try again later.";
pub const SAVE_REJECTED: &str = "Failed to save subscription. Please try again.";
pub const SAVE_UNREACHABLE: &str = "Failed to save subscription. Please try again later.";
pub const CANCEL_FAILED: &str = "Failed to cancel subscription. Please try again later.";
pub const PAY_FAILED: &str = "Failed to mark as paid";

/// Client-side list filter. Every empty field matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub category: String,
    pub status: String,
    pub search: String,
}

fn equals_ignore_case(value: Option<&str>, wanted: &str) -> bool {
    wanted.is_empty() || value.is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
}

impl SubscriptionFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        let search = self.search.to_lowercase();
        equals_ignore_case(subscription.category.as_deref(), &self.category)
            && equals_ignore_case(subscription.payment_status.as_deref(), &self.status)
            && (search.is_empty() || subscription.service_name.to_lowercase().contains(&search))
    }

    pub fn apply<'a>(&self, subscriptions: &'a [Subscription]) -> Vec<&'a Subscription> {
        subscriptions.iter().filter(|sub| self.matches(sub)).collect()
    }
}

/// The add/modify modal while it is open.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: SubscriptionDraft,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionsState {
    pub subscriptions: Vec<Subscription>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set while any create, edit, cancel or pay request is in flight.
    pub submitting: bool,
    pub filter: SubscriptionFilter,
    pub form: Option<FormState>,
}

impl Default for SubscriptionsState {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            loading: true,
            error: None,
            submitting: false,
            filter: SubscriptionFilter::default(),
            form: None,
        }
    }
}

/// What the list area of the subscriptions view shows, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionsDisplay {
    Loading,
    Empty,
    NoMatches,
    Cards,
}

impl SubscriptionsState {
    pub fn visible(&self) -> Vec<&Subscription> {
        self.filter.apply(&self.subscriptions)
    }

    pub fn display(&self) -> SubscriptionsDisplay {
        if self.loading {
            SubscriptionsDisplay::Loading
        } else if self.subscriptions.is_empty() {
            SubscriptionsDisplay::Empty
        } else if !self.subscriptions.iter().any(|sub| self.filter.matches(sub)) {
            SubscriptionsDisplay::NoMatches
        } else {
            SubscriptionsDisplay::Cards
        }
    }
}

/// Controls on one subscription card. A canceled subscription only gets a
/// badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardActions {
    Canceled,
    Buttons { modify: bool, pay: bool, cancel: bool },
}

pub fn card_actions(
    subscription: &Subscription,
    submitting: bool,
    today: NaiveDate,
) -> CardActions {
    if subscription.canceled {
        return CardActions::Canceled;
    }
    CardActions::Buttons {
        modify: !submitting,
        pay: !submitting
            && subscription.current_instance_id.is_some()
            && !pay_locked(subscription, today),
        cancel: !submitting,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubscriptionsAction {
    FetchStarted,
    FetchSucceeded(Vec<Subscription>),
    FetchFailed(String),
    FilterCategory(String),
    FilterStatus(String),
    Search(String),
    OpenCreate,
    OpenEdit(i64),
    CloseForm,
    EditDraft(DraftField, String),
    SubmitStarted,
    SubmitFailed(String),
    Created(Subscription),
    Updated(Subscription),
    MutationStarted,
    MutationFailed(String),
    MutationFinished,
}

impl Reducible for SubscriptionsState {
    type Action = SubscriptionsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SubscriptionsAction::FetchStarted => next.loading = true,
            SubscriptionsAction::FetchSucceeded(subscriptions) => {
                next.subscriptions = subscriptions;
                next.loading = false;
                next.error = None;
            }
            SubscriptionsAction::FetchFailed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            SubscriptionsAction::FilterCategory(category) => next.filter.category = category,
            SubscriptionsAction::FilterStatus(status) => next.filter.status = status,
            SubscriptionsAction::Search(search) => next.filter.search = search,
            SubscriptionsAction::OpenCreate => {
                next.form = Some(FormState {
                    mode: FormMode::Add,
                    draft: SubscriptionDraft::default(),
                    error: None,
                });
            }
            SubscriptionsAction::OpenEdit(id) => {
                if let Some(existing) = next.subscriptions.iter().find(|sub| sub.id == id) {
                    next.form = Some(FormState {
                        mode: FormMode::Edit(id),
                        draft: SubscriptionDraft::from_subscription(existing),
                        error: None,
                    });
                }
            }
            SubscriptionsAction::CloseForm => next.form = None,
            SubscriptionsAction::EditDraft(field, value) => {
                if let Some(form) = next.form.as_mut() {
                    form.draft.set(field, value);
                }
            }
            SubscriptionsAction::SubmitStarted => {
                next.submitting = true;
                if let Some(form) = next.form.as_mut() {
                    form.error = None;
                }
            }
            SubscriptionsAction::SubmitFailed(message) => {
                next.submitting = false;
                if let Some(form) = next.form.as_mut() {
                    form.error = Some(message);
                }
            }
            SubscriptionsAction::Created(created) => {
                match next.subscriptions.iter_mut().find(|sub| sub.id == created.id) {
                    Some(existing) => *existing = created,
                    None => next.subscriptions.push(created),
                }
                next.submitting = false;
                next.form = None;
            }
            SubscriptionsAction::Updated(updated) => {
                if let Some(existing) = next.subscriptions.iter_mut().find(|sub| sub.id == updated.id) {
                    *existing = updated.inherit_missing(existing);
                }
                next.submitting = false;
                next.form = None;
            }
            SubscriptionsAction::MutationStarted => {
                next.submitting = true;
                next.error = None;
            }
            SubscriptionsAction::MutationFailed(message) => next.error = Some(message),
            SubscriptionsAction::MutationFinished => next.submitting = false,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::subscription;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    const NAMES: [&str; 5] = ["Netflix", "Spotify", "Dropbox", "NYTimes", "iCloud"];
    const CATEGORIES: [&str; 4] = ["Streaming", "streaming", "Cloud Storage", "News"];
    const STATUSES: [&str; 4] = ["pending", "PAID", "overdue", ""];

    #[derive(Clone, Debug)]
    struct Sample {
        subscriptions: Vec<Subscription>,
        filter: SubscriptionFilter,
    }

    impl Arbitrary for Sample {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 12;
            let subscriptions = (0..len)
                .map(|i| {
                    subscription(
                        i as i64,
                        g.choose(&NAMES).copied().unwrap_or("Netflix"),
                        g.choose(&CATEGORIES).copied().unwrap_or("News"),
                        g.choose(&STATUSES).copied().unwrap_or("paid"),
                    )
                })
                .collect();
            let pick = |g: &mut Gen, options: &[&str]| {
                if bool::arbitrary(g) {
                    g.choose(options).copied().unwrap_or_default().to_string()
                } else {
                    String::new()
                }
            };
            let filter = SubscriptionFilter {
                category: pick(g, &CATEGORIES),
                status: pick(g, &STATUSES),
                search: pick(g, &["net", "I", "box", "zzz"]),
            };
            Sample {
                subscriptions,
                filter,
            }
        }
    }

    #[quickcheck]
    fn filtered_list_is_ordered_subset(sample: Sample) -> bool {
        let filtered = sample.filter.apply(&sample.subscriptions);
        let mut remaining = sample.subscriptions.iter();
        filtered
            .iter()
            .all(|kept| remaining.any(|sub| std::ptr::eq(sub, *kept)))
    }

    #[quickcheck]
    fn filtering_is_idempotent(sample: Sample) -> bool {
        let once: Vec<Subscription> = sample
            .filter
            .apply(&sample.subscriptions)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Subscription> = sample.filter.apply(&once).into_iter().cloned().collect();
        once == twice
    }

    #[quickcheck]
    fn empty_filter_keeps_everything(sample: Sample) -> bool {
        SubscriptionFilter::default().apply(&sample.subscriptions).len()
            == sample.subscriptions.len()
    }

    #[test]
    fn category_and_status_match_case_insensitively() {
        let subs = vec![
            subscription(1, "Netflix", "Streaming", "Paid"),
            subscription(2, "Dropbox", "Cloud Storage", "pending"),
        ];
        let filter = SubscriptionFilter {
            category: "streaming".to_string(),
            status: "PAID".to_string(),
            search: String::new(),
        };
        let ids: Vec<i64> = filter.apply(&subs).iter().map(|sub| sub.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn search_is_substring_case_insensitive() {
        let subs = vec![
            subscription(1, "Netflix", "Streaming", "paid"),
            subscription(2, "Dropbox", "Cloud Storage", "pending"),
        ];
        let filter = SubscriptionFilter {
            search: "FLI".to_string(),
            ..SubscriptionFilter::default()
        };
        let ids: Vec<i64> = filter.apply(&subs).iter().map(|sub| sub.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn missing_category_never_matches_a_category_filter() {
        let mut sub = subscription(1, "Netflix", "Streaming", "paid");
        sub.category = None;
        let filter = SubscriptionFilter {
            category: "streaming".to_string(),
            ..SubscriptionFilter::default()
        };
        assert!(!filter.matches(&sub));
    }

    fn loaded(subs: Vec<Subscription>) -> Rc<SubscriptionsState> {
        Rc::new(SubscriptionsState::default()).reduce(SubscriptionsAction::FetchSucceeded(subs))
    }

    #[test]
    fn fetch_replaces_list_and_clears_error() {
        let state = Rc::new(SubscriptionsState::default())
            .reduce(SubscriptionsAction::FetchFailed(LIST_FAILED.to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LIST_FAILED));

        let state = state
            .reduce(SubscriptionsAction::FetchStarted)
            .reduce(SubscriptionsAction::FetchSucceeded(vec![subscription(
                1, "Netflix", "Streaming", "paid",
            )]));
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.subscriptions.len(), 1);
    }

    #[test]
    fn filter_actions_do_not_touch_the_list() {
        let state = loaded(vec![subscription(1, "Netflix", "Streaming", "paid")])
            .reduce(SubscriptionsAction::FilterCategory("news".to_string()));
        assert_eq!(state.subscriptions.len(), 1);
        assert!(state.visible().is_empty());
    }

    #[test]
    fn created_record_appears_exactly_once() {
        let state = loaded(vec![subscription(1, "Netflix", "Streaming", "paid")])
            .reduce(SubscriptionsAction::OpenCreate)
            .reduce(SubscriptionsAction::SubmitStarted)
            .reduce(SubscriptionsAction::Created(subscription(
                42, "Spotify", "Streaming", "pending",
            )));

        assert_eq!(state.form, None);
        assert!(!state.submitting);
        assert_eq!(state.subscriptions.iter().filter(|sub| sub.id == 42).count(), 1);
        assert_eq!(state.subscriptions.last().map(|sub| sub.id), Some(42));

        let state = state.reduce(SubscriptionsAction::Created(subscription(
            42, "Spotify", "Streaming", "pending",
        )));
        assert_eq!(state.subscriptions.len(), 2);
    }

    #[test]
    fn edit_form_is_prefilled_and_update_replaces_one_record() {
        let state = loaded(vec![
            subscription(1, "Netflix", "Streaming", "paid"),
            subscription(2, "Dropbox", "Cloud Storage", "pending"),
        ])
        .reduce(SubscriptionsAction::OpenEdit(2));

        let form = state.form.clone().unwrap();
        assert_eq!(form.mode, FormMode::Edit(2));
        assert_eq!(form.draft.service_name, "Dropbox");
        assert_eq!(form.draft.category, "Cloud Storage");

        let mut updated = subscription(2, "Dropbox Plus", "Cloud Storage", "pending");
        updated.current_instance_id = None;
        let state = state.reduce(SubscriptionsAction::Updated(updated));

        assert_eq!(state.subscriptions.len(), 2);
        assert_eq!(state.subscriptions[0].service_name, "Netflix");
        assert_eq!(state.subscriptions[1].service_name, "Dropbox Plus");
        assert_eq!(state.subscriptions[1].current_instance_id, Some(20));
        assert_eq!(state.form, None);
    }

    #[test]
    fn open_edit_for_unknown_id_is_ignored() {
        let state = loaded(Vec::new()).reduce(SubscriptionsAction::OpenEdit(9));
        assert_eq!(state.form, None);
    }

    #[test]
    fn submit_failure_keeps_form_open_with_message() {
        let state = loaded(Vec::new())
            .reduce(SubscriptionsAction::OpenCreate)
            .reduce(SubscriptionsAction::EditDraft(
                DraftField::ServiceName,
                "Netflix".to_string(),
            ))
            .reduce(SubscriptionsAction::SubmitStarted)
            .reduce(SubscriptionsAction::SubmitFailed(
                "Cost must be positive".to_string(),
            ));

        let form = state.form.clone().unwrap();
        assert_eq!(form.error.as_deref(), Some("Cost must be positive"));
        assert_eq!(form.draft.service_name, "Netflix");
        assert!(!state.submitting);

        let state = state.reduce(SubscriptionsAction::SubmitStarted);
        assert_eq!(state.form.as_ref().and_then(|f| f.error.clone()), None);
    }

    #[test]
    fn display_follows_load_and_filter_state() {
        assert_eq!(SubscriptionsState::default().display(), SubscriptionsDisplay::Loading);
        assert_eq!(loaded(Vec::new()).display(), SubscriptionsDisplay::Empty);

        let state = loaded(vec![subscription(1, "Netflix", "Streaming", "paid")]);
        assert_eq!(state.display(), SubscriptionsDisplay::Cards);

        let state = state.reduce(SubscriptionsAction::Search("zzz".to_string()));
        assert_eq!(state.display(), SubscriptionsDisplay::NoMatches);
    }

    #[test]
    fn empty_list_stays_empty_whatever_the_filter() {
        let state = loaded(Vec::new()).reduce(SubscriptionsAction::FilterStatus("paid".to_string()));
        assert_eq!(state.display(), SubscriptionsDisplay::Empty);
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn canceled_card_has_no_buttons() {
        let mut sub = subscription(1, "Netflix", "Streaming", "paid");
        sub.canceled = true;
        assert_eq!(card_actions(&sub, false, day(2026, 10, 17)), CardActions::Canceled);
        assert_eq!(card_actions(&sub, true, day(2026, 12, 1)), CardActions::Canceled);
    }

    #[test]
    fn pay_needs_idle_instance_and_ended_period() {
        // Fixture period ends 2026-10-17.
        let sub = subscription(1, "Netflix", "Streaming", "pending");
        let on_end = day(2026, 10, 17);

        assert_eq!(
            card_actions(&sub, false, on_end),
            CardActions::Buttons { modify: true, pay: true, cancel: true }
        );
        assert_eq!(
            card_actions(&sub, false, day(2026, 10, 16)),
            CardActions::Buttons { modify: true, pay: false, cancel: true }
        );
        assert_eq!(
            card_actions(&sub, true, on_end),
            CardActions::Buttons { modify: false, pay: false, cancel: false }
        );

        let mut without_instance = sub.clone();
        without_instance.current_instance_id = None;
        assert_eq!(
            card_actions(&without_instance, false, on_end),
            CardActions::Buttons { modify: true, pay: false, cancel: true }
        );
    }

    #[test]
    fn mutation_holds_the_shared_lock() {
        let state = loaded(Vec::new())
            .reduce(SubscriptionsAction::MutationFailed(CANCEL_FAILED.to_string()))
            .reduce(SubscriptionsAction::MutationStarted);
        assert!(state.submitting);
        assert_eq!(state.error, None);

        let state = state.reduce(SubscriptionsAction::MutationFinished);
        assert!(!state.submitting);
    }
}
