//! Backend round trips. Each command reports progress and outcome only by
//! dispatching actions, so the reducers stay the single source of state.

use log::{info, warn};

use crate::api::Backend;
use crate::models::FormMode;
use crate::state::reminders::{RemindersAction, REMINDERS_REJECTED, REMINDERS_UNREACHABLE};
use crate::state::subscriptions::{
    FormState, SubscriptionsAction, CANCEL_FAILED, LIST_FAILED, PAY_FAILED, SAVE_REJECTED,
    SAVE_UNREACHABLE,
};
use crate::state::summary::{SummaryAction, SUMMARY_REJECTED, SUMMARY_UNREACHABLE};

pub async fn load_summary<B, D>(backend: &B, dispatch: &D)
where
    B: Backend + ?Sized,
    D: Fn(SummaryAction),
{
    match backend.summary().await {
        Ok(summary) => dispatch(SummaryAction::Loaded(summary)),
        Err(err) => dispatch(SummaryAction::Failed(
            err.user_message(SUMMARY_REJECTED, SUMMARY_UNREACHABLE),
        )),
    }
}

pub async fn load_reminders<B, D>(backend: &B, dispatch: &D)
where
    B: Backend + ?Sized,
    D: Fn(RemindersAction),
{
    dispatch(RemindersAction::FetchStarted);
    match backend.reminders().await {
        Ok(reminders) => dispatch(RemindersAction::FetchSucceeded(reminders)),
        Err(err) => {
            let message = if err.is_network() {
                REMINDERS_UNREACHABLE
            } else {
                REMINDERS_REJECTED
            };
            dispatch(RemindersAction::FetchFailed(message.to_string()))
        }
    }
}

pub async fn load_subscriptions<B, D>(backend: &B, dispatch: &D)
where
    B: Backend + ?Sized,
    D: Fn(SubscriptionsAction),
{
    dispatch(SubscriptionsAction::FetchStarted);
    match backend.subscriptions().await {
        Ok(subscriptions) => dispatch(SubscriptionsAction::FetchSucceeded(subscriptions)),
        Err(err) => {
            warn!("loading subscriptions failed: {}", err);
            dispatch(SubscriptionsAction::FetchFailed(LIST_FAILED.to_string()))
        }
    }
}

/// Validates the open form and sends it as a create or an edit.
pub async fn submit_form<B, D>(backend: &B, form: &FormState, dispatch: &D)
where
    B: Backend + ?Sized,
    D: Fn(SubscriptionsAction),
{
    let outcome = match form.mode {
        FormMode::Add => {
            let payload = match form.draft.to_new_subscription() {
                Ok(payload) => payload,
                Err(message) => return dispatch(SubscriptionsAction::SubmitFailed(message)),
            };
            dispatch(SubscriptionsAction::SubmitStarted);
            backend
                .create_subscription(&payload)
                .await
                .map(SubscriptionsAction::Created)
        }
        FormMode::Edit(id) => {
            let payload = match form.draft.to_patch() {
                Ok(payload) => payload,
                Err(message) => return dispatch(SubscriptionsAction::SubmitFailed(message)),
            };
            dispatch(SubscriptionsAction::SubmitStarted);
            backend
                .update_subscription(id, &payload)
                .await
                .map(SubscriptionsAction::Updated)
        }
    };

    match outcome {
        Ok(action) => {
            info!("saved subscription ({:?})", form.mode);
            dispatch(action)
        }
        Err(err) => dispatch(SubscriptionsAction::SubmitFailed(
            err.user_message(SAVE_REJECTED, SAVE_UNREACHABLE),
        )),
    }
}

/// Cancels, then reloads the whole list whenever the server answered.
pub async fn cancel_subscription<B, D>(backend: &B, id: i64, dispatch: &D)
where
    B: Backend + ?Sized,
    D: Fn(SubscriptionsAction),
{
    dispatch(SubscriptionsAction::MutationStarted);
    let outcome = backend.cancel_subscription(id).await;

    let answered = match &outcome {
        Ok(()) => true,
        Err(err) => err.server_responded(),
    };
    if answered {
        load_subscriptions(backend, dispatch).await;
    }

    match outcome {
        Ok(()) => info!("canceled subscription {}", id),
        Err(err) => {
            warn!("cancel of subscription {} failed: {}", id, err);
            dispatch(SubscriptionsAction::MutationFailed(CANCEL_FAILED.to_string()));
        }
    }
    dispatch(SubscriptionsAction::MutationFinished);
}

/// Marks the current billing period paid, then reloads the whole list.
pub async fn pay_subscription<B, D>(
    backend: &B,
    id: i64,
    instance_id: Option<i64>,
    dispatch: &D,
) where
    B: Backend + ?Sized,
    D: Fn(SubscriptionsAction),
{
    let Some(instance_id) = instance_id else {
        warn!("subscription {} has no current billing period to pay", id);
        return dispatch(SubscriptionsAction::MutationFailed(PAY_FAILED.to_string()));
    };

    dispatch(SubscriptionsAction::MutationStarted);
    match backend.pay_instance(id, instance_id).await {
        Ok(()) => {
            info!("paid period {} of subscription {}", instance_id, id);
            load_subscriptions(backend, dispatch).await;
        }
        Err(err) => {
            let message = err.server_error().unwrap_or(PAY_FAILED).to_string();
            dispatch(SubscriptionsAction::MutationFailed(message));
        }
    }
    dispatch(SubscriptionsAction::MutationFinished);
}
