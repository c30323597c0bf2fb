use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::{error_banner, icon_close, icon_plus, page_shell, use_backend};
use crate::format::{capitalize, format_date, format_money, payment_status_label, today};
use crate::models::{DraftField, FormMode, Subscription, CATEGORIES, PAYMENT_STATUSES};
use crate::state::commands::{
    cancel_subscription, load_subscriptions, pay_subscription, submit_form,
};
use crate::state::subscriptions::{card_actions, CardActions, SubscriptionsDisplay};
use crate::state::{FormState, SubscriptionsAction, SubscriptionsState};

fn select_value(e: Event) -> String {
    e.target_dyn_into::<HtmlSelectElement>()
        .map(|select| select.value())
        .unwrap_or_default()
}

fn input_value(e: InputEvent) -> String {
    e.target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct SubscriptionCardProps {
    subscription: Subscription,
    submitting: bool,
    on_edit: Callback<i64>,
    on_pay: Callback<(i64, Option<i64>)>,
    on_cancel: Callback<i64>,
}

#[function_component(SubscriptionCard)]
fn subscription_card(props: &SubscriptionCardProps) -> Html {
    let sub = &props.subscription;
    let id = sub.id;
    let instance_id = sub.current_instance_id;
    let actions = card_actions(sub, props.submitting, today());

    let on_edit = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(id))
    };
    let on_pay = {
        let on_pay = props.on_pay.clone();
        Callback::from(move |_: MouseEvent| on_pay.emit((id, instance_id)))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(id))
    };

    html! {
        <div class="bg-[#f8f9fa] p-5 rounded-[10px] border border-border flex justify-between items-center">
            <div class="space-y-1">
                <p class="font-semibold text-foreground">{ sub.service_name.clone() }</p>
                <p class="text-sm text-muted-foreground">{ format!("Due on {}", format_date(sub.period.end)) }</p>
                { match (sub.period.start, sub.period.end) {
                    (Some(start), Some(end)) => html! {
                        <p class="text-sm text-muted-foreground">
                            { format!("Current Period: {} to {}", format_date(Some(start)), format_date(Some(end))) }
                        </p>
                    },
                    _ => html! {},
                } }
                <p class="text-sm text-muted-foreground">{ format!("Payment Status: {}", payment_status_label(sub)) }</p>
                <p class="text-sm text-muted-foreground">{ format!("Category: {}", sub.category_label()) }</p>
                <p class="text-sm text-muted-foreground">{ format!("Cost: {}", format_money(sub.cost)) }</p>
            </div>
            <div class="flex flex-col items-center gap-2">
                { match actions {
                    CardActions::Canceled => html! {
                        <span class="bg-red-100 text-red-700 px-3 py-1 rounded-full text-[10px] font-bold">{"Canceled"}</span>
                    },
                    CardActions::Buttons { modify, pay, cancel } => html! {
                        <>
                            <button onclick={on_edit} disabled={!modify} class="w-24 border border-[#173E63] text-[#173E63] py-1.5 rounded-[10px] text-[11px] font-bold disabled:opacity-40">{"Modify"}</button>
                            <button onclick={on_pay} disabled={!pay} class="w-24 border border-green-700 text-green-700 py-1.5 rounded-[10px] text-[11px] font-bold disabled:opacity-40">{"Pay"}</button>
                            <button onclick={on_cancel} disabled={!cancel} class="w-24 border border-red-600 text-red-600 py-1.5 rounded-[10px] text-[11px] font-bold disabled:opacity-40">{"Cancel"}</button>
                        </>
                    },
                } }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SubscriptionFormProps {
    form: FormState,
    submitting: bool,
    on_change: Callback<(DraftField, String)>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
}

#[function_component(SubscriptionForm)]
fn subscription_form(props: &SubscriptionFormProps) -> Html {
    let editing = matches!(props.form.mode, FormMode::Edit(_));
    let draft = &props.form.draft;

    let field_input = |field: DraftField| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| on_change.emit((field, input_value(e))))
    };
    let on_category = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| on_change.emit((DraftField::Category, select_value(e))))
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| on_submit.emit(()))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title = if editing { "Modify Subscription" } else { "Add a Subscription" };
    let submit_label = match (editing, props.submitting) {
        (true, true) => "Saving...",
        (true, false) => "Save Changes",
        (false, true) => "Adding...",
        (false, false) => "Add Subscription",
    };
    let field_class = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none";

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-white w-full max-w-lg rounded-[10px] shadow-lg p-6 relative">
                <button type="button" onclick={on_close.clone()} aria-label="close" class="absolute right-3 top-3 p-1 rounded-lg hover:bg-muted">
                    { icon_close() }
                </button>
                <h3 class="text-[#1D617A] font-bold text-lg mb-4">{ title }</h3>
                <div class="space-y-3">
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Service Name"}</label>
                        <input type="text" placeholder="e.g. Netflix, Spotify" autocomplete="off"
                            value={draft.service_name.clone()} oninput={field_input(DraftField::ServiceName)}
                            disabled={props.submitting} class={field_class} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Cost ($)"}</label>
                        <input type="number" min="0" step="0.01" placeholder="Monthly cost"
                            value={draft.cost.clone()} oninput={field_input(DraftField::Cost)}
                            disabled={props.submitting} class={field_class} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                        <select value={draft.category.clone()} onchange={on_category} disabled={props.submitting} class={field_class}>
                            <option value="" selected={draft.category.is_empty()}>{"Select a category"}</option>
                            { for CATEGORIES.iter().map(|category| html! {
                                <option value={*category} selected={draft.category == *category}>{ *category }</option>
                            }) }
                        </select>
                    </div>
                    { if editing {
                        html! {}
                    } else {
                        html! {
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Renewal Date"}</label>
                                <input type="date" value={draft.renewal_date.clone()} oninput={field_input(DraftField::RenewalDate)}
                                    disabled={props.submitting} class={field_class} />
                            </div>
                        }
                    } }
                    { error_banner(&props.form.error) }
                    <div class="flex gap-3 pt-2">
                        <button type="button" onclick={on_close} disabled={props.submitting} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[11px] font-bold">{"Cancel"}</button>
                        <button type="button" onclick={on_submit} disabled={props.submitting} class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[11px] font-bold">{ submit_label }</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[function_component(SubscriptionsPage)]
pub fn subscriptions_page() -> Html {
    let backend = use_backend();
    let state = use_reducer(SubscriptionsState::default);

    {
        let backend = backend.clone();
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    load_subscriptions(&backend, &|action| state.dispatch(action)).await;
                });
                || ()
            },
            (),
        );
    }

    let on_filter_category = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            state.dispatch(SubscriptionsAction::FilterCategory(select_value(e)))
        })
    };
    let on_filter_status = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            state.dispatch(SubscriptionsAction::FilterStatus(select_value(e)))
        })
    };
    let on_search = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| state.dispatch(SubscriptionsAction::Search(input_value(e))))
    };

    let on_open_create = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(SubscriptionsAction::OpenCreate))
    };
    let on_edit = {
        let state = state.clone();
        Callback::from(move |id: i64| state.dispatch(SubscriptionsAction::OpenEdit(id)))
    };
    let on_close = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(SubscriptionsAction::CloseForm))
    };
    let on_change = {
        let state = state.clone();
        Callback::from(move |(field, value): (DraftField, String)| {
            state.dispatch(SubscriptionsAction::EditDraft(field, value))
        })
    };

    let on_submit = {
        let backend = backend.clone();
        let state = state.clone();
        Callback::from(move |_: ()| {
            if state.submitting {
                return;
            }
            let Some(form) = state.form.clone() else {
                return;
            };
            let backend = backend.clone();
            let state = state.clone();
            spawn_local(async move {
                submit_form(&backend, &form, &|action| state.dispatch(action)).await;
            });
        })
    };

    let on_cancel = {
        let backend = backend.clone();
        let state = state.clone();
        Callback::from(move |id: i64| {
            if state.submitting {
                return;
            }
            let backend = backend.clone();
            let state = state.clone();
            spawn_local(async move {
                cancel_subscription(&backend, id, &|action| state.dispatch(action)).await;
            });
        })
    };

    let on_pay = {
        let backend = backend.clone();
        let state = state.clone();
        Callback::from(move |(id, instance_id): (i64, Option<i64>)| {
            if state.submitting {
                return;
            }
            let backend = backend.clone();
            let state = state.clone();
            spawn_local(async move {
                pay_subscription(&backend, id, instance_id, &|action| state.dispatch(action)).await;
            });
        })
    };

    let modal = match state.form.clone() {
        Some(form) => html! {
            <SubscriptionForm
                form={form}
                submitting={state.submitting}
                on_change={on_change}
                on_submit={on_submit}
                on_close={on_close}
            />
        },
        None => html! {},
    };

    let display = state.display();
    if display == SubscriptionsDisplay::Loading {
        return html! {
            <>
                { error_banner(&state.error) }
                <p class="mt-6 text-sm text-muted-foreground">{"Loading subscriptions..."}</p>
                { modal }
            </>
        };
    }

    let visible = state.visible();
    let select_class = "min-w-[220px] bg-[#f1f4f9] border-2 border-transparent rounded-[10px] px-3 py-2 text-[12px] focus:ring-2 focus:ring-[#1D617A] outline-none";

    html! {
        <>
            { page_shell(
                "Your Subscriptions",
                html! {
                    <button onclick={on_open_create} class="flex items-center gap-2 bg-green-700 text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_plus() }
                        {"Add Subscription"}
                    </button>
                },
                html! {
                    <>
                        { error_banner(&state.error) }
                        <div class="flex flex-col sm:flex-row gap-3">
                            <select value={state.filter.category.clone()} onchange={on_filter_category} class={select_class}>
                                <option value="">{"All categories"}</option>
                                { for CATEGORIES.iter().map(|category| {
                                    let value = category.to_lowercase();
                                    let selected = state.filter.category == value;
                                    html! {
                                        <option selected={selected} value={value}>{ *category }</option>
                                    }
                                }) }
                            </select>
                            <select value={state.filter.status.clone()} onchange={on_filter_status} class={select_class}>
                                <option value="">{"All statuses"}</option>
                                { for PAYMENT_STATUSES.iter().map(|status| html! {
                                    <option selected={state.filter.status == *status} value={*status}>{ capitalize(status) }</option>
                                }) }
                            </select>
                            <input type="text" placeholder="Search subscriptions..." value={state.filter.search.clone()}
                                oninput={on_search} class={select_class} />
                        </div>
                        { match display {
                            SubscriptionsDisplay::Loading => html! {},
                            SubscriptionsDisplay::Empty => html! {
                                <p class="text-sm text-muted-foreground">{"No subscriptions found."}</p>
                            },
                            SubscriptionsDisplay::NoMatches => html! {
                                <p class="text-sm text-muted-foreground">{"No subscriptions match the current filters."}</p>
                            },
                            SubscriptionsDisplay::Cards => html! {
                                <div class="space-y-3">
                                    { for visible.into_iter().map(|sub| html! {
                                        <SubscriptionCard
                                            key={sub.id}
                                            subscription={sub.clone()}
                                            submitting={state.submitting}
                                            on_edit={on_edit.clone()}
                                            on_pay={on_pay.clone()}
                                            on_cancel={on_cancel.clone()}
                                        />
                                    }) }
                                </div>
                            }
                        } }
                    </>
                },
            ) }
            { modal }
        </>
    }
}
