use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{error_banner, icon_refresh, page_shell, use_backend};
use crate::format::{format_date, format_money};
use crate::state::commands::load_reminders;
use crate::state::reminders::RemindersDisplay;
use crate::state::RemindersState;

#[function_component(RemindersPage)]
pub fn reminders_page() -> Html {
    let backend = use_backend();
    let state = use_reducer(RemindersState::default);

    let fetch = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let backend = backend.clone();
            let state = state.clone();
            spawn_local(async move {
                load_reminders(&backend, &|action| state.dispatch(action)).await;
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with_deps(
            move |_| {
                fetch.emit(());
                || ()
            },
            (),
        );
    }

    let on_refresh = {
        let fetch = fetch.clone();
        Callback::from(move |_: MouseEvent| fetch.emit(()))
    };

    let body = match state.display() {
        RemindersDisplay::Loading => html! {
            <p class="text-sm text-muted-foreground">{"Loading reminders..."}</p>
        },
        RemindersDisplay::Error => error_banner(&state.error),
        RemindersDisplay::Empty => html! {
            <p class="text-sm text-muted-foreground">
                {"No reminders found."}<br />
                {"Reminders will appear here automatically for active subscriptions with a future renewal date."}
            </p>
        },
        RemindersDisplay::Table => html! {
            <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-6 py-4 font-bold">{"Service Name"}</th>
                                <th class="px-6 py-4 font-bold">{"Renewal Date"}</th>
                                <th class="px-6 py-4 font-bold">{"Reminder Send Date"}</th>
                                <th class="px-6 py-4 font-bold">{"Sent"}</th>
                                <th class="px-6 py-4 font-bold">{"Category"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Cost"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { for state.reminders.iter().map(|reminder| html! {
                                <tr key={reminder.key.clone()} class="text-sm hover:bg-muted/40 transition-colors">
                                    <td class="px-6 py-4 text-foreground">{ reminder.service_name.clone() }</td>
                                    <td class="px-6 py-4 text-muted-foreground">{ format_date(reminder.renewal_date) }</td>
                                    <td class="px-6 py-4 text-muted-foreground">{ format_date(reminder.send_date) }</td>
                                    <td class="px-6 py-4">{ if reminder.sent { "Yes" } else { "No" } }</td>
                                    <td class="px-6 py-4">
                                        <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ reminder.category_label() }</span>
                                    </td>
                                    <td class="px-6 py-4 text-right font-semibold text-foreground">
                                        { reminder.cost.map(format_money).unwrap_or_default() }
                                    </td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </div>
            </div>
        },
    };

    html! {
        { page_shell(
            "Reminders Not Sent",
            html! {
                <button onclick={on_refresh} disabled={state.loading} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_refresh() }
                    {"Refresh"}
                </button>
            },
            body,
        ) }
    }
}
