use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{error_banner, icon_bar_chart, icon_calendar, icon_credit_card, page_shell, use_backend};
use crate::format::format_money;
use crate::state::commands::load_summary;
use crate::state::SummaryState;

#[derive(Clone, Copy, PartialEq)]
enum StatIcon {
    Monthly,
    Annual,
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    amount: f64,
    icon: StatIcon,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-3xl font-bold text-[#1D617A] tracking-tight">{ format_money(props.amount) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::Monthly => icon_credit_card(),
                        StatIcon::Annual => icon_calendar(),
                    }
                }
            </div>
        </div>
    }
}

#[function_component(SummaryPage)]
pub fn summary_page() -> Html {
    let backend = use_backend();
    let state = use_reducer(SummaryState::default);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    load_summary(&backend, &|action| state.dispatch(action)).await;
                });
                || ()
            },
            (),
        );
    }

    if state.error.is_some() {
        return error_banner(&state.error);
    }
    let Some(summary) = state.summary.as_ref() else {
        return html! {};
    };

    html! {
        { page_shell(
            "Dashboard Summary Overview",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 gap-6">
                        <StatCard title="Total Monthly Cost" amount={summary.total_monthly_cost} icon={StatIcon::Monthly} />
                        <StatCard title="Total Annual Cost" amount={summary.total_annual_cost} icon={StatIcon::Annual} />
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-bold text-foreground text-lg">{"Cost by Category"}</h3>
                            { icon_bar_chart() }
                        </div>
                        { if summary.cost_by_category.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No active subscriptions yet."}</p> }
                        } else {
                            html! {
                                <ul class="divide-y divide-border">
                                    { for summary.cost_by_category.iter().map(|(category, cost)| html! {
                                        <li key={category.clone()} class="flex items-center justify-between py-2 text-sm">
                                            <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ category.clone() }</span>
                                            <span class="font-semibold text-muted-foreground">{ format_money(*cost) }</span>
                                        </li>
                                    }) }
                                </ul>
                            }
                        }}
                    </div>
                </>
            }
        ) }
    }
}
