mod api;
mod config;
mod error;
mod format;
mod logging;
mod models;
mod route;
mod state;
mod views;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use api::HttpBackend;
use config::AppConfig;
use route::{Route, TABS};
use views::{RemindersPage, SubscriptionsPage, SummaryPage};

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active: Route,
    on_select: Callback<Route>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-background py-8">
            <div class="max-w-4xl mx-auto px-4">
                <Header />
                <TabBar active={props.active} on_select={props.on_select.clone()} />
                <main>
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    html! {
        <header class="text-center mb-8">
            <h1 class="text-[#173E63] text-4xl font-black tracking-tight">{"Subscription Tracker"}</h1>
            <p class="text-muted-foreground mt-3">{"Easily manage and track your recurring services"}</p>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct TabBarProps {
    active: Route,
    on_select: Callback<Route>,
}

#[function_component(TabBar)]
fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="flex justify-center gap-2 mb-6 bg-[#173E63] rounded-[24px] p-2 shadow-lg">
            { for TABS.iter().map(|tab| {
                let class_name = if *tab == props.active {
                    "px-5 py-2 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63]"
                } else {
                    "px-5 py-2 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white"
                };
                let on_select = props.on_select.clone();
                let route = *tab;

                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(route))}>
                        { route.label() }
                    </button>
                }
            }) }
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let active = use_state(route::current);
    let backend = use_memo(|config| HttpBackend::new(config.clone()), props.config.clone());

    // Back/forward only changes the URL; follow it.
    {
        let active = active.clone();
        use_effect_with_deps(
            move |_| {
                let listener = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_| {
                    active.set(route::current());
                });
                let window = web_sys::window();
                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(window) = &window {
                        let _ = window.remove_event_listener_with_callback(
                            "popstate",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                    drop(listener);
                }
            },
            (),
        );
    }

    let on_select = {
        let active = active.clone();
        Callback::from(move |next: Route| {
            route::navigate(next);
            active.set(next);
        })
    };

    let content = match *active {
        Route::Subscriptions => html! { <SubscriptionsPage /> },
        Route::Summary => html! { <SummaryPage /> },
        Route::Reminders => html! { <RemindersPage /> },
    };

    html! {
        <ContextProvider<HttpBackend> context={(*backend).clone()}>
            <Layout active={*active} on_select={on_select}>
                { content }
            </Layout>
        </ContextProvider<HttpBackend>>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    info!("starting subscription tracker against {}", config.api_base_url);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
