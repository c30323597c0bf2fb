mod reminders;
mod subscriptions;
mod summary;

pub use reminders::RemindersPage;
pub use subscriptions::SubscriptionsPage;
pub use summary::SummaryPage;

use yew::prelude::*;

use crate::api::HttpBackend;
use crate::config::AppConfig;

/// The backend provided by the shell, or one built from the bundle's config.
#[hook]
pub fn use_backend() -> HttpBackend {
    use_context::<HttpBackend>().unwrap_or_else(|| HttpBackend::new(AppConfig::from_build_env()))
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-4xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h2 class="text-2xl font-bold text-foreground">{ title }</h2>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn error_banner(message: &Option<String>) -> Html {
    match message {
        Some(msg) => html! {
            <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-[10px] px-4 py-3">{ msg.clone() }</div>
        },
        None => html! {},
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_close() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
pub fn icon_refresh() -> Html {
    icon_base("M23 4v6h-6M1 20v-6h6M3.5 9a9 9 0 0114.9-3.4L23 10M1 14l4.6 4.4A9 9 0 0020.5 15")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 11h18")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
