use log::debug;
use wasm_bindgen::JsValue;

/// One tab of the dashboard, addressed by its URL path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Subscriptions,
    Summary,
    Reminders,
}

/// Tab order as shown in the header.
pub const TABS: [Route; 3] = [Route::Subscriptions, Route::Summary, Route::Reminders];

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Subscriptions => "/subscriptions",
            Route::Summary => "/summary",
            Route::Reminders => "/reminders",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Subscriptions => "Subscriptions",
            Route::Summary => "Summary",
            Route::Reminders => "Reminders",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        TABS.iter().copied().find(|route| route.path() == trimmed)
    }
}

/// Where a URL path lands. `redirect` is set when the address bar has to be
/// rewritten, e.g. `/` becoming `/subscriptions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    pub redirect: bool,
}

pub fn resolve(path: &str) -> Resolution {
    match Route::from_path(path) {
        Some(route) => Resolution {
            route,
            redirect: path != route.path(),
        },
        None => Resolution {
            route: Route::Subscriptions,
            redirect: true,
        },
    }
}

/// Reads the current location and rewrites it in place when it does not name
/// a tab.
pub fn current() -> Route {
    let Some(window) = web_sys::window() else {
        return Route::Subscriptions;
    };
    let path = window.location().pathname().unwrap_or_default();
    let resolution = resolve(&path);
    if resolution.redirect {
        debug!("redirecting {:?} to {}", path, resolution.route.path());
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(resolution.route.path()));
        }
    }
    resolution.route
}

/// Pushes a history entry for `route` unless it is already current.
pub fn navigate(route: Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let current_path = window.location().pathname().unwrap_or_default();
    if current_path == route.path() {
        return;
    }
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route.path()));
    }
}
