//! Application Context
//!
//! Shared state provided via Leptos Context API.

use chrono::Utc;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use tracing::{info, warn};

use bizops_core::auth::{AuthSnapshot, Department, Session, UserType};
use bizops_core::config::AppConfig;
use bizops_core::routes::Route;
use bizops_core::session::{self, RestoreDecision};
use bizops_core::toast::{ToastKind, ToastQueue, AUTO_DISMISS};
use rolling_logger::LogBuffer;

use crate::api::ApiClient;
use crate::router;
use crate::storage::LocalStore;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    pub logs: StoredValue<LogBuffer>,
    /// Logged-in admin or employee
    pub session: RwSignal<Option<Session>>,
    /// Department chosen by a super admin
    pub department: RwSignal<Option<Department>>,
    pub route: ReadSignal<Route>,
    set_route: WriteSignal<Route>,
    pub toasts: RwSignal<ToastQueue>,
    /// Trigger to reload data from the API - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from the API - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        logs: LogBuffer,
        route: (ReadSignal<Route>, WriteSignal<Route>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        let store = LocalStore::new();
        Self {
            config: StoredValue::new(config),
            logs: StoredValue::new(logs),
            session: RwSignal::new(session::load_session(&store)),
            department: RwSignal::new(session::load_department(&store)),
            route: route.0,
            set_route: route.1,
            toasts: RwSignal::new(ToastQueue::new()),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Client carrying the current session's token
    pub fn api(&self) -> ApiClient {
        let token = self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        self.config.with_value(|c| ApiClient::new(&c.api_base_url, token))
    }

    pub fn auth_snapshot(&self) -> AuthSnapshot {
        AuthSnapshot::from_session(self.session.get().as_ref(), self.department.get())
    }

    pub fn auth_snapshot_untracked(&self) -> AuthSnapshot {
        AuthSnapshot::from_session(self.session.get_untracked().as_ref(), self.department.get_untracked())
    }

    /// Where the current user should land, given the saved route
    pub fn restore_decision(&self) -> RestoreDecision {
        let max_age_days = self.config.with_value(|c| c.route_max_age_days);
        session::get_restore_route(
            &LocalStore::new(),
            &self.auth_snapshot_untracked(),
            &router::current_path(),
            Utc::now(),
            max_age_days,
        )
    }

    pub fn username(&self) -> String {
        self.session.with(|s| s.as_ref().map(|s| s.username.clone()).unwrap_or_default())
    }

    /// Trigger a reload of page data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    // ========================
    // Navigation
    // ========================

    pub fn navigate(&self, route: Route) {
        let path = route.path();
        if router::current_path() != path {
            router::push_path(&path);
        }
        self.remember(&path);
        self.set_route.set(route);
    }

    /// Navigate without adding a history entry (redirects)
    pub fn redirect(&self, route: Route) {
        let path = route.path();
        router::replace_path(&path);
        self.remember(&path);
        self.set_route.set(route);
    }

    /// Adopt a route the browser already moved to (back/forward)
    pub fn follow_history(&self, route: Route) {
        self.remember(&route.path());
        self.set_route.set(route);
    }

    fn remember(&self, path: &str) {
        let user_type = self.session.with_untracked(|s| s.as_ref().map_or(UserType::Guest, Session::user_type));
        session::save_last_route(&LocalStore::new(), path, user_type, Utc::now());
    }

    // ========================
    // Session
    // ========================

    pub fn login(&self, new_session: Session) {
        let store = LocalStore::new();
        if let Err(e) = session::save_session(&store, &new_session) {
            warn!(event = "session.persist_failed", error = %e);
        }
        info!(event = "auth.login", username = %new_session.username, user_type = new_session.user_type().as_str());
        if !new_session.is_super_admin() {
            self.department.set(new_session.department);
        }
        self.session.set(Some(new_session));
    }

    pub fn logout(&self) {
        session::logout(&LocalStore::new());
        info!(event = "auth.logout");
        self.session.set(None);
        self.department.set(None);
        self.navigate(Route::Landing);
    }

    pub fn select_department(&self, department: Department) {
        if let Err(e) = session::save_department(&LocalStore::new(), department) {
            warn!(event = "session.persist_failed", error = %e);
        }
        self.department.set(Some(department));
        self.navigate(department.home());
    }

    // ========================
    // Toasts
    // ========================

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        self.toasts.update(|queue| id = queue.push(kind, message));
        let toasts = self.toasts;
        Timeout::new(AUTO_DISMISS.as_millis() as u32, move || {
            toasts.try_update(|queue| queue.dismiss(id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.toast(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.toast(ToastKind::Error, message);
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|queue| {
            queue.dismiss(id);
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
