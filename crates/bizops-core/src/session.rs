//! Route and session persistence.
//!
//! Remembers where the user was so a reopened PWA lands back on the same
//! page, and keeps the authenticated session between visits. Storage is
//! abstracted behind [`KeyValueStore`]; the app backs it with
//! `window.localStorage`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::auth::{AuthSnapshot, Department, Session, UserType};
use crate::routes::{self, Route};

pub const LAST_ROUTE_KEY: &str = "pwa_last_route";
pub const LAST_ROUTE_TIMESTAMP_KEY: &str = "pwa_last_route_timestamp";
pub const USER_TYPE_KEY: &str = "pwa_user_type";
pub const SESSION_KEY: &str = "bizops_session";
pub const DEPARTMENT_KEY: &str = "bizops_department";

/// Saved routes older than this are ignored
pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Synchronous string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, used in tests and when the browser denies storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The persisted last-route record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRoute {
    pub route: String,
    pub user_type: UserType,
    pub saved_at: DateTime<Utc>,
}

/// Where to send the user on startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreDecision {
    pub route: String,
    pub should_redirect: bool,
}

/// Persist `path` as the last visited route. Login pages and guests are skipped.
///
/// Returns true when a write happened.
pub fn save_last_route(store: &dyn KeyValueStore, path: &str, user_type: UserType, now: DateTime<Utc>) -> bool {
    if path.contains("/login") || user_type == UserType::Guest {
        return false;
    }
    let writes = [
        (LAST_ROUTE_KEY, path.to_string()),
        (LAST_ROUTE_TIMESTAMP_KEY, now.timestamp_millis().to_string()),
        (USER_TYPE_KEY, user_type.as_str().to_string()),
    ];
    for (key, value) in writes {
        if let Err(e) = store.set(key, &value) {
            warn!(event = "session.save_failed", key, error = %e);
            return false;
        }
    }
    debug!(event = "session.route_saved", path, user_type = user_type.as_str());
    true
}

/// Read the saved route. Any storage failure or malformed field reads as "nothing saved".
pub fn load_last_route(store: &dyn KeyValueStore) -> Option<SavedRoute> {
    let read = |key: &str| match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(event = "session.read_failed", key, error = %e);
            None
        }
    };
    let route = read(LAST_ROUTE_KEY)?;
    let millis: i64 = read(LAST_ROUTE_TIMESTAMP_KEY)?.parse().ok()?;
    let saved_at = Utc.timestamp_millis_opt(millis).single()?;
    let user_type = UserType::parse(&read(USER_TYPE_KEY)?)?;
    Some(SavedRoute { route, user_type, saved_at })
}

pub fn clear_last_route(store: &dyn KeyValueStore) {
    for key in [LAST_ROUTE_KEY, LAST_ROUTE_TIMESTAMP_KEY, USER_TYPE_KEY] {
        if let Err(e) = store.remove(key) {
            warn!(event = "session.clear_failed", key, error = %e);
        }
    }
}

/// Static landing page for each kind of user
pub fn default_route(auth: &AuthSnapshot) -> String {
    match auth.user_type() {
        UserType::Admin => match auth.selected_department {
            Some(department) => department.home().path(),
            None => routes::DEPARTMENT_SELECTOR.to_string(),
        },
        UserType::Employee => routes::EMPLOYEE_DASHBOARD.to_string(),
        UserType::Guest => routes::LANDING.to_string(),
    }
}

/// Decide where the app should be, given who is logged in and what was saved.
pub fn get_restore_route(
    store: &dyn KeyValueStore,
    auth: &AuthSnapshot,
    current_path: &str,
    now: DateTime<Utc>,
    max_age_days: i64,
) -> RestoreDecision {
    let user_type = auth.user_type();
    let saved = load_last_route(store).filter(|saved| {
        saved.user_type == user_type
            && !saved.route.contains("/login")
            && now.signed_duration_since(saved.saved_at) <= Duration::days(max_age_days)
    });

    let route = match saved {
        Some(saved) => saved.route,
        None => default_route(auth),
    };

    let should_redirect = if user_type == UserType::Guest && Route::parse(current_path).is_public() {
        false
    } else {
        route != current_path
    };

    RestoreDecision { route, should_redirect }
}

pub fn save_session(store: &dyn KeyValueStore, session: &Session) -> Result<(), StorageError> {
    let json = serde_json::to_string(session).map_err(|e| StorageError(e.to_string()))?;
    store.set(SESSION_KEY, &json)
}

/// Stored session, or None when absent, unreadable or corrupt
pub fn load_session(store: &dyn KeyValueStore) -> Option<Session> {
    let json = store.get(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(event = "session.corrupt", error = %e);
            None
        }
    }
}

pub fn save_department(store: &dyn KeyValueStore, department: Department) -> Result<(), StorageError> {
    store.set(DEPARTMENT_KEY, department.slug())
}

pub fn load_department(store: &dyn KeyValueStore) -> Option<Department> {
    store.get(DEPARTMENT_KEY).ok().flatten().and_then(|slug| Department::from_slug(&slug))
}

/// Forget the session, the chosen department and the saved route
pub fn logout(store: &dyn KeyValueStore) {
    for key in [SESSION_KEY, DEPARTMENT_KEY] {
        if let Err(e) = store.remove(key) {
            warn!(event = "session.clear_failed", key, error = %e);
        }
    }
    clear_last_route(store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError("SecurityError".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError("QuotaExceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError("SecurityError".into()))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn admin(department: Option<Department>) -> AuthSnapshot {
        AuthSnapshot { is_authenticated: true, selected_department: department, ..Default::default() }
    }

    fn employee() -> AuthSnapshot {
        AuthSnapshot { is_employee_authenticated: true, ..Default::default() }
    }

    #[test]
    fn test_recent_admin_route_is_restored() {
        let store = MemoryStore::new();
        save_last_route(&store, "/admin/procurement/suppliers", UserType::Admin, now() - Duration::days(3));

        let decision = get_restore_route(&store, &admin(None), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, "/admin/procurement/suppliers");
        assert!(decision.should_redirect);

        let decision =
            get_restore_route(&store, &admin(None), "/admin/procurement/suppliers", now(), DEFAULT_MAX_AGE_DAYS);
        assert!(!decision.should_redirect);
    }

    #[test]
    fn test_route_exactly_at_max_age_is_still_restored() {
        let store = MemoryStore::new();
        save_last_route(&store, "/admin/finance", UserType::Admin, now() - Duration::days(30));
        let decision = get_restore_route(&store, &admin(None), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, "/admin/finance");
    }

    #[test]
    fn test_stale_route_falls_back_to_default() {
        let store = MemoryStore::new();
        save_last_route(&store, "/admin/finance", UserType::Admin, now() - Duration::days(31));
        let decision = get_restore_route(&store, &admin(None), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, routes::DEPARTMENT_SELECTOR);
    }

    #[test]
    fn test_route_saved_by_other_user_type_is_ignored() {
        let store = MemoryStore::new();
        save_last_route(&store, "/admin/hr", UserType::Admin, now());
        let decision = get_restore_route(&store, &employee(), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, routes::EMPLOYEE_DASHBOARD);
        assert!(decision.should_redirect);
    }

    #[test]
    fn test_admin_default_uses_selected_department() {
        let store = MemoryStore::new();
        let decision =
            get_restore_route(&store, &admin(Some(Department::Operations)), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, "/admin/operations");
    }

    #[test]
    fn test_history_navigation_replaces_saved_route() {
        let store = MemoryStore::new();
        let visited = ["/admin/procurement", "/admin/procurement/suppliers"];
        for (i, path) in visited.iter().enumerate() {
            save_last_route(&store, path, UserType::Admin, now() - Duration::minutes(10 - i as i64));
        }
        // Back button: the address bar already shows the previous page
        let back = Route::parse(visited[0]);
        assert!(save_last_route(&store, &back.path(), UserType::Admin, now()));

        let decision = get_restore_route(&store, &admin(None), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, "/admin/procurement");
    }

    #[test]
    fn test_login_paths_are_never_saved() {
        let store = MemoryStore::new();
        assert!(!save_last_route(&store, "/admin/login", UserType::Admin, now()));
        assert!(!save_last_route(&store, "/employee/login?next=x", UserType::Employee, now()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_guests_are_never_saved() {
        let store = MemoryStore::new();
        assert!(!save_last_route(&store, "/", UserType::Guest, now()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_guest_on_public_page_stays() {
        let store = MemoryStore::new();
        let guest = AuthSnapshot::default();
        let decision = get_restore_route(&store, &guest, "/admin/login", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, "/");
        assert!(!decision.should_redirect);

        let decision = get_restore_route(&store, &guest, "/admin/finance", now(), DEFAULT_MAX_AGE_DAYS);
        assert!(decision.should_redirect);
    }

    #[test]
    fn test_storage_failures_fail_open() {
        let store = FailingStore;
        assert!(!save_last_route(&store, "/admin/hr", UserType::Admin, now()));
        let decision = get_restore_route(&store, &employee(), "/", now(), DEFAULT_MAX_AGE_DAYS);
        assert_eq!(decision.route, routes::EMPLOYEE_DASHBOARD);
        assert!(load_session(&store).is_none());
        logout(&store);
    }

    #[test]
    fn test_malformed_timestamp_reads_as_nothing_saved() {
        let store = MemoryStore::new();
        store.set(LAST_ROUTE_KEY, "/admin/hr").unwrap();
        store.set(LAST_ROUTE_TIMESTAMP_KEY, "yesterday").unwrap();
        store.set(USER_TYPE_KEY, "admin").unwrap();
        assert!(load_last_route(&store).is_none());
    }

    #[test]
    fn test_session_round_trip_and_logout() {
        let store = MemoryStore::new();
        let session = Session {
            token: "tok".into(),
            username: "root".into(),
            role: Role::SuperAdmin,
            department: None,
        };
        save_session(&store, &session).unwrap();
        save_department(&store, Department::Hr).unwrap();
        save_last_route(&store, "/admin/hr", UserType::Admin, now());
        assert_eq!(load_session(&store), Some(session));
        assert_eq!(load_department(&store), Some(Department::Hr));

        logout(&store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_session_is_ignored() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "{oops").unwrap();
        assert!(load_session(&store).is_none());
    }
}
