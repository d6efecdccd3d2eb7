//! Typed application routes.
//!
//! The app keeps the current `Route` in a signal and mirrors it into the
//! address bar; these helpers are the only place paths are spelled out.

use crate::auth::{Department, Session};

pub const LANDING: &str = "/";
pub const ADMIN_LOGIN: &str = "/admin/login";
pub const EMPLOYEE_LOGIN: &str = "/employee/login";
pub const DEPARTMENT_SELECTOR: &str = "/admin/departments";
pub const EMPLOYEE_DASHBOARD: &str = "/employee/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    AdminLogin,
    EmployeeLogin,
    DepartmentSelector,
    Department(Department),
    OperationsItem(String),
    Suppliers,
    PurchaseOrders,
    EmployeeLogs,
    Diagnostics,
    EmployeeDashboard,
    NotFound(String),
}

impl Route {
    /// Parse a location pathname; query strings and trailing slashes are ignored
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["admin", "login"] => Route::AdminLogin,
            ["employee", "login"] => Route::EmployeeLogin,
            ["admin", "departments"] => Route::DepartmentSelector,
            ["admin", "diagnostics"] => Route::Diagnostics,
            ["admin", "operations", "items", id] => Route::OperationsItem((*id).to_string()),
            ["admin", "procurement", "suppliers"] => Route::Suppliers,
            ["admin", "procurement", "purchase-orders"] => Route::PurchaseOrders,
            ["admin", "hr", "logs"] => Route::EmployeeLogs,
            ["admin", slug] => match Department::from_slug(slug) {
                Some(d) => Route::Department(d),
                None => Route::NotFound(path.to_string()),
            },
            ["employee", "dashboard"] => Route::EmployeeDashboard,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => LANDING.to_string(),
            Route::AdminLogin => ADMIN_LOGIN.to_string(),
            Route::EmployeeLogin => EMPLOYEE_LOGIN.to_string(),
            Route::DepartmentSelector => DEPARTMENT_SELECTOR.to_string(),
            Route::Department(d) => format!("/admin/{}", d.slug()),
            Route::OperationsItem(id) => format!("/admin/operations/items/{}", id),
            Route::Suppliers => "/admin/procurement/suppliers".to_string(),
            Route::PurchaseOrders => "/admin/procurement/purchase-orders".to_string(),
            Route::EmployeeLogs => "/admin/hr/logs".to_string(),
            Route::Diagnostics => "/admin/diagnostics".to_string(),
            Route::EmployeeDashboard => EMPLOYEE_DASHBOARD.to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Reachable without logging in
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Landing | Route::AdminLogin | Route::EmployeeLogin | Route::NotFound(_))
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::AdminLogin | Route::EmployeeLogin)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Route::DepartmentSelector
                | Route::Department(_)
                | Route::OperationsItem(_)
                | Route::Suppliers
                | Route::PurchaseOrders
                | Route::EmployeeLogs
                | Route::Diagnostics
        )
    }

    pub fn requires_employee(&self) -> bool {
        matches!(self, Route::EmployeeDashboard)
    }

    /// The department a page belongs to, for access checks and navigation
    pub fn department(&self) -> Option<Department> {
        match self {
            Route::Department(d) => Some(*d),
            Route::OperationsItem(_) => Some(Department::Operations),
            Route::Suppliers | Route::PurchaseOrders => Some(Department::Procurement),
            Route::EmployeeLogs => Some(Department::Hr),
            _ => None,
        }
    }
}

/// Where to send a user who may not see `route`; None when access is fine
pub fn guard(route: &Route, session: Option<&Session>) -> Option<Route> {
    if route.requires_admin() {
        let Some(session) = session.filter(|s| s.is_admin()) else {
            return Some(Route::AdminLogin);
        };
        if let Some(department) = route.department() {
            if !session.can_access(department) {
                return Some(Route::DepartmentSelector);
            }
        }
        return None;
    }
    if route.requires_employee() && !session.is_some_and(|s| !s.is_admin()) {
        return Some(Route::EmployeeLogin);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn session(role: Role, department: Option<Department>) -> Session {
        Session { token: "t".into(), username: "u".into(), role, department }
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse(""), Route::Landing);
        assert_eq!(Route::parse("/admin/login"), Route::AdminLogin);
        assert_eq!(Route::parse("/admin/finance/"), Route::Department(Department::Finance));
        assert_eq!(Route::parse("/admin/operations/items/66aa?tab=phases"), Route::OperationsItem("66aa".into()));
        assert_eq!(Route::parse("/employee/dashboard"), Route::EmployeeDashboard);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/admin/sales"), Route::NotFound("/admin/sales".into()));
        assert_eq!(Route::parse("/nope/deeper"), Route::NotFound("/nope/deeper".into()));
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Landing,
            Route::EmployeeLogin,
            Route::DepartmentSelector,
            Route::Department(Department::Engineering),
            Route::OperationsItem("x1".into()),
            Route::Suppliers,
            Route::PurchaseOrders,
            Route::EmployeeLogs,
            Route::Diagnostics,
            Route::EmployeeDashboard,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guards() {
        assert!(Route::Suppliers.requires_admin());
        assert_eq!(Route::Suppliers.department(), Some(Department::Procurement));
        assert!(Route::EmployeeDashboard.requires_employee());
        assert!(Route::AdminLogin.is_public() && Route::AdminLogin.is_login());
        assert!(!Route::Diagnostics.is_public());
    }

    #[test]
    fn test_guard_sends_guests_to_login() {
        assert_eq!(guard(&Route::Suppliers, None), Some(Route::AdminLogin));
        assert_eq!(guard(&Route::EmployeeDashboard, None), Some(Route::EmployeeLogin));
        assert_eq!(guard(&Route::Landing, None), None);
    }

    #[test]
    fn test_guard_checks_department_access() {
        let hr_admin = session(Role::Admin, Some(Department::Hr));
        assert_eq!(guard(&Route::EmployeeLogs, Some(&hr_admin)), None);
        assert_eq!(guard(&Route::Suppliers, Some(&hr_admin)), Some(Route::DepartmentSelector));
        assert_eq!(guard(&Route::DepartmentSelector, Some(&hr_admin)), None);

        let root = session(Role::SuperAdmin, None);
        assert_eq!(guard(&Route::Department(Department::Finance), Some(&root)), None);
    }

    #[test]
    fn test_guard_keeps_roles_apart() {
        let employee = session(Role::Employee, None);
        let admin = session(Role::SuperAdmin, None);
        assert_eq!(guard(&Route::Diagnostics, Some(&employee)), Some(Route::AdminLogin));
        assert_eq!(guard(&Route::EmployeeDashboard, Some(&admin)), Some(Route::EmployeeLogin));
        assert_eq!(guard(&Route::EmployeeDashboard, Some(&employee)), None);
    }
}
