//! Login state as handed back by the external auth API.
//!
//! The client never decides who may log in; it only remembers the session
//! the API returned and uses it to pick pages and attach the bearer token.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Hr,
    Operations,
    Finance,
    Procurement,
    Engineering,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Hr,
        Department::Operations,
        Department::Finance,
        Department::Procurement,
        Department::Engineering,
    ];

    /// URL segment, also the stored value
    pub fn slug(&self) -> &'static str {
        match self {
            Department::Hr => "hr",
            Department::Operations => "operations",
            Department::Finance => "finance",
            Department::Procurement => "procurement",
            Department::Engineering => "engineering",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Department::ALL.into_iter().find(|d| d.slug() == slug.to_ascii_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Hr => "Human Resources",
            Department::Operations => "Operations",
            Department::Finance => "Finance",
            Department::Procurement => "Procurement",
            Department::Engineering => "Engineering",
        }
    }

    pub fn home(&self) -> Route {
        Route::Department(*self)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    SuperAdmin,
    Employee,
}

/// Who is looking at the app, as far as route restoration is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Employee,
    Guest,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Employee => "employee",
            UserType::Guest => "guest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserType::Admin),
            "employee" => Some(UserType::Employee),
            "guest" => Some(UserType::Guest),
            _ => None,
        }
    }
}

/// User record inside a login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub is_super_admin: bool,
}

/// `POST /auth/{admin,employee}/login` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated session kept in local storage between visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<Department>,
}

impl From<LoginResponse> for Session {
    fn from(res: LoginResponse) -> Self {
        let role = if res.user.is_super_admin { Role::SuperAdmin } else { res.user.role };
        Self { token: res.token, username: res.user.username, role, department: res.user.department }
    }
}

impl Session {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    pub fn user_type(&self) -> UserType {
        if self.is_admin() {
            UserType::Admin
        } else {
            UserType::Employee
        }
    }

    /// Super admins see every department, admins only their own, employees none
    pub fn can_access(&self, department: Department) -> bool {
        match self.role {
            Role::SuperAdmin => true,
            Role::Admin => self.department == Some(department),
            Role::Employee => false,
        }
    }

    pub fn accessible_departments(&self) -> Vec<Department> {
        Department::ALL.into_iter().filter(|d| self.can_access(*d)).collect()
    }
}

/// The authentication facts route restoration depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub is_authenticated: bool,
    pub is_employee_authenticated: bool,
    pub selected_department: Option<Department>,
    pub is_super_admin: bool,
}

impl AuthSnapshot {
    pub fn from_session(session: Option<&Session>, selected_department: Option<Department>) -> Self {
        match session {
            Some(s) if s.is_admin() => Self {
                is_authenticated: true,
                is_employee_authenticated: false,
                // A plain admin is pinned to their own department
                selected_department: if s.is_super_admin() { selected_department } else { s.department },
                is_super_admin: s.is_super_admin(),
            },
            Some(_) => Self { is_employee_authenticated: true, ..Self::default() },
            None => Self::default(),
        }
    }

    pub fn user_type(&self) -> UserType {
        if self.is_authenticated {
            UserType::Admin
        } else if self.is_employee_authenticated {
            UserType::Employee
        } else {
            UserType::Guest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role, department: Option<Department>) -> Session {
        Session { token: "t".into(), username: "u".into(), role, department }
    }

    #[test]
    fn test_access_rules() {
        let sa = session(Role::SuperAdmin, None);
        assert_eq!(sa.accessible_departments().len(), 5);
        let ops = session(Role::Admin, Some(Department::Operations));
        assert_eq!(ops.accessible_departments(), vec![Department::Operations]);
        assert!(!session(Role::Employee, None).can_access(Department::Hr));
    }

    #[test]
    fn test_login_response_maps_super_admin_flag() {
        let res: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"username":"root","role":"admin","isSuperAdmin":true}}"#,
        )
        .unwrap();
        let s = Session::from(res);
        assert_eq!(s.role, Role::SuperAdmin);
        assert_eq!(s.user_type(), UserType::Admin);
    }

    #[test]
    fn test_snapshot_pins_plain_admin_department() {
        let s = session(Role::Admin, Some(Department::Finance));
        let snap = AuthSnapshot::from_session(Some(&s), Some(Department::Hr));
        assert_eq!(snap.selected_department, Some(Department::Finance));
        assert_eq!(snap.user_type(), UserType::Admin);

        let sa = session(Role::SuperAdmin, None);
        let snap = AuthSnapshot::from_session(Some(&sa), Some(Department::Hr));
        assert_eq!(snap.selected_department, Some(Department::Hr));
        assert!(snap.is_super_admin);
    }

    #[test]
    fn test_snapshot_employee_and_guest() {
        let e = session(Role::Employee, None);
        assert_eq!(AuthSnapshot::from_session(Some(&e), None).user_type(), UserType::Employee);
        assert_eq!(AuthSnapshot::from_session(None, None).user_type(), UserType::Guest);
    }

    #[test]
    fn test_department_slug_round_trip() {
        for d in Department::ALL {
            assert_eq!(Department::from_slug(d.slug()), Some(d));
        }
        assert_eq!(Department::from_slug("HR"), Some(Department::Hr));
        assert_eq!(Department::from_slug("sales"), None);
    }
}
