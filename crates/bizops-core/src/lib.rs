//! BizOps Core
//!
//! Platform-independent logic behind the department console:
//! - domain: records exchanged with the REST API
//! - session / routes / auth: login state, typed routes, route restoration
//! - polling / retry: Operations refresh decisions and item-detail loading
//! - transfer: subphase quantity transfer planning
//! - report / format: printable HTML reports and display formatting
//!
//! Nothing in this crate touches the browser, so all of it is tested natively.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod format;
pub mod polling;
pub mod report;
pub mod retry;
pub mod routes;
pub mod session;
pub mod toast;
pub mod transfer;

pub use error::{ApiError, ApiResult};
