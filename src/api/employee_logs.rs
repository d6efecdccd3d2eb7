//! Employee activity log endpoints

use reqwest::Method;

use bizops_core::domain::{EmployeeLog, EmployeeLogUpdate, NewEmployeeLog};
use bizops_core::ApiResult;

use super::ApiClient;

impl ApiClient {
    /// All logs, or only `username`'s when given
    pub async fn list_employee_logs(&self, username: Option<&str>) -> ApiResult<Vec<EmployeeLog>> {
        let mut builder = self.request(Method::GET, "employeeLogs");
        if let Some(username) = username {
            builder = builder.query(&[("username", username)]);
        }
        self.send(builder).await
    }

    pub async fn create_employee_log(&self, log: &NewEmployeeLog) -> ApiResult<EmployeeLog> {
        self.send(self.request(Method::POST, "employeeLogs").json(log)).await
    }

    pub async fn update_employee_log(&self, id: &str, update: &EmployeeLogUpdate) -> ApiResult<()> {
        self.send_empty(self.request(Method::PUT, &format!("employeeLogs/{}", id)).json(update)).await
    }
}
