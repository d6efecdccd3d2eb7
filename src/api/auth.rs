//! Login endpoints

use reqwest::Method;

use bizops_core::auth::{Credentials, LoginResponse, Session};
use bizops_core::ApiResult;

use super::ApiClient;

impl ApiClient {
    pub async fn admin_login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response: LoginResponse =
            self.send(self.request(Method::POST, "auth/admin/login").json(credentials)).await?;
        Ok(Session::from(response))
    }

    pub async fn employee_login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response: LoginResponse =
            self.send(self.request(Method::POST, "auth/employee/login").json(credentials)).await?;
        Ok(Session::from(response))
    }
}
