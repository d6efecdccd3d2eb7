//! Supplier endpoints

use reqwest::Method;

use bizops_core::domain::{Supplier, SupplierInput};
use bizops_core::ApiResult;

use super::ApiClient;

impl ApiClient {
    pub async fn list_suppliers(&self) -> ApiResult<Vec<Supplier>> {
        self.send(self.request(Method::GET, "suppliers")).await
    }

    pub async fn create_supplier(&self, input: &SupplierInput) -> ApiResult<Supplier> {
        self.send(self.request(Method::POST, "suppliers").json(input)).await
    }

    pub async fn update_supplier(&self, id: &str, input: &SupplierInput) -> ApiResult<()> {
        self.send_empty(self.request(Method::PUT, &format!("suppliers/{}", id)).json(input)).await
    }

    pub async fn delete_supplier(&self, id: &str) -> ApiResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("suppliers/{}", id))).await
    }
}
