//! Stock endpoints (`/items`)

use reqwest::Method;

use bizops_core::domain::{InventoryItem, StockInput};
use bizops_core::ApiResult;

use super::ApiClient;

impl ApiClient {
    pub async fn list_stock(&self) -> ApiResult<Vec<InventoryItem>> {
        self.send(self.request(Method::GET, "items")).await
    }

    pub async fn create_stock(&self, input: &StockInput) -> ApiResult<InventoryItem> {
        self.send(self.request(Method::POST, "items").json(input)).await
    }

    pub async fn update_stock(&self, id: &str, input: &StockInput) -> ApiResult<()> {
        self.send_empty(self.request(Method::PUT, &format!("items/{}", id)).json(input)).await
    }

    pub async fn delete_stock(&self, id: &str) -> ApiResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("items/{}", id))).await
    }
}
