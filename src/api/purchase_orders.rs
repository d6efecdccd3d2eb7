//! Purchase order endpoints

use reqwest::Method;
use serde::Serialize;

use bizops_core::domain::{NewPurchaseOrder, PurchaseOrder, PurchaseOrderStatus};
use bizops_core::ApiResult;

use super::ApiClient;

#[derive(Serialize)]
struct StatusBody {
    status: PurchaseOrderStatus,
}

impl ApiClient {
    pub async fn list_purchase_orders(&self) -> ApiResult<Vec<PurchaseOrder>> {
        self.send(self.request(Method::GET, "purchaseOrders")).await
    }

    pub async fn create_purchase_order(&self, order: &NewPurchaseOrder) -> ApiResult<PurchaseOrder> {
        self.send(self.request(Method::POST, "purchaseOrders").json(order)).await
    }

    pub async fn set_purchase_order_status(&self, id: &str, status: PurchaseOrderStatus) -> ApiResult<()> {
        let path = format!("purchaseOrders/{}/status", id);
        self.send_empty(self.request(Method::PUT, &path).json(&StatusBody { status })).await
    }
}
