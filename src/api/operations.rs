//! Production item endpoints (`/operations/items`)

use reqwest::Method;
use serde::Serialize;

use bizops_core::domain::{Item, NewItem, Page, PhaseAction, SubphaseUpdate};
use bizops_core::transfer::{QuantityUpdate, SubphaseRef};
use bizops_core::ApiResult;

use super::ApiClient;

#[derive(Serialize)]
struct ListQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

impl ApiClient {
    pub async fn list_operation_items(&self, page: u32, limit: u32, search: &str) -> ApiResult<Page<Item>> {
        let search = Some(search.trim()).filter(|s| !s.is_empty());
        let query = ListQuery { page, limit, search };
        self.send(self.request(Method::GET, "operations/items").query(&query)).await
    }

    pub async fn get_operation_item(&self, id: &str) -> ApiResult<Item> {
        self.send(self.request(Method::GET, &format!("operations/items/{}", id))).await
    }

    pub async fn create_operation_item(&self, item: &NewItem) -> ApiResult<Item> {
        self.send(self.request(Method::POST, "operations/items").json(item)).await
    }

    pub async fn update_operation_item(&self, id: &str, item: &NewItem) -> ApiResult<()> {
        self.send_empty(self.request(Method::PUT, &format!("operations/items/{}", id)).json(item)).await
    }

    pub async fn delete_operation_item(&self, id: &str) -> ApiResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("operations/items/{}", id))).await
    }

    pub async fn phase_action(&self, item_id: &str, phase_id: &str, action: PhaseAction) -> ApiResult<()> {
        let path = format!("operations/items/{}/phases/{}/{}", item_id, phase_id, action.as_str());
        self.send_empty(self.request(Method::POST, &path)).await
    }

    pub async fn update_subphase(&self, at: &SubphaseRef, update: &SubphaseUpdate) -> ApiResult<()> {
        let path = format!(
            "operations/items/{}/phases/{}/subphases/{}",
            at.item_id, at.phase_id, at.subphase_id
        );
        self.send_empty(self.request(Method::PUT, &path).json(update)).await
    }

    pub async fn apply_quantity(&self, update: &QuantityUpdate) -> ApiResult<()> {
        self.update_subphase(&update.subphase, &update.body()).await
    }
}
