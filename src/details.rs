//! Full item records, fetched with retry and in small batches.

use std::time::Duration;

use leptos::prelude::*;
use tracing::{debug, warn};

use bizops_core::domain::Item;
use bizops_core::retry::{load_all_with_retry, with_retry, BatchConfig, RetryConfig, SkipNotFound};
use bizops_core::ApiResult;

use crate::context::AppContext;
use crate::store::{store_upsert_detail, AppStore};

fn sleep(duration: Duration) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::sleep(duration)
}

fn retry_config(ctx: &AppContext) -> RetryConfig {
    ctx.config.with_value(|c| RetryConfig::from(&c.retry))
}

/// One item, retried on transient failures
pub async fn load_item(ctx: AppContext, id: &str) -> ApiResult<Item> {
    let api = ctx.api();
    with_retry(&retry_config(&ctx), &SkipNotFound, || api.get_operation_item(id), &sleep).await
}

/// Fetch `ids` in batches and cache every success in the store
pub async fn prefetch(ctx: AppContext, store: AppStore, ids: Vec<String>) {
    if ids.is_empty() {
        return;
    }
    let retry = retry_config(&ctx);
    let batch = ctx.config.with_value(|c| BatchConfig::from(&c.batch));
    let api = ctx.api();

    let results = load_all_with_retry(
        &ids,
        &retry,
        &batch,
        &SkipNotFound,
        |id: String| {
            let api = api.clone();
            async move { api.get_operation_item(&id).await }
        },
        &sleep,
    )
    .await;

    let mut loaded = 0;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(item) => {
                loaded += 1;
                store_upsert_detail(&store, item);
            }
            Err(e) => warn!(event = "details.failed", id = %id, error = %e),
        }
    }
    debug!(event = "details.prefetched", loaded, requested = ids.len());
}
