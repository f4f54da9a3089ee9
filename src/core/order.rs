use crate::core::transport::{ServiceClient, Transport};
use crate::domain::model::{Data, RemoteCallResult};
use crate::domain::peers::{OrderStatusRequest, ProductIdsRequest, ProductRatingStats, ProductTotalSold};
use crate::domain::ports::OrderService;
use crate::utils::error::Result;
use crate::utils::validation::require_identifier;
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;

const SERVICE: &str = "order";

#[derive(Debug, Clone)]
pub struct OrderClient {
    inner: ServiceClient,
}

impl OrderClient {
    pub fn new(base_url: &str, transport: &Transport) -> Result<Self> {
        Ok(Self {
            inner: ServiceClient::new(SERVICE, base_url, transport)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url().as_str()
    }

    async fn post_product_ids<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        product_ids: &[String],
    ) -> Result<RemoteCallResult<Data<Vec<T>>>> {
        if product_ids.is_empty() {
            return Ok(RemoteCallResult::local_success(
                "no products requested",
                Data { data: Vec::new() },
            ));
        }
        for id in product_ids {
            require_identifier(SERVICE, "product_id", id)?;
        }

        self.inner
            .request(Method::POST, path, None)?
            .json(&ProductIdsRequest { product_ids })?
            .send()
            .await
    }
}

#[async_trait]
impl OrderService for OrderClient {
    async fn update_order_status(
        &self,
        token: &str,
        shop_order_id: &str,
        status: &str,
    ) -> Result<RemoteCallResult> {
        require_identifier(SERVICE, "shop_order_id", shop_order_id)?;
        require_identifier(SERVICE, "status", status)?;

        self.inner
            .request(Method::PUT, "/v1/orders/admin/update_status", None)?
            .bearer(token)?
            .json(&OrderStatusRequest {
                status,
                shop_order_id,
            })?
            .send()
            .await
    }

    async fn confirm_online_payment(&self, order_id: &str) -> Result<RemoteCallResult> {
        require_identifier(SERVICE, "order_id", order_id)?;
        self.inner
            .request(Method::PUT, "/v1/orders/callback_payment_online", Some(order_id))?
            .send()
            .await
    }

    async fn get_bulk_rating_stats(
        &self,
        product_ids: &[String],
    ) -> Result<RemoteCallResult<Data<Vec<ProductRatingStats>>>> {
        self.post_product_ids("/v1/comments/bulk-stats", product_ids)
            .await
    }

    async fn get_product_total_sold(
        &self,
        product_ids: &[String],
    ) -> Result<RemoteCallResult<Data<Vec<ProductTotalSold>>>> {
        self.post_product_ids("/v1/orders/get_product_total_sold", product_ids)
            .await
    }
}

pub trait KeyedByProduct {
    fn product_id(&self) -> &str;
}

impl KeyedByProduct for ProductRatingStats {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

impl KeyedByProduct for ProductTotalSold {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

/// Lookup table for bulk answers. Later duplicates win.
pub fn index_by_product<T: KeyedByProduct>(items: Vec<T>) -> HashMap<String, T> {
    items
        .into_iter()
        .map(|item| (item.product_id().to_string(), item))
        .collect()
}
