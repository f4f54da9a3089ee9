use crate::core::transport::{ServiceClient, Transport};
use crate::domain::model::{Data, RemoteCallResult};
use crate::domain::peers::{ProductDetail, ReservationAction, Sku, SkuReservation, SkuReservationRequest};
use crate::domain::ports::ProductService;
use crate::utils::error::{InterlinkError, Result};
use crate::utils::validation::require_identifier;
use async_trait::async_trait;
use reqwest::Method;

const SERVICE: &str = "product";

#[derive(Debug, Clone)]
pub struct ProductClient {
    inner: ServiceClient,
}

impl ProductClient {
    pub fn new(base_url: &str, transport: &Transport) -> Result<Self> {
        Ok(Self {
            inner: ServiceClient::new(SERVICE, base_url, transport)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url().as_str()
    }
}

#[async_trait]
impl ProductService for ProductClient {
    async fn get_sku(&self, sku_id: &str) -> Result<RemoteCallResult<Data<Sku>>> {
        require_identifier(SERVICE, "sku_id", sku_id)?;
        self.inner
            .request(Method::GET, "/v1/product/getsku", Some(sku_id))?
            .send()
            .await
    }

    async fn get_product_detail(
        &self,
        product_id: &str,
    ) -> Result<RemoteCallResult<Data<ProductDetail>>> {
        require_identifier(SERVICE, "product_id", product_id)?;
        self.inner
            .request(Method::GET, "/v1/product/getdetail_with_id", Some(product_id))?
            .send()
            .await
    }

    async fn update_sku_reservation(
        &self,
        token: &str,
        action: ReservationAction,
        items: &[SkuReservation],
    ) -> Result<RemoteCallResult> {
        if items.is_empty() {
            return Err(InterlinkError::request_build(
                SERVICE,
                "at least one SKU reservation is required",
            ));
        }
        for item in items {
            require_identifier(SERVICE, "sku_id", &item.sku_id)?;
        }

        let body = SkuReservationRequest {
            status: action,
            items,
        };

        self.inner
            .request(Method::POST, "/v1/product/update_sku_reserver", None)?
            .bearer(token)?
            .json(&body)?
            .send()
            .await
    }
}
