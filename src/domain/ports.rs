use crate::domain::model::{Data, RemoteCallResult};
use crate::domain::peers::{
    InitPaymentParams, InitTransaction, MediaFile, PaymentMethod, ProductDetail,
    ProductRatingStats, ProductTotalSold, ReservationAction, Sku, SkuReservation, UploadedMedia,
};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_sku(&self, sku_id: &str) -> Result<RemoteCallResult<Data<Sku>>>;

    async fn get_product_detail(
        &self,
        product_id: &str,
    ) -> Result<RemoteCallResult<Data<ProductDetail>>>;

    async fn update_sku_reservation(
        &self,
        token: &str,
        action: ReservationAction,
        items: &[SkuReservation],
    ) -> Result<RemoteCallResult>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn update_order_status(
        &self,
        token: &str,
        shop_order_id: &str,
        status: &str,
    ) -> Result<RemoteCallResult>;

    async fn confirm_online_payment(&self, order_id: &str) -> Result<RemoteCallResult>;

    async fn get_bulk_rating_stats(
        &self,
        product_ids: &[String],
    ) -> Result<RemoteCallResult<Data<Vec<ProductRatingStats>>>>;

    async fn get_product_total_sold(
        &self,
        product_ids: &[String],
    ) -> Result<RemoteCallResult<Data<Vec<ProductTotalSold>>>>;
}

#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn get_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<RemoteCallResult<Data<PaymentMethod>>>;

    async fn init_transaction(
        &self,
        token: &str,
        params: &InitPaymentParams,
    ) -> Result<RemoteCallResult<Data<InitTransaction>>>;
}

#[async_trait]
pub trait MediaService: Send + Sync {
    async fn upload_images(
        &self,
        token: &str,
        files: Vec<MediaFile>,
    ) -> Result<RemoteCallResult<UploadedMedia>>;
}
