// Request and response payloads exchanged with the peer services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---- product service ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub sku_code: String,
    #[serde(default)]
    pub sku_name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, rename = "quantity_reserver")]
    pub quantity_reserved: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_date: Option<DateTime<Utc>>,
}

impl Sku {
    pub fn available(&self) -> i64 {
        self.quantity - self.quantity_reserved
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: ProductInfo,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub option: Vec<ProductOption>,
    #[serde(default)]
    pub sku: Vec<ProductSku>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub brand_id: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub shop_id: String,
    #[serde(default)]
    pub image: String,
    /// Comma separated media URLs.
    #[serde(default)]
    pub media: String,
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub max_price: f64,
    #[serde(default)]
    pub min_price_sku_id: String,
    #[serde(default)]
    pub max_price_sku_id: String,
    #[serde(default)]
    pub delete_status: String,
    #[serde(default)]
    pub product_is_permission_check: bool,
    #[serde(default)]
    pub product_is_permission_return: bool,
    #[serde(default)]
    pub create_by: String,
    #[serde(default)]
    pub update_by: Option<String>,
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_date: Option<DateTime<Utc>>,
}

impl ProductInfo {
    pub fn media_urls(&self) -> Vec<&str> {
        self.media
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub brand_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub option_name: String,
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    pub option_value_id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSku {
    pub id: String,
    #[serde(default)]
    pub sku_code: String,
    #[serde(default)]
    pub option_value_ids: Vec<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub weight: f64,
}

/// Step of the two-phase stock reservation the order flow drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationAction {
    Hold,
    Commit,
    Rollback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuReservation {
    pub sku_id: String,
    #[serde(rename = "quantity_reserver")]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SkuReservationRequest<'a> {
    pub status: ReservationAction,
    #[serde(rename = "data")]
    pub items: &'a [SkuReservation],
}

// ---- order service ----

#[derive(Debug, Serialize)]
pub(crate) struct OrderStatusRequest<'a> {
    pub status: &'a str,
    pub shop_order_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductIdsRequest<'a> {
    pub product_ids: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRatingStats {
    pub product_id: String,
    #[serde(default)]
    pub total_reviews: i64,
    #[serde(default)]
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTotalSold {
    pub product_id: String,
    #[serde(default)]
    pub total_sold: i64,
}

// ---- transaction (payment) service ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub quantity: i64,
    pub price: f64,
}

/// Per-shop money breakdown of an order, computed by the order service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementDetail {
    pub shop_order_id: String,
    pub order_subtotal: f64,
    #[serde(default)]
    pub shop_funded_product_discount: f64,
    #[serde(default)]
    pub site_funded_product_discount: f64,
    #[serde(default)]
    pub shop_voucher_discount: f64,
    pub shipping_fee: f64,
    #[serde(default)]
    pub shop_shipping_discount: f64,
    #[serde(default)]
    pub site_order_discount: f64,
    #[serde(default)]
    pub site_shipping_discount: f64,
    pub commission_fee: f64,
    pub net_settled_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitPaymentParams {
    pub order_id: String,
    pub amount: f64,
    pub payment_method_id: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub site_order_voucher_discount_amount: f64,
    #[serde(default)]
    pub site_promotion_discount_amount: f64,
    #[serde(default)]
    pub site_shipping_discount_amount: f64,
    #[serde(default)]
    pub total_site_funded_product_discount: f64,
    pub settlement_details: Vec<SettlementDetail>,
    pub user_info: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitTransaction {
    pub order_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub partner_code: String,
    #[serde(default)]
    pub pay_url: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub response_time: i64,
    #[serde(default)]
    pub result_code: i64,
    #[serde(default)]
    pub short_link: String,
}

// ---- media service ----

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedMedia {
    #[serde(default)]
    pub urls: Vec<String>,
}
