use crate::core::transport::{ServiceClient, Transport};
use crate::domain::model::{Data, RemoteCallResult};
use crate::domain::peers::{InitPaymentParams, InitTransaction, PaymentMethod};
use crate::domain::ports::TransactionService;
use crate::utils::error::{InterlinkError, Result};
use crate::utils::validation::require_identifier;
use async_trait::async_trait;
use reqwest::Method;

const SERVICE: &str = "transaction";

/// Client for the payment service's transaction API.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    inner: ServiceClient,
}

impl TransactionClient {
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
impl TransactionService for TransactionClient {
    async fn get_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<RemoteCallResult<Data<PaymentMethod>>> {
        require_identifier(SERVICE, "payment_method_id", payment_method_id)?;
        self.inner
            .request(
                Method::GET,
                "/v1/transaction/payment_method",
                Some(payment_method_id),
            )?
            .send()
            .await
    }

    async fn init_transaction(
        &self,
        token: &str,
        params: &InitPaymentParams,
    ) -> Result<RemoteCallResult<Data<InitTransaction>>> {
        require_identifier(SERVICE, "order_id", &params.order_id)?;
        require_identifier(SERVICE, "payment_method_id", &params.payment_method_id)?;
        if params.settlement_details.is_empty() {
            return Err(InterlinkError::request_build(
                SERVICE,
                "settlement_details needs at least one shop entry",
            ));
        }

        self.inner
            .request(Method::POST, "/v1/transaction/init", None)?
            .bearer(token)?
            .json(params)?
            .send()
            .await
    }
}
