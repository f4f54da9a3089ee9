use crate::config::InterlinkConfig;
use crate::core::media::MediaClient;
use crate::core::order::OrderClient;
use crate::core::product::ProductClient;
use crate::core::transaction::TransactionClient;
use crate::core::transport::Transport;
use crate::utils::error::{InterlinkError, Result};
use crate::utils::validation::Validate;

/// Every peer client a service talks to, sharing one transport.
#[derive(Debug, Clone)]
pub struct PeerServices {
    transport: Transport,
    pub product: ProductClient,
    pub order: OrderClient,
    pub transaction: TransactionClient,
    media: Option<MediaClient>,
}

impl PeerServices {
    pub fn from_config(config: &InterlinkConfig) -> Result<Self> {
        config.validate()?;

        let transport = match config.user_agent() {
            Some(agent) => Transport::with_user_agent(config.timeout(), agent)?,
            None => Transport::new(config.timeout())?,
        };

        let services = &config.services;
        let media = services
            .media
            .as_deref()
            .map(|url| MediaClient::new(url, &transport))
            .transpose()?;

        tracing::info!(
            "Peer clients ready (timeout {:?}): product={}, order={}, transaction={}, media={}",
            transport.timeout(),
            services.product,
            services.order,
            services.transaction,
            services.media.as_deref().unwrap_or("-")
        );

        Ok(Self {
            product: ProductClient::new(&services.product, &transport)?,
            order: OrderClient::new(&services.order, &transport)?,
            transaction: TransactionClient::new(&services.transaction, &transport)?,
            media,
            transport,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn media(&self) -> Result<&MediaClient> {
        self.media.as_ref().ok_or_else(|| InterlinkError::MissingConfigError {
            field: "services.media".to_string(),
        })
    }
}
