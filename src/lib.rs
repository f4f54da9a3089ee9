pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::InterlinkConfig;
pub use crate::core::{
    media::MediaClient,
    order::{index_by_product, OrderClient},
    password::{PasswordHash, PasswordHasher},
    product::ProductClient,
    registry::PeerServices,
    transaction::TransactionClient,
    transport::{ServiceClient, Transport},
};
pub use domain::model::{Data, RemoteCallResult};
pub use utils::error::{InterlinkError, Result};
