pub mod media;
pub mod order;
pub mod password;
pub mod product;
pub mod registry;
pub mod transaction;
pub mod transport;

pub use crate::domain::model::{Data, RemoteCallResult};
pub use crate::domain::ports::{MediaService, OrderService, ProductService, TransactionService};
pub use crate::utils::error::Result;
