use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ecom-interlink")]
#[command(about = "Call e-commerce peer services and manage password hashes")]
pub struct CliConfig {
    /// TOML file with service URLs; falls back to URL_* environment variables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token for authenticated calls; defaults to auth.system_token.
    #[arg(long, global = true, env = "TOKEN_SYSTEM", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit JSON log lines instead of the compact console format.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Hash a password with bcrypt. The password is read from
    /// INTERLINK_PASSWORD, or from the first line of stdin when unset.
    HashPassword {
        #[arg(skip = password_from_env())]
        password: Option<String>,
        #[arg(long, default_value_t = crate::core::password::DEFAULT_COST)]
        cost: u32,
    },
    /// Check a password against a stored hash. The password is read like
    /// `hash-password` does.
    VerifyPassword {
        #[arg(skip = password_from_env())]
        password: Option<String>,
        hash: String,
    },
    /// Fetch one SKU from the product service.
    Sku { sku_id: String },
    /// Fetch a product with brand, category, options and SKUs.
    Product { product_id: String },
    /// Reserve, commit or release stock for SKUs (`sku_id=quantity` pairs).
    ReserveSkus {
        #[arg(value_enum)]
        action: ReservationArg,
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Fetch a payment method from the transaction service.
    PaymentMethod { payment_method_id: String },
    /// Move a shop order to a new status. Needs a system token.
    OrderStatus { shop_order_id: String, status: String },
    /// Tell the order service an online payment went through.
    ConfirmPayment { order_id: String },
    /// Units sold per product.
    TotalSold {
        #[arg(required = true)]
        product_ids: Vec<String>,
    },
    /// Review counts and average rating per product.
    RatingStats {
        #[arg(required = true)]
        product_ids: Vec<String>,
    },
}

pub const PASSWORD_ENV: &str = "INTERLINK_PASSWORD";

fn password_from_env() -> Option<String> {
    std::env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReservationArg {
    Hold,
    Commit,
    Rollback,
}

impl From<ReservationArg> for crate::domain::peers::ReservationAction {
    fn from(arg: ReservationArg) -> Self {
        match arg {
            ReservationArg::Hold => Self::Hold,
            ReservationArg::Commit => Self::Commit,
            ReservationArg::Rollback => Self::Rollback,
        }
    }
}
