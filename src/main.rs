use anyhow::Context;
use clap::Parser;
use ecom_interlink::config::cli::{CliConfig, Command, PASSWORD_ENV};
use ecom_interlink::domain::peers::SkuReservation;
use ecom_interlink::domain::ports::{OrderService, ProductService, TransactionService};
use ecom_interlink::utils::error::{ErrorCategory, InterlinkError};
use ecom_interlink::utils::logger;
use ecom_interlink::{
    InterlinkConfig, PasswordHash, PasswordHasher, PeerServices, RemoteCallResult,
};
use serde::Serialize;
use std::io::BufRead;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let exit_code = match run(cli).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => match e.downcast_ref::<InterlinkError>() {
            Some(err) => {
                tracing::error!("❌ {:#} (Category: {:?})", e, err.category());
                eprintln!("❌ {:#}", e);
                eprintln!("💡 {}", err.recovery_suggestion());
                match err.category() {
                    ErrorCategory::Transport => 2,
                    ErrorCategory::Decode => 3,
                    _ => 4,
                }
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                4
            }
        },
    };

    std::process::exit(exit_code);
}

/// `Ok(false)` means the peer answered with a failure result.
async fn run(cli: CliConfig) -> anyhow::Result<bool> {
    match &cli.command {
        Command::HashPassword { password, cost } => {
            let password = resolve_password(password.clone())?;
            let hash = PasswordHasher::with_cost(*cost)?.hash(&password)?;
            println!("{}", hash);
            return Ok(true);
        }
        Command::VerifyPassword { password, hash } => {
            let password = resolve_password(password.clone())?;
            let stored = PasswordHash::parse(hash.as_str())?;
            let matches = PasswordHasher::new().verify(&password, &stored)?;
            println!("{}", if matches { "match" } else { "mismatch" });
            return Ok(matches);
        }
        _ => {}
    }

    let config = match &cli.config {
        Some(path) => InterlinkConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InterlinkConfig::from_env().context("reading URL_* environment variables")?,
    };
    let peers = PeerServices::from_config(&config)?;
    let token = cli
        .token
        .clone()
        .or_else(|| config.system_token().map(str::to_string));

    match cli.command {
        Command::Sku { sku_id } => report(&peers.product.get_sku(&sku_id).await?),
        Command::Product { product_id } => {
            report(&peers.product.get_product_detail(&product_id).await?)
        }
        Command::ReserveSkus { action, items } => {
            let items = items
                .iter()
                .map(String::as_str)
                .map(parse_reservation)
                .collect::<Result<Vec<_>, _>>()?;
            let token = require_token(token)?;
            report(
                &peers
                    .product
                    .update_sku_reservation(&token, action.into(), &items)
                    .await?,
            )
        }
        Command::PaymentMethod { payment_method_id } => report(
            &peers
                .transaction
                .get_payment_method(&payment_method_id)
                .await?,
        ),
        Command::OrderStatus {
            shop_order_id,
            status,
        } => {
            let token = require_token(token)?;
            report(
                &peers
                    .order
                    .update_order_status(&token, &shop_order_id, &status)
                    .await?,
            )
        }
        Command::ConfirmPayment { order_id } => {
            report(&peers.order.confirm_online_payment(&order_id).await?)
        }
        Command::TotalSold { product_ids } => {
            report(&peers.order.get_product_total_sold(&product_ids).await?)
        }
        Command::RatingStats { product_ids } => {
            report(&peers.order.get_bulk_rating_stats(&product_ids).await?)
        }
        Command::HashPassword { .. } | Command::VerifyPassword { .. } => Ok(true),
    }
}

fn report<T: Serialize>(result: &RemoteCallResult<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(result)?);
    if let Some(reason) = result.failure_reason() {
        tracing::warn!("Peer reported failure (code {}): {}", result.code, reason);
    }
    Ok(result.is_success())
}

fn require_token(token: Option<String>) -> Result<String, InterlinkError> {
    token.ok_or_else(|| InterlinkError::MissingConfigError {
        field: "token (--token, TOKEN_SYSTEM or auth.system_token)".to_string(),
    })
}

fn resolve_password(from_env: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = from_env {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    anyhow::ensure!(
        !password.is_empty(),
        "no password given; set {} or pipe it on stdin",
        PASSWORD_ENV
    );
    Ok(password.to_string())
}

fn parse_reservation(item: &str) -> anyhow::Result<SkuReservation> {
    let (sku_id, quantity) = item
        .split_once('=')
        .with_context(|| format!("expected sku_id=quantity, got '{}'", item))?;
    Ok(SkuReservation {
        sku_id: sku_id.to_string(),
        quantity: quantity
            .parse()
            .with_context(|| format!("invalid quantity in '{}'", item))?,
    })
}
