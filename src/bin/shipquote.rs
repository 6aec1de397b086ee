//! # shipquote
//!
//! Quotes shipping for a destination against a catalog snapshot.
//!
//! ```text
//! shipquote --catalog catalog.json methods 400010 --weight 2.5
//! shipquote --catalog catalog.json quote m-std 400010 --as-of 2026-10-16T10:00:00Z
//! ```

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shipping_resolver::application::services::ShippingResolutionService;
use shipping_resolver::domain::value_objects::{MethodId, ResolutionContext, Timestamp};
use shipping_resolver::infrastructure::EngineSettings;
use shipping_resolver::infrastructure::persistence::CatalogSnapshot;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Shipping zone and rate resolution from the command line.
#[derive(Parser, Debug)]
#[command(name = "shipquote", version, about)]
struct Cli {
    /// Catalog snapshot (JSON).
    #[arg(long)]
    catalog: PathBuf,

    /// Engine settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,

    /// Continue even if the catalog has validation issues.
    #[arg(long)]
    allow_invalid: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every method available for a destination.
    Methods {
        /// Destination postal code.
        pincode: String,
        #[command(flatten)]
        shipment: ShipmentArgs,
    },
    /// Price one method for a destination.
    Quote {
        /// Shipping method id.
        method_id: String,
        /// Destination postal code.
        pincode: String,
        #[command(flatten)]
        shipment: ShipmentArgs,
    },
}

#[derive(Args, Debug)]
struct ShipmentArgs {
    /// Shipment weight in kilograms.
    #[arg(long)]
    weight: Option<Decimal>,

    /// Order value.
    #[arg(long)]
    order_value: Option<Decimal>,

    /// Product category in the cart (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Customer group.
    #[arg(long)]
    group: Option<String>,

    /// Reference time (RFC 3339); defaults to now.
    #[arg(long)]
    as_of: Option<String>,
}

impl ShipmentArgs {
    fn into_context(self) -> anyhow::Result<ResolutionContext> {
        let as_of = match self.as_of.as_deref() {
            Some(raw) => Timestamp::parse_rfc3339(raw)?,
            None => Timestamp::now(),
        };
        let mut ctx = ResolutionContext::new(as_of).with_categories(self.categories);
        if let Some(weight) = self.weight {
            ctx = ctx.with_weight(weight);
        }
        if let Some(value) = self.order_value {
            ctx = ctx.with_order_value(value);
        }
        if let Some(group) = self.group {
            ctx = ctx.with_customer_group(group);
        }
        Ok(ctx)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let settings =
        EngineSettings::load(cli.config.as_deref()).context("failed to load engine settings")?;
    let config = settings.resolution_config()?;

    let snapshot = CatalogSnapshot::load_from_path(&cli.catalog)
        .await
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    let issues = snapshot.validate();
    for issue in &issues {
        tracing::warn!(%issue, "catalog validation issue");
    }
    if !issues.is_empty() && !cli.allow_invalid {
        bail!("catalog has {} validation issue(s)", issues.len());
    }

    let catalog = snapshot.into_repositories();
    let service = ShippingResolutionService::new(
        Arc::new(catalog.zones),
        Arc::new(catalog.methods),
        Arc::new(catalog.rates),
        Arc::new(settings.holiday_calendar()),
        config,
    );

    let output = match cli.command {
        Commands::Methods { pincode, shipment } => {
            let ctx = shipment.into_context()?;
            let quotes = service.list_available_methods(&pincode, &ctx).await?;
            serde_json::to_string_pretty(&quotes)?
        }
        Commands::Quote {
            method_id,
            pincode,
            shipment,
        } => {
            let ctx = shipment.into_context()?;
            let quote = service
                .calculate_shipping(&MethodId::new(method_id), &pincode, &ctx)
                .await?;
            serde_json::to_string_pretty(&quote)?
        }
    };

    println!("{output}");
    Ok(())
}
