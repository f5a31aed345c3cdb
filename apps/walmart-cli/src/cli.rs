//! Command line definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use walmart_core::{ClientConfig, Country, Environment};

/// Walmart Marketplace command line client.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log level filter. `RUST_LOG` takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Credentials and target environment.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Consumer id.
    #[arg(long, env = "WALMART_CONSUMER_ID", hide_env_values = true)]
    pub consumer_id: String,

    /// Private key used for request signatures.
    #[arg(long, env = "WALMART_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Value of the `WM_CONSUMER.CHANNEL.TYPE` header.
    #[arg(long, env = "WALMART_CHANNEL_TYPE")]
    pub channel_type: String,

    /// `production`, `staging` or `mock`.
    #[arg(long = "env", env = "WALMART_ENV", default_value = "production")]
    pub environment: String,

    /// Country code; only `ca` is routed separately.
    #[arg(long, env = "WALMART_COUNTRY")]
    pub country: Option<String>,

    /// Retries for transient failures.
    #[arg(long, env = "WALMART_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Base URL override.
    #[arg(long, env = "WALMART_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "WALMART_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    /// Build and validate the client configuration.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let environment: Environment = self
            .environment
            .parse()
            .context("invalid --env value")?;
        let mut config = ClientConfig::builder()
            .consumer_id(self.consumer_id.as_str())
            .private_key(self.private_key.as_str())
            .channel_type(self.channel_type.as_str())
            .environment(environment)
            .max_retries(self.max_retries)
            .timeout_secs(self.timeout_secs)
            .build();
        config.country = self.country.as_deref().and_then(Country::from_code);
        config.base_url.clone_from(&self.base_url);
        config.validate()?;
        Ok(config)
    }
}

/// Resource to operate on.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Feed status and uploads.
    #[command(subcommand)]
    Feeds(FeedCommand),
    /// Catalog items.
    #[command(subcommand)]
    Items(ItemCommand),
    /// Orders.
    #[command(subcommand)]
    Orders(OrderCommand),
}

/// Feed operations.
#[derive(Debug, Subcommand)]
pub enum FeedCommand {
    /// List one page of feeds.
    List {
        /// Only this feed.
        #[arg(long)]
        feed_id: Option<String>,
        /// Page size (at most 50).
        #[arg(long)]
        limit: Option<i64>,
        /// Page offset.
        #[arg(long)]
        offset: Option<i64>,
    },
    /// List every feed page.
    ListAll,
    /// Show one feed.
    Get {
        /// Feed id.
        feed_id: String,
        /// Include per-item details.
        #[arg(long)]
        details: bool,
    },
    /// Upload a feed file.
    Upload {
        /// XML file to upload.
        path: std::path::PathBuf,
        /// Feed type (defaults to CONTENT_PRODUCT).
        #[arg(long)]
        feed_type: Option<String>,
    },
}

/// Item operations.
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// List one page of items.
    List {
        /// Only this SKU.
        #[arg(long)]
        sku: Option<String>,
        /// Page size.
        #[arg(long)]
        limit: Option<i64>,
        /// Page offset.
        #[arg(long)]
        offset: Option<i64>,
    },
    /// List every item page.
    ListAll,
    /// Show one item.
    Get {
        /// SKU.
        sku: String,
    },
    /// Retire an item.
    Retire {
        /// SKU.
        sku: String,
    },
    /// Upload items from a JSON file holding an array of records.
    Bulk {
        /// JSON file.
        path: std::path::PathBuf,
    },
}

/// Filters shared by order listings.
#[derive(Debug, Args)]
pub struct OrderFilters {
    /// Order status (Created, Acknowledged, Shipped, Cancelled).
    #[arg(long)]
    pub status: Option<String>,
    /// Earliest creation date (ISO 8601).
    #[arg(long)]
    pub created_start_date: Option<String>,
    /// Latest creation date (ISO 8601).
    #[arg(long)]
    pub created_end_date: Option<String>,
    /// Page size (at most 200).
    #[arg(long)]
    pub limit: Option<i64>,
    /// Only released orders.
    #[arg(long)]
    pub released: bool,
    /// Follow every cursor and return one aggregated result.
    #[arg(long)]
    pub all_cursors: bool,
}

/// Order operations.
#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// List orders.
    List(OrderFilters),
    /// Show one order.
    Get {
        /// Purchase order id.
        purchase_order_id: String,
    },
    /// Acknowledge an order.
    Ack {
        /// Purchase order id.
        purchase_order_id: String,
    },
    /// Cancel order lines from a JSON `orderCancellation` document.
    Cancel {
        /// Purchase order id.
        purchase_order_id: String,
        /// JSON file.
        path: std::path::PathBuf,
    },
    /// Ship order lines from a JSON `orderShipment` document.
    Ship {
        /// Purchase order id.
        purchase_order_id: String,
        /// JSON file.
        path: std::path::PathBuf,
    },
    /// Refund order lines from a JSON `orderRefund` document.
    Refund {
        /// Purchase order id.
        purchase_order_id: String,
        /// JSON file.
        path: std::path::PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const CREDENTIALS: [&str; 7] = [
        "walmart",
        "--consumer-id",
        "consumer",
        "--private-key",
        "secret",
        "--channel-type",
        "channel",
    ];

    #[test]
    fn test_should_have_consistent_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_should_parse_order_listing() {
        let args = CREDENTIALS.iter().copied().chain([
            "--env",
            "mock",
            "orders",
            "list",
            "--status",
            "Created",
            "--all-cursors",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Orders(OrderCommand::List(filters)) = cli.command else {
            panic!("expected orders list");
        };
        assert!(filters.all_cursors);
        assert_eq!(filters.status.as_deref(), Some("Created"));

        let config = cli.connection.client_config().unwrap();
        assert_eq!(config.environment, Environment::Mock);
    }

    #[test]
    fn test_should_reject_unknown_environment() {
        let args = CREDENTIALS
            .iter()
            .copied()
            .chain(["--env", "qa", "feeds", "list-all"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.connection.client_config().is_err());
    }

    #[test]
    fn test_should_ignore_unsupported_country() {
        let args = CREDENTIALS
            .iter()
            .copied()
            .chain(["--country", "us", "items", "get", "SKU-1"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.connection.client_config().unwrap().country, None);
    }
}
