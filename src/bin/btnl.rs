//! CLI for the Bitnomial REST API.
//!
//! # Usage
//!
//! ```sh
//! # Public product endpoints
//! btnl get-product-specs --active --base-symbol BUI
//! btnl get-product-datum 3668
//!
//! # Authenticated history endpoints (positional connection id + auth token)
//! btnl get-orders 42 <64-hex-auth-token> --symbol BUI --limit 10
//! btnl --env sandbox get-block-trades 42 <64-hex-auth-token> --status pending
//! ```
//!
//! Exits 0 on success, non-zero on any transport or server error.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use btnl_rs::client::{AuthBitnomialClient, BitnomialClient};
use btnl_rs::constants::API_BASE_URL;
use btnl_rs::types::enums::{BaseSymbol, BlockTradeStatus, Env, Ordering, ProductType};
use btnl_rs::types::orders::{BlockTradesQuery, HistoryQuery};
use btnl_rs::types::products::ProductQuery;

#[derive(Parser, Debug)]
#[command(name = "btnl")]
#[command(about = "CLI client for the Bitnomial exchange REST API")]
struct Cli {
    /// REST base URL.
    #[arg(long, default_value = API_BASE_URL)]
    base_url: String,

    /// Exchange environment (prod or sandbox).
    #[arg(long, default_value = "prod")]
    env: Env,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the specification of one product.
    GetProductSpec {
        product_id: u64,
        #[command(flatten)]
        query: PublicArgs,
    },
    /// Fetch daily market data for one product.
    GetProductDatum {
        product_id: u64,
        #[command(flatten)]
        query: PublicArgs,
    },
    /// Fetch the specifications of all matching products.
    GetProductSpecs {
        #[command(flatten)]
        query: PublicArgs,
    },
    /// Fetch daily market data for all matching products.
    GetProductData {
        #[command(flatten)]
        query: PublicArgs,
    },
    /// Fetch order history (authenticated).
    GetOrders {
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Fetch fill history (authenticated).
    GetFills {
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Fetch block-trade history (authenticated).
    GetBlockTrades {
        #[command(flatten)]
        auth: AuthArgs,
        /// Filter by clearing status (repeatable).
        #[arg(long = "status")]
        statuses: Vec<BlockTradeStatus>,
    },
}

/// Filters shared by the public product subcommands.
#[derive(Args, Debug)]
struct PublicArgs {
    /// Restrict to products listed on this day (YYYY-MM-DD).
    #[arg(long)]
    day: Option<NaiveDate>,

    /// Restrict to currently active products.
    #[arg(long)]
    active: bool,

    /// Restrict to one base symbol family.
    #[arg(long)]
    base_symbol: Option<BaseSymbol>,
}

impl PublicArgs {
    fn into_query(self) -> ProductQuery {
        ProductQuery {
            day: self.day,
            active: self.active.then_some(true),
            base_symbol: self.base_symbol,
        }
    }
}

/// Credentials and filters shared by the authenticated subcommands.
#[derive(Args, Debug)]
struct AuthArgs {
    /// Connection id assigned by the exchange.
    connection_id: u64,

    /// Auth token in hex form (the HMAC signing key).
    auth_token: String,

    /// Filter by symbol (repeatable).
    #[arg(long = "symbol")]
    symbols: Vec<String>,

    /// Filter by connection id (repeatable).
    #[arg(long = "cid")]
    connection_ids: Vec<u64>,

    /// Filter by product id (repeatable).
    #[arg(long = "pid")]
    product_ids: Vec<u64>,

    /// Filter by account id (repeatable).
    #[arg(long = "accid")]
    account_ids: Vec<String>,

    /// Filter by clearing firm code (repeatable).
    #[arg(long = "clfc")]
    clearing_firm_codes: Vec<String>,

    /// Filter by product type (repeatable).
    #[arg(long = "product-type")]
    product_types: Vec<ProductType>,

    /// Sort direction (asc or desc).
    #[arg(long)]
    order: Option<Ordering>,

    /// Earliest timestamp to include (RFC 3339).
    #[arg(long = "begin")]
    begin_time: Option<DateTime<Utc>>,

    /// Latest timestamp to include (RFC 3339).
    #[arg(long = "end")]
    end_time: Option<DateTime<Utc>>,

    /// Page size.
    #[arg(long)]
    limit: Option<u32>,

    /// Restrict to one trading day (YYYY-MM-DD).
    #[arg(long)]
    day: Option<NaiveDate>,

    /// Resume cursor from a previous page.
    #[arg(long)]
    cursor: Option<String>,
}

impl AuthArgs {
    fn client(&self, public: BitnomialClient) -> AuthBitnomialClient {
        AuthBitnomialClient::new(public, self.connection_id, self.auth_token.clone())
    }

    fn into_query(self) -> HistoryQuery {
        HistoryQuery {
            symbols: self.symbols,
            connection_ids: self.connection_ids,
            product_ids: self.product_ids,
            account_ids: self.account_ids,
            clearing_firm_codes: self.clearing_firm_codes,
            product_types: self.product_types,
            order: self.order,
            begin_time: self.begin_time,
            end_time: self.end_time,
            limit: self.limit,
            day: self.day,
            cursor: self.cursor,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = BitnomialClient::with_base_url(&cli.base_url, cli.env);

    match cli.command {
        Command::GetProductSpec { product_id, query } => {
            let spec = client
                .get_product_spec(product_id, &query.into_query())
                .await?;
            println!("{spec:#?}");
        }
        Command::GetProductDatum { product_id, query } => {
            let datum = client
                .get_product_datum(product_id, &query.into_query())
                .await?;
            println!("{datum:#?}");
        }
        Command::GetProductSpecs { query } => {
            let specs = client.get_product_specs(&query.into_query()).await?;
            println!("{specs:#?}");
        }
        Command::GetProductData { query } => {
            let data = client.get_product_data(&query.into_query()).await?;
            println!("{data:#?}");
        }
        Command::GetOrders { auth } => {
            let signed = auth.client(client);
            let page = signed.get_orders(&auth.into_query()).await?;
            println!("{page:#?}");
        }
        Command::GetFills { auth } => {
            let signed = auth.client(client);
            let page = signed.get_fills(&auth.into_query()).await?;
            println!("{page:#?}");
        }
        Command::GetBlockTrades { auth, statuses } => {
            let signed = auth.client(client);
            let query = BlockTradesQuery {
                history: auth.into_query(),
                statuses,
            };
            let page = signed.get_block_trades(&query).await?;
            println!("{page:#?}");
        }
    }

    Ok(())
}
