#![allow(missing_docs)]
//! Order, fill, and block-trade history types.
//!
//! Returned by the authenticated `/orders`, `/fills`, and `/block-trades`
//! endpoints. These endpoints paginate: responses arrive as
//! [`Paginated<T>`] and the cursor feeds the next request's query.
//!
//! Record fields are individually optional — the exchange omits whatever
//! does not apply to a row — mirroring how the JSON arrives.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

use crate::auth::QueryParams;

use super::enums::{BlockTradeStatus, Ordering, ProductType};

// ---------------------------------------------------------------------------
// Pagination envelope
// ---------------------------------------------------------------------------

/// Cursor to resume a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Filters accepted by `/orders` and `/fills`.
///
/// List fields repeat their key on the wire; empty lists are omitted.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub symbols: Vec<String>,
    pub connection_ids: Vec<u64>,
    pub product_ids: Vec<u64>,
    pub account_ids: Vec<String>,
    pub clearing_firm_codes: Vec<String>,
    pub product_types: Vec<ProductType>,
    pub order: Option<Ordering>,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub day: Option<NaiveDate>,
    pub cursor: Option<String>,
}

impl HistoryQuery {
    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_list("symbol", &self.symbols);
        params.push_list("connection_id", &self.connection_ids);
        params.push_list("product_id", &self.product_ids);
        params.push_list("account_id", &self.account_ids);
        params.push_list("clearing_firm_code", &self.clearing_firm_codes);
        params.push_list("product_type", &self.product_types);
        params.push_opt("order", self.order.as_ref());
        params.push_opt("begin_time", self.begin_time.map(fmt_time).as_ref());
        params.push_opt("end_time", self.end_time.map(fmt_time).as_ref());
        params.push_opt("limit", self.limit.as_ref());
        params.push_opt("day", self.day.as_ref());
        params.push_opt("cursor", self.cursor.as_ref());
        params
    }
}

/// Filters accepted by `/block-trades`: everything [`HistoryQuery`] takes,
/// plus clearing status.
#[derive(Debug, Clone, Default)]
pub struct BlockTradesQuery {
    pub history: HistoryQuery,
    pub statuses: Vec<BlockTradeStatus>,
}

impl BlockTradesQuery {
    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = self.history.to_params();
        params.push_list("status", &self.statuses);
        params
    }
}

fn fmt_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of order history.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub ack_id: Option<u64>,
    #[serde(default)]
    pub connection_id: Option<u64>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub clearing_firm_code: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub filled_quantity: Option<i64>,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One row of fill history.
#[derive(Debug, Clone, Deserialize)]
pub struct FillRecord {
    #[serde(default)]
    pub ack_id: Option<u64>,
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub connection_id: Option<u64>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub clearing_firm_code: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub liquidity: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One row of block-trade history.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTradeRecord {
    #[serde(default)]
    pub block_trade_id: Option<u64>,
    #[serde(default)]
    pub ack_id: Option<u64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub status: Option<BlockTradeStatus>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
