#![allow(missing_docs)]
//! Product specification and market-data types.
//!
//! Returned by the unauthenticated `/product/…` endpoints. Specs are tagged
//! by a `type` field (`"future"`, `"spread"`, `"option"`) and deserialize
//! into [`ProductSpec`].

use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::QueryParams;

use super::enums::{BaseSymbol, ProductStatus};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Optional filters accepted by every `/product/…` endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Restrict to products listed on this day.
    pub day: Option<NaiveDate>,
    /// Restrict to currently active products.
    pub active: Option<bool>,
    /// Restrict to one base symbol family.
    pub base_symbol: Option<BaseSymbol>,
}

impl ProductQuery {
    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("day", self.day.as_ref());
        params.push_opt("active", self.active.as_ref());
        params.push_opt("base_symbol", self.base_symbol.as_ref());
        params
    }
}

// ---------------------------------------------------------------------------
// Product specs
// ---------------------------------------------------------------------------

/// Fields common to every product spec variant.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSpecCommon {
    pub product_id: u64,
    pub product_name: String,
    pub max_order_quantity: i64,
    pub min_block_size: i64,
    pub price_band_variation: i64,
    pub price_limit_percentage: f64,
    pub price_increment: i64,
    pub first_trading_day: String,
    pub final_settle_time: String,
    pub daily_open_time: String,
    pub daily_settle_time: String,
    pub symbol: String,
    pub cqg_symbol: String,
    pub product_status: ProductStatus,
    pub base_symbol: BaseSymbol,
}

/// Spec fields specific to a future.
#[derive(Debug, Clone, Deserialize)]
pub struct FutureSpec {
    #[serde(flatten)]
    pub common: ProductSpecCommon,
    pub margin_unit: String,
    pub settlement_method: String,
    pub contract_size: i64,
    pub contract_size_unit: String,
    pub price_quotation_unit: String,
    pub month: u32,
    pub year: i32,
}

/// One leg of a calendar spread.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadSpecLeg {
    pub product_id: u64,
    pub weight: i64,
}

/// Spec fields specific to a calendar spread.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadSpec {
    #[serde(flatten)]
    pub common: ProductSpecCommon,
    pub legs: Vec<SpreadSpecLeg>,
}

/// Spec fields specific to an option.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    #[serde(flatten)]
    pub common: ProductSpecCommon,
    pub underlying_product: u64,
    pub strike_price: f64,
    pub option_type: String,
}

/// A product specification, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductSpec {
    Future(FutureSpec),
    Spread(SpreadSpec),
    Option(OptionSpec),
}

impl ProductSpec {
    /// The fields shared by every variant.
    pub fn common(&self) -> &ProductSpecCommon {
        match self {
            Self::Future(s) => &s.common,
            Self::Spread(s) => &s.common,
            Self::Option(s) => &s.common,
        }
    }
}

// ---------------------------------------------------------------------------
// Product data
// ---------------------------------------------------------------------------

/// Daily market data for one product. Most fields are absent until the
/// product has traded or settled.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
    pub product_id: u64,
    #[serde(default)]
    pub last_price_time: Option<String>,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub settlement_time: Option<String>,
    #[serde(default)]
    pub settlement_price: Option<f64>,
    #[serde(default)]
    pub settlement_price_comment: Option<String>,
    #[serde(default)]
    pub open_price: Option<f64>,
    #[serde(default)]
    pub high_price: Option<f64>,
    #[serde(default)]
    pub low_price: Option<f64>,
    #[serde(default)]
    pub close_price: Option<f64>,
    #[serde(default)]
    pub price_change: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub notional_volume: Option<f64>,
    #[serde(default)]
    pub block_volume: Option<f64>,
    #[serde(default)]
    pub notional_block_volume: Option<f64>,
    pub price_limit_upper: f64,
    pub price_limit_lower: f64,
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub open_interest_change: Option<f64>,
}
