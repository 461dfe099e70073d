//! Shared enum types that map directly to Bitnomial API string values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Exchange environment prefixing every REST route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// The production exchange.
    Prod,
    /// The sandbox exchange.
    Sandbox,
}

impl Env {
    /// The path segment for this environment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(Self::Prod),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!("unknown environment: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Base symbol
// ---------------------------------------------------------------------------

/// Root symbol family of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseSymbol {
    /// Bitcoin US Dollar index futures (prod only).
    BUI,
    /// Bitcoin US Dollar settled futures (prod only).
    BUS,
    /// Sandbox-only test family.
    ZZZ,
}

impl fmt::Display for BaseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BUI => "BUI",
            Self::BUS => "BUS",
            Self::ZZZ => "ZZZ",
        };
        f.write_str(s)
    }
}

impl FromStr for BaseSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUI" => Ok(Self::BUI),
            "BUS" => Ok(Self::BUS),
            "ZZZ" => Ok(Self::ZZZ),
            other => Err(format!("unknown base symbol: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Product status
// ---------------------------------------------------------------------------

/// Listing status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Forthcoming,
    Expired,
}

// ---------------------------------------------------------------------------
// Product type
// ---------------------------------------------------------------------------

/// Kind of tradable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Future,
    Spread,
    Option,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Future => "future",
            Self::Spread => "spread",
            Self::Option => "option",
        };
        f.write_str(s)
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "future" => Ok(Self::Future),
            "spread" => Ok(Self::Spread),
            "option" => Ok(Self::Option),
            other => Err(format!("unknown product type: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Result ordering
// ---------------------------------------------------------------------------

/// Sort direction for paginated history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    Asc,
    Desc,
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        };
        f.write_str(s)
    }
}

impl FromStr for Ordering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown ordering: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Block trade status
// ---------------------------------------------------------------------------

/// Clearing status of a block trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTradeStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for BlockTradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl FromStr for BlockTradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown block trade status: {other:?}")),
        }
    }
}
