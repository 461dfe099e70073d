//! Authenticated history endpoints — orders, fills, block trades.
//!
//! All three paginate: pass the returned cursor back via the query to fetch
//! the next page.

use crate::client::AuthBitnomialClient;
use crate::error::RestError;
use crate::types::orders::{
    BlockTradeRecord, BlockTradesQuery, FillRecord, HistoryQuery, OrderRecord, Paginated,
};

impl AuthBitnomialClient {
    /// Retrieve order history.
    ///
    /// **Endpoint:** `GET /{env}/orders`
    pub async fn get_orders(
        &self,
        query: &HistoryQuery,
    ) -> Result<Paginated<OrderRecord>, RestError> {
        self.signed_get("/orders", &query.to_params()).await
    }

    /// Retrieve fill history.
    ///
    /// **Endpoint:** `GET /{env}/fills`
    pub async fn get_fills(
        &self,
        query: &HistoryQuery,
    ) -> Result<Paginated<FillRecord>, RestError> {
        self.signed_get("/fills", &query.to_params()).await
    }

    /// Retrieve block-trade history.
    ///
    /// **Endpoint:** `GET /{env}/block-trades`
    pub async fn get_block_trades(
        &self,
        query: &BlockTradesQuery,
    ) -> Result<Paginated<BlockTradeRecord>, RestError> {
        self.signed_get("/block-trades", &query.to_params()).await
    }
}
