//! Product endpoints — specs and daily market data. Unauthenticated.

use crate::client::BitnomialClient;
use crate::error::RestError;
use crate::types::products::{ProductData, ProductQuery, ProductSpec};

impl BitnomialClient {
    /// Retrieve the specification of one product.
    ///
    /// **Endpoint:** `GET /{env}/product/spec/{product_id}`
    pub async fn get_product_spec(
        &self,
        product_id: u64,
        query: &ProductQuery,
    ) -> Result<ProductSpec, RestError> {
        let route = self.route(&format!("/product/spec/{product_id}"));
        self.get_json(&route, &query.to_params()).await
    }

    /// Retrieve the specifications of all matching products.
    ///
    /// **Endpoint:** `GET /{env}/product/specs`
    pub async fn get_product_specs(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<ProductSpec>, RestError> {
        let route = self.route("/product/specs");
        self.get_json(&route, &query.to_params()).await
    }

    /// Retrieve daily market data for one product.
    ///
    /// **Endpoint:** `GET /{env}/product/data/{product_id}`
    pub async fn get_product_datum(
        &self,
        product_id: u64,
        query: &ProductQuery,
    ) -> Result<ProductData, RestError> {
        let route = self.route(&format!("/product/data/{product_id}"));
        self.get_json(&route, &query.to_params()).await
    }

    /// Retrieve daily market data for all matching products.
    ///
    /// **Endpoint:** `GET /{env}/product/data`
    pub async fn get_product_data(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<ProductData>, RestError> {
        let route = self.route("/product/data");
        self.get_json(&route, &query.to_params()).await
    }
}
