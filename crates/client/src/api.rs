//! REST client for the `/api/v1` endpoints.

use quotedesk_core::pricing::ProcedureTotal;
use quotedesk_core::schema::{ClientInput, PriceInput, ProcedureInput, QuoteInput, UpdateProcedure};
use quotedesk_core::types::DbId;
use quotedesk_db::models::client::Client;
use quotedesk_db::models::price::Price;
use quotedesk_db::models::procedure::ProcedureWithPrices;
use quotedesk_db::models::quote::{Quote, QuoteDetail};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Body of a successful `DELETE`.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted<T> {
    pub message: String,
    pub deleted: T,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub db_healthy: bool,
}

/// HTTP client for one QuoteDesk server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- clients ----

    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        self.get("/clients").await
    }

    pub async fn get_client(&self, id: DbId) -> Result<Client, ClientError> {
        self.get(&format!("/clients/{id}")).await
    }

    pub async fn create_client(&self, input: &ClientInput) -> Result<Client, ClientError> {
        self.post("/clients", input).await
    }

    pub async fn update_client(&self, id: DbId, input: &ClientInput) -> Result<Client, ClientError> {
        self.put(&format!("/clients/{id}"), input).await
    }

    pub async fn delete_client(&self, id: DbId) -> Result<Deleted<Client>, ClientError> {
        self.delete(&format!("/clients/{id}")).await
    }

    // ---- procedures ----

    pub async fn list_procedures(&self) -> Result<Vec<ProcedureWithPrices>, ClientError> {
        self.get("/procedures").await
    }

    pub async fn get_procedure(&self, id: DbId) -> Result<ProcedureWithPrices, ClientError> {
        self.get(&format!("/procedures/{id}")).await
    }

    /// Create a procedure together with its price tiers.
    pub async fn create_procedure(
        &self,
        input: &ProcedureInput,
    ) -> Result<ProcedureWithPrices, ClientError> {
        self.post("/procedures", input).await
    }

    pub async fn update_procedure(
        &self,
        id: DbId,
        input: &UpdateProcedure,
    ) -> Result<ProcedureWithPrices, ClientError> {
        self.put(&format!("/procedures/{id}"), input).await
    }

    pub async fn delete_procedure(
        &self,
        id: DbId,
    ) -> Result<Deleted<ProcedureWithPrices>, ClientError> {
        self.delete(&format!("/procedures/{id}")).await
    }

    pub async fn list_prices(&self, procedure_id: DbId) -> Result<Vec<Price>, ClientError> {
        self.get(&format!("/procedures/{procedure_id}/prices")).await
    }

    pub async fn update_price(
        &self,
        procedure_id: DbId,
        price_id: DbId,
        input: &PriceInput,
    ) -> Result<Price, ClientError> {
        self.put(&format!("/procedures/{procedure_id}/prices/{price_id}"), input)
            .await
    }

    pub async fn procedure_total(
        &self,
        procedure_id: DbId,
        discount: Decimal,
    ) -> Result<ProcedureTotal, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/procedures/{procedure_id}/total")))
            .query(&[("discount", discount.to_string())])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- quotes ----

    pub async fn list_quotes(&self) -> Result<Vec<QuoteDetail>, ClientError> {
        self.get("/quotes").await
    }

    pub async fn get_quote(&self, id: DbId) -> Result<QuoteDetail, ClientError> {
        self.get(&format!("/quotes/{id}")).await
    }

    pub async fn create_quote(&self, input: &QuoteInput) -> Result<QuoteDetail, ClientError> {
        self.post("/quotes", input).await
    }

    pub async fn delete_quote(&self, id: DbId) -> Result<Deleted<Quote>, ClientError> {
        self.delete(&format!("/quotes/{id}")).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    /// Decode a 2xx JSON body, or turn the error body into [`ClientError::Api`].
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), %body, "API request failed");
            return Err(ClientError::from_body(status.as_u16(), &body));
        }
        Ok(response.json::<T>().await?)
    }
}
