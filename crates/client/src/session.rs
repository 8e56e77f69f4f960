//! One front-desk session: an [`ApiClient`] plus its [`ViewCache`].
//!
//! List reads go through the cache; every successful mutation invalidates
//! the lists it can affect. Failed mutations leave the cache untouched.

use quotedesk_core::schema::{ClientInput, PriceInput, ProcedureInput, QuoteInput, UpdateProcedure};
use quotedesk_core::types::DbId;
use quotedesk_db::models::client::Client;
use quotedesk_db::models::price::Price;
use quotedesk_db::models::procedure::ProcedureWithPrices;
use quotedesk_db::models::quote::{Quote, QuoteDetail};

use crate::api::{ApiClient, Deleted};
use crate::cache::ViewCache;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct Session {
    pub api: ApiClient,
    pub views: ViewCache,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            views: ViewCache::new(),
        }
    }

    // ---- cached lists ----

    pub async fn clients(&mut self) -> Result<Option<&[Client]>, ClientError> {
        let api = &self.api;
        self.views.clients.load(|| api.list_clients()).await
    }

    pub async fn procedures(&mut self) -> Result<Option<&[ProcedureWithPrices]>, ClientError> {
        let api = &self.api;
        self.views.procedures.load(|| api.list_procedures()).await
    }

    pub async fn quotes(&mut self) -> Result<Option<&[QuoteDetail]>, ClientError> {
        let api = &self.api;
        self.views.quotes.load(|| api.list_quotes()).await
    }

    // ---- mutations ----

    pub async fn create_client(&mut self, input: &ClientInput) -> Result<Client, ClientError> {
        let client = self.api.create_client(input).await?;
        self.views.client_changed();
        Ok(client)
    }

    pub async fn update_client(
        &mut self,
        id: DbId,
        input: &ClientInput,
    ) -> Result<Client, ClientError> {
        let client = self.api.update_client(id, input).await?;
        self.views.client_changed();
        Ok(client)
    }

    pub async fn delete_client(&mut self, id: DbId) -> Result<Deleted<Client>, ClientError> {
        let deleted = self.api.delete_client(id).await?;
        self.views.client_changed();
        Ok(deleted)
    }

    pub async fn create_procedure(
        &mut self,
        input: &ProcedureInput,
    ) -> Result<ProcedureWithPrices, ClientError> {
        let procedure = self.api.create_procedure(input).await?;
        self.views.procedure_changed();
        Ok(procedure)
    }

    pub async fn update_procedure(
        &mut self,
        id: DbId,
        input: &UpdateProcedure,
    ) -> Result<ProcedureWithPrices, ClientError> {
        let procedure = self.api.update_procedure(id, input).await?;
        self.views.procedure_changed();
        Ok(procedure)
    }

    pub async fn delete_procedure(
        &mut self,
        id: DbId,
    ) -> Result<Deleted<ProcedureWithPrices>, ClientError> {
        let deleted = self.api.delete_procedure(id).await?;
        self.views.procedure_changed();
        Ok(deleted)
    }

    pub async fn update_price(
        &mut self,
        procedure_id: DbId,
        price_id: DbId,
        input: &PriceInput,
    ) -> Result<Price, ClientError> {
        let price = self.api.update_price(procedure_id, price_id, input).await?;
        self.views.procedure_changed();
        Ok(price)
    }

    pub async fn create_quote(&mut self, input: &QuoteInput) -> Result<QuoteDetail, ClientError> {
        let quote = self.api.create_quote(input).await?;
        self.views.quote_changed();
        tracing::debug!(quote_id = %quote.id, "Quote list invalidated");
        Ok(quote)
    }

    pub async fn delete_quote(&mut self, id: DbId) -> Result<Deleted<Quote>, ClientError> {
        let deleted = self.api.delete_quote(id).await?;
        self.views.quote_changed();
        Ok(deleted)
    }
}
