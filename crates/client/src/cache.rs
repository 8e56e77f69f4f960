//! Caller-owned list caches for the three list views.
//!
//! A [`ListCache`] only fetches while its view is active, keeps the last
//! list it fetched, and is emptied by [`ListCache::invalidate`] after any
//! mutation that could change it. It is never a source of truth: a stale or
//! empty cache is always answered by refetching from the server.

use std::future::Future;

use quotedesk_db::models::client::Client;
use quotedesk_db::models::procedure::ProcedureWithPrices;
use quotedesk_db::models::quote::QuoteDetail;

/// Last fetched list of one resource.
#[derive(Debug, Clone)]
pub struct ListCache<T> {
    items: Option<Vec<T>>,
    view_active: bool,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            items: None,
            view_active: false,
        }
    }
}

impl<T> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view as shown; fetching is allowed from now on.
    pub fn activate(&mut self) {
        self.view_active = true;
    }

    /// Mark the view as hidden. Cached items are kept but no fetch happens.
    pub fn deactivate(&mut self) {
        self.view_active = false;
    }

    pub fn is_active(&self) -> bool {
        self.view_active
    }

    /// Cached items, if a fetch has completed since the last invalidation.
    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// True when the view is active and holds nothing.
    pub fn needs_fetch(&self) -> bool {
        self.view_active && self.items.is_none()
    }

    /// Drop the cached list so the next [`load`](Self::load) refetches.
    pub fn invalidate(&mut self) {
        self.items = None;
    }

    /// Return the cached list, fetching it with `fetch` first if needed.
    ///
    /// Returns `Ok(None)` without calling `fetch` while the view is
    /// inactive. A failed fetch leaves the cache empty.
    pub async fn load<F, Fut, E>(&mut self, fetch: F) -> Result<Option<&[T]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if !self.view_active {
            return Ok(None);
        }
        if self.items.is_none() {
            self.items = Some(fetch().await?);
        }
        Ok(self.items.as_deref())
    }
}

/// The three list caches of one session.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    pub clients: ListCache<Client>,
    pub procedures: ListCache<ProcedureWithPrices>,
    pub quotes: ListCache<QuoteDetail>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote listings show client names, so both lists go stale.
    pub fn client_changed(&mut self) {
        self.clients.invalidate();
        self.quotes.invalidate();
    }

    /// Quote listings show procedure titles and price types.
    pub fn procedure_changed(&mut self) {
        self.procedures.invalidate();
        self.quotes.invalidate();
    }

    pub fn quote_changed(&mut self) {
        self.quotes.invalidate();
    }

    pub fn invalidate_all(&mut self) {
        self.clients.invalidate();
        self.procedures.invalidate();
        self.quotes.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    async fn fetch_counted(calls: &Cell<u32>) -> Result<Vec<u32>, String> {
        calls.set(calls.get() + 1);
        Ok(vec![1, 2, 3])
    }

    #[tokio::test]
    async fn inactive_view_never_fetches() {
        let calls = Cell::new(0);
        let mut cache = ListCache::<u32>::new();

        let loaded = cache.load(|| fetch_counted(&calls)).await.unwrap();
        assert!(loaded.is_none());
        assert_eq!(calls.get(), 0);
        assert!(!cache.needs_fetch());
    }

    #[tokio::test]
    async fn active_view_fetches_once_until_invalidated() {
        let calls = Cell::new(0);
        let mut cache = ListCache::<u32>::new();
        cache.activate();
        assert!(cache.needs_fetch());

        let loaded = cache.load(|| fetch_counted(&calls)).await.unwrap();
        assert_eq!(loaded, Some(&[1, 2, 3][..]));
        cache.load(|| fetch_counted(&calls)).await.unwrap();
        assert_eq!(calls.get(), 1);

        cache.invalidate();
        assert!(cache.items().is_none());
        cache.load(|| fetch_counted(&calls)).await.unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_empty() {
        let mut cache = ListCache::<u32>::new();
        cache.activate();

        let result = cache
            .load(|| async { Err::<Vec<u32>, _>("connection refused".to_string()) })
            .await;
        assert_eq!(result, Err("connection refused".to_string()));
        assert!(cache.needs_fetch());
    }

    #[tokio::test]
    async fn deactivated_view_keeps_items_but_stops_fetching() {
        let calls = Cell::new(0);
        let mut cache = ListCache::<u32>::new();
        cache.activate();
        cache.load(|| fetch_counted(&calls)).await.unwrap();

        cache.deactivate();
        cache.invalidate();
        let loaded = cache.load(|| fetch_counted(&calls)).await.unwrap();
        assert!(loaded.is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn client_change_invalidates_quotes_but_not_procedures() {
        let mut views = ViewCache::new();
        views.clients.items = Some(Vec::new());
        views.procedures.items = Some(Vec::new());
        views.quotes.items = Some(Vec::new());

        views.client_changed();
        assert!(views.clients.items().is_none());
        assert!(views.quotes.items().is_none());
        assert!(views.procedures.items().is_some());
    }

    #[test]
    fn quote_change_only_touches_quotes() {
        let mut views = ViewCache::new();
        views.clients.items = Some(Vec::new());
        views.quotes.items = Some(Vec::new());

        views.quote_changed();
        assert!(views.clients.items().is_some());
        assert!(views.quotes.items().is_none());
    }
}
