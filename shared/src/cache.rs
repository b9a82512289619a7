//! Read-through cache in front of a [`TableClient`].

use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::BackendError,
    query::{SelectQuery, UpdateQuery, UpsertQuery},
    remote::{AuthClient, AuthListener, AuthSubscription, OAuthProvider, SignUpOutcome, TableClient},
    session::Session,
};

/// Cache knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Age after which a cached read is fetched again.
    pub stale_after: Duration,
    /// Extra attempts after a failed read.
    pub retry: u32,
    /// Age after which an entry is dropped on the next insert.
    pub gc_after: Duration,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        QueryPolicy {
            stale_after: Duration::from_secs(5 * 60),
            retry: 1,
            gc_after: Duration::from_secs(10 * 60),
        }
    }
}

/// Milliseconds since the Unix epoch.
pub type Clock = Rc<dyn Fn() -> i64>;

fn system_clock() -> Clock {
    Rc::new(|| chrono::Utc::now().timestamp_millis())
}

struct CacheEntry {
    table: String,
    rows: Vec<Value>,
    fetched_at_ms: i64,
}

/// Wraps a remote client, caching selects per query and dropping a table's
/// entries whenever that table is written through it. Auth calls pass
/// straight through.
pub struct QueryClient<C: ?Sized> {
    inner: Rc<C>,
    policy: QueryPolicy,
    clock: Clock,
    entries: RefCell<HashMap<String, CacheEntry>>,
}

impl<C: ?Sized> QueryClient<C> {
    pub fn new(inner: Rc<C>, policy: QueryPolicy) -> Self {
        Self::with_clock(inner, policy, system_clock())
    }

    pub fn with_clock(inner: Rc<C>, policy: QueryPolicy, clock: Clock) -> Self {
        QueryClient {
            inner,
            policy,
            clock,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &Rc<C> {
        &self.inner
    }

    pub fn policy(&self) -> QueryPolicy {
        self.policy
    }

    pub fn invalidate_table(&self, table: &str) {
        self.entries
            .borrow_mut()
            .retain(|_, entry| entry.table != table);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn cached_queries(&self) -> usize {
        self.entries.borrow().len()
    }

    fn store(&self, key: String, table: &str, rows: Vec<Value>) {
        let now = (self.clock)();
        let gc_ms = i64::try_from(self.policy.gc_after.as_millis()).unwrap_or(i64::MAX);
        let mut entries = self.entries.borrow_mut();
        entries.retain(|_, entry| now.saturating_sub(entry.fetched_at_ms) < gc_ms);
        entries.insert(
            key,
            CacheEntry {
                table: table.to_string(),
                rows,
                fetched_at_ms: now,
            },
        );
    }

    fn fresh_rows(&self, key: &str) -> Option<Vec<Value>> {
        let now = (self.clock)();
        let stale_ms = i64::try_from(self.policy.stale_after.as_millis()).unwrap_or(i64::MAX);
        self.entries
            .borrow()
            .get(key)
            .filter(|entry| now.saturating_sub(entry.fetched_at_ms) < stale_ms)
            .map(|entry| entry.rows.clone())
    }
}

/// Failures that another attempt cannot fix.
fn is_final(err: &BackendError) -> bool {
    matches!(err, BackendError::NotSingle { .. } | BackendError::Unauthorized)
}

#[async_trait(?Send)]
impl<C: TableClient + ?Sized> TableClient for QueryClient<C> {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, BackendError> {
        let key = query.cache_key();
        if let Some(rows) = self.fresh_rows(&key) {
            tracing::debug!(%key, "query cache hit");
            return Ok(rows);
        }

        let mut attempt = 0;
        loop {
            match self.inner.select(query).await {
                Ok(rows) => {
                    self.store(key, query.table_name(), rows.clone());
                    return Ok(rows);
                },
                Err(err) if attempt < self.policy.retry && !is_final(&err) => {
                    attempt += 1;
                    tracing::warn!(%key, attempt, error = %err, "retrying failed query");
                },
                Err(err) => return Err(err),
            }
        }
    }

    async fn update(&self, query: &UpdateQuery) -> Result<(), BackendError> {
        self.inner.update(query).await?;
        self.invalidate_table(query.table_name());
        Ok(())
    }

    async fn upsert(&self, query: &UpsertQuery) -> Result<(), BackendError> {
        self.inner.upsert(query).await?;
        self.invalidate_table(query.table_name());
        Ok(())
    }
}

#[async_trait(?Send)]
impl<C: AuthClient + ?Sized> AuthClient for QueryClient<C> {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        self.inner.sign_in_with_password(email, password).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, BackendError> {
        self.inner.sign_up(email, password, redirect_to).await
    }

    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        self.inner.oauth_authorize_url(provider, redirect_to)
    }

    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        self.inner.get_session().await
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.inner.sign_out().await
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.inner.on_auth_state_change(listener)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use serde_json::json;

    use super::*;
    use crate::{
        memory::{CallKind, MemoryBackend},
        query::ARTICLES_TABLE,
    };

    fn fixture() -> (Rc<MemoryBackend>, QueryClient<MemoryBackend>, Rc<Cell<i64>>) {
        let backend = Rc::new(MemoryBackend::with_rows(
            ARTICLES_TABLE,
            vec![json!({ "id": "pol-1", "views": 950 })],
        ));
        let now = Rc::new(Cell::new(0_i64));
        let tick = now.clone();
        let client = QueryClient::with_clock(
            backend.clone(),
            QueryPolicy::default(),
            Rc::new(move || tick.get()),
        );
        (backend, client, now)
    }

    #[tokio::test]
    async fn reads_are_served_from_cache_until_stale() {
        let (backend, client, now) = fixture();
        let query = SelectQuery::table(ARTICLES_TABLE);

        client.select(&query).await.expect("first read");
        now.set(4 * 60 * 1000);
        client.select(&query).await.expect("cached read");
        assert_eq!(backend.calls_of(CallKind::Select).len(), 1);

        now.set(5 * 60 * 1000);
        client.select(&query).await.expect("stale read");
        assert_eq!(backend.calls_of(CallKind::Select).len(), 2);
    }

    #[tokio::test]
    async fn failed_read_is_retried_once() {
        let (backend, client, _) = fixture();
        let query = SelectQuery::table(ARTICLES_TABLE);
        backend.fail_next(CallKind::Select, BackendError::Network("reset".into()));
        assert!(client.select(&query).await.is_ok());
        assert_eq!(backend.calls_of(CallKind::Select).len(), 2);

        client.clear();
        backend.fail_next(CallKind::Select, BackendError::Network("reset".into()));
        backend.fail_next(CallKind::Select, BackendError::Network("reset".into()));
        assert!(client.select(&query).await.is_err());
        assert_eq!(backend.calls_of(CallKind::Select).len(), 4);
    }

    #[tokio::test]
    async fn missing_single_row_is_not_retried() {
        let (backend, client, _) = fixture();
        let query = SelectQuery::table(ARTICLES_TABLE).eq("id", "nope").single();
        assert_eq!(client.select(&query).await, Err(BackendError::NotSingle { rows: 0 }));
        assert_eq!(backend.calls_of(CallKind::Select).len(), 1);
    }

    #[tokio::test]
    async fn writes_invalidate_the_table() {
        let (backend, client, _) = fixture();
        let query = SelectQuery::table(ARTICLES_TABLE).eq("id", "pol-1").single();
        client.select(&query).await.expect("warm cache");
        assert_eq!(client.cached_queries(), 1);

        client
            .update(&UpdateQuery::table(ARTICLES_TABLE, json!({ "views": 951 })).eq("id", "pol-1"))
            .await
            .expect("update");
        assert_eq!(client.cached_queries(), 0);

        let rows = client.select(&query).await.expect("fresh read");
        assert_eq!(rows[0]["views"], json!(951));
        assert_eq!(backend.calls_of(CallKind::Select).len(), 2);
    }

    #[tokio::test]
    async fn long_unused_entries_are_swept_on_insert() {
        let (_, client, now) = fixture();
        client
            .select(&SelectQuery::table(ARTICLES_TABLE).eq("id", "first"))
            .await
            .expect("first search");
        now.set(9 * 60 * 1000);
        client
            .select(&SelectQuery::table(ARTICLES_TABLE).eq("id", "second"))
            .await
            .expect("second search");
        assert_eq!(client.cached_queries(), 2);

        now.set(11 * 60 * 1000);
        client
            .select(&SelectQuery::table(ARTICLES_TABLE).eq("id", "third"))
            .await
            .expect("third search");
        assert_eq!(client.cached_queries(), 2);
    }
}
