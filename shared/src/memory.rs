//! In-process backend: JSON rows per table, a call log, scripted failures
//! and a toy auth service. Used by the test-suite and the `mock` frontend
//! build.

use std::{
    cell::{Cell, RefCell},
    cmp::Ordering,
    collections::{BTreeMap, HashMap, VecDeque},
};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    error::BackendError,
    query::{Filter, SelectQuery, UpdateQuery, UpsertQuery},
    remote::{
        AuthClient, AuthListener, AuthListeners, AuthSubscription, OAuthProvider, SignUpOutcome,
        TableClient,
    },
    session::{AuthEvent, Session, User},
};

/// Expiry handed to every in-memory session (far future, Unix seconds).
const MEMORY_SESSION_EXPIRES_AT: i64 = 4_102_444_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Select,
    Update,
    Upsert,
}

/// One table call as the backend received it.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Select { table: String, query: String },
    Update { table: String, filters: String, patch: Value },
    Upsert { table: String, row: Value },
}

impl RecordedCall {
    pub fn kind(&self) -> CallKind {
        match self {
            RecordedCall::Select {
                ..
            } => CallKind::Select,
            RecordedCall::Update {
                ..
            } => CallKind::Update,
            RecordedCall::Upsert {
                ..
            } => CallKind::Upsert,
        }
    }
}

struct Account {
    password: String,
    user: User,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: RefCell<BTreeMap<String, Vec<Value>>>,
    calls: RefCell<Vec<RecordedCall>>,
    failures: RefCell<HashMap<CallKind, VecDeque<BackendError>>>,
    accounts: RefCell<HashMap<String, Account>>,
    session: RefCell<Option<Session>>,
    listeners: AuthListeners,
    next_user: Cell<u64>,
    require_email_confirmation: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `table` starts with `rows`.
    pub fn with_rows(table: &str, rows: Vec<Value>) -> Self {
        let backend = Self::new();
        backend.tables.borrow_mut().insert(table.to_string(), rows);
        backend
    }

    pub fn insert_row(&self, table: &str, row: Value) {
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// First row of `table` whose `id` equals `id`.
    pub fn row(&self, table: &str, id: &str) -> Option<Value> {
        self.rows(table)
            .into_iter()
            .find(|row| row.get("id").map(scalar_text).as_deref() == Some(id))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn calls_of(&self, kind: CallKind) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make the next call of `kind` fail with `err`. Queued failures are
    /// consumed in order.
    pub fn fail_next(&self, kind: CallKind, err: BackendError) {
        self.failures
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push_back(err);
    }

    pub fn require_email_confirmation(&self, required: bool) {
        self.require_email_confirmation.set(required);
    }

    /// Register an account without signing it in.
    pub fn add_account(&self, email: &str, password: &str) -> User {
        let id = self.next_user.get() + 1;
        self.next_user.set(id);
        let user = User {
            id: format!("user-{}", id),
            email: Some(email.to_string()),
        };
        self.accounts.borrow_mut().insert(
            email.to_ascii_lowercase(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Install a session directly, as if restored from storage.
    pub fn sign_in_as(&self, user: User) -> Session {
        let session = session_for(user);
        *self.session.borrow_mut() = Some(session.clone());
        session
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn record(&self, call: RecordedCall) -> Result<(), BackendError> {
        let kind = call.kind();
        self.calls.borrow_mut().push(call);
        let scripted = self
            .failures
            .borrow_mut()
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start_session(&self, user: User, event: AuthEvent) -> Session {
        let session = self.sign_in_as(user);
        self.listeners.emit(event, Some(session.clone()));
        session
    }
}

fn session_for(user: User) -> Session {
    Session {
        access_token: format!("memory-access-{}", user.id),
        refresh_token: format!("memory-refresh-{}", user.id),
        expires_at: MEMORY_SESSION_EXPIRES_AT,
        token_type: "bearer".to_string(),
        user,
    }
}

/// Text form of a scalar column, as PostgREST compares it.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq {
            column,
            value,
        } => row.get(column).map(scalar_text).as_deref() == Some(value.as_str()),
        Filter::Neq {
            column,
            value,
        } => row
            .get(column)
            .filter(|cell| !cell.is_null())
            .is_some_and(|cell| scalar_text(cell) != *value),
        Filter::AnyILike {
            columns,
            term,
        } => {
            let needle = term.to_lowercase();
            columns.iter().any(|column| {
                row.get(column)
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        },
    }
}

fn compare_cells(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(a), Some(b)) if a.is_null() && b.is_null() => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => scalar_text(a).cmp(&scalar_text(b)),
    }
}

fn merge_into(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait(?Send)]
impl TableClient for MemoryBackend {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, BackendError> {
        self.record(RecordedCall::Select {
            table: query.table_name().to_string(),
            query: query.to_query_string(),
        })?;

        let mut rows: Vec<Value> = self
            .rows(query.table_name())
            .into_iter()
            .filter(|row| query.filters().iter().all(|f| matches_filter(row, f)))
            .collect();
        if let Some(order) = query.ordering() {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }
        if query.selected_columns() != "*" {
            let wanted: Vec<&str> = query.selected_columns().split(',').collect();
            rows = rows
                .into_iter()
                .map(|row| {
                    let projected: Map<String, Value> = wanted
                        .iter()
                        .filter_map(|column| {
                            row.get(*column)
                                .map(|cell| (column.to_string(), cell.clone()))
                        })
                        .collect();
                    Value::Object(projected)
                })
                .collect();
        }
        if query.is_single() && rows.len() != 1 {
            return Err(BackendError::NotSingle {
                rows: rows.len(),
            });
        }
        Ok(rows)
    }

    async fn update(&self, query: &UpdateQuery) -> Result<(), BackendError> {
        self.record(RecordedCall::Update {
            table: query.table_name().to_string(),
            filters: query.to_query_string(),
            patch: query.patch().clone(),
        })?;
        let mut tables = self.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(query.table_name()) {
            for row in rows
                .iter_mut()
                .filter(|row| query.filters().iter().all(|f| matches_filter(row, f)))
            {
                merge_into(row, query.patch());
            }
        }
        Ok(())
    }

    async fn upsert(&self, query: &UpsertQuery) -> Result<(), BackendError> {
        self.record(RecordedCall::Upsert {
            table: query.table_name().to_string(),
            row: query.row().clone(),
        })?;
        let key = query.key_column();
        let Some(key_value) = query.row().get(key).cloned() else {
            return Err(BackendError::Api {
                status: 400,
                code: "23502".to_string(),
                message: format!("null value in column \"{}\"", key),
            });
        };
        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(query.table_name().to_string()).or_default();
        match rows.iter_mut().find(|row| row.get(key) == Some(&key_value)) {
            Some(existing) => merge_into(existing, query.row()),
            None => rows.push(query.row().clone()),
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for MemoryBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let user = self
            .accounts
            .borrow()
            .get(&email.to_ascii_lowercase())
            .filter(|account| account.password == password)
            .map(|account| account.user.clone());
        match user {
            Some(user) => Ok(self.start_session(user, AuthEvent::SignedIn)),
            None => Err(BackendError::Api {
                status: 400,
                code: "invalid_credentials".to_string(),
                message: "Invalid login credentials".to_string(),
            }),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _redirect_to: &str,
    ) -> Result<SignUpOutcome, BackendError> {
        if self
            .accounts
            .borrow()
            .contains_key(&email.to_ascii_lowercase())
        {
            return Err(BackendError::Api {
                status: 422,
                code: "user_already_exists".to_string(),
                message: "User already registered".to_string(),
            });
        }
        let user = self.add_account(email, password);
        if self.require_email_confirmation.get() {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        Ok(SignUpOutcome::SignedIn(self.start_session(user, AuthEvent::SignedIn)))
    }

    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        format!(
            "{}?provider={}",
            redirect_to,
            urlencode_component(provider.as_str())
        )
    }

    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        Ok(self.session.borrow().clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.session.borrow_mut().take();
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}

fn urlencode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::ARTICLES_TABLE;

    fn backend() -> MemoryBackend {
        MemoryBackend::with_rows(
            ARTICLES_TABLE,
            vec![
                json!({ "id": "a", "category": "Politics", "views": 3, "title": "Budget vote" }),
                json!({ "id": "b", "category": "Politics", "views": 9, "title": "Senate recess" }),
                json!({ "id": "c", "category": "Health", "views": 1, "title": "Sleep study" }),
            ],
        )
    }

    #[tokio::test]
    async fn select_filters_orders_and_limits() {
        let backend = backend();
        let rows = backend
            .select(
                &SelectQuery::table(ARTICLES_TABLE)
                    .eq("category", "Politics")
                    .order_desc("views")
                    .limit(1),
            )
            .await
            .expect("select succeeds");
        assert_eq!(rows, vec![backend.rows(ARTICLES_TABLE)[1].clone()]);
    }

    #[tokio::test]
    async fn single_select_reports_row_count() {
        let backend = backend();
        let err = backend
            .select(&SelectQuery::table(ARTICLES_TABLE).eq("category", "Politics").single())
            .await
            .expect_err("two rows match");
        assert_eq!(err, BackendError::NotSingle { rows: 2 });
    }

    #[tokio::test]
    async fn update_merges_patch_and_is_logged() {
        let backend = backend();
        backend
            .update(&UpdateQuery::table(ARTICLES_TABLE, json!({ "views": 4 })).eq("id", "a"))
            .await
            .expect("update succeeds");
        assert_eq!(backend.row(ARTICLES_TABLE, "a").and_then(|r| r["views"].as_u64()), Some(4));
        assert_eq!(backend.calls_of(CallKind::Update).len(), 1);
    }

    #[tokio::test]
    async fn scripted_failure_is_consumed_once() {
        let backend = backend();
        backend.fail_next(CallKind::Select, BackendError::Network("offline".into()));
        let query = SelectQuery::table(ARTICLES_TABLE);
        assert!(backend.select(&query).await.is_err());
        assert_eq!(backend.select(&query).await.map(|rows| rows.len()), Ok(3));
    }

    #[tokio::test]
    async fn password_sign_in_emits_event() {
        let backend = MemoryBackend::new();
        backend.add_account("ada@example.com", "hunter22");
        let events = std::rc::Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let _subscription = backend.on_auth_state_change(std::rc::Rc::new(
            move |event: AuthEvent, _: Option<Session>| sink.borrow_mut().push(event),
        ));

        assert!(backend.sign_in_with_password("ada@example.com", "nope").await.is_err());
        let session = backend
            .sign_in_with_password("ADA@example.com", "hunter22")
            .await
            .expect("credentials match");
        assert_eq!(session.user.email.as_deref(), Some("ada@example.com"));
        backend.sign_out().await.expect("sign out succeeds");
        assert_eq!(*events.borrow(), vec![AuthEvent::SignedIn, AuthEvent::SignedOut]);
        assert_eq!(backend.get_session().await, Ok(None));
    }
}
