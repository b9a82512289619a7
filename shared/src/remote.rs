//! Contracts of the hosted backend: a table sub-interface and an auth
//! sub-interface. The browser implementation lives in the frontend crate,
//! [`crate::memory::MemoryBackend`] backs tests and the mock build.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::BackendError,
    query::{SelectQuery, UpdateQuery, UpsertQuery},
    session::{AuthEvent, Session},
};

#[async_trait(?Send)]
pub trait TableClient {
    /// Rows matching `query`. A `single()` query yields exactly one row or
    /// [`BackendError::NotSingle`].
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, BackendError>;

    async fn update(&self, query: &UpdateQuery) -> Result<(), BackendError>;

    async fn upsert(&self, query: &UpsertQuery) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Email confirmation is disabled and the account is live.
    SignedIn(Session),
    /// A confirmation link was emailed; no session yet.
    ConfirmationRequired,
}

pub type AuthListener = Rc<dyn Fn(AuthEvent, Option<Session>)>;

#[async_trait(?Send)]
pub trait AuthClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, BackendError>;

    /// URL the browser is sent to for a third-party sign-in.
    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String;

    /// Current session, refreshing it when close to expiry.
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription;
}

/// Everything a page needs from the backend.
pub trait RemoteClient: TableClient + AuthClient {}

impl<T: TableClient + AuthClient + ?Sized> RemoteClient for T {}

/// Deserialize every row of a select.
pub async fn select_rows<T, C>(client: &C, query: &SelectQuery) -> Result<Vec<T>, BackendError>
where
    T: DeserializeOwned,
    C: TableClient + ?Sized,
{
    client
        .select(query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(BackendError::from))
        .collect()
}

/// Run `query` as a singleton fetch and deserialize the row.
pub async fn select_one<T, C>(client: &C, query: SelectQuery) -> Result<T, BackendError>
where
    T: DeserializeOwned,
    C: TableClient + ?Sized,
{
    let query = if query.is_single() { query } else { query.single() };
    let mut rows = client.select(&query).await?;
    if rows.len() != 1 {
        return Err(BackendError::NotSingle {
            rows: rows.len(),
        });
    }
    let row = rows.remove(0);
    Ok(serde_json::from_value(row)?)
}

struct ListenerSlot {
    id: u64,
    listener: AuthListener,
}

#[derive(Default)]
struct ListenerTable {
    next_id: Cell<u64>,
    slots: RefCell<Vec<ListenerSlot>>,
}

/// Registry of auth listeners shared by client implementations.
#[derive(Clone, Default)]
pub struct AuthListeners {
    table: Rc<ListenerTable>,
}

impl AuthListeners {
    pub fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        let id = self.table.next_id.get();
        self.table.next_id.set(id + 1);
        self.table.slots.borrow_mut().push(ListenerSlot {
            id,
            listener,
        });
        AuthSubscription {
            table: Rc::downgrade(&self.table),
            id,
        }
    }

    /// Notify every live listener. Listeners may unsubscribe while being
    /// notified.
    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        let listeners: Vec<AuthListener> = self
            .table
            .slots
            .borrow()
            .iter()
            .map(|slot| slot.listener.clone())
            .collect();
        tracing::debug!(?event, listeners = listeners.len(), "auth state change");
        for listener in listeners {
            listener(event, session.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.table.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live auth subscription; dropping it unsubscribes.
pub struct AuthSubscription {
    table: Weak<ListenerTable>,
    id: u64,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.slots.borrow_mut().retain(|slot| slot.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn dropping_subscription_stops_delivery() {
        let listeners = AuthListeners::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = listeners.subscribe(Rc::new(move |event: AuthEvent, _: Option<Session>| {
            sink.borrow_mut().push(event);
        }));
        listeners.emit(AuthEvent::SignedIn, None);
        assert_eq!(listeners.len(), 1);
        drop(subscription);
        listeners.emit(AuthEvent::SignedOut, None);
        assert!(listeners.is_empty());
        assert_eq!(*seen.borrow(), vec![AuthEvent::SignedIn]);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let listeners = AuthListeners::default();
        let subscription = listeners.subscribe(Rc::new(|_: AuthEvent, _: Option<Session>| {}));
        drop(listeners);
        drop(subscription);
    }
}
