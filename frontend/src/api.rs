use std::{
    cell::{Cell, RefCell},
    ops::Deref,
    rc::Rc,
};

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use times_roman_shared::{
    cache::{QueryClient, QueryPolicy},
    preferences::KeyValueStorage,
    query::{SelectQuery, UpdateQuery, UpsertQuery},
    remote::{
        AuthClient, AuthListener, AuthListeners, AuthSubscription, OAuthProvider, SignUpOutcome,
        TableClient,
    },
    session::{parse_oauth_fragment, AuthEvent, Session, TokenResponse, User},
    BackendError, RemoteClient,
};
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::{config, storage::BrowserStorage};

/// Remote client shared through the component tree. Equality is identity so
/// a context holding it never re-renders consumers.
#[derive(Clone)]
pub struct ClientHandle(Rc<QueryClient<dyn RemoteClient>>);

impl ClientHandle {
    pub fn new(inner: Rc<dyn RemoteClient>) -> Self {
        ClientHandle(Rc::new(QueryClient::new(inner, QueryPolicy::default())))
    }
}

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ClientHandle {
    type Target = QueryClient<dyn RemoteClient>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Client for this build: the hosted backend, or seeded in-memory tables
/// when built with `--features mock`.
pub fn connect() -> ClientHandle {
    #[cfg(feature = "mock")]
    {
        tracing::info!("using in-memory mock backend");
        return ClientHandle::new(Rc::new(crate::models::mock_backend()));
    }

    #[cfg(not(feature = "mock"))]
    {
        if config::SUPABASE_ANON_KEY.is_empty() {
            tracing::warn!("SUPABASE_ANON_KEY is not set; requests will be rejected");
        }
        ClientHandle::new(Rc::new(SupabaseClient::new()))
    }
}

fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

fn network_error(err: gloo_net::Error) -> BackendError {
    BackendError::Network(format!("{:?}", err))
}

fn decode_error(err: gloo_net::Error) -> BackendError {
    BackendError::Decode(format!("{:?}", err))
}

/// Error body of either PostgREST (`code`/`message`/`details`) or GoTrue
/// (`error`/`error_description`/`msg`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

async fn read_error(response: Response, single: bool) -> BackendError {
    let status = response.status();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();

    // PostgREST answers a singular fetch that matched 0 or many rows with 406.
    if single && status == 406 {
        let rows = body
            .details
            .as_deref()
            .and_then(|details| {
                details
                    .split(|c: char| !c.is_ascii_digit())
                    .find(|part| !part.is_empty())
                    .and_then(|digits| digits.parse::<usize>().ok())
            })
            .unwrap_or(0);
        return BackendError::NotSingle {
            rows,
        };
    }
    if status == 401 {
        return BackendError::Unauthorized;
    }

    let message = body
        .error_description
        .or(body.msg)
        .or(body.message)
        .unwrap_or_else(|| response.status_text());
    let code = body
        .error_code
        .or(body.error)
        .or_else(|| {
            body.code.map(|code| match code {
                Value::String(text) => text,
                other => other.to_string(),
            })
        });
    match code {
        Some(code) => BackendError::Api {
            status,
            code,
            message,
        },
        None => BackendError::Http {
            status,
            message,
        },
    }
}

/// PostgREST + GoTrue over `fetch`. The session lives in memory and in
/// localStorage under [`config::SESSION_STORAGE_KEY`].
pub struct SupabaseClient {
    session: RefCell<Option<Session>>,
    restored: Cell<bool>,
    listeners: AuthListeners,
    storage: BrowserStorage,
}

impl Default for SupabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SupabaseClient {
    pub fn new() -> Self {
        SupabaseClient {
            session: RefCell::new(None),
            restored: Cell::new(false),
            listeners: AuthListeners::default(),
            storage: BrowserStorage,
        }
    }

    fn bearer(&self) -> String {
        let token = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| config::SUPABASE_ANON_KEY.to_string());
        format!("Bearer {}", token)
    }

    fn rest(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", config::SUPABASE_ANON_KEY)
            .header("Authorization", &self.bearer())
    }

    fn gotrue(builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", config::SUPABASE_ANON_KEY)
            .header("Content-Type", "application/json")
    }

    fn store_session(&self, session: Option<Session>) {
        match &session {
            Some(current) => match serde_json::to_string(current) {
                Ok(encoded) => self.storage.set_item(config::SESSION_STORAGE_KEY, &encoded),
                Err(err) => tracing::error!(error = %err, "failed to encode session"),
            },
            None => self.storage.remove_item(config::SESSION_STORAGE_KEY),
        }
        *self.session.borrow_mut() = session;
    }

    fn stored_session(&self) -> Option<Session> {
        if let Some(session) = self.session.borrow().clone() {
            return Some(session);
        }
        let raw = self.storage.get_item(config::SESSION_STORAGE_KEY)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable stored session");
                self.storage.remove_item(config::SESSION_STORAGE_KEY);
                None
            },
        }
    }

    async fn token_request(&self, grant_type: &str, body: Value) -> Result<Session, BackendError> {
        let url = config::auth_url(&format!("token?grant_type={}", grant_type));
        let response = Self::gotrue(Request::post(&url))
            .json(&body)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, false).await);
        }
        let token: TokenResponse = response.json().await.map_err(decode_error)?;
        Ok(token.into_session(now_secs()))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, BackendError> {
        let response = Request::get(&config::auth_url("user"))
            .header("apikey", config::SUPABASE_ANON_KEY)
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, false).await);
        }
        response.json::<User>().await.map_err(decode_error)
    }

    /// Tokens left in the URL fragment by an OAuth redirect, exchanged for a
    /// full session. The fragment is stripped from the address bar.
    async fn session_from_url(&self) -> Result<Option<Session>, BackendError> {
        let Some(location) = window().map(|win| win.location()) else {
            return Ok(None);
        };
        let hash = location.hash().unwrap_or_default();
        let Some(fragment) = parse_oauth_fragment(&hash, now_secs()) else {
            return Ok(None);
        };

        let user = self.fetch_user(&fragment.access_token).await?;
        let session = Session {
            access_token: fragment.access_token,
            refresh_token: fragment.refresh_token,
            expires_at: fragment.expires_at,
            token_type: fragment.token_type,
            user,
        };

        if let Some(win) = window() {
            let clean = format!(
                "{}{}",
                location.pathname().unwrap_or_default(),
                location.search().unwrap_or_default()
            );
            if let Ok(history) = win.history() {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean));
            }
        }
        Ok(Some(session))
    }

    async fn refresh(&self, session: Session) -> Result<Option<Session>, BackendError> {
        match self
            .token_request("refresh_token", json!({ "refresh_token": session.refresh_token }))
            .await
        {
            Ok(refreshed) => {
                self.store_session(Some(refreshed.clone()));
                self.listeners
                    .emit(AuthEvent::TokenRefreshed, Some(refreshed.clone()));
                Ok(Some(refreshed))
            },
            Err(err @ BackendError::Network(_)) => Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "refresh token rejected, signing out");
                self.store_session(None);
                self.listeners.emit(AuthEvent::SignedOut, None);
                Ok(None)
            },
        }
    }
}

#[async_trait(?Send)]
impl TableClient for SupabaseClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, BackendError> {
        let url = config::rest_url(query.table_name(), &query.to_query_string());
        let mut request = self
            .rest(Request::get(&url))
            .header("Cache-Control", "no-cache, no-store, max-age=0")
            .header("Pragma", "no-cache");
        if query.is_single() {
            request = request.header("Accept", "application/vnd.pgrst.object+json");
        }
        let response = request.send().await.map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, query.is_single()).await);
        }

        if query.is_single() {
            let row: Value = response.json().await.map_err(decode_error)?;
            Ok(vec![row])
        } else {
            response.json().await.map_err(decode_error)
        }
    }

    async fn update(&self, query: &UpdateQuery) -> Result<(), BackendError> {
        let url = config::rest_url(query.table_name(), &query.to_query_string());
        let response = self
            .rest(Request::patch(&url))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(query.patch())
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, false).await);
        }
        Ok(())
    }

    async fn upsert(&self, query: &UpsertQuery) -> Result<(), BackendError> {
        let url = config::rest_url(query.table_name(), &query.to_query_string());
        let response = self
            .rest(Request::post(&url))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(query.row())
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, false).await);
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for SupabaseClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let session = self
            .token_request("password", json!({ "email": email, "password": password }))
            .await?;
        self.store_session(Some(session.clone()));
        self.listeners.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, BackendError> {
        let url = config::auth_url(&format!("signup?redirect_to={}", urlencoding::encode(redirect_to)));
        let response = Self::gotrue(Request::post(&url))
            .json(&json!({ "email": email, "password": password }))
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(read_error(response, false).await);
        }

        let body: Value = response.json().await.map_err(decode_error)?;
        if body.get("access_token").is_none() {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        let token: TokenResponse = serde_json::from_value(body)?;
        let session = token.into_session(now_secs());
        self.store_session(Some(session.clone()));
        self.listeners.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(SignUpOutcome::SignedIn(session))
    }

    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        config::auth_url(&format!(
            "authorize?provider={}&redirect_to={}",
            provider.as_str(),
            urlencoding::encode(redirect_to)
        ))
    }

    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let first_call = !self.restored.replace(true);

        if let Some(session) = self.session_from_url().await? {
            self.store_session(Some(session.clone()));
            self.listeners.emit(AuthEvent::SignedIn, Some(session.clone()));
            return Ok(Some(session));
        }

        let current = match self.stored_session() {
            Some(session) if session.needs_refresh(now_secs()) => self.refresh(session).await?,
            Some(session) => {
                *self.session.borrow_mut() = Some(session.clone());
                Some(session)
            },
            None => None,
        };
        if first_call {
            self.listeners.emit(AuthEvent::InitialSession, current.clone());
        }
        Ok(current)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let signed_in = self.session.borrow().is_some();
        if signed_in {
            let result = self
                .rest(Request::post(&config::auth_url("logout")))
                .send()
                .await;
            match result {
                Ok(response) if !response.ok() => {
                    tracing::warn!(status = response.status(), "logout rejected by backend")
                },
                Err(err) => tracing::warn!(error = ?err, "logout request failed"),
                Ok(_) => {},
            }
        }
        self.store_session(None);
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}
