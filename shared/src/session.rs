//! Session model and the auth state machine behind the auth context.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Seconds before expiry at which a stored session is refreshed.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name shown in the user menu: the local part of the email.
    pub fn display_name(&self) -> String {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|name| !name.is_empty())
            .unwrap_or("Account")
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds.
    pub expires_at: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn needs_refresh(&self, now_secs: i64) -> bool {
        self.expires_at - REFRESH_MARGIN_SECS <= now_secs
    }
}

/// Body of a successful GoTrue `/token` call.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

impl TokenResponse {
    pub fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now_secs + self.expires_in.unwrap_or(3600));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            token_type: self.token_type.unwrap_or_else(default_token_type),
            user: self.user,
        }
    }
}

/// Tokens carried in the URL fragment after an OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthFragment {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub token_type: String,
}

/// Parse `#access_token=...&refresh_token=...&expires_in=...`.
pub fn parse_oauth_fragment(fragment: &str, now_secs: i64) -> Option<OAuthFragment> {
    let body = fragment.trim_start_matches('#');
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    let mut token_type = None;
    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<i64>().ok(),
            "expires_at" => expires_at = value.parse::<i64>().ok(),
            "token_type" => token_type = Some(value.into_owned()),
            _ => {},
        }
    }
    let access_token = access_token.filter(|token| !token.is_empty())?;
    Some(OAuthFragment {
        access_token,
        refresh_token: refresh_token.unwrap_or_default(),
        expires_at: expires_at.unwrap_or_else(|| now_secs + expires_in.unwrap_or(3600)),
        token_type: token_type.unwrap_or_else(default_token_type),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Session check still in flight.
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl AuthStatus {
    fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => AuthStatus::Authenticated(session.user.clone()),
            None => AuthStatus::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated(_))
    }
}

pub enum AuthAction {
    /// Result of the mount-time `get_session` call.
    SessionResolved(Option<Session>),
    /// Pushed by the remote client's auth subscription.
    Event(AuthEvent, Option<Session>),
    Busy(bool),
}

/// State held by the auth context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStore {
    pub status: AuthStatus,
    pub loading: bool,
}

impl Default for AuthStore {
    fn default() -> Self {
        AuthStore {
            status: AuthStatus::Unknown,
            loading: false,
        }
    }
}

impl AuthStore {
    /// Apply one transition. Events replace the current user outright.
    pub fn reduce(&self, action: AuthAction) -> AuthStore {
        let mut next = self.clone();
        match action {
            AuthAction::SessionResolved(session) => {
                next.status = AuthStatus::from_session(session.as_ref());
            },
            AuthAction::Event(AuthEvent::SignedOut, _) => {
                next.status = AuthStatus::Anonymous;
            },
            AuthAction::Event(_, session) => {
                next.status = AuthStatus::from_session(session.as_ref());
            },
            AuthAction::Busy(loading) => {
                next.loading = loading;
            },
        }
        next
    }
}

/// What a protected route should do for the current auth status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Wait,
    RedirectToSignIn { from: String },
}

pub fn guard_route(status: &AuthStatus, requested_path: &str) -> GuardDecision {
    match status {
        AuthStatus::Authenticated(_) => GuardDecision::Render,
        AuthStatus::Unknown => GuardDecision::Wait,
        AuthStatus::Anonymous => GuardDecision::RedirectToSignIn {
            from: requested_path.to_string(),
        },
    }
}

/// Where to go after signing in. Only same-site paths are honoured.
pub fn post_login_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user_id: &str) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: 1_000,
            token_type: "bearer".into(),
            user: User {
                id: user_id.into(),
                email: Some(format!("{}@example.com", user_id)),
            },
        }
    }

    #[test]
    fn mount_resolution_leaves_unknown() {
        let store = AuthStore::default();
        assert_eq!(store.status, AuthStatus::Unknown);
        let anonymous = store.reduce(AuthAction::SessionResolved(None));
        assert_eq!(anonymous.status, AuthStatus::Anonymous);
        let signed_in = store.reduce(AuthAction::SessionResolved(Some(session("ada"))));
        assert_eq!(signed_in.status.user().map(|u| u.id.as_str()), Some("ada"));
    }

    #[test]
    fn events_replace_current_user() {
        let store = AuthStore::default().reduce(AuthAction::SessionResolved(Some(session("ada"))));
        let refreshed =
            store.reduce(AuthAction::Event(AuthEvent::TokenRefreshed, Some(session("grace"))));
        assert_eq!(refreshed.status.user().map(|u| u.id.as_str()), Some("grace"));
        let signed_out =
            refreshed.reduce(AuthAction::Event(AuthEvent::SignedOut, Some(session("grace"))));
        assert_eq!(signed_out.status, AuthStatus::Anonymous);
    }

    #[test]
    fn busy_flag_does_not_touch_status() {
        let store = AuthStore::default().reduce(AuthAction::Busy(true));
        assert!(store.loading);
        assert_eq!(store.status, AuthStatus::Unknown);
    }

    #[test]
    fn guard_waits_then_redirects_with_origin() {
        assert_eq!(guard_route(&AuthStatus::Unknown, "/profile"), GuardDecision::Wait);
        assert_eq!(
            guard_route(&AuthStatus::Anonymous, "/profile"),
            GuardDecision::RedirectToSignIn {
                from: "/profile".into()
            }
        );
        let user = session("ada").user;
        assert_eq!(guard_route(&AuthStatus::Authenticated(user), "/profile"), GuardDecision::Render);
    }

    #[test]
    fn post_login_target_rejects_foreign_urls() {
        assert_eq!(post_login_target(Some("/profile")), "/profile");
        assert_eq!(post_login_target(Some("//evil.example")), "/");
        assert_eq!(post_login_target(Some("https://evil.example")), "/");
        assert_eq!(post_login_target(None), "/");
    }

    #[test]
    fn oauth_fragment_and_token_response() {
        let parsed = parse_oauth_fragment(
            "#access_token=abc&expires_in=3600&refresh_token=def&token_type=bearer",
            100,
        );
        assert_eq!(
            parsed,
            Some(OAuthFragment {
                access_token: "abc".into(),
                refresh_token: "def".into(),
                expires_at: 3700,
                token_type: "bearer".into(),
            })
        );
        assert_eq!(parse_oauth_fragment("#error=access_denied", 100), None);

        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":60,"user":{"id":"u","email":"u@x.io"}}"#,
        )
        .expect("token response parses");
        let session = response.into_session(10);
        assert_eq!(session.expires_at, 70);
        assert!(session.needs_refresh(10));
        assert_eq!(session.user.display_name(), "u");
    }
}
