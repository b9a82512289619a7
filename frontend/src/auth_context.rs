use std::{ops::Deref, rc::Rc};

use times_roman_shared::{
    remote::{OAuthProvider, SignUpOutcome},
    session::{AuthAction, AuthEvent, AuthStore, Session},
    AuthClient, AuthStatus,
};
use yew::prelude::*;

use crate::{
    api::ClientHandle,
    config,
    hooks::MountGuard,
    i18n::current::auth as t,
    toast_context::{use_toaster, ToastKind, Toaster},
};

/// [`AuthStore`] as a Yew reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState(AuthStore);

impl Deref for AuthState {
    type Target = AuthStore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(AuthState(self.0.reduce(action)))
    }
}

pub type AuthContext = UseReducerHandle<AuthState>;

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Html,
}

/// Resolves the stored session on mount and follows every auth event from
/// the client for as long as it is mounted.
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_reducer(AuthState::default);
    let client = use_context::<ClientHandle>();

    {
        let dispatcher = state.dispatcher();
        use_effect_with(client, move |client| {
            let guard = MountGuard::new();
            let subscription = client.as_ref().map(|client| {
                let listener_dispatcher = dispatcher.clone();
                let subscription = client.on_auth_state_change(Rc::new(
                    move |event: AuthEvent, session: Option<Session>| {
                        tracing::debug!(?event, "auth state changed");
                        listener_dispatcher.dispatch(AuthAction::Event(event, session));
                    },
                ));

                let client = client.clone();
                let task_guard = guard.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let session = match client.get_session().await {
                        Ok(session) => session,
                        Err(err) => {
                            tracing::warn!(error = %err, "could not restore session");
                            None
                        },
                    };
                    if task_guard.is_live() {
                        dispatcher.dispatch(AuthAction::SessionResolved(session));
                    }
                });
                subscription
            });

            move || {
                guard.cancel();
                drop(subscription);
            }
        });
    }

    html! {
        <ContextProvider<AuthContext> context={state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Auth state plus the actions pages call. Actions flip the shared
/// `loading` flag while they run, report failures as toasts and return
/// whether they succeeded.
#[derive(Clone, PartialEq)]
pub struct AuthHandle {
    state: Option<AuthContext>,
    client: Option<ClientHandle>,
    toaster: Toaster,
}

impl AuthHandle {
    pub fn status(&self) -> AuthStatus {
        self.state
            .as_ref()
            .map(|state| state.status.clone())
            .unwrap_or(AuthStatus::Anonymous)
    }

    pub fn loading(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.loading)
    }

    fn busy(&self, busy: bool) {
        if let Some(state) = &self.state {
            state.dispatch(AuthAction::Busy(busy));
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        self.busy(true);
        let result = client.sign_in_with_password(email, password).await;
        self.busy(false);
        match result {
            Ok(_) => {
                self.toaster.success(t::SIGNED_IN);
                true
            },
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                self.toaster.error(t::SIGN_IN_FAILED, err.user_message());
                false
            },
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        self.busy(true);
        let redirect_to = config::site_url("/auth/callback");
        let result = client.sign_up(email, password, &redirect_to).await;
        self.busy(false);
        match result {
            Ok(SignUpOutcome::ConfirmationRequired) => {
                self.toaster.push(
                    ToastKind::Success,
                    t::CHECK_EMAIL,
                    Some(t::CHECK_EMAIL_DETAIL.to_string()),
                );
                true
            },
            Ok(SignUpOutcome::SignedIn(_)) => {
                self.toaster.success(t::SIGNED_UP);
                true
            },
            Err(err) => {
                tracing::warn!(error = %err, "sign-up failed");
                self.toaster.error(t::SIGN_UP_FAILED, err.user_message());
                false
            },
        }
    }

    /// Leaves the page for the provider's consent screen.
    pub fn sign_in_with_google(&self) -> bool {
        let Some(client) = self.client.as_ref() else {
            return false;
        };
        self.busy(true);
        let redirect_to = config::site_url("/auth/callback");
        let url = client.oauth_authorize_url(OAuthProvider::Google, &redirect_to);
        let navigated = web_sys::window()
            .map(|win| win.location().set_href(&url).is_ok())
            .unwrap_or(false);
        if !navigated {
            self.busy(false);
            self.toaster.error(t::SIGN_IN_FAILED, t::GOOGLE_REDIRECT_FAILED);
        }
        navigated
    }

    pub async fn sign_out(&self) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        self.busy(true);
        let result = client.sign_out().await;
        self.busy(false);
        match result {
            Ok(()) => {
                self.toaster.success(t::SIGNED_OUT);
                true
            },
            Err(err) => {
                tracing::warn!(error = %err, "sign-out failed");
                self.toaster.error(t::SIGN_OUT_FAILED, err.user_message());
                false
            },
        }
    }
}

#[hook]
pub fn use_auth() -> AuthHandle {
    AuthHandle {
        state: use_context::<AuthContext>(),
        client: use_context::<ClientHandle>(),
        toaster: use_toaster(),
    }
}
