use serde::{Deserialize, Serialize};
use times_roman_shared::session::{guard_route, GuardDecision};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    auth_context::use_auth,
    components::{
        footer::Footer,
        loading_spinner::{LoadingSpinner, SpinnerSize},
        navbar::Navbar,
        toast::ToastViewport,
    },
    pages,
};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,

    #[at("/article/:id")]
    Article { id: String },

    #[at("/category/:category_id")]
    Category { category_id: String },

    #[at("/search")]
    Search,

    #[at("/auth")]
    Auth,

    #[at("/auth/callback")]
    AuthCallback,

    #[at("/profile")]
    Profile,

    #[not_found]
    #[at("/404")]
    NotFound,
}

/// `?q=` of the search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// `?from=` of the sign-in page: where to return afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthQuery {
    #[serde(default)]
    pub from: Option<String>,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::home::HomePage /> },
        Route::Article {
            id,
        } => {
            html! { <pages::article::ArticlePage id={id} /> }
        },
        Route::Category {
            category_id,
        } => {
            html! { <pages::category::CategoryPage category_id={category_id} /> }
        },
        Route::Search => html! { <pages::search::SearchPage /> },
        Route::Auth => html! { <pages::auth::AuthPage /> },
        Route::AuthCallback => html! { <pages::auth_callback::AuthCallbackPage /> },
        Route::Profile => html! {
            <ProtectedRoute path={"/profile"}>
                <pages::profile::ProfilePage />
            </ProtectedRoute>
        },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub path: AttrValue,
    pub children: Html,
}

/// Renders its children for signed-in users only. Anonymous visitors are
/// sent to the sign-in page, which brings them back here afterwards.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let decision = guard_route(&auth.status(), props.path.as_str());

    {
        let decision = decision.clone();
        use_effect_with(decision, move |decision| {
            if let (GuardDecision::RedirectToSignIn { from }, Some(navigator)) =
                (decision, navigator.as_ref())
            {
                let query = AuthQuery {
                    from: Some(from.clone()),
                };
                if let Err(err) = navigator.replace_with_query(&Route::Auth, &query) {
                    tracing::warn!(error = ?err, "failed to redirect to sign-in");
                    navigator.replace(&Route::Auth);
                }
            }
            || ()
        });
    }

    match decision {
        GuardDecision::Render => props.children.clone(),
        GuardDecision::Wait | GuardDecision::RedirectToSignIn { .. } => html! {
            <div class="flex min-h-[50vh] items-center justify-center">
                <LoadingSpinner size={SpinnerSize::Large} />
            </div>
        },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex min-h-screen flex-col bg-white">
                <Navbar />
                <main class="flex-1">
                    <Switch<Route> render={switch} />
                </main>
                <Footer />
                <ToastViewport />
            </div>
        </BrowserRouter>
    }
}
