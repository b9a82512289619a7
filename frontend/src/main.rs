//! Times Roman browser front-end: a Yew single-page app over the
//! `times_roman_shared` core, talking to Supabase for articles and accounts.

mod api;
mod auth_context;
mod components;
mod config;
pub mod hooks;
mod i18n;
mod logging;
#[cfg(feature = "mock")]
mod models;
mod pages;
mod router;
mod seo;
mod share;
mod storage;
mod toast_context;
mod utils;

use yew::prelude::*;

use crate::{api::ClientHandle, auth_context::AuthProvider, toast_context::ToastProvider};

#[function_component(App)]
fn app() -> Html {
    let client = use_memo((), |_| api::connect());

    html! {
        <ContextProvider<ClientHandle> context={(*client).clone()}>
            <ToastProvider>
                <AuthProvider>
                    <router::AppRouter />
                </AuthProvider>
            </ToastProvider>
        </ContextProvider<ClientHandle>>
    }
}

fn main() {
    logging::init();
    tracing::info!(backend = config::SUPABASE_URL, "starting Times Roman");
    yew::Renderer::<App>::new().render();
}
