use times_roman_shared::{meta::PageMeta, AuthStatus};
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::{
    auth_context::use_auth,
    components::loading_spinner::{LoadingSpinner, SpinnerSize},
    i18n::current::auth_callback as t,
    router::Route,
    seo::use_page_meta,
};

/// Landing page of the OAuth and email-confirmation redirects. The auth
/// provider picks the session out of the URL; once that check settles the
/// reader goes home.
#[function_component(AuthCallbackPage)]
pub fn auth_callback_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let settled = !matches!(auth.status(), AuthStatus::Unknown);

    use_page_meta(PageMeta::simple(t::TITLE));

    use_effect_with(settled, move |settled| {
        if *settled {
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Home);
            }
        }
        || ()
    });

    html! {
        <div class={classes!("container", "mx-auto", "flex", "flex-col", "items-center", "px-4", "py-16")}>
            <LoadingSpinner size={SpinnerSize::Large} label={Some(AttrValue::from(t::MESSAGE))} />
        </div>
    }
}
