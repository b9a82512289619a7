use yew::prelude::*;
use yew_router::prelude::*;

use crate::{auth_context::use_auth, i18n::current::user_menu as t, router::Route};

#[function_component(UserMenu)]
pub fn user_menu() -> Html {
    let auth = use_auth();
    let is_open = use_state(|| false);
    let navigator = use_navigator();

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let close = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(false))
    };

    let sign_out = {
        let auth = auth.clone();
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| {
            is_open.set(false);
            let auth = auth.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if auth.sign_out().await {
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::Home);
                    }
                }
            });
        })
    };

    let status = auth.status();
    let Some(user) = status.user() else {
        return html! {
            <Link<Route> to={Route::Auth} classes={classes!("inline-flex", "items-center", "gap-2", "rounded-md", "px-3", "py-1.5", "text-sm", "hover:bg-gray-100")}>
                <i class="fas fa-user-circle text-lg" aria-hidden="true"></i>
                <span class={classes!("hidden", "md:inline")}>{ t::SIGN_IN }</span>
            </Link<Route>>
        };
    };

    html! {
        <div class="relative">
            <button
                type="button"
                onclick={toggle}
                aria-haspopup="menu"
                aria-expanded={(*is_open).to_string()}
                class={classes!("inline-flex", "items-center", "gap-2", "rounded-md", "px-3", "py-1.5", "text-sm", "hover:bg-gray-100")}
            >
                <i class="fas fa-user-circle text-lg" aria-hidden="true"></i>
                <span class={classes!("hidden", "md:inline")}>{ user.display_name() }</span>
            </button>
            {
                if *is_open {
                    html! {
                        <div
                            role="menu"
                            class={classes!("absolute", "right-0", "z-[95]", "mt-2", "w-56", "rounded-md", "border", "border-gray-200", "bg-white", "py-1", "shadow-lg")}
                        >
                            <div class={classes!("px-3", "py-2", "text-sm", "font-medium")}>
                                <p class="truncate">{ t::SIGNED_IN_AS }</p>
                                <p class={classes!("truncate", "text-gray-500")}>
                                    { user.email.clone().unwrap_or_default() }
                                </p>
                            </div>
                            <hr class="border-gray-100" />
                            <div onclick={close}>
                                <Link<Route>
                                    to={Route::Profile}
                                    classes={classes!("flex", "w-full", "items-center", "gap-2", "px-3", "py-2", "text-sm", "hover:bg-gray-100")}
                                >
                                    <i class="fas fa-user" aria-hidden="true"></i>
                                    { t::PROFILE }
                                </Link<Route>>
                            </div>
                            <hr class="border-gray-100" />
                            <button
                                type="button"
                                role="menuitem"
                                onclick={sign_out}
                                disabled={auth.loading()}
                                class={classes!("flex", "w-full", "items-center", "gap-2", "px-3", "py-2", "text-sm", "text-red-500", "hover:bg-gray-100")}
                            >
                                <i class="fas fa-right-from-bracket" aria-hidden="true"></i>
                                { t::SIGN_OUT }
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
