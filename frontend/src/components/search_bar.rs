use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    i18n::current::search_bar as t,
    router::{Route, SearchQuery},
};

/// Search icon that opens a small dialog; submitting a non-blank query goes
/// to `/search?q=...`.
#[function_component(SearchBar)]
pub fn search_bar() -> Html {
    let is_open = use_state(|| false);
    let query = use_state(String::new);
    let navigator = use_navigator();
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with(*is_open, move |open| {
            // Focus once the dialog has been painted; dropping the handle cancels it.
            let pending = open.then(|| {
                Timeout::new(0, move || {
                    if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                        let _ = input.focus();
                    }
                })
            });
            move || drop(pending)
        });
    }

    let open = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(true))
    };

    let close = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(false))
    };

    let on_keydown = {
        let is_open = is_open.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                is_open.set(false);
            }
        })
    };

    let on_input = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                query.set(target.value());
            }
        })
    };

    let on_submit = {
        let query = query.clone();
        let is_open = is_open.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let trimmed = query.trim();
            if trimmed.is_empty() {
                return;
            }
            is_open.set(false);
            if let Some(navigator) = navigator.as_ref() {
                let params = SearchQuery {
                    q: Some(trimmed.to_string()),
                };
                if let Err(err) = navigator.push_with_query(&Route::Search, &params) {
                    tracing::warn!(error = ?err, "failed to open search results");
                }
            }
        })
    };

    html! {
        <>
            <button
                type="button"
                onclick={open}
                class={classes!("rounded-full", "p-1", "text-gray-500", "hover:bg-gray-100", "hover:text-gray-700")}
            >
                <i class="fas fa-search" aria-hidden="true"></i>
                <span class="sr-only">{ t::OPEN_LABEL }</span>
            </button>
            {
                if *is_open {
                    html! {
                        <div
                            class={classes!("fixed", "inset-0", "z-[90]", "flex", "items-start", "justify-center", "bg-black/40", "pt-24")}
                            onkeydown={on_keydown}
                        >
                            <div
                                class={classes!("w-full", "max-w-md", "rounded-lg", "bg-white", "p-6", "shadow-xl")}
                                role="dialog"
                                aria-modal="true"
                                aria-label={t::DIALOG_TITLE}
                            >
                                <div class={classes!("mb-4", "flex", "items-center", "justify-between")}>
                                    <h2 class={classes!("text-lg", "font-semibold")}>{ t::DIALOG_TITLE }</h2>
                                    <button type="button" onclick={close} aria-label={t::CLOSE_ARIA}>{"×"}</button>
                                </div>
                                <form onsubmit={on_submit} class={classes!("flex", "items-center", "space-x-2")}>
                                    <input
                                        ref={input_ref}
                                        type="search"
                                        placeholder={t::PLACEHOLDER}
                                        value={(*query).clone()}
                                        oninput={on_input}
                                        class={classes!("w-full", "rounded-md", "border", "border-gray-300", "px-3", "py-2")}
                                    />
                                    <button
                                        type="submit"
                                        class={classes!("rounded-md", "bg-black", "px-4", "py-2", "text-white")}
                                    >
                                        { t::SUBMIT }
                                    </button>
                                </form>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}
