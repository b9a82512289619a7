use times_roman_shared::{
    forms::{check, FieldErrors, LoginForm, SignupForm},
    meta::PageMeta,
    session::post_login_target,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    auth_context::use_auth,
    components::form_field::FormField,
    i18n::current::auth_page as t,
    router::{AuthQuery, Route},
    seo::use_page_meta,
};

/// Route for a same-site path such as `/article/a1?x=1`; unknown paths land
/// on the not-found page.
fn route_for_path(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or("/");
    Route::recognize(path).unwrap_or(Route::NotFound)
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let location = use_location();
    let from = location
        .and_then(|loc| loc.query::<AuthQuery>().ok())
        .and_then(|query| query.from);
    let target = post_login_target(from.as_deref());

    let is_login = use_state(|| true);
    let login = use_state(LoginForm::default);
    let signup = use_state(SignupForm::default);
    let errors = use_state(FieldErrors::default);
    let loading = auth.loading();

    use_page_meta(PageMeta::simple(if *is_login { t::SIGN_IN_TITLE } else { t::SIGN_UP_TITLE }));

    {
        let navigator = navigator.clone();
        let target = target.clone();
        use_effect_with(auth.status().is_authenticated(), move |signed_in| {
            if *signed_in {
                if let Some(navigator) = navigator {
                    navigator.replace(&route_for_path(&target));
                }
            }
            || ()
        });
    }

    let toggle_form = {
        let is_login = is_login.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            errors.set(FieldErrors::default());
            is_login.set(!*is_login);
        })
    };

    let on_google = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            auth.sign_in_with_google();
        })
    };

    let on_login_submit = {
        let auth = auth.clone();
        let login = login.clone();
        let errors = errors.clone();
        let navigator = navigator.clone();
        let target = target.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = (*login).clone();
            if let Err(failures) = check(&form) {
                errors.set(failures);
                return;
            }
            errors.set(FieldErrors::default());
            let auth = auth.clone();
            let navigator = navigator.clone();
            let target = target.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if auth.sign_in(form.email.trim(), &form.password).await {
                    if let Some(navigator) = navigator {
                        navigator.replace(&route_for_path(&target));
                    }
                }
            });
        })
    };

    let on_signup_submit = {
        let auth = auth.clone();
        let signup = signup.clone();
        let errors = errors.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = (*signup).clone();
            if let Err(failures) = check(&form) {
                errors.set(failures);
                return;
            }
            errors.set(FieldErrors::default());
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                auth.sign_up(form.email.trim(), &form.password).await;
            });
        })
    };

    let error_for = |field: &str| errors.get(field).cloned();

    let fields = if *is_login {
        let set_email = {
            let login = login.clone();
            Callback::from(move |value: String| login.set(LoginForm { email: value, ..(*login).clone() }))
        };
        let set_password = {
            let login = login.clone();
            Callback::from(move |value: String| login.set(LoginForm { password: value, ..(*login).clone() }))
        };
        html! {
            <form onsubmit={on_login_submit} class="space-y-4" novalidate={true}>
                <FormField
                    name="email"
                    label={t::EMAIL}
                    value={login.email.clone()}
                    oninput={set_email}
                    input_type="email"
                    placeholder={Some(AttrValue::from(t::EMAIL_PLACEHOLDER))}
                    autocomplete={Some(AttrValue::from("email"))}
                    error={error_for("email")}
                    disabled={loading}
                />
                <FormField
                    name="password"
                    label={t::PASSWORD}
                    value={login.password.clone()}
                    oninput={set_password}
                    input_type="password"
                    placeholder={Some(AttrValue::from(t::PASSWORD_PLACEHOLDER))}
                    autocomplete={Some(AttrValue::from("current-password"))}
                    error={error_for("password")}
                    disabled={loading}
                />
                <button type="submit" disabled={loading} class={classes!(PRIMARY_BUTTON)}>
                    { if loading { t::SIGNING_IN } else { t::SIGN_IN } }
                </button>
            </form>
        }
    } else {
        let set_email = {
            let signup = signup.clone();
            Callback::from(move |value: String| signup.set(SignupForm { email: value, ..(*signup).clone() }))
        };
        let set_password = {
            let signup = signup.clone();
            Callback::from(move |value: String| signup.set(SignupForm { password: value, ..(*signup).clone() }))
        };
        let set_confirm = {
            let signup = signup.clone();
            Callback::from(move |value: String| {
                signup.set(SignupForm { confirm_password: value, ..(*signup).clone() })
            })
        };
        html! {
            <form onsubmit={on_signup_submit} class="space-y-4" novalidate={true}>
                <FormField
                    name="email"
                    label={t::EMAIL}
                    value={signup.email.clone()}
                    oninput={set_email}
                    input_type="email"
                    placeholder={Some(AttrValue::from(t::EMAIL_PLACEHOLDER))}
                    autocomplete={Some(AttrValue::from("email"))}
                    error={error_for("email")}
                    disabled={loading}
                />
                <FormField
                    name="password"
                    label={t::PASSWORD}
                    value={signup.password.clone()}
                    oninput={set_password}
                    input_type="password"
                    placeholder={Some(AttrValue::from(t::PASSWORD_PLACEHOLDER))}
                    autocomplete={Some(AttrValue::from("new-password"))}
                    error={error_for("password")}
                    disabled={loading}
                />
                <FormField
                    name="confirm_password"
                    label={t::CONFIRM_PASSWORD}
                    value={signup.confirm_password.clone()}
                    oninput={set_confirm}
                    input_type="password"
                    placeholder={Some(AttrValue::from(t::PASSWORD_PLACEHOLDER))}
                    autocomplete={Some(AttrValue::from("new-password"))}
                    error={error_for("confirm_password")}
                    disabled={loading}
                />
                <button type="submit" disabled={loading} class={classes!(PRIMARY_BUTTON)}>
                    { if loading { t::CREATING_ACCOUNT } else { t::CREATE_ACCOUNT } }
                </button>
            </form>
        }
    };

    html! {
        <section class={classes!("container", "mx-auto", "max-w-md", "px-4", "py-8")}>
            <div class={classes!("mb-6", "text-center")}>
                <h1 class={classes!("font-serif", "text-3xl", "font-bold")}>
                    { if *is_login { t::WELCOME_BACK } else { t::CREATE_ACCOUNT } }
                </h1>
                <p class={classes!("mt-2", "text-gray-600")}>
                    { if *is_login { t::SIGN_IN_SUBTITLE } else { t::SIGN_UP_SUBTITLE } }
                </p>
            </div>

            <button
                type="button"
                onclick={on_google}
                disabled={loading}
                class={classes!(
                    "mb-4", "flex", "w-full", "items-center", "justify-center", "gap-2", "rounded-md",
                    "border", "border-gray-300", "bg-white", "px-4", "py-2", "text-sm", "font-medium",
                    "hover:bg-gray-50", "disabled:opacity-50"
                )}
            >
                <i class="fab fa-google" aria-hidden="true"></i>
                { if *is_login { t::GOOGLE_SIGN_IN } else { t::GOOGLE_SIGN_UP } }
            </button>

            <div class={classes!("relative", "my-6")}>
                <hr class="border-gray-200" />
                <span class={classes!(
                    "absolute", "left-1/2", "top-1/2", "-translate-x-1/2", "-translate-y-1/2",
                    "bg-white", "px-2", "text-xs", "text-gray-500"
                )}>
                    { t::OR }
                </span>
            </div>

            { fields }

            <div class={classes!("mt-6", "text-center")}>
                <button
                    type="button"
                    onclick={toggle_form}
                    class={classes!("text-sm", "font-medium", "text-blue-600", "hover:underline")}
                >
                    { if *is_login { t::TO_SIGN_UP } else { t::TO_SIGN_IN } }
                </button>
            </div>
        </section>
    }
}

const PRIMARY_BUTTON: &str = "w-full rounded-md bg-blue-600 px-4 py-2 text-sm font-medium text-white \
                              hover:bg-blue-700 disabled:opacity-50";

#[cfg(test)]
mod tests {
    use super::route_for_path;
    use crate::router::Route;

    #[test]
    fn sign_in_returns_to_known_routes() {
        assert_eq!(route_for_path("/profile"), Route::Profile);
        assert_eq!(
            route_for_path("/article/a1?ref=nav"),
            Route::Article {
                id: "a1".to_string()
            }
        );
        assert_eq!(route_for_path("/"), Route::Home);
    }
}
